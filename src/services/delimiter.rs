use std::sync::LazyLock;

use regex::Regex;

static SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("valid space-run pattern"));

/// Field separators recognised in free-form text, in detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Tab,
    Pipe,
    Semicolon,
    /// Two or more consecutive spaces.
    SpaceRun,
}

impl Delimiter {
    pub const CANDIDATES: [Delimiter; 4] = [
        Delimiter::Tab,
        Delimiter::Pipe,
        Delimiter::Semicolon,
        Delimiter::SpaceRun,
    ];

    /// Splits `line`, dropping trailing empty fields.
    pub fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        let mut fields: Vec<&str> = match self {
            Self::Tab => line.split('\t').collect(),
            Self::Pipe => line.split('|').collect(),
            Self::Semicolon => line.split(';').collect(),
            Self::SpaceRun => SPACE_RUN.split(line).collect(),
        };
        while fields.last().is_some_and(|field| field.is_empty()) {
            fields.pop();
        }
        fields
    }
}

/// Picks the first candidate that yields more than one field on `sample`.
pub fn detect(sample: &str) -> Option<Delimiter> {
    Delimiter::CANDIDATES
        .into_iter()
        .find(|delimiter| delimiter.split(sample).len() > 1)
}
