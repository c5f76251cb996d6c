use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};

use crate::error::ReadFailure;
use crate::models::table::zip_row;
use crate::models::{ParsedTable, Row, TypedValue};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Reads the first sheet of an `xlsx`/`xls` workbook.
pub fn parse(path: &Path, file_name: &str) -> Result<ParsedTable, ReadFailure> {
    // The workbook handle is dropped on every return path below.
    let mut workbook = open_workbook_auto(path)?;
    let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
        return Err(ReadFailure::Malformed("workbook has no sheets".to_string()));
    };

    let values = workbook.worksheet_range(&sheet_name)?;
    let formulas = match workbook.worksheet_formula(&sheet_name) {
        Ok(formulas) => formulas,
        Err(e) => {
            tracing::warn!(file = file_name, sheet = %sheet_name, error = %e, "formulas unavailable, reading values only");
            Range::empty()
        }
    };

    let (headers, rows) = build_table(&values, &formulas);
    tracing::debug!(file = file_name, headers = headers.len(), rows = rows.len(), "parsed workbook");
    Ok(ParsedTable::new(file_name, headers, rows))
}

/// Splits a sheet into a header row and positional data rows.
///
/// `formulas` shares absolute coordinates with `values`; a non-empty formula
/// at a position replaces the cached value there. Rows with neither a value
/// nor a formula in any column are gaps in the sheet and produce no row.
pub fn build_table(values: &Range<Data>, formulas: &Range<String>) -> (Vec<String>, Vec<Row>) {
    let Some((start_row, start_col)) = values.start() else {
        return (Vec::new(), Vec::new());
    };
    let formula_at = |row: usize, col: usize| {
        let absolute = (start_row + row as u32, start_col + col as u32);
        formulas.get_value(absolute).filter(|f| !f.is_empty())
    };
    let cell_at = |row: usize, col: usize| -> TypedValue {
        if let Some(formula) = formula_at(row, col) {
            return TypedValue::String(formula.clone());
        }
        values
            .get((row, col))
            .map(coerce_cell)
            .unwrap_or_else(TypedValue::empty)
    };

    let header_len = values
        .rows()
        .next()
        .and_then(|first| first.iter().rposition(|cell| !matches!(cell, Data::Empty)))
        .map_or(0, |last| last + 1);

    let headers: Vec<String> = (0..header_len).map(|col| cell_at(0, col).to_string()).collect();
    let is_gap = |row: usize| {
        (0..values.width()).all(|col| {
            matches!(values.get((row, col)), None | Some(Data::Empty))
                && formula_at(row, col).is_none()
        })
    };
    let rows = (1..values.height())
        .filter(|&row| !is_gap(row))
        .map(|row| zip_row(&headers, (0..headers.len()).map(|col| cell_at(row, col))))
        .collect();

    (headers, rows)
}

/// Converts one native cell into a typed value.
pub fn coerce_cell(cell: &Data) -> TypedValue {
    match cell {
        Data::String(s) => TypedValue::String(s.clone()),
        Data::Int(i) => TypedValue::Integer(*i),
        Data::Float(f) => {
            let truncated = *f as i64;
            if *f == truncated as f64 {
                TypedValue::Integer(truncated)
            } else {
                TypedValue::Double(*f)
            }
        }
        Data::Bool(b) => TypedValue::Boolean(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| TypedValue::String(d.format(DATE_FORMAT).to_string()))
            .unwrap_or_else(|| TypedValue::String(cell.to_string())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => TypedValue::String(s.clone()),
        Data::Error(_) | Data::Empty => TypedValue::empty(),
    }
}
