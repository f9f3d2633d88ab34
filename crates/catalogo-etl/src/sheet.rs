//! Column-addressed access to a worksheet.
//!
//! A [`Sheet`] is the header row plus raw data rows as read from the
//! workbook. [`Record`] wraps one data row and performs all cell coercion,
//! turning bad cells into [`EtlError::InvalidRecord`] with the spreadsheet
//! row number so operators can find the cell to fix.

use std::collections::HashMap;
use std::str::FromStr;

use calamine::{Data, Range};
use rust_decimal::Decimal;

use crate::error::EtlError;

/// Spreadsheet row number of the header when a sheet starts at the top.
const DEFAULT_HEADER_ROW: usize = 1;

/// Largest magnitude an `f64` cell can have and still convert to `i64`
/// without losing integer precision.
const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Clone)]
pub struct Sheet {
    name: String,
    header_row: usize,
    columns: HashMap<String, usize>,
    rows: Vec<Vec<Data>>,
}

impl Sheet {
    /// Build a sheet from its header texts and data rows, with the header on
    /// spreadsheet row 1.
    ///
    /// Header text is trimmed; blank headers are ignored and the first
    /// occurrence of a repeated header wins.
    #[must_use]
    pub fn new(name: impl Into<String>, headers: &[String], rows: Vec<Vec<Data>>) -> Self {
        let mut columns = HashMap::new();
        for (idx, header) in headers.iter().enumerate() {
            let header = header.trim();
            if !header.is_empty() {
                columns.entry(header.to_string()).or_insert(idx);
            }
        }
        Self {
            name: name.into(),
            header_row: DEFAULT_HEADER_ROW,
            columns,
            rows,
        }
    }

    /// Build a sheet from a calamine range, treating its first row as headers.
    ///
    /// calamine trims leading empty rows, so the header's spreadsheet row is
    /// taken from the range start.
    #[must_use]
    pub fn from_range(name: &str, range: &Range<Data>) -> Self {
        let header_row = range
            .start()
            .map_or(DEFAULT_HEADER_ROW, |(row, _)| row as usize + 1);
        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .map(|header| {
                header
                    .iter()
                    .map(|cell| cell_text(cell).unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default();
        let data = rows.map(<[Data]>::to_vec).collect();
        Self {
            header_row,
            ..Self::new(name, &headers, data)
        }
    }

    /// 1-based spreadsheet row holding the headers.
    #[must_use]
    pub fn header_row(&self) -> usize {
        self.header_row
    }

    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// Checks that every column in `required` has a header.
    ///
    /// # Errors
    ///
    /// Returns [`EtlError::MissingColumn`] naming the first absent column.
    pub fn require_columns(&self, required: &[&str]) -> Result<(), EtlError> {
        match required.iter().find(|c| !self.has_column(c)) {
            Some(column) => Err(EtlError::MissingColumn {
                sheet: self.name.clone(),
                column: (*column).to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Data rows in sheet order, skipping rows where every cell is blank.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, cells)| !cells.iter().all(is_missing))
            .map(move |(idx, cells)| Record {
                sheet: self,
                row: self.header_row + 1 + idx,
                cells,
            })
    }
}

/// One data row of a [`Sheet`].
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    sheet: &'a Sheet,
    row: usize,
    cells: &'a [Data],
}

impl<'a> Record<'a> {
    /// 1-based row number as shown by spreadsheet applications.
    #[must_use]
    pub fn row(&self) -> usize {
        self.row
    }

    fn cell(&self, column: &str) -> Option<&'a Data> {
        let idx = *self.sheet.columns.get(column)?;
        self.cells.get(idx)
    }

    #[must_use]
    pub fn invalid(&self, field: &str, reason: impl Into<String>) -> EtlError {
        EtlError::InvalidRecord {
            sheet: self.sheet.name.clone(),
            row: self.row,
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Trimmed cell text; `None` for blank cells or absent columns.
    #[must_use]
    pub fn text(&self, column: &str) -> Option<String> {
        self.cell(column).and_then(cell_text)
    }

    /// # Errors
    ///
    /// Returns [`EtlError::InvalidRecord`] when the cell is blank.
    pub fn required_text(&self, column: &str) -> Result<String, EtlError> {
        self.text(column)
            .ok_or_else(|| self.invalid(column, "value is required"))
    }

    /// # Errors
    ///
    /// Returns [`EtlError::InvalidRecord`] when the cell holds something
    /// other than a whole number.
    pub fn integer(&self, column: &str) -> Result<Option<i64>, EtlError> {
        match self.cell(column) {
            Some(cell) => cell_integer(cell).map_err(|reason| self.invalid(column, reason)),
            None => Ok(None),
        }
    }

    /// # Errors
    ///
    /// Returns [`EtlError::InvalidRecord`] when the cell is blank or not a
    /// whole number.
    pub fn required_integer(&self, column: &str) -> Result<i64, EtlError> {
        self.integer(column)?
            .ok_or_else(|| self.invalid(column, "value is required"))
    }

    /// # Errors
    ///
    /// Returns [`EtlError::InvalidRecord`] when the cell is not numeric.
    pub fn decimal(&self, column: &str) -> Result<Option<Decimal>, EtlError> {
        match self.cell(column) {
            Some(cell) => cell_decimal(cell).map_err(|reason| self.invalid(column, reason)),
            None => Ok(None),
        }
    }

    /// # Errors
    ///
    /// Returns [`EtlError::InvalidRecord`] when the cell is blank or not numeric.
    pub fn required_decimal(&self, column: &str) -> Result<Decimal, EtlError> {
        self.decimal(column)?
            .ok_or_else(|| self.invalid(column, "value is required"))
    }

    /// Any cell rendered as display text; blank becomes `""`.
    #[must_use]
    pub fn scalar(&self, column: &str) -> String {
        self.text(column).unwrap_or_default()
    }
}

/// Blank, whitespace-only, and spreadsheet error cells carry no value.
pub(crate) fn is_missing(cell: &Data) -> bool {
    match cell {
        Data::Empty | Data::Error(_) => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

pub(crate) fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(format_number(*f)),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(dt.to_string()),
    }
}

/// Spreadsheets store every number as a float; whole values are shown
/// without a fractional part (`500.0` → `"500"`).
#[allow(clippy::cast_possible_truncation)]
fn format_number(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < MAX_EXACT_FLOAT_INT {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}

#[allow(clippy::cast_possible_truncation)]
fn float_to_integer(f: f64) -> Result<i64, String> {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < MAX_EXACT_FLOAT_INT {
        Ok(f as i64)
    } else {
        Err(format!("expected a whole number, found {f}"))
    }
}

fn cell_integer(cell: &Data) -> Result<Option<i64>, String> {
    match cell {
        Data::Empty | Data::Error(_) => Ok(None),
        Data::Int(i) => Ok(Some(*i)),
        Data::Float(f) => float_to_integer(*f).map(Some),
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            if let Ok(i) = trimmed.parse::<i64>() {
                return Ok(Some(i));
            }
            match trimmed.parse::<f64>() {
                Ok(f) => float_to_integer(f).map(Some),
                Err(_) => Err(format!("expected a whole number, found '{trimmed}'")),
            }
        }
        other => Err(format!("expected a whole number, found {other:?}")),
    }
}

fn cell_decimal(cell: &Data) -> Result<Option<Decimal>, String> {
    match cell {
        Data::Empty | Data::Error(_) => Ok(None),
        Data::Int(i) => Ok(Some(Decimal::from(*i))),
        // `f64::to_string` yields the shortest text that round-trips, so a
        // cell showing 9.005 becomes exactly 9.005 rather than 9.00499...
        Data::Float(f) => parse_decimal(&f.to_string()).map(Some),
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                parse_decimal(trimmed).map(Some)
            }
        }
        other => Err(format!("expected a number, found {other:?}")),
    }
}

fn parse_decimal(raw: &str) -> Result<Decimal, String> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| format!("expected a number, found '{raw}'"))
}

#[cfg(test)]
#[path = "sheet_test.rs"]
mod tests;
