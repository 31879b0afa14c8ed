use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};

/// A single spreadsheet cell value, used both for function arguments
/// and for results.
///
/// Results are always either `Number` (success) or `Text` (a rendered
/// error, or a string result such as a phase name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// `true` for a rendered error string.
    pub fn is_error(&self) -> bool {
        self.as_text()
            .is_some_and(|s| s.starts_with("Error") || s.starts_with("ERROR"))
    }

    /// Blank cells and whitespace-only strings.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Read a required name argument (property code, fluid, parameter).
    pub(crate) fn name_arg(&self, what: &'static str) -> Result<&str> {
        match self {
            CellValue::Text(s) if !s.trim().is_empty() => Ok(s.trim()),
            CellValue::Number(x) => Err(CalcError::InvalidInput(format!(
                "{what} must be text, got {x}"
            ))),
            _ => Err(CalcError::MissingArgument(what)),
        }
    }

    /// Read a required numeric argument.
    pub(crate) fn number_arg(&self, what: &'static str) -> Result<f64> {
        match self {
            CellValue::Number(x) => Ok(*x),
            CellValue::Empty => Err(CalcError::MissingArgument(what)),
            CellValue::Text(_) => Err(CalcError::NonNumericInput(what)),
        }
    }
}

impl From<f64> for CellValue {
    fn from(x: f64) -> Self { CellValue::Number(x) }
}

impl From<i32> for CellValue {
    fn from(x: i32) -> Self { CellValue::Number(x.into()) }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self { CellValue::Text(s.to_string()) }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self { CellValue::Text(s) }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(CellValue::Empty, Into::into)
    }
}

impl<T: Into<CellValue>> From<Result<T>> for CellValue {
    /// Errors become their rendered message; this is the single place
    /// where a failure turns into cell content.
    fn from(r: Result<T>) -> Self {
        match r {
            Ok(v) => v.into(),
            Err(e) => CellValue::Text(e.to_string()),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(x) => write!(f, "{x}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}
