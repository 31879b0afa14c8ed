use thiserror::Error;

/// Everything that can go wrong in a single spreadsheet call.
///
/// Every message starts with an `Error:` / `ERROR:` marker because the
/// rendered string is what ends up in the cell.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    /// A required name or value argument is empty or absent.
    #[error("Error: Missing parameter ({0})")]
    MissingArgument(&'static str),

    /// A value argument is present but not a number.
    #[error("Error: Non-numeric input ({0})")]
    NonNumericInput(&'static str),

    /// The engine returned its failure sentinel (±1e308 or NaN) or an
    /// empty string result.
    #[error("Error: CoolProp failed. {0}")]
    EngineFailure(String),

    /// The engine raised an error of its own.
    #[error("Error: {0}")]
    Engine(String),

    /// The CoolProp shared library could not be loaded.
    #[error("ERROR: CoolProp not installed. {0}")]
    EngineUnavailable(String),

    /// Malformed but present input (e.g. a mixture fraction outside
    /// [0, 1]).
    #[error("Error: Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, CalcError>;
