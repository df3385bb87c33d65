use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("invalid number: {token:?}")]
    ParseError { token: String },

    #[error("negatives not allowed: {}", join_values(.values))]
    NegativeNumberError { values: Vec<i64> },

    #[error("no numbers left to subtract from")]
    EmptyInputError,

    #[error("result does not fit in a 64-bit integer")]
    OverflowError,

    #[error("malformed delimiter header: {reason}")]
    HeaderError { reason: String },

    #[error("Provider request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Provider error: {message}")]
    ProviderError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value {value:?} for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

fn join_values(values: &[i64]) -> String {
    values
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl CalcError {
    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            CalcError::ParseError { .. }
            | CalcError::NegativeNumberError { .. }
            | CalcError::EmptyInputError
            | CalcError::OverflowError
            | CalcError::HeaderError { .. } => 1,
            CalcError::HttpError(_) | CalcError::ProviderError { .. } => 2,
            CalcError::IoError(_)
            | CalcError::ConfigValidationError { .. }
            | CalcError::InvalidConfigValueError { .. }
            | CalcError::MissingConfigError { .. } => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CalcError::ParseError { .. } => {
                "Separate integers with ',' or '\\n', or declare a delimiter with //<d>\\n"
            }
            CalcError::NegativeNumberError { .. } => "Remove the negative values from the input",
            CalcError::EmptyInputError => "Pass at least one number below the upper bound",
            CalcError::OverflowError => "Lower the upper bound or pass fewer numbers",
            CalcError::HeaderError { .. } => {
                "Use //<d>\\n for one delimiter or //[d1][d2]\\n for several"
            }
            CalcError::HttpError(_) | CalcError::ProviderError { .. } => {
                "Check the provider endpoint and that it is reachable"
            }
            CalcError::IoError(_) => "Check that the file exists and is readable",
            CalcError::ConfigValidationError { .. }
            | CalcError::InvalidConfigValueError { .. }
            | CalcError::MissingConfigError { .. } => "Fix the configuration file or CLI flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
