use incydr_types::ValidationError;
use std::fmt;

/// Result type for incydr-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while walking, resolving or exporting records
#[derive(Debug)]
pub enum Error {
    /// Unknown field name or untraversable path (caller error)
    Types(incydr_types::Error),

    /// An include pattern matched no field of the schema
    NoMatchingField {
        pattern: String,
        schema: &'static str,
        valid: Vec<String>,
    },

    /// At least one CSV row failed validation; only the first is kept
    RowValidation {
        /// 1-based data row, header excluded
        row: usize,
        /// 1-based line in the source, header included
        line: u64,
        origin: String,
        detail: ValidationError,
    },

    /// Writing needs at least one record to discover its columns
    EmptyInput,

    /// CSV reading or writing failed
    Csv(csv::Error),

    /// IO operation failed
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Types(err) => write!(f, "{}", err),
            Error::NoMatchingField {
                pattern,
                schema,
                valid,
            } => write!(
                f,
                "'{}' is not a valid field path for model: {}. Valid fields: {}",
                pattern,
                schema,
                valid.join(", ")
            ),
            Error::RowValidation {
                row,
                origin,
                detail,
                ..
            } => write!(f, "Bad data in row {} of {}\n{}", row, origin, detail),
            Error::EmptyInput => write!(f, "No records to write"),
            Error::Csv(err) => write!(f, "CSV error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Types(err) => Some(err),
            Error::RowValidation { detail, .. } => Some(detail),
            Error::Csv(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::NoMatchingField { .. } | Error::EmptyInput => None,
        }
    }
}

impl From<incydr_types::Error> for Error {
    fn from(err: incydr_types::Error) -> Self {
        Error::Types(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
