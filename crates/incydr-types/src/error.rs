use std::fmt;

/// Result type for incydr-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug)]
pub enum Error {
    /// Field name does not exist on the schema at all
    UnknownField { schema: &'static str, field: String },

    /// Path descends through a field that is not a singular nested schema
    NotNested { schema: &'static str, field: String },

    /// Record construction failed
    Validation(ValidationError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownField { schema, field } => {
                write!(f, "Unknown field '{}' for model: {}", field, schema)
            }
            Error::NotNested { schema, field } => write!(
                f,
                "Field '{}' of model {} is not a nested model and cannot be traversed",
                field, schema
            ),
            Error::Validation(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Validation(err) => Some(err),
            Error::UnknownField { .. } | Error::NotNested { .. } => None,
        }
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(err)
    }
}

/// A single failed field, located by its path from the record root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
}

impl FieldError {
    pub fn new(loc: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            loc: vec![loc.into()],
            msg: msg.into(),
        }
    }

    /// Prefix the location with the parent field it was found under.
    pub fn nested_under(mut self, parent: &str) -> Self {
        self.loc.insert(0, parent.to_string());
        self
    }
}

/// Every field-level problem found while constructing one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub model: &'static str,
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(model: &'static str, errors: Vec<FieldError>) -> Self {
        Self { model, errors }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.errors.len();
        write!(
            f,
            "{} validation error{} for {}",
            count,
            if count == 1 { "" } else { "s" },
            self.model
        )?;
        for err in &self.errors {
            write!(f, "\n{}\n  {}", err.loc.join(" -> "), err.msg)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_message_lists_each_location() {
        let err = ValidationError::new(
            "Alert",
            vec![
                FieldError::new("size", "value is not a valid integer"),
                FieldError::new("md5", "field required").nested_under("hash"),
            ],
        );

        assert_eq!(
            err.to_string(),
            "2 validation errors for Alert\nsize\n  value is not a valid integer\nhash -> md5\n  field required"
        );
    }

    #[test]
    fn test_single_validation_error_is_singular() {
        let err = ValidationError::new("Note", vec![FieldError::new("id", "field required")]);
        assert!(err.to_string().starts_with("1 validation error for Note"));
    }
}
