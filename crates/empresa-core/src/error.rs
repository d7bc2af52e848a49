use thiserror::Error;

/// A field failed a validation rule before being persisted.
///
/// Every variant names the offending field using its stored (document) name,
/// e.g. `nombre`, `sueldo`, `email`, `slogan`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} cannot exceed {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} cannot be negative")]
    Negative { field: &'static str },

    #[error("{field} has an invalid format: {value}")]
    InvalidFormat { field: &'static str, value: String },

    #[error("{field} must be unique: {value} already exists")]
    NotUnique { field: &'static str, value: String },
}

impl ValidationError {
    /// The document field the failed rule applies to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Required { field }
            | Self::TooLong { field, .. }
            | Self::Negative { field }
            | Self::InvalidFormat { field, .. }
            | Self::NotUnique { field, .. } => field,
        }
    }
}

/// Configuration could not be loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),
}
