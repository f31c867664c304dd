use thiserror::Error;

/// Error type for the collaborator boundaries around the emissions pipeline.
///
/// The pipeline functions themselves are total and never produce these; they are
/// raised while loading configuration, ingesting raw rows, validating requests and
/// moving submissions through the approval workflow.
#[derive(Error, Debug)]
pub enum LivestockError {
    #[error("{0}")]
    Error(String),
    #[error("Unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
    #[error("Invalid {field}: {value} (expected a finite value in [{min}, {max}])")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("Invalid {field}: {value} (expected a finite value greater than 0)")]
    NotPositive { field: String, value: f64 },
    #[error("Invalid row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },
    #[error("Cannot move submission from '{from}' to '{to}'")]
    InvalidTransition { from: String, to: String },
    #[error("Failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type for `Result<T, LivestockError>`.
pub type LivestockResult<T> = Result<T, LivestockError>;

impl LivestockError {
    /// Build an [`LivestockError::OutOfRange`] for a fraction expected in `[0, 1]`.
    pub fn fraction(field: impl Into<String>, value: f64) -> Self {
        Self::OutOfRange {
            field: field.into(),
            value,
            min: 0.0,
            max: 1.0,
        }
    }

    /// Build an [`LivestockError::OutOfRange`] for a value expected in `[0, inf)`.
    pub fn non_negative(field: impl Into<String>, value: f64) -> Self {
        Self::OutOfRange {
            field: field.into(),
            value,
            min: 0.0,
            max: f64::INFINITY,
        }
    }

    /// Prefix the field of a range error with the section it was found in.
    pub fn within(self, section: &str) -> Self {
        match self {
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => Self::OutOfRange {
                field: format!("{section}.{field}"),
                value,
                min,
                max,
            },
            Self::NotPositive { field, value } => Self::NotPositive {
                field: format!("{section}.{field}"),
                value,
            },
            other => other,
        }
    }
}

/// Check that `value` is finite and not negative.
pub fn check_non_negative(field: &str, value: f64) -> LivestockResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(LivestockError::non_negative(field, value))
    }
}
