use thiserror::Error;

/// Failures the impact core can report. Everything else it computes is total.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImpactError {
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ImpactError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ImpactError::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending field for parameter failures.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ImpactError::InvalidParameter { field, .. } => Some(field),
            ImpactError::Configuration(_) => None,
        }
    }
}
