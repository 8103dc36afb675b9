use thiserror::Error;

use crate::domain::PassengerField;

/// Rejection of a single form edit. The draft keeps its previous value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("unknown passenger field '{0}'")]
    UnknownField(String),
    #[error("{field} must be a number (got '{raw}')")]
    NotANumber { field: PassengerField, raw: String },
    #[error("{field} must not be negative")]
    Negative { field: PassengerField },
    #[error("{field} must be a whole number")]
    NotWhole { field: PassengerField },
    #[error("{field} must be one of {expected} (got '{raw}')")]
    UnknownOption {
        field: PassengerField,
        expected: &'static str,
        raw: String,
    },
}

impl FieldError {
    pub fn field(&self) -> Option<PassengerField> {
        match self {
            Self::UnknownField(_) => None,
            Self::NotANumber { field, .. }
            | Self::Negative { field }
            | Self::NotWhole { field }
            | Self::UnknownOption { field, .. } => Some(*field),
        }
    }
}
