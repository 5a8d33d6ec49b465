//! Error types for the dispatch engine.
//!
//! Pricing never fails, so the only errors here come from date parsing,
//! schedule edits that reference missing stops, and the structured order-line
//! format.

use thiserror::Error;

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Errors raised by the dispatch engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// A delivery date could not be parsed.
    #[error("invalid delivery date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    /// An edit referenced a stop that is not part of the schedule.
    #[error("stop '{0}' not found in schedule")]
    StopNotFound(String),

    /// A reorder target is outside the stop list.
    #[error("position {position} is out of range for a schedule with {len} stops")]
    InvalidPosition { position: usize, len: usize },

    /// A stop id was added twice to the same schedule.
    #[error("stop '{0}' already exists in schedule")]
    DuplicateStop(String),

    /// A line in `<qty>x <name> @$<price>` format could not be parsed.
    #[error("invalid order line '{line}': {reason}")]
    InvalidOrderLine { line: String, reason: String },

    /// A pricing table override was rejected.
    #[error("invalid pricing table: {0}")]
    InvalidPricingTable(String),
}

impl DispatchError {
    pub(crate) fn invalid_date(input: impl Into<String>, reason: impl ToString) -> Self {
        DispatchError::InvalidDate {
            input: input.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn invalid_order_line(line: impl Into<String>, reason: impl Into<String>) -> Self {
        DispatchError::InvalidOrderLine {
            line: line.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error refers to something that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DispatchError::StopNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = DispatchError::invalid_date("2024-13-40", "input is out of range");
        assert_eq!(
            err.to_string(),
            "invalid delivery date '2024-13-40': input is out of range"
        );

        let err = DispatchError::InvalidPosition { position: 5, len: 2 };
        assert!(err.to_string().contains("position 5"));
    }

    #[test]
    fn test_is_not_found() {
        assert!(DispatchError::StopNotFound("s1".into()).is_not_found());
        assert!(!DispatchError::DuplicateStop("s1".into()).is_not_found());
    }
}
