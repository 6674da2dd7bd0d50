//! Error types for nearforge

use thiserror::Error;

/// Main error type for nearforge operations.
///
/// Every variant describes a misconfigured selector graph. None of them is
/// recoverable; they propagate up and abort the solving run.
#[derive(Debug, Error)]
pub enum NearforgeError {
    /// Error in selector configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// An origin or candidate count does not fit the nearby index
    #[error(
        "The selector ({selector}) has {subject} ({size}) which is higher than the nearby index capacity ({capacity})."
    )]
    CapacityExceeded {
        selector: String,
        subject: &'static str,
        size: u64,
        capacity: u64,
    },

    /// The variable's value type cannot hold the origin entities
    #[error(
        "The selector ({selector}) has a variable ({variable}) with value type ({value_type}) \
         which is not assignable from the origin entity type ({entity_type})."
    )]
    IncompatibleVariableType {
        selector: String,
        variable: &'static str,
        value_type: &'static str,
        entity_type: &'static str,
    },

    /// The distance meter returned a value that cannot be ordered
    #[error(
        "The selector ({selector}) measured a non-comparable distance ({distance}) \
         from origin ({origin}) to candidate ({candidate})."
    )]
    InvalidDistance {
        selector: String,
        origin: usize,
        candidate: usize,
        distance: f64,
    },

    /// Invalid operation for the current phase state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type alias for nearforge operations
pub type Result<T> = std::result::Result<T, NearforgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_message_names_selector_and_bound() {
        let err = NearforgeError::CapacityExceeded {
            selector: "NearbyValueSelector(visits)".to_string(),
            subject: "a candidate count",
            size: 4_294_967_297,
            capacity: 4_294_967_295,
        };
        let message = err.to_string();
        assert!(message.contains("NearbyValueSelector(visits)"));
        assert!(message.contains("4294967297"));
        assert!(message.contains("4294967295"));
    }

    #[test]
    fn test_invalid_distance_message() {
        let err = NearforgeError::InvalidDistance {
            selector: "s".to_string(),
            origin: 3,
            candidate: 7,
            distance: f64::NAN,
        };
        assert!(err.to_string().contains("NaN"));
    }
}
