//! Input validation errors.

use thiserror::Error;

/// Rejected input. Nothing is coerced; the caller gets the reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must be a non-negative whole number, got {value}")]
    NegativeStat { field: &'static str, value: i64 },

    #[error("{field} value {value} is out of range")]
    OutOfRange { field: &'static str, value: i64 },

    #[error("{made_field} ({made}) exceeds {attempted_field} ({attempted})")]
    MadeExceedsAttempted {
        made_field: &'static str,
        made: u32,
        attempted_field: &'static str,
        attempted: u32,
    },

    #[error("invalid game status transition: {from} -> {to}")]
    StatusTransition { from: String, to: String },

    #[error("{0}")]
    Other(String),
}

/// Convert a signed inbound value into a counting stat.
pub fn counting_stat(field: &'static str, value: i64) -> Result<u32, ValidationError> {
    if value < 0 {
        return Err(ValidationError::NegativeStat { field, value });
    }
    u32::try_from(value).map_err(|_| ValidationError::OutOfRange { field, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_stat_accepts_zero_and_positive() {
        assert_eq!(counting_stat("points", 0), Ok(0));
        assert_eq!(counting_stat("points", 31), Ok(31));
    }

    #[test]
    fn test_counting_stat_rejects_negative() {
        let err = counting_stat("rebounds", -2).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NegativeStat {
                field: "rebounds",
                value: -2
            }
        );
        assert!(err.to_string().contains("rebounds"));
    }

    #[test]
    fn test_counting_stat_rejects_overflow() {
        assert!(matches!(
            counting_stat("minutes", i64::MAX),
            Err(ValidationError::OutOfRange { .. })
        ));
    }
}
