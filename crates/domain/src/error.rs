//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`HomeError`]
//! via `#[from]` (or an explicit `From` impl for boxed sources).

/// Top-level error for every fallible homesim operation.
#[derive(Debug, thiserror::Error)]
pub enum HomeError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// A read or write on the log store failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Input that violates a domain invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid time of day {0:?}, expected HH:MM")]
    InvalidTimeOfDay(String),

    #[error("unknown device {0:?}")]
    UnknownDevice(String),

    #[error("unknown power state {0:?}, expected ON or OFF")]
    UnknownPowerState(String),

    /// A builder was finished without a required collaborator.
    #[error("missing required field {0}")]
    MissingField(&'static str),
}

/// A lookup that matched nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_validation_error_into_home_error() {
        let err: HomeError = ValidationError::MissingField("store").into();
        assert!(matches!(
            err,
            HomeError::Validation(ValidationError::MissingField("store"))
        ));
    }

    #[test]
    fn should_display_not_found_with_entity_and_id() {
        let err = NotFoundError {
            entity: "Device",
            id: "Heater".to_string(),
        };
        assert_eq!(err.to_string(), "Device Heater not found");
    }

    #[test]
    fn should_display_invalid_time_of_day() {
        let err = ValidationError::InvalidTimeOfDay("25:00".to_string());
        assert_eq!(
            err.to_string(),
            "invalid time of day \"25:00\", expected HH:MM"
        );
    }
}
