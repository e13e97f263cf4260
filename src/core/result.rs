//! Validation result algebra
//!
//! Results are plain immutable data: every failure the engine can produce is
//! folded into these types, and the only way a caller observes failure is by
//! inspecting them. `validate`/`validate_target` never surface errors through
//! the function's own `Result` channel.

use crate::core::error::{FieldError, ValidationError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

// ==================== Single-Value Result ====================

/// Outcome of validating one value against a rule chain.
///
/// Success echoes the original value unchanged: rules validate, they do not
/// transform. Both arms carry a wall-clock timestamp and the elapsed time for
/// the whole chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "success")]
pub enum ValidationResult {
    #[serde(rename = "true")]
    Success {
        value: Value,
        validated_at: DateTime<Utc>,
        duration: Duration,
    },
    #[serde(rename = "false")]
    Failure {
        error: ValidationError,
        failed_at: DateTime<Utc>,
        duration: Duration,
    },
}

impl ValidationResult {
    /// Success result stamped with the current time.
    pub fn success(value: Value, duration: Duration) -> Self {
        ValidationResult::Success {
            value,
            validated_at: Utc::now(),
            duration,
        }
    }

    /// Failure result stamped with the current time.
    pub fn failure(error: ValidationError, duration: Duration) -> Self {
        ValidationResult::Failure {
            error,
            failed_at: Utc::now(),
            duration,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ValidationResult::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The validated value, on success.
    pub fn value(&self) -> Option<&Value> {
        match self {
            ValidationResult::Success { value, .. } => Some(value),
            ValidationResult::Failure { .. } => None,
        }
    }

    /// Consume the result, yielding the value on success.
    pub fn into_value(self) -> Option<Value> {
        match self {
            ValidationResult::Success { value, .. } => Some(value),
            ValidationResult::Failure { .. } => None,
        }
    }

    /// The failure, on failure.
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            ValidationResult::Success { .. } => None,
            ValidationResult::Failure { error, .. } => Some(error),
        }
    }

    /// Elapsed time for the whole rule chain.
    pub fn duration(&self) -> Duration {
        match self {
            ValidationResult::Success { duration, .. }
            | ValidationResult::Failure { duration, .. } => *duration,
        }
    }

    /// Convert into a plain `Result`, discarding timing metadata.
    pub fn into_result(self) -> Result<Value, ValidationError> {
        match self {
            ValidationResult::Success { value, .. } => Ok(value),
            ValidationResult::Failure { error, .. } => Err(error),
        }
    }
}

// ==================== Status Tag ====================

/// String-flavored success flag for callers that prefer `"ok"`/`"error"`
/// over a boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Ok,
    Error,
}

impl ValidationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStatus::Ok => "ok",
            ValidationStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==================== Target Result ====================

/// Outcome of validating a whole target object against a schema.
///
/// One [`FieldError`] per property whose chain failed; properties that pass
/// contribute nothing. `data` is echoed back unchanged on success.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetValidationResult {
    pub success: bool,
    pub data: Option<Value>,
    pub errors: Vec<FieldError>,
    pub failure_count: usize,
    pub status: ValidationStatus,
    pub message: String,
    pub finished_at: DateTime<Utc>,
    pub duration: Duration,
}

impl TargetValidationResult {
    /// All properties passed.
    pub fn passed(data: Value, duration: Duration) -> Self {
        Self {
            success: true,
            data: Some(data),
            errors: Vec::new(),
            failure_count: 0,
            status: ValidationStatus::Ok,
            message: "validation passed".to_string(),
            finished_at: Utc::now(),
            duration,
        }
    }

    /// At least one property failed.
    pub fn failed(errors: Vec<FieldError>, duration: Duration) -> Self {
        let message = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        Self {
            success: false,
            data: None,
            failure_count: errors.len(),
            errors,
            status: ValidationStatus::Error,
            message,
            finished_at: Utc::now(),
            duration,
        }
    }

    /// Errors for one property, if it failed.
    pub fn errors_for(&self, property: &str) -> Vec<&FieldError> {
        self.errors
            .iter()
            .filter(|e| e.property == property)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorCode;
    use serde_json::json;

    #[test]
    fn success_echoes_the_value() {
        let result = ValidationResult::success(json!({"a": 1}), Duration::from_millis(2));
        assert!(result.is_success());
        assert_eq!(result.value(), Some(&json!({"a": 1})));
        assert!(result.error().is_none());
    }

    #[test]
    fn failure_exposes_the_error() {
        let error = ValidationError::new(ErrorCode::RuleFailed, "nope").with_rule_name("email");
        let result = ValidationResult::failure(error, Duration::ZERO);
        assert!(result.is_failure());
        assert_eq!(result.error().unwrap().rule_name.as_deref(), Some("email"));
        assert!(result.value().is_none());
    }

    #[test]
    fn failed_target_aggregates_messages() {
        let errors = vec![
            FieldError::new("email", ValidationError::new(ErrorCode::RuleFailed, "bad email")),
            FieldError::new("name", ValidationError::new(ErrorCode::RuleFailed, "too short")),
        ];
        let result = TargetValidationResult::failed(errors, Duration::ZERO);

        assert!(!result.success);
        assert_eq!(result.failure_count, 2);
        assert_eq!(result.status, ValidationStatus::Error);
        assert_eq!(result.message, "email: bad email; name: too short");
        assert_eq!(result.errors_for("email").len(), 1);
        assert!(result.data.is_none());
    }

    #[test]
    fn passed_target_echoes_data() {
        let data = json!({"email": "a@b.com"});
        let result = TargetValidationResult::passed(data.clone(), Duration::ZERO);
        assert!(result.success);
        assert_eq!(result.status.as_str(), "ok");
        assert_eq!(result.data, Some(data));
    }
}
