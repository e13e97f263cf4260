//! Error types for the validation engine
//!
//! Rules report failure through [`RuleError`], a lightweight code + message
//! pair. The engine enriches a `RuleError` into a [`ValidationError`] with the
//! rule name, field/property names and the parameters the rule received, so
//! callers can do structured reporting without parsing messages.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{self, Display};
use thiserror::Error;

// ==================== Error Codes ====================

/// Categorization of validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCode {
    /// A rule spec referenced a name absent from the registry.
    InvalidRule,
    /// A parameterized rule received parameters it cannot interpret.
    InvalidRuleParams,
    /// The normal case: a rule predicate rejected the value.
    RuleFailed,
    /// A rule panicked; the panic was folded into a failure message.
    RuleException,
    /// The value had the wrong shape for the rule (e.g. non-array for `arrayOf`).
    TypeMismatch,
}

impl ErrorCode {
    /// String tag used in serialized output and log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidRule => "invalidRule",
            ErrorCode::InvalidRuleParams => "invalidRuleParams",
            ErrorCode::RuleFailed => "ruleFailed",
            ErrorCode::RuleException => "ruleException",
            ErrorCode::TypeMismatch => "typeMismatch",
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==================== Rule Error ====================

/// Failure reported by a single rule function.
///
/// This is the error half of [`RuleResult`](crate::core::rule::RuleResult),
/// the only way a rule communicates rejection. It deliberately carries no
/// field/rule metadata; the engine attaches that when it builds the final
/// [`ValidationError`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct RuleError {
    /// Failure category.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
}

impl RuleError {
    /// Create a rule error with an explicit code.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Ordinary predicate rejection.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RuleFailed, message)
    }

    /// The rule's parameters were missing or malformed.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRuleParams, message)
    }

    /// A rule spec named a rule the registry does not know.
    pub fn unknown_rule(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRule, message)
    }

    /// A panic escaped the rule body.
    pub fn exception(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RuleException, message)
    }

    /// The value's type does not fit the rule.
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::TypeMismatch, message)
    }
}

// ==================== Validation Error ====================

/// A rule failure enriched with the metadata of the failing chain position.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ValidationError {
    /// Failure category.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Name of the rule that failed, when known.
    pub rule_name: Option<String>,
    /// Field name supplied by the caller, if any.
    pub field_name: Option<String>,
    /// Property name when validating a schema target.
    pub property_name: Option<String>,
    /// Parameters the failing rule received.
    pub rule_params: Vec<Value>,
}

impl ValidationError {
    /// Create a validation error with no positional metadata.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            rule_name: None,
            field_name: None,
            property_name: None,
            rule_params: Vec::new(),
        }
    }

    /// Attach the failing rule's name.
    pub fn with_rule_name(mut self, rule_name: impl Into<String>) -> Self {
        self.rule_name = Some(rule_name.into());
        self
    }

    /// Attach the field name.
    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }

    /// Attach the property name.
    pub fn with_property_name(mut self, property_name: impl Into<String>) -> Self {
        self.property_name = Some(property_name.into());
        self
    }

    /// Attach the parameters the rule received.
    pub fn with_rule_params(mut self, rule_params: Vec<Value>) -> Self {
        self.rule_params = rule_params;
        self
    }
}

impl From<RuleError> for ValidationError {
    fn from(error: RuleError) -> Self {
        ValidationError::new(error.code, error.message)
    }
}

// ==================== Field Error ====================

/// One failing property of a target validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// The schema property whose chain failed.
    pub property: String,
    /// The failure itself.
    pub error: ValidationError,
}

impl FieldError {
    pub fn new(property: impl Into<String>, error: ValidationError) -> Self {
        Self {
            property: property.into(),
            error,
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.error.message)
    }
}
