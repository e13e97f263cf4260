//! Core types for the validation engine:
//! errors, the result algebra, the rule boundary and the per-invocation context.

pub mod context;
pub mod error;
pub mod result;
pub mod rule;

pub use self::context::ValidationContext;
pub use self::error::{ErrorCode, FieldError, RuleError, ValidationError};
pub use self::result::{TargetValidationResult, ValidationResult, ValidationStatus};
pub use self::rule::{Rule, RuleFn, RuleResult};
