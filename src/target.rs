//! Target validation: one schema, one object, one aggregate result
//!
//! Walks every property declared in a [`Schema`] and runs the single-value
//! engine against the corresponding member of the data object. Unlike the
//! single-value path, property failures do not short-circuit each other:
//! every property is validated and all failures are collected.

use crate::core::error::FieldError;
use crate::core::result::{TargetValidationResult, ValidationResult};
use crate::engine::{validate, ValidateOptions};
use crate::registry::RuleRegistry;
use crate::schema::Schema;
use crate::spec::RuleSpec;
use crate::translate::Translator;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, trace};

// ==================== Options ====================

/// Inputs for a [`validate_target`] call.
#[derive(Clone)]
pub struct TargetOptions {
    /// The object to validate. Properties absent from it validate as null.
    pub data: Value,
    /// Opaque caller payload threaded into every rule context.
    pub context: Option<Value>,
    /// Translator override for message formatting.
    pub translator: Option<Arc<dyn Translator>>,
}

impl TargetOptions {
    pub fn new(data: Value) -> Self {
        Self {
            data,
            context: None,
            translator: None,
        }
    }

    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }
}

impl std::fmt::Debug for TargetOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetOptions")
            .field("data", &self.data)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

// ==================== Validate Target ====================

/// Validate an object against a schema's per-property rule chains.
///
/// Every declared property runs its whole chain through the single-value
/// engine, with the full `data` object threaded into each rule's context for
/// cross-field rules. `success` is true only if every chain succeeds; `data`
/// is echoed back unchanged on success; the validator never coerces or
/// strips fields.
pub async fn validate_target(
    registry: &RuleRegistry,
    schema: &Schema,
    options: TargetOptions,
) -> TargetValidationResult {
    let started = Instant::now();
    let mut errors: Vec<FieldError> = Vec::new();

    for (property, rules) in schema.properties() {
        let value = options
            .data
            .get(property)
            .cloned()
            .unwrap_or(Value::Null);
        let specs: Vec<RuleSpec> = rules
            .entries()
            .iter()
            .map(|entry| entry.to_spec(registry))
            .collect();

        let mut property_options = ValidateOptions::new(value)
            .with_rules(specs)
            .with_property_name(property)
            .with_data(options.data.clone());
        if let Some(context) = &options.context {
            property_options = property_options.with_context(context.clone());
        }
        if let Some(translator) = &options.translator {
            property_options = property_options.with_translator(translator.clone());
        }

        match validate(registry, property_options).await {
            ValidationResult::Success { .. } => {
                trace!(property = %property, "property passed");
            }
            ValidationResult::Failure { error, .. } => {
                trace!(property = %property, code = %error.code, "property failed");
                errors.push(FieldError::new(property, error));
            }
        }
    }

    if errors.is_empty() {
        TargetValidationResult::passed(options.data, started.elapsed())
    } else {
        debug!(
            failures = errors.len(),
            properties = schema.len(),
            "target validation failed"
        );
        TargetValidationResult::failed(errors, started.elapsed())
    }
}
