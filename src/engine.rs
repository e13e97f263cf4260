//! Single-value validation engine
//!
//! Resolves a rule-spec list and evaluates it sequentially, left to right,
//! short-circuiting on the first failure. All failure modes (unknown rule
//! names, predicate rejections, panicking rules) are folded into the
//! [`ValidationResult`] algebra; this module never returns an `Err` to its
//! caller.

use crate::core::context::ValidationContext;
use crate::core::error::{ErrorCode, RuleError, ValidationError};
use crate::core::result::ValidationResult;
use crate::core::rule::{RuleFn, RuleResult};
use crate::registry::RuleRegistry;
use crate::spec::{parse_and_validate_rules, RuleSpec};
use crate::translate::Translator;
use futures::FutureExt;
use serde_json::Value;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, trace};

// ==================== Options ====================

/// Inputs for a single-value [`validate`] call.
#[derive(Clone, Default)]
pub struct ValidateOptions {
    /// The value to validate.
    pub value: Value,
    /// Ordered rule chain to run against the value.
    pub rules: Vec<RuleSpec>,
    /// Field name, carried into every rule context and error.
    pub field_name: Option<String>,
    /// Property name, carried into every rule context and error.
    pub property_name: Option<String>,
    /// Localized display name for the property.
    pub translated_property_name: Option<String>,
    /// Opaque caller payload, never inspected by the engine.
    pub context: Option<Value>,
    /// Opaque sibling data (the whole object during target validation).
    pub data: Option<Value>,
    /// Translator override; the built-in English templates otherwise.
    pub translator: Option<Arc<dyn Translator>>,
}

impl ValidateOptions {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            ..Default::default()
        }
    }

    pub fn with_rules(mut self, rules: Vec<RuleSpec>) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }

    pub fn with_property_name(mut self, property_name: impl Into<String>) -> Self {
        self.property_name = Some(property_name.into());
        self
    }

    pub fn with_translated_property_name(mut self, name: impl Into<String>) -> Self {
        self.translated_property_name = Some(name.into());
        self
    }

    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    fn into_context(self) -> (ValidationContext, Vec<RuleSpec>) {
        let ValidateOptions {
            value,
            rules,
            field_name,
            property_name,
            translated_property_name,
            context,
            data,
            translator,
        } = self;

        let mut ctx = ValidationContext::new(value);
        if let Some(field_name) = field_name {
            ctx = ctx.with_field_name(field_name);
        }
        if let Some(property_name) = property_name {
            ctx = ctx.with_property_name(property_name);
        }
        if let Some(name) = translated_property_name {
            ctx = ctx.with_translated_property_name(name);
        }
        if let Some(context_payload) = context {
            ctx = ctx.with_context(context_payload);
        }
        if let Some(data) = data {
            ctx = ctx.with_data(data);
        }
        if let Some(translator) = translator {
            ctx = ctx.with_translator(translator);
        }
        (ctx, rules)
    }
}

impl std::fmt::Debug for ValidateOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidateOptions")
            .field("value", &self.value)
            .field("rules", &self.rules)
            .field("field_name", &self.field_name)
            .field("property_name", &self.property_name)
            .field("translated_property_name", &self.translated_property_name)
            .field("context", &self.context)
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

// ==================== Validate ====================

/// Validate one value against an ordered rule chain.
///
/// Rules run sequentially; the first rule that rejects stops the chain and
/// its error becomes the result; later rules are never invoked. An empty
/// chain, or a chain where every rule passes, succeeds with the original
/// value unchanged. Specs naming unknown rules fail the whole call with an
/// [`ErrorCode::InvalidRule`] error listing every unknown name.
pub async fn validate(registry: &RuleRegistry, options: ValidateOptions) -> ValidationResult {
    let started = Instant::now();
    let (ctx, rules) = options.into_context();

    let parsed = parse_and_validate_rules(registry, &rules);
    if !parsed.invalid_rules.is_empty() {
        let names = parsed.invalid_names().join(", ");
        debug!(unknown = %names, "validation aborted: unknown rule name(s)");
        let error = ValidationError::new(
            ErrorCode::InvalidRule,
            format!("unknown rule(s): {names}"),
        )
        .with_field_name_opt(ctx.field_name.clone())
        .with_property_name_opt(ctx.property_name.clone());
        return ValidationResult::failure(error, started.elapsed());
    }

    for resolved in &parsed.sanitized_rules {
        let rule_ctx = ctx.for_rule(resolved.params.clone());
        trace!(rule = %resolved.rule_name, "running rule");

        if let Err(rule_error) = run_rule(&resolved.rule, &rule_ctx).await {
            debug!(rule = %resolved.rule_name, code = %rule_error.code, "rule failed");
            let error = ValidationError::from(rule_error)
                .with_rule_name(resolved.rule_name.clone())
                .with_rule_params(resolved.params.clone())
                .with_field_name_opt(ctx.field_name.clone())
                .with_property_name_opt(ctx.property_name.clone());
            return ValidationResult::failure(error, started.elapsed());
        }
    }

    ValidationResult::success(ctx.value, started.elapsed())
}

// ==================== Panic Adapter ====================

/// The single place where a panicking rule becomes a failure message.
///
/// A well-behaved rule reports rejection through its `RuleResult`; a panic is
/// caught here and folded into an [`ErrorCode::RuleException`] error so it
/// never propagates to the caller of `validate`/`validate_target`.
pub(crate) async fn run_rule(rule: &RuleFn, ctx: &ValidationContext) -> RuleResult {
    match AssertUnwindSafe(rule.check(ctx)).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(payload) => Err(RuleError::exception(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "rule panicked".to_string()
    }
}

// Optional-aware variants of the error builders, local to the engine.
trait WithOpt {
    fn with_field_name_opt(self, field_name: Option<String>) -> Self;
    fn with_property_name_opt(self, property_name: Option<String>) -> Self;
}

impl WithOpt for ValidationError {
    fn with_field_name_opt(mut self, field_name: Option<String>) -> Self {
        self.field_name = field_name;
        self
    }

    fn with_property_name_opt(mut self, property_name: Option<String>) -> Self {
        self.property_name = property_name;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc as StdArc;

    fn failing_rule(message: &'static str) -> RuleFn {
        RuleFn::from_sync(move |_| Err(RuleError::failed(message)))
    }

    #[tokio::test]
    async fn empty_chain_succeeds_with_original_value() {
        let registry = RuleRegistry::new();
        let result = validate(&registry, ValidateOptions::new(json!({"k": [1, 2]}))).await;
        assert!(result.is_success());
        assert_eq!(result.value(), Some(&json!({"k": [1, 2]})));
    }

    #[tokio::test]
    async fn first_failure_short_circuits_later_rules() {
        let registry = RuleRegistry::new();
        registry.register("fails", failing_rule("first failure"));

        let later_runs = StdArc::new(AtomicUsize::new(0));
        let counter = later_runs.clone();
        registry.register(
            "counts",
            RuleFn::from_sync(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        );

        let options = ValidateOptions::new(json!("x"))
            .with_rules(vec![RuleSpec::named("fails"), RuleSpec::named("counts")]);
        let result = validate(&registry, options).await;

        let error = result.error().unwrap();
        assert_eq!(error.rule_name.as_deref(), Some("fails"));
        assert_eq!(error.message, "first failure");
        assert_eq!(later_runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_rule_fails_with_invalid_rule_code() {
        let registry = RuleRegistry::new();
        let options = ValidateOptions::new(json!("x"))
            .with_rules(vec![RuleSpec::named("ghost")])
            .with_field_name("input");
        let result = validate(&registry, options).await;

        let error = result.error().unwrap();
        assert_eq!(error.code, ErrorCode::InvalidRule);
        assert!(error.message.contains("ghost"));
        assert_eq!(error.field_name.as_deref(), Some("input"));
    }

    #[tokio::test]
    async fn panicking_rule_becomes_rule_exception_failure() {
        let registry = RuleRegistry::new();
        registry.register(
            "explodes",
            RuleFn::from_sync(|_| panic!("boom at runtime")),
        );

        let options = ValidateOptions::new(json!(1)).with_rules(vec![RuleSpec::named("explodes")]);
        let result = validate(&registry, options).await;

        let error = result.error().unwrap();
        assert_eq!(error.code, ErrorCode::RuleException);
        assert!(error.message.contains("boom at runtime"));
    }

    #[tokio::test]
    async fn failure_carries_rule_params_and_names() {
        let registry = RuleRegistry::new();
        registry.register("limited", failing_rule("over the limit"));

        let options = ValidateOptions::new(json!(10))
            .with_rules(vec![RuleSpec::parameterized("limited", vec![json!(5)])])
            .with_property_name("count");
        let result = validate(&registry, options).await;

        let error = result.error().unwrap();
        assert_eq!(error.rule_params, vec![json!(5)]);
        assert_eq!(error.property_name.as_deref(), Some("count"));
    }

    #[tokio::test]
    async fn validation_is_idempotent_modulo_timing() {
        let registry = RuleRegistry::new();
        registry.register("fails", failing_rule("always"));

        let options = ValidateOptions::new(json!("v")).with_rules(vec![RuleSpec::named("fails")]);
        let first = validate(&registry, options.clone()).await;
        let second = validate(&registry, options).await;

        assert_eq!(first.is_success(), second.is_success());
        assert_eq!(
            first.error().unwrap().message,
            second.error().unwrap().message
        );
    }
}
