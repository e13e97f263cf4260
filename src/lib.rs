//! Rulekit - composable rule-based validation over dynamic values
//!
//! The engine is built from small pieces:
//!
//! - a [`RuleRegistry`] mapping names to executable rules, populated
//!   explicitly by the application entry point;
//! - [`RuleSpec`]s declaring which rules to run (by name, by name with
//!   parameters, or inline), normalized by
//!   [`parse_and_validate_rules`];
//! - [`validate`] running an ordered chain against one value with
//!   left-to-right short-circuiting;
//! - the [`one_of`]/[`all_of`]/[`array_of`] combinators, ordinary rules
//!   built from sub-rule lists;
//! - a [`Schema`] of per-property rule chains, validated as a unit by
//!   [`validate_target`].
//!
//! Failures never escape as errors or panics: everything folds into
//! [`ValidationResult`] / [`TargetValidationResult`].
//!
//! ```rust,ignore
//! use rulekit::{RuleRegistry, RuleSpec, ValidateOptions, validate};
//!
//! let registry = RuleRegistry::with_builtin_rules();
//! let result = validate(
//!     &registry,
//!     ValidateOptions::new("user@example.com".into())
//!         .with_rules(vec![RuleSpec::named("required"), RuleSpec::named("email")]),
//! ).await;
//! assert!(result.is_success());
//! ```

pub mod combinators;
pub mod core;
pub mod engine;
pub mod registry;
pub mod rules;
pub mod schema;
pub mod spec;
pub mod target;
pub mod translate;

// Re-export the core surface
pub use self::core::{
    ErrorCode, FieldError, Rule, RuleError, RuleFn, RuleResult, TargetValidationResult,
    ValidationContext, ValidationError, ValidationResult, ValidationStatus,
};

pub use combinators::{all_of, array_of, one_of};
pub use engine::{validate, ValidateOptions};
pub use registry::RuleRegistry;
pub use rules::register_builtin_rules;
pub use schema::{
    property_rules, ChainEntry, ChainSource, CombinatorKind, FieldRules, MultiRuleDecorator,
    RuleDecorator, Schema, SchemaBuilder,
};
pub use spec::{parse_and_validate_rules, ParsedRules, ResolvedRule, RuleSpec};
pub use target::{validate_target, TargetOptions};
pub use translate::{KeyTranslator, TemplateTranslator, Translator};

// Re-export common dependencies
pub use async_trait::async_trait;
pub use serde_json::Value;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn builtin_email_chain_end_to_end() {
        let registry = RuleRegistry::with_builtin_rules();
        let result = validate(
            &registry,
            ValidateOptions::new(json!("user@example.com"))
                .with_rules(vec![RuleSpec::named("required"), RuleSpec::named("email")]),
        )
        .await;
        assert!(result.is_success());

        let result = validate(
            &registry,
            ValidateOptions::new(json!("not-an-email"))
                .with_rules(vec![RuleSpec::named("required"), RuleSpec::named("email")]),
        )
        .await;
        assert_eq!(result.error().unwrap().rule_name.as_deref(), Some("email"));
    }

    #[tokio::test]
    async fn one_of_email_or_phone_accepts_either() {
        let registry = RuleRegistry::with_builtin_rules();
        let contact = one_of(
            &registry,
            vec![RuleSpec::named("email"), RuleSpec::named("phoneNumber")],
        );
        registry.register("contact", contact);

        let ok = validate(
            &registry,
            ValidateOptions::new(json!("+1 555 123 4567"))
                .with_rules(vec![RuleSpec::named("contact")]),
        )
        .await;
        assert!(ok.is_success());

        let bad = validate(
            &registry,
            ValidateOptions::new(json!("invalid-input"))
                .with_rules(vec![RuleSpec::named("contact")]),
        )
        .await;
        assert!(bad.error().unwrap().message.contains(';'));
    }

    #[tokio::test]
    async fn schema_target_smoke_test() {
        let registry = RuleRegistry::with_builtin_rules();
        let schema = Schema::builder()
            .field("email", FieldRules::new().rule("required").rule("email"))
            .field("name", FieldRules::new().rule("nonNullString"))
            .build();

        let result = validate_target(
            &registry,
            &schema,
            TargetOptions::new(json!({"email": "invalid", "name": ""})),
        )
        .await;

        assert!(!result.success);
        assert_eq!(result.errors.len(), 2);
    }
}
