//! Presence and type-guard rules

use crate::core::context::ValidationContext;
use crate::core::error::RuleError;
use crate::core::rule::{RuleFn, RuleResult};
use crate::registry::RuleRegistry;
use crate::rules::names;
use serde_json::Value;

/// Install the basic rules: `required`, `notNull`, `nonNullString`, `boolean`.
pub fn register(registry: &RuleRegistry) {
    registry.register(names::REQUIRED, RuleFn::from_sync(required));
    registry.register(names::NOT_NULL, RuleFn::from_sync(not_null));
    registry.register(names::NON_NULL_STRING, RuleFn::from_sync(non_null_string));
    registry.register(names::BOOLEAN, RuleFn::from_sync(boolean));
}

fn fail(ctx: &ValidationContext, key: &str) -> RuleError {
    RuleError::failed(ctx.translate(key, &ctx.message_params()))
}

/// Value must be present and non-empty: null, `""`, `[]` and `{}` all fail.
fn required(ctx: &ValidationContext) -> RuleResult {
    let empty = match &ctx.value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(members) => members.is_empty(),
        _ => false,
    };
    if empty {
        Err(fail(ctx, names::REQUIRED))
    } else {
        Ok(())
    }
}

fn not_null(ctx: &ValidationContext) -> RuleResult {
    if ctx.value.is_null() {
        Err(fail(ctx, names::NOT_NULL))
    } else {
        Ok(())
    }
}

fn non_null_string(ctx: &ValidationContext) -> RuleResult {
    match ctx.value.as_str() {
        Some(s) if !s.is_empty() => Ok(()),
        _ => Err(fail(ctx, names::NON_NULL_STRING)),
    }
}

fn boolean(ctx: &ValidationContext) -> RuleResult {
    if ctx.value.is_boolean() {
        Ok(())
    } else {
        Err(fail(ctx, names::BOOLEAN))
    }
}
