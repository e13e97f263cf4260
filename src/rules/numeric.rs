//! Numeric rules

use crate::core::context::ValidationContext;
use crate::core::error::RuleError;
use crate::core::rule::{RuleFn, RuleResult};
use crate::registry::RuleRegistry;
use crate::rules::names;
use serde_json::{json, Value};

/// Install the numeric rules: `number`, `min`, `max`, `between`.
pub fn register(registry: &RuleRegistry) {
    registry.register(names::NUMBER, RuleFn::from_sync(number));
    registry.register(names::MIN, RuleFn::from_sync(min));
    registry.register(names::MAX, RuleFn::from_sync(max));
    registry.register(names::BETWEEN, RuleFn::from_sync(between));
}

fn as_number(ctx: &ValidationContext) -> Result<f64, RuleError> {
    ctx.value.as_f64().ok_or_else(|| {
        RuleError::failed(ctx.translate(names::NUMBER, &ctx.message_params()))
    })
}

fn numeric_param(ctx: &ValidationContext, index: usize, rule: &str) -> Result<f64, RuleError> {
    ctx.param(index).and_then(Value::as_f64).ok_or_else(|| {
        RuleError::invalid_params(format!(
            "{rule} requires a numeric bound at parameter {index}"
        ))
    })
}

fn number(ctx: &ValidationContext) -> RuleResult {
    as_number(ctx).map(|_| ())
}

fn min(ctx: &ValidationContext) -> RuleResult {
    let bound = numeric_param(ctx, 0, names::MIN)?;
    let value = as_number(ctx)?;
    if value >= bound {
        Ok(())
    } else {
        let mut params = ctx.message_params();
        params.insert("min".to_string(), json!(bound));
        Err(RuleError::failed(ctx.translate(names::MIN, &params)))
    }
}

fn max(ctx: &ValidationContext) -> RuleResult {
    let bound = numeric_param(ctx, 0, names::MAX)?;
    let value = as_number(ctx)?;
    if value <= bound {
        Ok(())
    } else {
        let mut params = ctx.message_params();
        params.insert("max".to_string(), json!(bound));
        Err(RuleError::failed(ctx.translate(names::MAX, &params)))
    }
}

/// Inclusive `[min, max]` range over the numeric value.
fn between(ctx: &ValidationContext) -> RuleResult {
    let low = numeric_param(ctx, 0, names::BETWEEN)?;
    let high = numeric_param(ctx, 1, names::BETWEEN)?;
    if low > high {
        return Err(RuleError::invalid_params(format!(
            "between bounds are inverted: {low} > {high}"
        )));
    }
    let value = as_number(ctx)?;
    if value >= low && value <= high {
        Ok(())
    } else {
        let mut params = ctx.message_params();
        params.insert("min".to_string(), json!(low));
        params.insert("max".to_string(), json!(high));
        Err(RuleError::failed(ctx.translate(names::BETWEEN, &params)))
    }
}
