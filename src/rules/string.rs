//! String format and length rules
//!
//! Length is measured in Unicode scalar values, not bytes. The format rules
//! (`email`, `url`, `phoneNumber`) are deliberately permissive sanity checks,
//! not RFC validators; anything stricter belongs in a custom rule.

use crate::core::context::ValidationContext;
use crate::core::error::RuleError;
use crate::core::rule::{RuleFn, RuleResult};
use crate::registry::RuleRegistry;
use crate::rules::names;
use regex::Regex;
use serde_json::{json, Value};

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
const PHONE_PATTERN: &str = r"^\+?[0-9][0-9 ().\-]{5,}$";

/// Install the string rules: `minLength`, `maxLength`, `length`, `email`,
/// `url`, `phoneNumber`, `matches`.
pub fn register(registry: &RuleRegistry) {
    registry.register(names::MIN_LENGTH, RuleFn::from_sync(min_length));
    registry.register(names::MAX_LENGTH, RuleFn::from_sync(max_length));
    registry.register(names::LENGTH, RuleFn::from_sync(length));
    registry.register(names::URL, RuleFn::from_sync(url));
    registry.register(names::MATCHES, RuleFn::from_sync(matches));

    // Patterns are compiled once at registration and moved into the rule.
    let email_regex = Regex::new(EMAIL_PATTERN).expect("email pattern is valid");
    registry.register(
        names::EMAIL,
        RuleFn::from_sync(move |ctx| pattern_rule(ctx, &email_regex, names::EMAIL)),
    );

    let phone_regex = Regex::new(PHONE_PATTERN).expect("phone pattern is valid");
    registry.register(
        names::PHONE_NUMBER,
        RuleFn::from_sync(move |ctx| pattern_rule(ctx, &phone_regex, names::PHONE_NUMBER)),
    );
}

fn as_str<'a>(ctx: &'a ValidationContext, key: &str) -> Result<&'a str, RuleError> {
    ctx.value
        .as_str()
        .ok_or_else(|| RuleError::failed(ctx.translate(key, &ctx.message_params())))
}

fn bound_param(ctx: &ValidationContext, index: usize, rule: &str) -> Result<u64, RuleError> {
    ctx.param(index)
        .and_then(Value::as_u64)
        .ok_or_else(|| {
            RuleError::invalid_params(format!(
                "{rule} requires a non-negative integer bound at parameter {index}"
            ))
        })
}

fn pattern_rule(ctx: &ValidationContext, regex: &Regex, key: &str) -> RuleResult {
    let text = as_str(ctx, key)?;
    if regex.is_match(text) {
        Ok(())
    } else {
        Err(RuleError::failed(ctx.translate(key, &ctx.message_params())))
    }
}

fn min_length(ctx: &ValidationContext) -> RuleResult {
    let min = bound_param(ctx, 0, names::MIN_LENGTH)?;
    let text = as_str(ctx, names::MIN_LENGTH)?;
    if (text.chars().count() as u64) >= min {
        Ok(())
    } else {
        let mut params = ctx.message_params();
        params.insert("min".to_string(), json!(min));
        Err(RuleError::failed(ctx.translate(names::MIN_LENGTH, &params)))
    }
}

fn max_length(ctx: &ValidationContext) -> RuleResult {
    let max = bound_param(ctx, 0, names::MAX_LENGTH)?;
    let text = as_str(ctx, names::MAX_LENGTH)?;
    if (text.chars().count() as u64) <= max {
        Ok(())
    } else {
        let mut params = ctx.message_params();
        params.insert("max".to_string(), json!(max));
        Err(RuleError::failed(ctx.translate(names::MAX_LENGTH, &params)))
    }
}

/// Inclusive `[min, max]` character-count range.
fn length(ctx: &ValidationContext) -> RuleResult {
    let min = bound_param(ctx, 0, names::LENGTH)?;
    let max = bound_param(ctx, 1, names::LENGTH)?;
    if min > max {
        return Err(RuleError::invalid_params(format!(
            "length bounds are inverted: {min} > {max}"
        )));
    }
    let text = as_str(ctx, names::LENGTH)?;
    let count = text.chars().count() as u64;
    if (min..=max).contains(&count) {
        Ok(())
    } else {
        let mut params = ctx.message_params();
        params.insert("min".to_string(), json!(min));
        params.insert("max".to_string(), json!(max));
        Err(RuleError::failed(ctx.translate(names::LENGTH, &params)))
    }
}

fn url(ctx: &ValidationContext) -> RuleResult {
    let text = as_str(ctx, names::URL)?;
    match url::Url::parse(text) {
        Ok(_) => Ok(()),
        Err(_) => Err(RuleError::failed(
            ctx.translate(names::URL, &ctx.message_params()),
        )),
    }
}

/// `matches` takes the pattern as its first parameter and compiles it per
/// invocation; an uncompilable pattern is a parameter error, not a value
/// failure.
fn matches(ctx: &ValidationContext) -> RuleResult {
    let pattern = ctx
        .param(0)
        .and_then(Value::as_str)
        .ok_or_else(|| RuleError::invalid_params("matches requires a pattern parameter"))?;
    let regex = Regex::new(pattern)
        .map_err(|e| RuleError::invalid_params(format!("invalid pattern: {e}")))?;

    let text = as_str(ctx, names::MATCHES)?;
    if regex.is_match(text) {
        Ok(())
    } else {
        Err(RuleError::failed(
            ctx.translate(names::MATCHES, &ctx.message_params()),
        ))
    }
}
