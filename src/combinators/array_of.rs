//! `arrayOf`: element-wise validation of an ordered sequence

use crate::combinators::{reject_invalid_subs, MESSAGE_SEPARATOR};
use crate::core::context::ValidationContext;
use crate::core::error::RuleError;
use crate::core::rule::{Rule, RuleFn, RuleResult};
use crate::engine::run_rule;
use crate::registry::RuleRegistry;
use crate::spec::{parse_and_validate_rules, RuleSpec};
use async_trait::async_trait;
use serde_json::Value;

/// Build a rule that applies `allOf` semantics to every element of an array.
///
/// A non-array value fails immediately with a type error. Each element is
/// validated against every sub-rule; failure messages are decorated with the
/// element's index (`[2]: ...`) so multi-element failures stay
/// distinguishable, then aggregated with `"; "`. An empty array is valid:
/// there are no elements to fail.
pub fn array_of(registry: &RuleRegistry, sub_rules: Vec<RuleSpec>) -> RuleFn {
    RuleFn::new(ArrayOfRule {
        registry: registry.clone(),
        sub_rules,
    })
}

struct ArrayOfRule {
    registry: RuleRegistry,
    sub_rules: Vec<RuleSpec>,
}

#[async_trait]
impl Rule for ArrayOfRule {
    async fn check(&self, ctx: &ValidationContext) -> RuleResult {
        let elements = match &ctx.value {
            Value::Array(elements) => elements,
            other => {
                return Err(RuleError::type_mismatch(format!(
                    "expected an array, got {}",
                    json_type_name(other)
                )));
            }
        };

        let parsed = parse_and_validate_rules(&self.registry, &self.sub_rules);
        reject_invalid_subs(&parsed)?;

        let mut failures = Vec::new();
        for (index, element) in elements.iter().enumerate() {
            let element_ctx = ctx.for_value(element.clone());
            for resolved in &parsed.sanitized_rules {
                let sub_ctx = element_ctx.for_rule(resolved.params.clone());
                if let Err(error) = run_rule(&resolved.rule, &sub_ctx).await {
                    failures.push(format!("[{index}]: {}", error.message));
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(RuleError::failed(failures.join(MESSAGE_SEPARATOR)))
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
