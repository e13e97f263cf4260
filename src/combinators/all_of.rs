//! `allOf`: logical AND over a list of sub-rule specs

use crate::combinators::{reject_invalid_subs, MESSAGE_SEPARATOR};
use crate::core::context::ValidationContext;
use crate::core::error::RuleError;
use crate::core::rule::{Rule, RuleFn, RuleResult};
use crate::engine::run_rule;
use crate::registry::RuleRegistry;
use crate::spec::{parse_and_validate_rules, RuleSpec};
use async_trait::async_trait;

/// Build a rule that succeeds only when **all** sub-rules succeed.
///
/// Evaluation is exhaustive, not fail-fast: sub-rules run one at a time in
/// declaration order, and an earlier failure does not prevent later rules
/// from running. All failing messages are aggregated with `"; "`. An empty
/// sub-rule list succeeds.
pub fn all_of(registry: &RuleRegistry, sub_rules: Vec<RuleSpec>) -> RuleFn {
    RuleFn::new(AllOfRule {
        registry: registry.clone(),
        sub_rules,
    })
}

struct AllOfRule {
    registry: RuleRegistry,
    sub_rules: Vec<RuleSpec>,
}

#[async_trait]
impl Rule for AllOfRule {
    async fn check(&self, ctx: &ValidationContext) -> RuleResult {
        let parsed = parse_and_validate_rules(&self.registry, &self.sub_rules);
        reject_invalid_subs(&parsed)?;

        let mut failures = Vec::new();
        for resolved in &parsed.sanitized_rules {
            let sub_ctx = ctx.for_rule(resolved.params.clone());
            if let Err(error) = run_rule(&resolved.rule, &sub_ctx).await {
                failures.push(error.message);
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(RuleError::failed(failures.join(MESSAGE_SEPARATOR)))
        }
    }
}
