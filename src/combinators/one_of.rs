//! `oneOf`: logical OR over a list of sub-rule specs

use crate::combinators::{reject_invalid_subs, MESSAGE_SEPARATOR};
use crate::core::context::ValidationContext;
use crate::core::error::RuleError;
use crate::core::rule::{Rule, RuleFn, RuleResult};
use crate::engine::run_rule;
use crate::registry::RuleRegistry;
use crate::spec::{parse_and_validate_rules, RuleSpec};
use async_trait::async_trait;
use futures::future::join_all;

/// Build a rule that succeeds when **any** sub-rule succeeds.
///
/// All sub-rules are issued concurrently; the aggregate is computed only
/// after every one has settled, so the result is deterministic regardless of
/// completion order: any success wins; when all fail, the failure message is
/// every sub-rule's message joined with `"; "` in declaration order. An empty
/// sub-rule list is trivially satisfied.
pub fn one_of(registry: &RuleRegistry, sub_rules: Vec<RuleSpec>) -> RuleFn {
    RuleFn::new(OneOfRule {
        registry: registry.clone(),
        sub_rules,
    })
}

struct OneOfRule {
    registry: RuleRegistry,
    sub_rules: Vec<RuleSpec>,
}

#[async_trait]
impl Rule for OneOfRule {
    async fn check(&self, ctx: &ValidationContext) -> RuleResult {
        // Sub-specs resolve fresh on every invocation, like any other chain.
        let parsed = parse_and_validate_rules(&self.registry, &self.sub_rules);
        reject_invalid_subs(&parsed)?;
        if parsed.sanitized_rules.is_empty() {
            return Ok(());
        }

        let checks = parsed.sanitized_rules.iter().map(|resolved| {
            let sub_ctx = ctx.for_rule(resolved.params.clone());
            async move { run_rule(&resolved.rule, &sub_ctx).await }
        });
        let outcomes = join_all(checks).await;

        if outcomes.iter().any(Result::is_ok) {
            return Ok(());
        }

        let message = outcomes
            .into_iter()
            .filter_map(Result::err)
            .map(|error| error.message)
            .collect::<Vec<_>>()
            .join(MESSAGE_SEPARATOR);
        Err(RuleError::failed(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::ValidationContext;
    use serde_json::json;

    fn registry_with_pass_fail() -> RuleRegistry {
        let registry = RuleRegistry::new();
        registry.register("passes", RuleFn::from_sync(|_| Ok(())));
        registry.register(
            "failsA",
            RuleFn::from_sync(|_| Err(RuleError::failed("A rejected"))),
        );
        registry.register(
            "failsB",
            RuleFn::from_sync(|_| Err(RuleError::failed("B rejected"))),
        );
        registry
    }

    #[tokio::test]
    async fn any_success_wins() {
        let registry = registry_with_pass_fail();
        let rule = one_of(
            &registry,
            vec![RuleSpec::named("failsA"), RuleSpec::named("passes")],
        );
        let ctx = ValidationContext::new(json!("v"));
        assert!(rule.check(&ctx).await.is_ok());
    }

    #[tokio::test]
    async fn all_failures_aggregate_in_declaration_order() {
        let registry = registry_with_pass_fail();
        let rule = one_of(
            &registry,
            vec![RuleSpec::named("failsA"), RuleSpec::named("failsB")],
        );
        let ctx = ValidationContext::new(json!("v"));

        let error = rule.check(&ctx).await.unwrap_err();
        assert_eq!(error.message, "A rejected; B rejected");
    }

    #[tokio::test]
    async fn empty_sub_rule_list_is_vacuously_valid() {
        let registry = RuleRegistry::new();
        let rule = one_of(&registry, vec![]);
        let ctx = ValidationContext::new(json!(null));
        assert!(rule.check(&ctx).await.is_ok());
    }

    #[tokio::test]
    async fn unknown_sub_rule_name_aborts() {
        let registry = registry_with_pass_fail();
        let rule = one_of(
            &registry,
            vec![RuleSpec::named("passes"), RuleSpec::named("ghost")],
        );
        let ctx = ValidationContext::new(json!("v"));

        let error = rule.check(&ctx).await.unwrap_err();
        assert_eq!(error.code, crate::core::error::ErrorCode::InvalidRule);
        assert!(error.message.contains("ghost"));
    }

    #[tokio::test]
    async fn combinators_nest() {
        let registry = registry_with_pass_fail();
        let inner = one_of(
            &registry,
            vec![RuleSpec::named("failsA"), RuleSpec::named("failsB")],
        );
        let rule = one_of(
            &registry,
            vec![
                RuleSpec::inline("innerOr", inner),
                RuleSpec::named("passes"),
            ],
        );
        let ctx = ValidationContext::new(json!("v"));
        assert!(rule.check(&ctx).await.is_ok());
    }

    #[tokio::test]
    async fn registered_combinator_behaves_as_ordinary_rule() {
        let registry = registry_with_pass_fail();
        let rule = one_of(&registry, vec![RuleSpec::named("passes")]);
        registry.register("passesOr", rule);

        let ctx = ValidationContext::new(json!("v"));
        let found = registry.find("passesOr").unwrap();
        assert!(found.check(&ctx).await.is_ok());
    }
}
