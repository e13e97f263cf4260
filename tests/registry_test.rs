//! Integration tests for the rule registry and spec parser

use pretty_assertions::assert_eq;
use rulekit::{
    parse_and_validate_rules, register_builtin_rules, RuleError, RuleFn, RuleRegistry, RuleSpec,
};
use serde_json::json;

#[test]
fn register_then_find_returns_the_same_rule() {
    let registry = RuleRegistry::new();
    let rule = RuleFn::from_sync(|_| Ok(()));
    registry.register("custom", rule.clone());

    assert!(registry.find("custom").unwrap().same_rule(&rule));
    assert!(registry.find("other").is_none());
}

#[test]
fn builtin_registration_is_idempotent() {
    let registry = RuleRegistry::new();
    register_builtin_rules(&registry);
    let count = registry.len();
    register_builtin_rules(&registry);

    assert_eq!(registry.len(), count);
}

#[tokio::test]
async fn last_registration_wins() {
    let registry = RuleRegistry::new();
    registry.register("rule", RuleFn::from_sync(|_| Err(RuleError::failed("v1"))));
    registry.register("rule", RuleFn::from_sync(|_| Err(RuleError::failed("v2"))));

    let ctx = rulekit::ValidationContext::new(json!(null));
    let error = registry.find("rule").unwrap().check(&ctx).await.unwrap_err();
    assert_eq!(error.message, "v2");
}

#[test]
fn parser_separates_valid_and_invalid_specs_in_order() {
    let registry = RuleRegistry::with_builtin_rules();
    let specs = vec![
        RuleSpec::named("required"),
        RuleSpec::named("ghost"),
        RuleSpec::parameterized("minLength", vec![json!(3)]),
        RuleSpec::named("phantom"),
        RuleSpec::inline("custom", RuleFn::from_sync(|_| Ok(()))),
    ];

    let parsed = parse_and_validate_rules(&registry, &specs);

    let sanitized: Vec<_> = parsed
        .sanitized_rules
        .iter()
        .map(|r| r.rule_name.as_str())
        .collect();
    assert_eq!(sanitized, vec!["required", "minLength", "custom"]);
    assert_eq!(parsed.invalid_names(), vec!["ghost", "phantom"]);
}

#[test]
fn snapshot_reflects_registration_time_state() {
    let registry = RuleRegistry::with_builtin_rules();
    let snapshot = registry.rules();

    registry.register("late", RuleFn::from_sync(|_| Ok(())));

    assert!(snapshot.contains_key("email"));
    assert!(!snapshot.contains_key("late"));
    assert!(registry.contains("late"));
}
