//! Rule registry: the name → rule mapping read by every validation
//!
//! The registry is an explicit instance, not process-global state. Rule
//! modules export registration functions
//! (see [`register_builtin_rules`](crate::rules::register_builtin_rules));
//! the application entry point decides which to call and when, so no behavior
//! depends on import-order side effects.

use crate::core::rule::RuleFn;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Shared, concurrently readable rule registry.
///
/// Cloning is cheap (`Arc` inside) and all clones observe the same rules.
/// Name uniqueness is not enforced: re-registering a name silently overwrites
/// the previous rule (last write wins). No validation of the rule itself
/// happens at registration time; malformed rules surface only when invoked.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: Arc<DashMap<String, RuleFn>>,
}

impl RuleRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the built-in rules.
    pub fn with_builtin_rules() -> Self {
        let registry = Self::new();
        crate::rules::register_builtin_rules(&registry);
        registry
    }

    /// Store `rule` under `name`, overwriting silently.
    pub fn register(&self, name: impl Into<String>, rule: RuleFn) {
        let name = name.into();
        if self.rules.insert(name.clone(), rule).is_some() {
            debug!(rule = %name, "overwriting previously registered rule");
        } else {
            trace!(rule = %name, "registered rule");
        }
    }

    /// Look up a rule by name. Absence is not an error at this layer.
    pub fn find(&self, name: &str) -> Option<RuleFn> {
        self.rules.get(name).map(|entry| entry.value().clone())
    }

    /// Whether a rule is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Read-only snapshot of the current name → rule mapping.
    /// Used by diagnostics and tests; mutations after the call are not
    /// reflected in the snapshot.
    pub fn rules(&self) -> HashMap<String, RuleFn> {
        self.rules
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Registered rule names, unordered.
    pub fn names(&self) -> Vec<String> {
        self.rules.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::ValidationContext;
    use crate::core::error::RuleError;
    use serde_json::json;

    #[test]
    fn register_then_find_returns_the_rule() {
        let registry = RuleRegistry::new();
        let rule = RuleFn::from_sync(|_| Ok(()));
        registry.register("pass", rule.clone());

        let found = registry.find("pass").expect("rule should be registered");
        assert!(found.same_rule(&rule));
    }

    #[test]
    fn find_unknown_name_returns_none() {
        let registry = RuleRegistry::new();
        assert!(registry.find("missing").is_none());
        assert!(!registry.contains("missing"));
    }

    #[tokio::test]
    async fn reregistering_overwrites_last_write_wins() {
        let registry = RuleRegistry::new();
        registry.register("flip", RuleFn::from_sync(|_| Ok(())));
        registry.register(
            "flip",
            RuleFn::from_sync(|_| Err(RuleError::failed("second"))),
        );

        let ctx = ValidationContext::new(json!(null));
        let outcome = registry.find("flip").unwrap().check(&ctx).await;
        assert_eq!(outcome.unwrap_err().message, "second");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn snapshot_is_detached_from_later_mutation() {
        let registry = RuleRegistry::new();
        registry.register("a", RuleFn::from_sync(|_| Ok(())));
        let snapshot = registry.rules();
        registry.register("b", RuleFn::from_sync(|_| Ok(())));

        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.contains_key("a"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn clones_share_the_same_rules() {
        let registry = RuleRegistry::new();
        let clone = registry.clone();
        registry.register("shared", RuleFn::from_sync(|_| Ok(())));
        assert!(clone.contains("shared"));
    }
}
