//! Rule specs and the spec parser
//!
//! Callers declare rules in three heterogeneous forms: a bare name, a name
//! with parameters, or an inline rule. [`parse_and_validate_rules`] normalizes
//! a list of such specs into a uniform executable form, separating valid specs
//! from unrecognized ones without throwing, so the caller decides whether an
//! unknown rule is fatal.

use crate::core::rule::RuleFn;
use crate::registry::RuleRegistry;
use serde_json::Value;
use std::fmt;

// ==================== Rule Spec ====================

/// Caller-supplied declaration of one rule to run, before registry resolution.
#[derive(Clone)]
pub enum RuleSpec {
    /// Resolve the name against the registry, no parameters.
    Named(String),
    /// Resolve the name against the registry, carrying parameters.
    Parameterized { name: String, params: Vec<Value> },
    /// Use the rule directly, no registry lookup.
    Inline {
        name: String,
        params: Vec<Value>,
        rule: RuleFn,
    },
}

impl RuleSpec {
    pub fn named(name: impl Into<String>) -> Self {
        RuleSpec::Named(name.into())
    }

    pub fn parameterized(name: impl Into<String>, params: Vec<Value>) -> Self {
        RuleSpec::Parameterized {
            name: name.into(),
            params,
        }
    }

    pub fn inline(name: impl Into<String>, rule: RuleFn) -> Self {
        RuleSpec::Inline {
            name: name.into(),
            params: Vec::new(),
            rule,
        }
    }

    /// An inline rule that still receives parameters through its context.
    pub fn inline_with(name: impl Into<String>, params: Vec<Value>, rule: RuleFn) -> Self {
        RuleSpec::Inline {
            name: name.into(),
            params,
            rule,
        }
    }

    /// The declared rule name, as written by the caller.
    pub fn name(&self) -> &str {
        match self {
            RuleSpec::Named(name) => name,
            RuleSpec::Parameterized { name, .. } => name,
            RuleSpec::Inline { name, .. } => name,
        }
    }
}

impl fmt::Debug for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSpec::Named(name) => f.debug_tuple("Named").field(name).finish(),
            RuleSpec::Parameterized { name, params } => f
                .debug_struct("Parameterized")
                .field("name", name)
                .field("params", params)
                .finish(),
            RuleSpec::Inline { name, params, .. } => f
                .debug_struct("Inline")
                .field("name", name)
                .field("params", params)
                .finish_non_exhaustive(),
        }
    }
}

impl From<&str> for RuleSpec {
    fn from(name: &str) -> Self {
        RuleSpec::named(name)
    }
}

impl From<String> for RuleSpec {
    fn from(name: String) -> Self {
        RuleSpec::Named(name)
    }
}

// ==================== Resolved Rule ====================

/// A spec after registry resolution: ready to execute.
///
/// Built fresh per validation call; resolved lists are never cached across
/// calls, since parameters may differ per invocation.
#[derive(Debug, Clone)]
pub struct ResolvedRule {
    /// Canonical rule name (trimmed).
    pub rule_name: String,
    /// The name exactly as the caller wrote it.
    pub raw_rule_name: String,
    /// Parameters to pass into the rule's context.
    pub params: Vec<Value>,
    /// The executable rule.
    pub rule: RuleFn,
}

// ==================== Parse Output ====================

/// Output of [`parse_and_validate_rules`]: executable rules in declaration
/// order, plus the specs that could not be resolved.
#[derive(Debug, Clone, Default)]
pub struct ParsedRules {
    pub sanitized_rules: Vec<ResolvedRule>,
    pub invalid_rules: Vec<RuleSpec>,
}

impl ParsedRules {
    /// Names of the unresolvable specs, in declaration order.
    pub fn invalid_names(&self) -> Vec<&str> {
        self.invalid_rules.iter().map(|spec| spec.name()).collect()
    }
}

/// Normalize a spec list into executable form.
///
/// Named and parameterized specs resolve through the registry; inline specs
/// carry their own rule and skip the lookup. Unknown names land in
/// `invalid_rules` rather than failing the call. Declaration order is
/// preserved in both output lists, since the engine evaluates in order.
pub fn parse_and_validate_rules(registry: &RuleRegistry, specs: &[RuleSpec]) -> ParsedRules {
    let mut parsed = ParsedRules::default();

    for spec in specs {
        let (raw_name, params) = match spec {
            RuleSpec::Named(name) => (name.clone(), Vec::new()),
            RuleSpec::Parameterized { name, params } => (name.clone(), params.clone()),
            RuleSpec::Inline { name, params, rule } => {
                parsed.sanitized_rules.push(ResolvedRule {
                    rule_name: name.trim().to_string(),
                    raw_rule_name: name.clone(),
                    params: params.clone(),
                    rule: rule.clone(),
                });
                continue;
            }
        };

        let rule_name = raw_name.trim().to_string();
        match registry.find(&rule_name) {
            Some(rule) => parsed.sanitized_rules.push(ResolvedRule {
                rule_name,
                raw_rule_name: raw_name,
                params,
                rule,
            }),
            None => parsed.invalid_rules.push(spec.clone()),
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry_with(names: &[&str]) -> RuleRegistry {
        let registry = RuleRegistry::new();
        for name in names {
            registry.register(*name, RuleFn::from_sync(|_| Ok(())));
        }
        registry
    }

    #[test]
    fn empty_spec_list_parses_to_empty_output() {
        let registry = registry_with(&[]);
        let parsed = parse_and_validate_rules(&registry, &[]);
        assert!(parsed.sanitized_rules.is_empty());
        assert!(parsed.invalid_rules.is_empty());
    }

    #[test]
    fn known_names_resolve_in_declaration_order() {
        let registry = registry_with(&["required", "email"]);
        let specs = vec![RuleSpec::named("required"), RuleSpec::named("email")];
        let parsed = parse_and_validate_rules(&registry, &specs);

        let names: Vec<_> = parsed
            .sanitized_rules
            .iter()
            .map(|r| r.rule_name.as_str())
            .collect();
        assert_eq!(names, vec!["required", "email"]);
        assert!(parsed.invalid_rules.is_empty());
    }

    #[test]
    fn unknown_names_are_collected_not_fatal() {
        let registry = registry_with(&["required"]);
        let specs = vec![
            RuleSpec::named("required"),
            RuleSpec::named("noSuchRule"),
            RuleSpec::parameterized("alsoMissing", vec![json!(1)]),
        ];
        let parsed = parse_and_validate_rules(&registry, &specs);

        assert_eq!(parsed.sanitized_rules.len(), 1);
        assert_eq!(parsed.invalid_names(), vec!["noSuchRule", "alsoMissing"]);
    }

    #[test]
    fn parameterized_specs_carry_their_params() {
        let registry = registry_with(&["minLength"]);
        let specs = vec![RuleSpec::parameterized("minLength", vec![json!(5)])];
        let parsed = parse_and_validate_rules(&registry, &specs);

        assert_eq!(parsed.sanitized_rules[0].params, vec![json!(5)]);
    }

    #[test]
    fn inline_specs_skip_the_registry() {
        let registry = registry_with(&[]);
        let specs = vec![RuleSpec::inline("custom", RuleFn::from_sync(|_| Ok(())))];
        let parsed = parse_and_validate_rules(&registry, &specs);

        assert_eq!(parsed.sanitized_rules.len(), 1);
        assert_eq!(parsed.sanitized_rules[0].rule_name, "custom");
        assert!(parsed.invalid_rules.is_empty());
    }

    #[test]
    fn inline_specs_can_carry_params() {
        let registry = registry_with(&[]);
        let specs = vec![RuleSpec::inline_with(
            "limited",
            vec![json!(5)],
            RuleFn::from_sync(|_| Ok(())),
        )];
        let parsed = parse_and_validate_rules(&registry, &specs);

        assert_eq!(parsed.sanitized_rules[0].params, vec![json!(5)]);
    }

    #[test]
    fn names_are_trimmed_but_raw_form_is_kept() {
        let registry = registry_with(&["email"]);
        let specs = vec![RuleSpec::named("  email ")];
        let parsed = parse_and_validate_rules(&registry, &specs);

        assert_eq!(parsed.sanitized_rules[0].rule_name, "email");
        assert_eq!(parsed.sanitized_rules[0].raw_rule_name, "  email ");
    }
}
