//! Explicit schema builder: rule chains attached to named properties
//!
//! Instead of runtime reflection or metadata attached to type definitions, a
//! [`Schema`] is a plain, ordered property → rule-chain map, built once (for
//! example in a `static`/module-level constructor) and passed explicitly to
//! [`validate_target`](crate::target::validate_target). Chain entries are
//! additive: declaring the same property twice extends its chain, and
//! declaration order is evaluation order.

use crate::combinators::{all_of, array_of, one_of};
use crate::core::rule::RuleFn;
use crate::registry::RuleRegistry;
use crate::spec::RuleSpec;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ==================== Combinator Marker ====================

/// Marker identifying a chain entry as a composite combinator, so
/// introspection code can recognize one without re-parsing its sub-rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CombinatorKind {
    OneOf,
    AllOf,
    ArrayOf,
}

impl CombinatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CombinatorKind::OneOf => "oneOf",
            CombinatorKind::AllOf => "allOf",
            CombinatorKind::ArrayOf => "arrayOf",
        }
    }
}

// ==================== Chain Entries ====================

/// Where a chain entry's executable rule comes from.
#[derive(Clone)]
pub enum ChainSource {
    /// Look the name up in the registry at validation time.
    Registered,
    /// The entry carries its own rule.
    Inline(RuleFn),
    /// A composite combinator over sub-rule specs, built against the
    /// registry at validation time.
    Combinator {
        kind: CombinatorKind,
        sub_rules: Vec<RuleSpec>,
    },
}

impl fmt::Debug for ChainSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainSource::Registered => f.write_str("Registered"),
            ChainSource::Inline(_) => f.write_str("Inline(..)"),
            ChainSource::Combinator { kind, sub_rules } => f
                .debug_struct("Combinator")
                .field("kind", kind)
                .field("sub_rules", sub_rules)
                .finish(),
        }
    }
}

/// One position in a property's rule chain.
#[derive(Debug, Clone)]
pub struct ChainEntry {
    /// Rule name (registry key, or the combinator's tag).
    pub name: String,
    /// Parameters passed to the rule.
    pub params: Vec<Value>,
    /// How to obtain the executable rule.
    pub source: ChainSource,
}

impl ChainEntry {
    /// Entry resolving a registered rule with no parameters.
    pub fn rule(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            source: ChainSource::Registered,
        }
    }

    /// Entry resolving a registered rule with parameters.
    pub fn rule_with(name: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            params,
            source: ChainSource::Registered,
        }
    }

    /// Entry carrying an inline rule.
    pub fn inline(name: impl Into<String>, rule: RuleFn) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            source: ChainSource::Inline(rule),
        }
    }

    /// Entry for a composite combinator over sub-rule specs.
    pub fn combinator(kind: CombinatorKind, sub_rules: Vec<RuleSpec>) -> Self {
        Self {
            name: kind.as_str().to_string(),
            params: Vec::new(),
            source: ChainSource::Combinator { kind, sub_rules },
        }
    }

    /// The combinator marker, when this entry is one.
    pub fn marker(&self) -> Option<CombinatorKind> {
        match &self.source {
            ChainSource::Combinator { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Lower the entry to an executable [`RuleSpec`] against a registry.
    pub(crate) fn to_spec(&self, registry: &RuleRegistry) -> RuleSpec {
        match &self.source {
            ChainSource::Registered => {
                if self.params.is_empty() {
                    RuleSpec::named(self.name.clone())
                } else {
                    RuleSpec::parameterized(self.name.clone(), self.params.clone())
                }
            }
            ChainSource::Inline(rule) => {
                RuleSpec::inline_with(self.name.clone(), self.params.clone(), rule.clone())
            }
            ChainSource::Combinator { kind, sub_rules } => {
                let rule = match kind {
                    CombinatorKind::OneOf => one_of(registry, sub_rules.clone()),
                    CombinatorKind::AllOf => all_of(registry, sub_rules.clone()),
                    CombinatorKind::ArrayOf => array_of(registry, sub_rules.clone()),
                };
                RuleSpec::inline(kind.as_str(), rule)
            }
        }
    }
}

// ==================== Decorator Builders ====================

/// Reusable, parameterizable property annotation wrapping one rule.
///
/// Applying it yields a [`ChainEntry`] carrying the wrapped rule inline, so
/// the annotation works even for rules never put in a registry.
#[derive(Clone)]
pub struct RuleDecorator {
    name: String,
    rule: RuleFn,
}

impl RuleDecorator {
    pub fn new(rule: RuleFn, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rule,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply the annotation with parameters, producing a chain entry.
    pub fn apply(&self, params: Vec<Value>) -> ChainEntry {
        ChainEntry {
            name: self.name.clone(),
            params,
            source: ChainSource::Inline(self.rule.clone()),
        }
    }
}

impl fmt::Debug for RuleDecorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDecorator")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Annotation for the composite combinators: applying it with a sub-rule
/// list yields a chain entry tagged with the combinator marker.
#[derive(Debug, Clone, Copy)]
pub struct MultiRuleDecorator {
    kind: CombinatorKind,
}

impl MultiRuleDecorator {
    pub fn new(kind: CombinatorKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> CombinatorKind {
        self.kind
    }

    pub fn apply(&self, sub_rules: Vec<RuleSpec>) -> ChainEntry {
        ChainEntry::combinator(self.kind, sub_rules)
    }
}

/// Convenience appending one or more pre-registered rule names with no
/// parameters, e.g. a "must be a non-null string" marker.
pub fn property_rules(names: &[&str]) -> Vec<ChainEntry> {
    names.iter().map(|name| ChainEntry::rule(*name)).collect()
}

// ==================== Field Rules ====================

/// Ordered rule chain for one property, built fluently.
#[derive(Debug, Clone, Default)]
pub struct FieldRules {
    entries: Vec<ChainEntry>,
}

impl FieldRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a registered rule with no parameters.
    pub fn rule(mut self, name: impl Into<String>) -> Self {
        self.entries.push(ChainEntry::rule(name));
        self
    }

    /// Append a registered rule with parameters.
    pub fn rule_with(mut self, name: impl Into<String>, params: Vec<Value>) -> Self {
        self.entries.push(ChainEntry::rule_with(name, params));
        self
    }

    /// Append an inline rule.
    pub fn inline(mut self, name: impl Into<String>, rule: RuleFn) -> Self {
        self.entries.push(ChainEntry::inline(name, rule));
        self
    }

    /// Append a `oneOf` combinator over sub-rule specs.
    pub fn one_of(mut self, sub_rules: Vec<RuleSpec>) -> Self {
        self.entries
            .push(ChainEntry::combinator(CombinatorKind::OneOf, sub_rules));
        self
    }

    /// Append an `allOf` combinator over sub-rule specs.
    pub fn all_of(mut self, sub_rules: Vec<RuleSpec>) -> Self {
        self.entries
            .push(ChainEntry::combinator(CombinatorKind::AllOf, sub_rules));
        self
    }

    /// Append an `arrayOf` combinator over sub-rule specs.
    pub fn array_of(mut self, sub_rules: Vec<RuleSpec>) -> Self {
        self.entries
            .push(ChainEntry::combinator(CombinatorKind::ArrayOf, sub_rules));
        self
    }

    /// Append a pre-built entry (e.g. from a decorator).
    pub fn entry(mut self, entry: ChainEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Append several pre-built entries.
    pub fn extend(mut self, entries: impl IntoIterator<Item = ChainEntry>) -> Self {
        self.entries.extend(entries);
        self
    }

    pub fn entries(&self) -> &[ChainEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ==================== Schema ====================

/// Ordered map of property name → rule chain for one target shape.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: IndexMap<String, FieldRules>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// The chain for one property, if declared.
    pub fn field(&self, name: &str) -> Option<&FieldRules> {
        self.fields.get(name)
    }

    /// Properties with their chains, in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &FieldRules)> {
        self.fields.iter().map(|(name, rules)| (name.as_str(), rules))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Fluent builder for [`Schema`].
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    fields: IndexMap<String, FieldRules>,
}

impl SchemaBuilder {
    /// Declare (or extend) a property's rule chain.
    ///
    /// Declaring the same property twice extends the existing chain in
    /// order, mirroring how stacked annotations commute within a property.
    pub fn field(mut self, name: impl Into<String>, rules: FieldRules) -> Self {
        let name = name.into();
        match self.fields.get_mut(&name) {
            Some(existing) => existing.entries.extend(rules.entries),
            None => {
                self.fields.insert(name, rules);
            }
        }
        self
    }

    pub fn build(self) -> Schema {
        Schema {
            fields: self.fields,
        }
    }
}
