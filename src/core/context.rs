//! Validation context passed to every rule invocation

use crate::translate::{TemplateTranslator, Translator};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Everything a rule function can see for one invocation.
///
/// `context` and `data` are opaque pass-through payloads supplied by the
/// caller; the engine threads them into every rule but never inspects their
/// shape. The context owns its value so rule futures can run without
/// borrowing from the caller's frame.
#[derive(Clone)]
pub struct ValidationContext {
    /// The value under validation.
    pub value: Value,
    /// Parameters of the rule currently running.
    pub rule_params: Vec<Value>,
    /// Field name supplied by the caller, if any.
    pub field_name: Option<String>,
    /// Property name when validating a schema target.
    pub property_name: Option<String>,
    /// Localized display name for the property, when the caller has one.
    pub translated_property_name: Option<String>,
    /// Opaque caller payload.
    pub context: Option<Value>,
    /// The whole target object during target validation.
    pub data: Option<Value>,
    /// Translation facility for message formatting.
    pub translator: Arc<dyn Translator>,
}

impl ValidationContext {
    /// Context for a single value with the built-in translator.
    pub fn new(value: Value) -> Self {
        Self {
            value,
            rule_params: Vec::new(),
            field_name: None,
            property_name: None,
            translated_property_name: None,
            context: None,
            data: None,
            translator: Arc::new(TemplateTranslator::builtin()),
        }
    }

    pub fn with_rule_params(mut self, rule_params: Vec<Value>) -> Self {
        self.rule_params = rule_params;
        self
    }

    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }

    pub fn with_property_name(mut self, property_name: impl Into<String>) -> Self {
        self.property_name = Some(property_name.into());
        self
    }

    pub fn with_translated_property_name(mut self, name: impl Into<String>) -> Self {
        self.translated_property_name = Some(name.into());
        self
    }

    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    /// Parameter at `index`, if the rule received one.
    pub fn param(&self, index: usize) -> Option<&Value> {
        self.rule_params.get(index)
    }

    /// Best available display name for messages: the translated property
    /// name, then the property name, then the field name, then `"value"`.
    pub fn display_name(&self) -> &str {
        self.translated_property_name
            .as_deref()
            .or(self.property_name.as_deref())
            .or(self.field_name.as_deref())
            .unwrap_or("value")
    }

    /// Message parameters seeded with the display name under `"name"`.
    pub fn message_params(&self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert(
            "name".to_string(),
            Value::String(self.display_name().to_string()),
        );
        params
    }

    /// Format a message through the attached translator.
    pub fn translate(&self, key: &str, params: &Map<String, Value>) -> String {
        self.translator.translate(key, params)
    }

    /// Child context for a different value, keeping names, payloads and
    /// translator. Used by `arrayOf` for per-element validation.
    pub fn for_value(&self, value: Value) -> Self {
        Self {
            value,
            rule_params: Vec::new(),
            ..self.clone()
        }
    }

    /// Sibling context for the same value with different rule parameters.
    pub fn for_rule(&self, rule_params: Vec<Value>) -> Self {
        Self {
            rule_params,
            ..self.clone()
        }
    }
}

impl fmt::Debug for ValidationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationContext")
            .field("value", &self.value)
            .field("rule_params", &self.rule_params)
            .field("field_name", &self.field_name)
            .field("property_name", &self.property_name)
            .field("translated_property_name", &self.translated_property_name)
            .field("context", &self.context)
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}
