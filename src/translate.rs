//! Message translation boundary
//!
//! The engine never formats user-facing text itself; rules ask the
//! [`Translator`] attached to their context to turn a message key plus
//! parameters into a display string. Applications with a real localization
//! system implement the trait over it; everyone else gets the built-in
//! English templates.

use serde_json::{Map, Value};
use std::collections::HashMap;

/// Maps a message key plus parameters to a display string.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str, params: &Map<String, Value>) -> String;
}

// ==================== Key Translator ====================

/// Echoes the key back unchanged. Useful in tests and for callers that
/// post-process keys themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyTranslator;

impl Translator for KeyTranslator {
    fn translate(&self, key: &str, _params: &Map<String, Value>) -> String {
        key.to_string()
    }
}

// ==================== Template Translator ====================

/// Table-driven translator with `{placeholder}` interpolation.
///
/// Unknown keys fall back to the key itself, so a missing entry degrades to
/// [`KeyTranslator`] behavior instead of panicking.
#[derive(Debug, Clone)]
pub struct TemplateTranslator {
    messages: HashMap<String, String>,
}

impl TemplateTranslator {
    /// Empty table.
    pub fn new() -> Self {
        Self {
            messages: HashMap::new(),
        }
    }

    /// Table pre-populated with English templates for the built-in rules.
    pub fn builtin() -> Self {
        let mut translator = Self::new();
        for (key, template) in [
            ("required", "{name} is required"),
            ("notNull", "{name} must not be null"),
            ("nonNullString", "{name} must be a non-empty string"),
            ("boolean", "{name} must be a boolean"),
            ("minLength", "{name} must be at least {min} characters"),
            ("maxLength", "{name} must be at most {max} characters"),
            ("length", "{name} must be between {min} and {max} characters"),
            ("email", "{name} must be a valid email address"),
            ("url", "{name} must be a valid URL"),
            ("phoneNumber", "{name} must be a valid phone number"),
            ("matches", "{name} does not match the required pattern"),
            ("number", "{name} must be a number"),
            ("min", "{name} must be at least {min}"),
            ("max", "{name} must be at most {max}"),
            ("between", "{name} must be between {min} and {max}"),
        ] {
            translator = translator.with_message(key, template);
        }
        translator
    }

    /// Add or replace a message template.
    pub fn with_message(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.messages.insert(key.into(), template.into());
        self
    }

    fn interpolate(template: &str, params: &Map<String, Value>) -> String {
        let mut message = template.to_string();
        for (name, value) in params {
            let placeholder = format!("{{{name}}}");
            if message.contains(&placeholder) {
                let rendered = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                message = message.replace(&placeholder, &rendered);
            }
        }
        message
    }
}

impl Default for TemplateTranslator {
    /// Defaults to the built-in English table.
    fn default() -> Self {
        Self::builtin()
    }
}

impl Translator for TemplateTranslator {
    fn translate(&self, key: &str, params: &Map<String, Value>) -> String {
        match self.messages.get(key) {
            Some(template) => Self::interpolate(template, params),
            None => key.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(entries: &[(&str, Value)]) -> Map<String, Value> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn key_translator_echoes_key() {
        let t = KeyTranslator;
        assert_eq!(t.translate("email", &Map::new()), "email");
    }

    #[test]
    fn template_translator_interpolates_params() {
        let t = TemplateTranslator::builtin();
        let msg = t.translate(
            "minLength",
            &params(&[("name", json!("password")), ("min", json!(8))]),
        );
        assert_eq!(msg, "password must be at least 8 characters");
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        let t = TemplateTranslator::new();
        assert_eq!(t.translate("custom.rule", &Map::new()), "custom.rule");
    }
}
