//! Built-in leaf rules
//!
//! Each submodule exports a `register` function; [`register_builtin_rules`]
//! is the static initialization list that installs all of them. Applications
//! call it (or the individual `register` functions) from their entry point;
//! nothing here registers itself as an import side effect.
//!
//! Rule names are exposed as constants in [`names`] so in-crate callers get
//! compile-checked identifiers; the registry itself stays string-keyed for
//! user-extensible custom rules.

pub mod basic;
pub mod numeric;
pub mod string;

use crate::registry::RuleRegistry;

/// Compile-checked names of the built-in rules.
pub mod names {
    pub const REQUIRED: &str = "required";
    pub const NOT_NULL: &str = "notNull";
    pub const NON_NULL_STRING: &str = "nonNullString";
    pub const BOOLEAN: &str = "boolean";

    pub const MIN_LENGTH: &str = "minLength";
    pub const MAX_LENGTH: &str = "maxLength";
    pub const LENGTH: &str = "length";
    pub const EMAIL: &str = "email";
    pub const URL: &str = "url";
    pub const PHONE_NUMBER: &str = "phoneNumber";
    pub const MATCHES: &str = "matches";

    pub const NUMBER: &str = "number";
    pub const MIN: &str = "min";
    pub const MAX: &str = "max";
    pub const BETWEEN: &str = "between";
}

/// Install every built-in rule into `registry`.
pub fn register_builtin_rules(registry: &RuleRegistry) {
    basic::register(registry);
    string::register(registry);
    numeric::register(registry);
}
