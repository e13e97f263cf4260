//! Composite combinators: `oneOf`, `allOf`, `arrayOf`
//!
//! Each factory takes a list of sub-rule specs and returns an ordinary
//! [`RuleFn`](crate::core::rule::RuleFn), so combinators nest inside each
//! other and can be registered like any other rule. They hold a clone of the
//! registry and resolve their sub-specs fresh on every invocation.
//!
//! Aggregation policies differ per combinator:
//!
//! - [`one_of`]: logical OR. Sub-rules are issued concurrently; any success
//!   wins. When all fail, every message is joined with `"; "` in declaration
//!   order.
//! - [`all_of`]: logical AND, exhaustive. Every sub-rule runs even after an
//!   earlier failure, and all failing messages are aggregated.
//! - [`array_of`]: `all_of` applied per element of an array value, with each
//!   failure message decorated by the element's index.
//!
//! Empty sub-rule lists (and empty arrays for `array_of`) are vacuously
//! valid.

mod all_of;
mod array_of;
mod one_of;

pub use self::all_of::all_of;
pub use self::array_of::array_of;
pub use self::one_of::one_of;

pub(crate) const MESSAGE_SEPARATOR: &str = "; ";

use crate::core::error::RuleError;
use crate::spec::ParsedRules;

/// Unknown sub-rule names abort the combinator with an `invalidRule` error.
pub(crate) fn reject_invalid_subs(parsed: &ParsedRules) -> Result<(), RuleError> {
    if parsed.invalid_rules.is_empty() {
        Ok(())
    } else {
        Err(RuleError::unknown_rule(format!(
            "unknown rule(s): {}",
            parsed.invalid_names().join(", ")
        )))
    }
}
