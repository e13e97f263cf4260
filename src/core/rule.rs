//! The rule boundary: the async `Rule` trait and shareable `RuleFn` handle
//!
//! A rule either accepts a value (`Ok(())`) or rejects it with a
//! [`RuleError`]. There is no boolean/string duck-typing at this boundary;
//! everything is an explicit `Result`. Panics inside rules are handled by a
//! single adapter in the engine, not here.

use crate::core::context::ValidationContext;
use crate::core::error::RuleError;
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::fmt;
use std::sync::Arc;

/// Outcome of one rule invocation.
pub type RuleResult = Result<(), RuleError>;

// ==================== Rule Trait ====================

/// A validation predicate over a [`ValidationContext`].
///
/// Implement this for stateful rules (compiled regexes, service clients);
/// use [`RuleFn::from_fn`] / [`RuleFn::from_sync`] for closures.
#[async_trait]
pub trait Rule: Send + Sync {
    async fn check(&self, ctx: &ValidationContext) -> RuleResult;
}

// ==================== RuleFn Handle ====================

/// Cheaply cloneable shared handle to a rule.
///
/// This is what the registry stores and the engine executes. Cloning clones
/// the `Arc`, never the rule itself, so inline rules can be captured by
/// combinators and schemas without lifetime gymnastics.
#[derive(Clone)]
pub struct RuleFn(Arc<dyn Rule>);

impl RuleFn {
    /// Wrap any [`Rule`] implementation.
    pub fn new<R: Rule + 'static>(rule: R) -> Self {
        Self(Arc::new(rule))
    }

    /// Rule from an async closure returning a boxed future.
    ///
    /// ```rust,ignore
    /// use futures::FutureExt;
    ///
    /// let rule = RuleFn::from_fn(|ctx| {
    ///     async move { remote_check(&ctx.value).await }.boxed()
    /// });
    /// ```
    pub fn from_fn<F>(f: F) -> Self
    where
        F: for<'a> Fn(&'a ValidationContext) -> BoxFuture<'a, RuleResult> + Send + Sync + 'static,
    {
        Self::new(FnRule(f))
    }

    /// Rule from a synchronous closure. Most leaf predicates are sync.
    pub fn from_sync<F>(f: F) -> Self
    where
        F: Fn(&ValidationContext) -> RuleResult + Send + Sync + 'static,
    {
        Self::new(SyncRule(f))
    }

    /// Run the rule against a context.
    pub async fn check(&self, ctx: &ValidationContext) -> RuleResult {
        self.0.check(ctx).await
    }

    /// Whether two handles point at the same rule instance.
    pub fn same_rule(&self, other: &RuleFn) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for RuleFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RuleFn(..)")
    }
}

// ==================== Closure Adapters ====================

struct FnRule<F>(F);

#[async_trait]
impl<F> Rule for FnRule<F>
where
    F: for<'a> Fn(&'a ValidationContext) -> BoxFuture<'a, RuleResult> + Send + Sync,
{
    async fn check(&self, ctx: &ValidationContext) -> RuleResult {
        (self.0)(ctx).await
    }
}

struct SyncRule<F>(F);

#[async_trait]
impl<F> Rule for SyncRule<F>
where
    F: Fn(&ValidationContext) -> RuleResult + Send + Sync,
{
    async fn check(&self, ctx: &ValidationContext) -> RuleResult {
        (self.0)(ctx)
    }
}
