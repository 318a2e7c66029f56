//! Plugin resolver trait for lazy resolution of super-global names.
//!
//! Resolvers provide names such as `Symbol` or `console` that scripts can use
//! without declaring them. A name is materialized only when a script first
//! reads it.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::types::EvalContext;

/// A plugin resolver that can provide named values on demand.
///
/// Resolvers are queried in registration order when a name lookup falls off
/// the end of the scope chain. The first resolver that claims a name wins.
pub trait PluginResolver {
    /// Does this resolver provide a binding with the given name?
    ///
    /// This must be a cheap check and must not materialize the value.
    fn has_binding(&self, name: &str) -> bool;

    /// Materialize the value for the given name.
    ///
    /// Called only after `has_binding` returned `true`. The result is cached
    /// per realm, so this runs at most once per name.
    fn resolve(&self, name: &str, ctx: &mut EvalContext) -> Result<JsValue, JErrorType>;

    /// Human-readable name for this resolver, used in logs.
    fn name(&self) -> &str;
}
