//! Plugin architecture and super-global scope.
//!
//! Built-ins are not preloaded into the global scope. They live in the
//! **super-global scope**, which sits below the global scope and resolves
//! names on demand:
//!
//! ```text
//! Variable Lookup Order:
//! 1. Local scope (function/block)
//! 2. Outer scopes (lexical chain)
//! 3. Global scope
//! 4. Super-global scope ← built-ins and plugins live here
//! ```
//!
//! ### Key Components
//!
//! - **[`PluginResolver`]**: trait for providing named values on demand
//! - **[`SuperGlobalEnvironment`]**: the ordered resolver list plus a per-realm cache
//! - **[`CorePluginResolver`]**: adapter exposing a [`BuiltInRegistry`] as a resolver
//! - **[`HostFunctionTable`]**: host callbacks bridged into the realm
//! - **[`EvalContext`](types::EvalContext)**: execution context with super-global integration
//!
//! ## Example: Custom Plugin
//!
//! ```
//! use std::rc::Rc;
//! use jsbridge::parser::JsParser;
//! use jsbridge::runner::eval::statement::evaluate_program;
//! use jsbridge::runner::plugin::resolver::PluginResolver;
//! use jsbridge::runner::plugin::types::EvalContext;
//! use jsbridge::runner::ds::value::{JsValue, JsNumberType};
//! use jsbridge::runner::ds::error::JErrorType;
//!
//! struct AnswerPlugin;
//!
//! impl PluginResolver for AnswerPlugin {
//!     fn has_binding(&self, name: &str) -> bool {
//!         name == "ANSWER"
//!     }
//!
//!     fn resolve(&self, _name: &str, _ctx: &mut EvalContext) -> Result<JsValue, JErrorType> {
//!         Ok(JsValue::Number(JsNumberType::Integer(42)))
//!     }
//!
//!     fn name(&self) -> &str { "answer_plugin" }
//! }
//!
//! let mut ctx = EvalContext::new();
//! ctx.add_resolver(Rc::new(AnswerPlugin));
//! let ast = JsParser::parse_to_ast_from_str("ANSWER + 1").unwrap();
//! let result = evaluate_program(&ast, &mut ctx).unwrap();
//! assert_eq!(result, JsValue::Number(JsNumberType::Integer(43)));
//! ```

pub mod core_resolver;
pub mod host;
pub mod registry;
pub mod resolver;
pub mod super_global;
pub mod types;

pub use core_resolver::CorePluginResolver;
pub use host::{HostCallback, HostFunctionTable};
pub use registry::BuiltInRegistry;
pub use resolver::PluginResolver;
pub use super_global::SuperGlobalEnvironment;
pub use types::{BuiltInObject, EvalContext, NativeFn};
