//! # jsbridge - an embeddable script engine with a host bridge
//!
//! A host application creates isolated runtimes, runs script source in them,
//! exchanges values, and exposes its own functions to scripts:
//! - Handle-based embedding API with idempotent teardown
//! - Synchronous, reentrant callbacks from script into the host
//! - PEG parser and tree-walking interpreter for an ECMAScript subset
//! - Built-ins resolved lazily through a super-global scope
//!
//! ## Quick Start
//!
//! ### Evaluating a script
//!
//! ```no_run
//! use jsbridge::embed::{Context, Evaluator, Globals, NativeHandle, VmInstance};
//!
//! let globals = Globals::initialize().unwrap();
//! let vm = VmInstance::create(&globals, Some("en-US"), None).unwrap();
//! let ctx = Context::create(&vm).unwrap();
//!
//! assert_eq!(
//!     Evaluator::eval_script(&ctx, "a = 1", "first.js", true).unwrap(),
//!     Some("1".to_string())
//! );
//! // Globals persist between evaluations in the same context.
//! assert_eq!(
//!     Evaluator::eval_script(&ctx, "a + 1", "second.js", false).unwrap(),
//!     Some("2".to_string())
//! );
//! // Script errors are contained.
//! assert_eq!(Evaluator::eval_script(&ctx, "@@", "bad.js", false).unwrap(), None);
//!
//! ctx.destroy();
//! vm.destroy();
//! globals.finalize();
//! ```
//!
//! ### Calling back into the host
//!
//! ```no_run
//! use jsbridge::embed::{Bridge, Context, Evaluator, Globals, VmInstance};
//!
//! let globals = Globals::initialize().unwrap();
//! let vm = VmInstance::create(&globals, None, None).unwrap();
//! let ctx = Context::create(&vm).unwrap();
//!
//! Bridge::register(&ctx, "Native", "addString", |s: Option<String>| {
//!     s.map(|s| s + "ASdfasdfasdf")
//! })
//! .unwrap();
//! let out = Evaluator::eval_script(&ctx, "Native.addString('dddd')", "bridge.js", false);
//! assert_eq!(out.unwrap().as_deref(), Some("ddddASdfasdfasdf"));
//! ```
//!
//! ### Running the engine without the embedding layer
//!
//! ```
//! use jsbridge::parser::JsParser;
//! use jsbridge::runner::eval::statement::evaluate_program;
//! use jsbridge::runner::plugin::types::EvalContext;
//! use jsbridge::runner::ds::value::{JsNumberType, JsValue};
//!
//! let ast = JsParser::parse_to_ast_from_str("var x = 5 + 3; x * 2").unwrap();
//! let mut ctx = EvalContext::new();
//! let result = evaluate_program(&ast, &mut ctx).unwrap();
//! assert_eq!(result, JsValue::Number(JsNumberType::Integer(16)));
//! ```
//!
//! ## Handles
//!
//! Every VM, context and value the host holds is a handle into a
//! generational table owned by [`embed::Globals`]. Destroying a handle is
//! idempotent and invalidates every clone of it at once; any later use other
//! than `has_valid_native_pointer` or `destroy` fails with
//! `DestroyedHandleError`. Destroying a VM destroys its contexts.
//! Finalizing the globals destroys everything.
//!
//! ## Architecture
//!
//! - **[`embed`]** - Host-facing API: globals, VMs, contexts, values, evaluator, bridge
//! - **[`parser`]** - PEG parser and AST types
//! - **[`runner`]** - The engine
//!   - **[`runner::plugin`]** - Super-global scope and the host-function table
//!   - **[`runner::ds`]** - Data structures (values, objects, environments, realms)
//!   - **[`runner::eval`]** - Tree-walking interpreter
//!   - **[`runner::std_lib`]** - Built-in objects

#[macro_use]
extern crate lazy_static;

pub mod embed;
pub mod parser;
pub mod runner;

pub use embed::{
    Bridge, Context, EmbedError, EngineConfig, Evaluator, Globals, Memory, NativeHandle,
    StringValue, SymbolValue, ValueHandle, VmInstance,
};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Mutex, MutexGuard};

    lazy_static! {
        static ref GLOBALS_LOCK: Mutex<()> = Mutex::new(());
    }

    /// Serializes tests that initialize the process-wide globals.
    pub fn lock() -> MutexGuard<'static, ()> {
        let _ = env_logger::builder().is_test(true).try_init();
        GLOBALS_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
