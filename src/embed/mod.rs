//! The host-facing embedding API.
//!
//! ```no_run
//! use jsbridge::embed::{Bridge, Context, Evaluator, Globals, NativeHandle, VmInstance};
//!
//! let globals = Globals::initialize().unwrap();
//! let vm = VmInstance::create(&globals, None, None).unwrap();
//! let ctx = Context::create(&vm).unwrap();
//! Bridge::register(&ctx, "Host", "shout", |s| s.map(|s| s.to_uppercase())).unwrap();
//! let out = Evaluator::eval_script(&ctx, "Host.shout('hi')", "demo.js", false).unwrap();
//! assert_eq!(out.as_deref(), Some("HI"));
//! ctx.destroy();
//! vm.destroy();
//! globals.finalize();
//! ```

pub mod bridge;
pub mod config;
pub mod context;
pub mod error;
pub mod evaluator;
pub mod globals;
pub mod handle;
pub mod memory;
mod registry;
pub mod value;
pub mod vm;

pub use self::bridge::Bridge;
pub use self::config::EngineConfig;
pub use self::context::Context;
pub use self::error::EmbedError;
pub use self::evaluator::Evaluator;
pub use self::globals::Globals;
pub use self::handle::{HandleId, HandleState, NativeHandle};
pub use self::memory::{Memory, MemoryStats};
pub use self::value::{StringValue, SymbolValue, ValueHandle};
pub use self::vm::VmInstance;
