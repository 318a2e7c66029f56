//! Standard library built-in objects.
//!
//! The built-ins scripts can reach without declaring them: the error
//! constructors, `Symbol`, the primitive conversion functions and `console`.

pub mod console;
pub mod conversion;
pub mod core;
pub mod error;
pub mod symbol;

pub use self::core::register_core_builtins;
