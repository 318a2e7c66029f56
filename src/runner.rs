//! The script engine: data structures, the tree-walking interpreter, and the
//! built-ins resolved through the super-global scope.

pub mod ds;
pub mod eval;
pub mod plugin;
pub mod std_lib;
