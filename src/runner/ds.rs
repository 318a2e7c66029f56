pub mod env_record;
pub mod error;
pub mod heap;
pub mod object;
pub mod object_property;
pub mod operations;
pub mod realm;
pub mod symbol;
pub mod value;
