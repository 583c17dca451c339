pub mod sql_type;
pub use sql_type::*;
