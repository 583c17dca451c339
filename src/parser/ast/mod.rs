pub mod node_id;
pub use node_id::*;

pub mod literal;
pub use literal::*;

pub mod qualified_name;
pub use qualified_name::*;

pub mod expression;
pub use expression::*;

pub mod relation;
pub use relation::*;
