pub mod analyzer_error;
pub use analyzer_error::*;

pub mod symbol;
pub use symbol::*;

pub mod symbol_allocator;
pub use symbol_allocator::*;

pub mod tuple_descriptor;
pub use tuple_descriptor::*;

pub mod analysis_result;
pub use analysis_result::*;

pub mod analysis_context;
pub use analysis_context::*;

pub mod relation_analyzer;
pub use relation_analyzer::*;
