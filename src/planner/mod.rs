pub mod planner_error;
pub use planner_error::*;

pub mod determinism;
pub use determinism::*;

pub mod expression_utils;
pub use expression_utils::*;
