use indexmap::IndexMap;

use crate::parser::{analyzer::{Symbol, TupleDescriptor}, ast::{Expression, NodeId}};

/// Everything learned while analyzing one query scope, frozen once the scope
/// is finished.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub output: TupleDescriptor,
    /// one symbol per output field
    pub output_symbols: Vec<Symbol>,
    pub criteria: Option<Expression>,
    /// relation node -> resolved shape, for relations of this scope
    pub table_descriptors: IndexMap<NodeId, TupleDescriptor>,
    /// subquery node -> nested result, for inline views of this scope
    pub inline_views: IndexMap<NodeId, AnalysisResult>,
}
