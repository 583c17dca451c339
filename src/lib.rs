pub mod parser;
pub use parser::analyzer::{AnalysisContext, AnalysisResult, AnalyzerError, RelationAnalyzer, Symbol, SymbolAllocator, TableResolver, TupleDescriptor};

pub mod planner;
pub use planner::{DeterminismEvaluator, ExpressionUtils, PlannerError};

pub mod database;
pub use database::{CodecConfig, HandleError, HandleRegistryBuilder, HandleType, HandleTypeResolver, HandleVariant, SqlType, TableHandle, TableHandleCodec};
