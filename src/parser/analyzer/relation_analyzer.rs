use crate::parser::{
    analyzer::{AnalysisContext, AnalysisResult, AnalyzerError, Symbol, TupleDescriptor},
    ast::{QualifiedName, Query, Relation, Subquery, Table},
};

/// Resolves a table name to its output shape (the catalog / type checker).
pub trait TableResolver {
    fn resolve(&self, name: &QualifiedName) -> Option<TupleDescriptor>;
}

/// Walks the relations of a query, filling an [`AnalysisContext`].
pub struct RelationAnalyzer;

impl RelationAnalyzer {
    /// Analyze a top-level query in a fresh context.
    pub fn analyze(query: &Query, resolver: &dyn TableResolver) -> Result<AnalysisResult, AnalyzerError> {
        let mut ctx = AnalysisContext::new();
        let (output, symbols) = Self::analyze_query(query, resolver, &mut ctx)?;
        Ok(ctx.into_result(output, symbols, query.criteria.clone()))
    }

    /// Resolve every relation of `query` into `ctx` and allocate one symbol
    /// per output field.
    pub fn analyze_query(
        query: &Query,
        resolver: &dyn TableResolver,
        ctx: &mut AnalysisContext,
    ) -> Result<(TupleDescriptor, Vec<Symbol>), AnalyzerError> {
        let mut parts = Vec::with_capacity(query.relations.len());
        for relation in &query.relations {
            parts.push(Self::analyze_relation(relation, resolver, ctx)?);
        }

        let output = TupleDescriptor::join(&parts);
        let symbols = output.fields().iter().map(|f| ctx.new_symbol(&f.name, f.ty)).collect();
        Ok((output, symbols))
    }

    /// Resolving a node that is already in `ctx` returns the registered shape.
    pub fn analyze_relation(
        relation: &Relation,
        resolver: &dyn TableResolver,
        ctx: &mut AnalysisContext,
    ) -> Result<TupleDescriptor, AnalyzerError> {
        match relation {
            Relation::Table(table) => Self::analyze_table(table, resolver, ctx),
            Relation::Subquery(subquery) => Self::analyze_subquery(subquery, resolver, ctx),
        }
    }

    fn analyze_table(table: &Table, resolver: &dyn TableResolver, ctx: &mut AnalysisContext) -> Result<TupleDescriptor, AnalyzerError> {
        if let Some(descriptor) = ctx.lookup_table(table) {
            return Ok(descriptor.clone());
        }

        let descriptor = resolver
            .resolve(&table.name)
            .ok_or_else(|| AnalyzerError::UnknownTable(table.name.to_string()))?
            .with_relation(&table.visible_name());

        tracing::debug!(table = %table.name, node = %table.id, fields = descriptor.len(), "table resolved");
        ctx.register_table(table, descriptor.clone());
        Ok(descriptor)
    }

    fn analyze_subquery(
        subquery: &Subquery,
        resolver: &dyn TableResolver,
        ctx: &mut AnalysisContext,
    ) -> Result<TupleDescriptor, AnalyzerError> {
        if let Some(descriptor) = ctx.lookup_table(subquery) {
            return Ok(descriptor.clone());
        }

        let mut child = ctx.child_context();
        let (output, symbols) = Self::analyze_query(&subquery.query, resolver, &mut child)?;
        let output = output.with_relation(&subquery.alias);

        let result = child.into_result(output.clone(), symbols, subquery.query.criteria.clone());
        ctx.register_inline_view(subquery, result);
        ctx.register_table(subquery, output.clone());
        Ok(output)
    }
}
