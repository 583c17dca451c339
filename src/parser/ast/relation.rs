use crate::parser::ast::{Expression, Node, NodeId, NodeIdGenerator, QualifiedName};

/// Reference to a named table, optionally aliased.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub id: NodeId,
    pub name: QualifiedName,
    pub alias: Option<String>,
}

impl Table {
    pub fn new(ids: &mut NodeIdGenerator, name: &str, alias: Option<&str>) -> Self {
        Self { id: ids.next_id(), name: QualifiedName::of(name), alias: alias.map(str::to_ascii_lowercase) }
    }

    /// Name visible to the rest of the query (alias or table name).
    pub fn visible_name(&self) -> String {
        self.alias.clone().unwrap_or_else(|| self.name.suffix().to_string())
    }
}

/// Parenthesized inline query used as a relation.
#[derive(Debug, Clone, PartialEq)]
pub struct Subquery {
    pub id: NodeId,
    pub query: Box<Query>,
    pub alias: String,
}

impl Subquery {
    pub fn new(ids: &mut NodeIdGenerator, query: Query, alias: &str) -> Self {
        Self { id: ids.next_id(), query: Box::new(query), alias: alias.to_ascii_lowercase() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Relation {
    Table(Table),
    Subquery(Subquery),
}

impl Relation {
    pub fn visible_name(&self) -> String {
        match self {
            Relation::Table(table) => table.visible_name(),
            Relation::Subquery(subquery) => subquery.alias.clone(),
        }
    }
}

/// `SELECT * FROM <relations> [WHERE <criteria>]`, the shape the analyzer walks.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub id: NodeId,
    pub relations: Vec<Relation>,
    pub criteria: Option<Expression>,
}

impl Query {
    pub fn new(ids: &mut NodeIdGenerator, relations: Vec<Relation>, criteria: Option<Expression>) -> Self {
        Self { id: ids.next_id(), relations, criteria }
    }
}

impl Node for Table {
    fn node_id(&self) -> NodeId {
        self.id
    }
}

impl Node for Subquery {
    fn node_id(&self) -> NodeId {
        self.id
    }
}

impl Node for Relation {
    fn node_id(&self) -> NodeId {
        match self {
            Relation::Table(table) => table.id,
            Relation::Subquery(subquery) => subquery.id,
        }
    }
}

impl Node for Query {
    fn node_id(&self) -> NodeId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_tables_get_distinct_ids() {
        let mut ids = NodeIdGenerator::new();
        let a = Table::new(&mut ids, "orders", None);
        let b = Table::new(&mut ids, "orders", None);
        assert_eq!(a.name, b.name);
        assert_ne!(a.node_id(), b.node_id());
        assert_ne!(a, b);
    }

    #[test]
    fn visible_name_prefers_alias() {
        let mut ids = NodeIdGenerator::new();
        let t = Relation::Table(Table::new(&mut ids, "shop.Orders", Some("O")));
        assert_eq!(t.visible_name(), "o");
        let t = Relation::Table(Table::new(&mut ids, "shop.Orders", None));
        assert_eq!(t.visible_name(), "orders");
    }
}
