use std::fmt;

/// Stable identity of a node in the parsed query tree.
///
/// Ids are handed out by a [`NodeIdGenerator`] while the tree is built, so two
/// textually identical subqueries still get different ids. Analysis state is
/// keyed by this value, never by structural equality of the node itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic id source, one per parsed statement.
#[derive(Debug, Default)]
pub struct NodeIdGenerator {
    next: u64,
}

impl NodeIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}

/// Anything in the query tree that carries a [`NodeId`].
pub trait Node {
    fn node_id(&self) -> NodeId;
}

impl Node for NodeId {
    fn node_id(&self) -> NodeId {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_never_repeats() {
        let mut ids = NodeIdGenerator::new();
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
        assert_eq!(a.value() + 1, b.value());
        assert_eq!(format!("{}", b), "#1");
    }
}
