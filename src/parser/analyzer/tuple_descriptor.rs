use serde::{Deserialize, Serialize};

use crate::database::SqlType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// visible relation name (alias or table), if any
    pub relation: Option<String>,
    pub name: String,
    pub ty: SqlType,
}

impl Field {
    pub fn new(relation: Option<&str>, name: &str, ty: SqlType) -> Self {
        Self { relation: relation.map(str::to_string), name: name.to_string(), ty }
    }
}

/// Resolved output shape of a relation: ordered, named, typed fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TupleDescriptor {
    fields: Vec<Field>,
}

impl TupleDescriptor {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Same fields, re-qualified with `relation`.
    pub fn with_relation(&self, relation: &str) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .map(|f| Field { relation: Some(relation.to_string()), ..f.clone() })
                .collect(),
        }
    }

    /// Concatenation of several descriptors, in order.
    pub fn join<'a>(parts: impl IntoIterator<Item = &'a TupleDescriptor>) -> Self {
        Self { fields: parts.into_iter().flat_map(|d| d.fields.iter().cloned()).collect() }
    }
}
