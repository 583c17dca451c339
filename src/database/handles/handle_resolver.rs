use std::{any::TypeId, collections::HashMap};

use indexmap::IndexMap;

use crate::database::{HandleError, HandleType, HandleVariant, TableHandle};

/// Bijection between table handle type names and concrete handle types.
///
/// Built once when plugins are loaded and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct HandleTypeResolver {
    by_name: IndexMap<String, HandleType>,
    by_type: HashMap<TypeId, String>,
}

impl HandleTypeResolver {
    /// Fails with [`HandleError::DuplicateTypeBinding`] unless the bindings are
    /// injective in both directions.
    pub fn new<I, S>(bindings: I) -> Result<Self, HandleError>
    where
        I: IntoIterator<Item = (S, HandleType)>,
        S: Into<String>,
    {
        let mut by_name = IndexMap::new();
        let mut by_type = HashMap::new();

        for (name, handle_type) in bindings {
            let name = name.into();
            if by_name.contains_key(&name) || by_type.contains_key(&handle_type.type_id()) {
                return Err(HandleError::DuplicateTypeBinding {
                    name,
                    rust_type: handle_type.rust_name().to_string(),
                });
            }
            by_type.insert(handle_type.type_id(), name.clone());
            by_name.insert(name, handle_type);
        }

        tracing::debug!(types = ?by_name.keys().collect::<Vec<_>>(), "table handle types registered");
        Ok(Self { by_name, by_type })
    }

    pub fn type_name_of(&self, handle: &dyn TableHandle) -> Result<&str, HandleError> {
        self.by_type
            .get(&handle.handle_type_id())
            .map(String::as_str)
            .ok_or_else(|| HandleError::UnknownHandleType(format!("{:?}", handle)))
    }

    pub fn variant_from_name(&self, name: &str) -> Result<&HandleType, HandleError> {
        self.by_name
            .get(name)
            .ok_or_else(|| HandleError::UnknownTypeName(Some(name.to_string())))
    }

    pub fn list(&self) -> Vec<String> {
        let mut v: Vec<_> = self.by_name.keys().cloned().collect();
        v.sort();
        v
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Collects handle types contributed by plugins at startup.
#[derive(Debug, Default)]
pub struct HandleRegistryBuilder {
    bindings: Vec<(String, HandleType)>,
}

impl HandleRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: HandleVariant>(&mut self, name: impl Into<String>) -> &mut Self {
        self.bindings.push((name.into(), HandleType::of::<T>()));
        self
    }

    pub fn build(self) -> Result<HandleTypeResolver, HandleError> {
        HandleTypeResolver::new(self.bindings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct HandleA { table: String }
    impl HandleVariant for HandleA {}

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct HandleB { path: String }
    impl HandleVariant for HandleB {}

    #[test]
    fn two_names_for_one_type_is_rejected() {
        let err = HandleTypeResolver::new([("x", HandleType::of::<HandleA>()), ("y", HandleType::of::<HandleA>())]).unwrap_err();
        assert!(matches!(err, HandleError::DuplicateTypeBinding { ref name, .. } if name == "y"));
    }

    #[test]
    fn one_name_for_two_types_is_rejected() {
        let mut builder = HandleRegistryBuilder::new();
        builder.register::<HandleA>("x").register::<HandleB>("x");
        assert!(matches!(builder.build(), Err(HandleError::DuplicateTypeBinding { .. })));
    }

    #[test]
    fn variant_lookup_by_name() {
        let resolver = HandleTypeResolver::new([("x", HandleType::of::<HandleA>())]).unwrap();
        assert_eq!(resolver.variant_from_name("x").unwrap(), &HandleType::of::<HandleA>());
        assert_eq!(
            resolver.variant_from_name("z").unwrap_err(),
            HandleError::UnknownTypeName(Some("z".to_string()))
        );
    }

    #[test]
    fn type_name_resolves_from_runtime_type() {
        let mut builder = HandleRegistryBuilder::new();
        builder.register::<HandleA>("native").register::<HandleB>("file");
        let resolver = builder.build().unwrap();

        assert_eq!(resolver.list(), vec!["file", "native"]);
        assert_eq!(resolver.type_name_of(&HandleB { path: "/tmp".into() }).unwrap(), "file");

        let only_a = HandleTypeResolver::new([("native", HandleType::of::<HandleA>())]).unwrap();
        assert!(matches!(
            only_a.type_name_of(&HandleB { path: "/tmp".into() }),
            Err(HandleError::UnknownHandleType(_))
        ));
    }
}
