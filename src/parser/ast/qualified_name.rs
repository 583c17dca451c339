use std::fmt;

/// Dotted identifier such as `orders.total` or `catalog.schema.table`.
///
/// Parts are stored lowercased.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    parts: Vec<String>,
}

impl QualifiedName {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self { parts: parts.into_iter().map(|p| p.as_ref().to_ascii_lowercase()).collect() }
    }

    pub fn of(name: &str) -> Self {
        Self::new(name.split('.'))
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Last part, e.g. the column in `t.col`.
    pub fn suffix(&self) -> &str {
        self.parts.last().map(String::as_str).unwrap_or_default()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.parts.join("."))
    }
}

impl fmt::Debug for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QualifiedName({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_are_lowercased() {
        let name = QualifiedName::of("Orders.Total");
        assert_eq!(name.parts(), &["orders".to_string(), "total".to_string()]);
        assert_eq!(name.suffix(), "total");
        assert_eq!(name.to_string(), "orders.total");
    }
}
