/// Settings for the table handle codec.
///
/// - `type_property` is the envelope key that carries the type discriminator.
#[derive(Debug, Clone, PartialEq)]
pub struct CodecConfig {
    /// Reserved field holding the handle's registered type name
    pub type_property: String,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self { type_property: "type".to_string() }
    }
}

impl CodecConfig {
    /// Create default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience: use `type_property` as the discriminator key.
    pub fn with_type_property(type_property: &str) -> Self {
        Self { type_property: type_property.to_string() }
    }
}
