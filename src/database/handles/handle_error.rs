use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum HandleError {
    /// A type name or a handle type was bound more than once.
    DuplicateTypeBinding { name: String, rust_type: String },
    /// The handle's concrete type was never registered.
    UnknownHandleType(String),
    /// Discriminator missing (`None`) or not registered.
    UnknownTypeName(Option<String>),
    /// Envelope is neither null nor an object.
    InvalidEnvelope(String),
    Serialization(String),
}

impl Display for HandleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandleError::DuplicateTypeBinding { name, rust_type } => {
                write!(f, "HandleError: duplicate table handle binding '{}' <-> {}", name, rust_type)
            }
            HandleError::UnknownHandleType(rust_type) => {
                write!(f, "HandleError: table handle type {} is not registered", rust_type)
            }
            HandleError::UnknownTypeName(Some(name)) => {
                write!(f, "HandleError: table handle type name '{}' is unknown", name)
            }
            HandleError::UnknownTypeName(None) => {
                write!(f, "HandleError: table handle envelope has no type name")
            }
            HandleError::InvalidEnvelope(msg) => write!(f, "HandleError: invalid envelope: {}", msg),
            HandleError::Serialization(msg) => write!(f, "HandleError: serialization failed: {}", msg),
        }
    }
}

impl std::error::Error for HandleError {}
