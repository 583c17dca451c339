use std::{any::{Any, TypeId}, fmt, hash::{Hash, Hasher}};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::database::HandleError;

/// Connector-defined identifier of a physical table.
///
/// The core never enumerates the concrete types behind this trait; they are
/// contributed by plugins and bound to type names in a
/// [`HandleTypeResolver`](crate::database::HandleTypeResolver). Implement
/// [`HandleVariant`] on a plain serde type to get this trait for free.
pub trait TableHandle: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn clone_handle(&self) -> Box<dyn TableHandle>;

    fn eq_handle(&self, other: &dyn TableHandle) -> bool;
}

/// Marker for concrete table handle types.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// struct HiveTableHandle { schema: String, table: String }
///
/// impl HandleVariant for HiveTableHandle {}
/// ```
pub trait HandleVariant: Serialize + DeserializeOwned + Clone + PartialEq + fmt::Debug + Send + Sync + 'static {}

impl<T: HandleVariant> TableHandle for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_handle(&self) -> Box<dyn TableHandle> {
        Box::new(self.clone())
    }

    fn eq_handle(&self, other: &dyn TableHandle) -> bool {
        other.as_any().downcast_ref::<T>().is_some_and(|other| other == self)
    }
}

impl dyn TableHandle {
    pub fn downcast_ref<T: TableHandle>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Runtime type of the concrete handle behind the trait object.
    pub fn handle_type_id(&self) -> TypeId {
        self.as_any().type_id()
    }
}

impl Clone for Box<dyn TableHandle> {
    fn clone(&self) -> Self {
        self.clone_handle()
    }
}

impl PartialEq for dyn TableHandle {
    fn eq(&self, other: &Self) -> bool {
        self.eq_handle(other)
    }
}

/// Runtime descriptor of one concrete [`HandleVariant`].
#[derive(Clone, Copy)]
pub struct HandleType {
    type_id: TypeId,
    rust_name: &'static str,
    derive: fn() -> FieldCodec,
}

impl HandleType {
    pub fn of<T: HandleVariant>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            rust_name: std::any::type_name::<T>(),
            derive: FieldCodec::derive::<T>,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn rust_name(&self) -> &'static str {
        self.rust_name
    }

    pub(crate) fn field_codec(&self) -> FieldCodec {
        (self.derive)()
    }
}

impl PartialEq for HandleType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for HandleType {}

impl Hash for HandleType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for HandleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HandleType({})", self.rust_name)
    }
}

/// Field-by-field serializer of one concrete handle type.
#[derive(Clone, Copy)]
pub(crate) struct FieldCodec {
    pub encode: fn(&dyn TableHandle) -> Result<Map<String, Value>, HandleError>,
    pub decode: fn(Map<String, Value>) -> Result<Box<dyn TableHandle>, HandleError>,
}

impl FieldCodec {
    fn derive<T: HandleVariant>() -> Self {
        Self { encode: encode_fields::<T>, decode: decode_fields::<T> }
    }
}

fn encode_fields<T: HandleVariant>(handle: &dyn TableHandle) -> Result<Map<String, Value>, HandleError> {
    let handle = handle.downcast_ref::<T>().ok_or_else(|| {
        HandleError::Serialization(format!("handle {:?} is not a {}", handle, std::any::type_name::<T>()))
    })?;
    match serde_json::to_value(handle) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(other) => Err(HandleError::Serialization(format!(
            "{} must serialize to an object, got {}",
            std::any::type_name::<T>(),
            other
        ))),
        Err(err) => Err(HandleError::Serialization(err.to_string())),
    }
}

fn decode_fields<T: HandleVariant>(fields: Map<String, Value>) -> Result<Box<dyn TableHandle>, HandleError> {
    serde_json::from_value::<T>(Value::Object(fields))
        .map(|handle| Box::new(handle) as Box<dyn TableHandle>)
        .map_err(|err| HandleError::Serialization(err.to_string()))
}
