use std::{
    any::TypeId,
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};
#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};

use once_cell::sync::OnceCell;
use serde_json::{Map, Value};

use crate::database::{handles::table_handle::FieldCodec, CodecConfig, HandleError, HandleType, HandleTypeResolver, TableHandle};

/// Serializer bound to one registered handle type: its type name plus the
/// derived field codec.
struct TaggedSerializer {
    type_name: String,
    fields: FieldCodec,
}

impl TaggedSerializer {
    fn encode(&self, handle: &dyn TableHandle, type_property: &str) -> Result<Value, HandleError> {
        let fields = (self.fields.encode)(handle)?;
        if fields.contains_key(type_property) {
            return Err(HandleError::Serialization(format!(
                "field '{}' of {} collides with the type discriminator",
                type_property, self.type_name
            )));
        }

        let mut envelope = Map::with_capacity(fields.len() + 1);
        envelope.insert(type_property.to_string(), Value::String(self.type_name.clone()));
        envelope.extend(fields);
        Ok(Value::Object(envelope))
    }

    fn decode(&self, fields: Map<String, Value>) -> Result<Box<dyn TableHandle>, HandleError> {
        (self.fields.decode)(fields)
    }
}

type SerializerSlot = Arc<OnceCell<Arc<TaggedSerializer>>>;

/// Encodes and decodes table handles as tagged JSON envelopes:
/// `{"type": "<registered name>", ...handle fields}`.
///
/// Safe to share between threads. Each handle type's serializer is derived at
/// most once; threads racing on the first use of a type wait for the winner.
pub struct TableHandleCodec {
    resolver: HandleTypeResolver,
    config: CodecConfig,
    serializers: RwLock<HashMap<TypeId, SerializerSlot>>,
    /// serializer derivations performed, observed by tests
    #[cfg(test)]
    derivations: AtomicUsize,
}

impl TableHandleCodec {
    pub fn new(resolver: HandleTypeResolver) -> Self {
        Self::with_config(resolver, CodecConfig::default())
    }

    pub fn with_config(resolver: HandleTypeResolver, config: CodecConfig) -> Self {
        Self {
            resolver,
            config,
            serializers: RwLock::new(HashMap::new()),
            #[cfg(test)]
            derivations: AtomicUsize::new(0),
        }
    }

    pub fn resolver(&self) -> &HandleTypeResolver {
        &self.resolver
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// `None` encodes to `null`, without a discriminator.
    pub fn encode(&self, handle: Option<&dyn TableHandle>) -> Result<Value, HandleError> {
        let Some(handle) = handle else {
            return Ok(Value::Null);
        };

        let name = self.resolver.type_name_of(handle).inspect_err(|err| {
            tracing::warn!(%err, "cannot encode table handle");
        })?;
        let handle_type = self.resolver.variant_from_name(name)?;
        self.serializer(handle_type, name).encode(handle, &self.config.type_property)
    }

    /// Reads the discriminator, then materializes the remaining fields as the
    /// registered type. `null` decodes to `None`.
    pub fn decode(&self, envelope: Value) -> Result<Option<Box<dyn TableHandle>>, HandleError> {
        let mut fields = match envelope {
            Value::Null => return Ok(None),
            Value::Object(fields) => fields,
            other => return Err(HandleError::InvalidEnvelope(format!("expected an object, got {}", other))),
        };

        let name = match fields.remove(&self.config.type_property) {
            Some(Value::String(name)) => name,
            Some(other) => return Err(HandleError::UnknownTypeName(Some(other.to_string()))),
            None => return Err(HandleError::UnknownTypeName(None)),
        };

        let handle_type = self.resolver.variant_from_name(&name).inspect_err(|err| {
            tracing::warn!(%err, "cannot decode table handle");
        })?;
        self.serializer(handle_type, &name).decode(fields).map(Some)
    }

    pub fn encode_to_string(&self, handle: Option<&dyn TableHandle>) -> Result<String, HandleError> {
        let value = self.encode(handle)?;
        serde_json::to_string(&value).map_err(|err| HandleError::Serialization(err.to_string()))
    }

    pub fn decode_from_str(&self, text: &str) -> Result<Option<Box<dyn TableHandle>>, HandleError> {
        let value: Value = serde_json::from_str(text).map_err(|err| HandleError::InvalidEnvelope(err.to_string()))?;
        self.decode(value)
    }

    fn serializer(&self, handle_type: &HandleType, name: &str) -> Arc<TaggedSerializer> {
        let type_id = handle_type.type_id();
        let cached = self
            .serializers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned();

        let slot = match cached {
            Some(slot) => slot,
            None => self
                .serializers
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(type_id)
                .or_default()
                .clone(),
        };

        slot.get_or_init(|| {
            #[cfg(test)]
            self.derivations.fetch_add(1, Ordering::SeqCst);
            tracing::debug!(type_name = name, rust_type = handle_type.rust_name(), "deriving table handle serializer");
            Arc::new(TaggedSerializer { type_name: name.to_string(), fields: handle_type.field_codec() })
        })
        .clone()
    }
}
