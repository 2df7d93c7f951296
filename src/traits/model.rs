//! Model trait shared by every Accela resource.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{AccelaError, Result};
use crate::fields::FieldCodec;

/// The payload a model was decoded from, kept verbatim.
///
/// Holds fields the model does not map. It is never serialized with the
/// model and is not meant for typed access.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPayload(Arc<Value>);

impl RawPayload {
    pub fn new(value: Value) -> Self {
        Self(Arc::new(value))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Look up a top-level key by its API (camelCase) name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// True when no payload was attached (e.g. a model built by hand).
    pub fn is_empty(&self) -> bool {
        self.0.is_null()
    }
}

/// A typed Accela resource decoded through a static [`FieldCodec`].
///
/// The struct's field names are the codec's internal names, so the decoded
/// map deserializes straight into it. Implementors mark their `raw` field
/// `#[serde(skip)]` so [`ResourceModel::to_mapping`] leaves it out.
pub trait ResourceModel: Serialize + DeserializeOwned + Send + Sync + Sized + 'static {
    /// Human-readable name used in logs and decode errors.
    const NAME: &'static str;

    /// Field table for this model.
    const CODEC: &'static FieldCodec;

    /// The payload this instance was decoded from.
    fn raw(&self) -> &RawPayload;

    /// Attach the source payload after decoding.
    fn attach_raw(&mut self, raw: RawPayload);

    /// Decode a raw API item.
    ///
    /// # Errors
    ///
    /// Returns [`AccelaError::Decode`] when a required field is missing or a
    /// value does not fit the model.
    fn from_json(raw: Value) -> Result<Self> {
        let decoded = Self::CODEC.decode(&raw)?;

        let mut model: Self = serde_path_to_error::deserialize(serde_json::to_value(&decoded)?)
            .map_err(|e| {
                let field = failing_field(Self::CODEC, e.path()).unwrap_or(Self::NAME);
                AccelaError::decode(field, e.into_inner().to_string())
            })?;

        model.attach_raw(RawPayload::new(raw));
        Ok(model)
    }

    /// Plain key/value view of the mapped fields, without the raw payload.
    fn to_mapping(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(AccelaError::decode(
                Self::NAME,
                format!("expected the model to serialize to an object, got {other}"),
            )),
        }
    }

    /// JSON string of [`ResourceModel::to_mapping`].
    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// API name of the top-level field a bridge error points at.
fn failing_field(codec: &FieldCodec, path: &serde_path_to_error::Path) -> Option<&'static str> {
    match path.iter().next()? {
        serde_path_to_error::Segment::Map { key } => {
            codec.spec_for_internal(key).map(|spec| spec.external)
        }
        _ => None,
    }
}
