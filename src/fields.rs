//! Declarative field mapping for Accela payloads.
//!
//! Every model owns a static [`FieldCodec`]: a table of [`FieldSpec`]s naming
//! the camelCase key the API sends, the snake_case name the model exposes, and
//! the [`Coercion`] applied on the way in. Decoding is permissive: keys the
//! table does not mention are ignored, and absent optional keys stay absent.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{AccelaError, Result};

/// Wire format of Accela date/time strings (no timezone).
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// How a raw value is turned into a model value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Copied as-is.
    Plain,
    /// An object whose keys are recursively renamed to snake_case.
    Nested,
    /// A list of objects whose keys are recursively renamed to snake_case.
    NestedList,
    /// `"Y"` is true; anything else, including absence, is false.
    Flag,
    /// A native JSON boolean.
    Boolean,
    /// A `YYYY-MM-DD HH:MM:SS` string parsed into a [`NaiveDateTime`].
    DateTime,
    /// A reference given either as a scalar or as an object with an `id`.
    IdOf,
}

/// One external-to-internal field mapping rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub external: &'static str,
    pub internal: &'static str,
    pub coercion: Coercion,
}

impl FieldSpec {
    pub const fn new(external: &'static str, internal: &'static str, coercion: Coercion) -> Self {
        Self {
            external,
            internal,
            coercion,
        }
    }

    pub const fn plain(external: &'static str, internal: &'static str) -> Self {
        Self::new(external, internal, Coercion::Plain)
    }

    pub const fn nested(external: &'static str, internal: &'static str) -> Self {
        Self::new(external, internal, Coercion::Nested)
    }

    pub const fn nested_list(external: &'static str, internal: &'static str) -> Self {
        Self::new(external, internal, Coercion::NestedList)
    }

    pub const fn flag(external: &'static str, internal: &'static str) -> Self {
        Self::new(external, internal, Coercion::Flag)
    }

    pub const fn boolean(external: &'static str, internal: &'static str) -> Self {
        Self::new(external, internal, Coercion::Boolean)
    }

    pub const fn date_time(external: &'static str, internal: &'static str) -> Self {
        Self::new(external, internal, Coercion::DateTime)
    }

    pub const fn id_of(external: &'static str, internal: &'static str) -> Self {
        Self::new(external, internal, Coercion::IdOf)
    }
}

/// A decoded field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Json(Value),
    Bool(bool),
    DateTime(NaiveDateTime),
}

/// Decoded fields keyed by internal name. Absent fields have no entry.
pub type DecodedFields = BTreeMap<&'static str, FieldValue>;

/// The field table of one model type.
#[derive(Debug)]
pub struct FieldCodec {
    fields: &'static [FieldSpec],
    required: &'static [&'static str],
}

impl FieldCodec {
    /// `required` lists external names that must be present and non-null.
    pub const fn new(fields: &'static [FieldSpec], required: &'static [&'static str]) -> Self {
        Self { fields, required }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    pub fn required(&self) -> &'static [&'static str] {
        self.required
    }

    /// Look up the rule for an external field name.
    pub fn spec(&self, external: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|spec| spec.external == external)
    }

    /// Look up the rule for an internal field name.
    pub fn spec_for_internal(&self, internal: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|spec| spec.internal == internal)
    }

    /// Decode a raw payload into internal-name keyed values.
    ///
    /// # Errors
    ///
    /// Returns [`AccelaError::Decode`] when the payload is not an object, a
    /// required field is missing, or a value does not fit its coercion.
    pub fn decode(&self, raw: &Value) -> Result<DecodedFields> {
        let object = raw
            .as_object()
            .ok_or_else(|| AccelaError::decode("payload", "expected a JSON object"))?;

        for &name in self.required {
            if object.get(name).map_or(true, Value::is_null) {
                return Err(AccelaError::decode(name, "required field is missing"));
            }
        }

        let mut decoded = DecodedFields::new();
        for spec in self.fields {
            match object.get(spec.external) {
                None | Some(Value::Null) => {
                    if spec.coercion == Coercion::Flag {
                        decoded.insert(spec.internal, FieldValue::Bool(false));
                    }
                }
                Some(value) => {
                    if let Some(field) = coerce(spec, value)? {
                        decoded.insert(spec.internal, field);
                    }
                }
            }
        }

        Ok(decoded)
    }
}

fn coerce(spec: &FieldSpec, value: &Value) -> Result<Option<FieldValue>> {
    let field = match spec.coercion {
        Coercion::Plain => FieldValue::Json(value.clone()),
        Coercion::Nested => {
            if !value.is_object() {
                return Err(AccelaError::decode(spec.external, "expected an object"));
            }
            FieldValue::Json(rename_keys(value))
        }
        Coercion::NestedList => {
            if !value.is_array() {
                return Err(AccelaError::decode(spec.external, "expected a list"));
            }
            FieldValue::Json(rename_keys(value))
        }
        Coercion::Flag => FieldValue::Bool(value.as_str() == Some("Y")),
        Coercion::Boolean => match value {
            Value::Bool(b) => FieldValue::Bool(*b),
            other => {
                return Err(AccelaError::decode(
                    spec.external,
                    format!("expected a boolean, got {other}"),
                ))
            }
        },
        Coercion::DateTime => {
            let text = value
                .as_str()
                .ok_or_else(|| AccelaError::decode(spec.external, "expected a date/time string"))?;
            let parsed = NaiveDateTime::parse_from_str(text, DATE_TIME_FORMAT).map_err(|e| {
                AccelaError::decode(
                    spec.external,
                    format!("'{text}' is not a YYYY-MM-DD HH:MM:SS date/time: {e}"),
                )
            })?;
            FieldValue::DateTime(parsed)
        }
        Coercion::IdOf => match value {
            Value::Object(object) => match object.get("id") {
                Some(id) if !id.is_null() => FieldValue::Json(id.clone()),
                _ => return Ok(None),
            },
            scalar => FieldValue::Json(scalar.clone()),
        },
    };

    Ok(Some(field))
}

/// Recursively rename every object key to snake_case, leaving values alone.
pub fn rename_keys(value: &Value) -> Value {
    match value {
        Value::Object(object) => Value::Object(
            object
                .iter()
                .map(|(key, inner)| (to_snake_case(key), rename_keys(inner)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(rename_keys).collect()),
        other => other.clone(),
    }
}

/// Convert a camelCase name to snake_case.
///
/// Runs of capitals are treated as one word, so `bizServerURL` becomes
/// `biz_server_url` and `isAABizServer` becomes `is_aa_biz_server`.
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_uppercase() {
            out.push(c);
            continue;
        }

        let boundary = match i.checked_sub(1).map(|p| chars[p]) {
            Some(prev) if prev.is_lowercase() || prev.is_ascii_digit() => true,
            Some(prev) if prev.is_uppercase() => {
                chars.get(i + 1).map_or(false, |next| next.is_lowercase())
            }
            _ => false,
        };
        if boundary {
            out.push('_');
        }
        out.extend(c.to_lowercase());
    }

    out
}
