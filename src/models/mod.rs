//! Accela API model types.
//!
//! Each model pairs a static field table with the typed struct it decodes
//! into. Nested objects whose shape varies between agencies stay as JSON
//! objects with snake_case keys.

mod agency;
mod agency_environment;
mod document;
mod module;
mod record;
mod record_address;
mod record_parcel;
mod record_type;
mod serde_helpers;

pub use agency::*;
pub use agency_environment::*;
pub use document::*;
pub use module::*;
pub use record::*;
pub use record_address::*;
pub use record_parcel::*;
pub use record_type::*;

/// A nested JSON object with snake_case keys.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

#[cfg(test)]
pub(crate) fn assert_codec_well_formed(codec: &crate::fields::FieldCodec) {
    use std::collections::HashSet;

    let mut external = HashSet::new();
    let mut internal = HashSet::new();
    for spec in codec.fields() {
        assert!(external.insert(spec.external), "duplicate external name {}", spec.external);
        assert!(internal.insert(spec.internal), "duplicate internal name {}", spec.internal);
    }
    for name in codec.required() {
        assert!(external.contains(name), "required field {name} is not mapped");
    }
}
