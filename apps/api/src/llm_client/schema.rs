//! Typed response-schema declaration for structured output.
//!
//! The provider accepts an OpenAPI-flavored schema in `responseSchema` and
//! constrains generation to it. Building the tree through these helpers
//! keeps one rule impossible to break: every declared object field is
//! required — the output contract has no optional fields.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchemaType {
    Object,
    Array,
    String,
    Integer,
    Number,
    Boolean,
}

#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "entries_as_map"
    )]
    pub properties: Vec<(&'static str, Schema)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<&'static str>,
}

impl Schema {
    fn leaf(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            properties: Vec::new(),
            items: None,
            enum_values: Vec::new(),
            required: Vec::new(),
        }
    }

    pub fn string() -> Self {
        Self::leaf(SchemaType::String)
    }

    pub fn integer() -> Self {
        Self::leaf(SchemaType::Integer)
    }

    /// A string restricted to the given literals.
    pub fn string_enum(values: &[&'static str]) -> Self {
        Self {
            enum_values: values.to_vec(),
            ..Self::leaf(SchemaType::String)
        }
    }

    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::leaf(SchemaType::Array)
        }
    }

    /// An object whose every property is required.
    pub fn object(properties: Vec<(&'static str, Schema)>) -> Self {
        let required = properties.iter().map(|(name, _)| *name).collect();
        Self {
            properties,
            required,
            ..Self::leaf(SchemaType::Object)
        }
    }
}

/// Serializes the property list as a JSON map, preserving declaration order.
fn entries_as_map<S: Serializer>(
    entries: &[(&'static str, Schema)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for (name, schema) in entries {
        map.serialize_entry(name, schema)?;
    }
    map.end()
}
