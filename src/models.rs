use chrono::Utc;
use rust_decimal::Decimal;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Number, Value as JsonValue};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::validation::ValidationError;

/// Response type for the ping endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct PingResponse {
    pub ping: String,
}

/// Response type for successful DELETE operations
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteResponse {
    pub status: String,
}

/// A typed value as held by the record store.
///
/// The derived serde impls are the stored encoding (externally tagged, e.g.
/// `{"N":"5"}`), which keeps the type of every value across a round trip
/// through a JSON column. Responses use [`Record`]'s own `Serialize` impl,
/// which renders values as plain JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    #[serde(rename = "S")]
    String(String),
    #[serde(rename = "N", with = "rust_decimal::serde::str")]
    Number(Decimal),
    #[serde(rename = "BOOL")]
    Bool(bool),
    #[serde(rename = "NULL")]
    Null,
    #[serde(rename = "L")]
    List(Vec<AttributeValue>),
    #[serde(rename = "M")]
    Map(BTreeMap<String, AttributeValue>),
}

impl AttributeValue {
    /// Convert a request JSON value into its stored form.
    ///
    /// Every JSON number becomes a decimal, fractional or not.
    pub fn from_json(value: JsonValue) -> Result<Self, ValidationError> {
        Ok(match value {
            JsonValue::Null => AttributeValue::Null,
            JsonValue::Bool(b) => AttributeValue::Bool(b),
            JsonValue::Number(n) => AttributeValue::Number(decimal_from_number(&n)?),
            JsonValue::String(s) => AttributeValue::String(s),
            JsonValue::Array(items) => AttributeValue::List(
                items
                    .into_iter()
                    .map(AttributeValue::from_json)
                    .collect::<Result<_, _>>()?,
            ),
            JsonValue::Object(fields) => AttributeValue::Map(attributes_from_json(fields)?),
        })
    }
}

fn decimal_from_number(n: &Number) -> Result<Decimal, ValidationError> {
    let text = n.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| ValidationError::UnrepresentableNumber(text))
}

/// Convert every field of a request object into its stored form
pub fn attributes_from_json(
    fields: Map<String, JsonValue>,
) -> Result<BTreeMap<String, AttributeValue>, ValidationError> {
    fields
        .into_iter()
        .map(|(key, value)| Ok((key, AttributeValue::from_json(value)?)))
        .collect()
}

/// Plain JSON rendering of an attribute value; decimals are written as strings.
struct Plain<'a>(&'a AttributeValue);

impl Serialize for Plain<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            AttributeValue::String(s) => serializer.serialize_str(s),
            AttributeValue::Number(d) => serialize_decimal_as_string(d, serializer),
            AttributeValue::Bool(b) => serializer.serialize_bool(*b),
            AttributeValue::Null => serializer.serialize_unit(),
            AttributeValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&Plain(item))?;
                }
                seq.end()
            }
            AttributeValue::Map(fields) => serialize_fields(fields, serializer),
        }
    }
}

/// Decimals go out as their exact string form so no precision is lost to floats
fn serialize_decimal_as_string<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

fn serialize_fields<S: Serializer>(
    fields: &BTreeMap<String, AttributeValue>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(fields.len()))?;
    for (key, value) in fields {
        map.serialize_entry(key, &Plain(value))?;
    }
    map.end()
}

/// An inventory record as stored under its `id`
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: String,
    /// Client-supplied fields (a subset of the supported keys)
    pub attributes: BTreeMap<String, AttributeValue>,
    pub last_modified: String,
}

impl Record {
    pub fn new(id: String, attributes: BTreeMap<String, AttributeValue>) -> Self {
        Self {
            id,
            attributes,
            last_modified: last_modified_now(),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.attributes.len() + 2))?;
        map.serialize_entry("id", &self.id)?;
        for (key, value) in &self.attributes {
            map.serialize_entry(key, &Plain(value))?;
        }
        map.serialize_entry("lastModified", &self.last_modified)?;
        map.end()
    }
}

/// Current UTC time in the human-readable `YYYY-MM-DD HH:MM:SS.ffffff` form
pub fn last_modified_now() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S%.6f").to_string()
}
