use serde::{Deserialize, Deserializer, Serialize};

/// Value stored in a CRM field
///
/// The upstream API passes CRM values through untouched, so a field may hold
/// a checkbox, a number, a picklist/text value, or nothing at all (`null`,
/// represented as `None` on [`RawFieldRecord::value`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

/// One entry of the flat per-pod API response
///
/// Keyed in the response by an opaque CRM field name; `name` is the field's
/// display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFieldRecord {
    /// Missing and `null` labels both read as empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub value: Option<FieldValue>,
}

impl RawFieldRecord {
    pub fn new(name: impl Into<String>, value: Option<FieldValue>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Checkbox semantics: only a boolean `true` counts as set
    pub fn is_true(&self) -> bool {
        matches!(self.value, Some(FieldValue::Bool(true)))
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Fields of one pod, in response order
pub type RawPodFields = Vec<(String, RawFieldRecord)>;

/// Whole response: pods in response order, each with its ordered fields
pub type RawResponse = Vec<(String, RawPodFields)>;
