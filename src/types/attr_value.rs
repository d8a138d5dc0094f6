//! Cached node attributes (grains).

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// A single cached attribute value: either one scalar or an ordered list of
/// scalars. Non-string scalars are kept in their textual form.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum AttributeValue {
    Scalar(String),
    List(Vec<String>),
}

impl AttributeValue {
    /// Build an attribute value from decoded JSON.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Array(items) => AttributeValue::List(items.iter().map(scalar_text).collect()),
            other => AttributeValue::Scalar(scalar_text(other)),
        }
    }

    /// Whether any of the contained scalars satisfies `pred`.
    pub fn any<F>(&self, mut pred: F) -> bool
    where
        F: FnMut(&str) -> bool,
    {
        match self {
            AttributeValue::Scalar(s) => pred(s),
            AttributeValue::List(items) => items.iter().any(|s| pred(s)),
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "None".to_string(),
        other => other.to_string(),
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(AttributeValue::from_json(&value))
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Scalar(s.to_string())
    }
}

impl From<Vec<&str>> for AttributeValue {
    fn from(items: Vec<&str>) -> Self {
        AttributeValue::List(items.into_iter().map(str::to_string).collect())
    }
}

/// The attribute mapping cached for one node.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttributeRecord {
    #[serde(default, alias = "grains")]
    pub attributes: HashMap<String, AttributeValue>,
}

impl AttributeRecord {
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }
}

impl<K, V> FromIterator<(K, V)> for AttributeRecord
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        AttributeRecord {
            attributes: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
