use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::utils::list_text;


/// One catalog entry. Every field is optional in the source document.
///
/// Fields are read leniently: `null` or a value of the wrong shape becomes
/// empty instead of rejecting the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiseaseRecord {
    #[serde(deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(deserialize_with = "lenient_list")]
    pub symptoms: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub how_contracted: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub high_risk_areas: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub treatment: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub prevention: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub diagnosis: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_flag")]
    pub urgent: Option<bool>,
    #[serde(deserialize_with = "lenient_list")]
    pub urgent_symptoms: Vec<String>,
}


fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}


fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}


/// Arrays keep their scalar items, a lone string becomes a one-item list, anything else is empty.
fn lenient_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(scalar_text).collect(),
        Value::String(text) => vec![text],
        _ => Vec::new(),
    })
}


fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => Some(flag),
        _ => None,
    })
}

impl DiseaseRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn symptom_text(&self) -> String {
        list_text(&self.symptoms)
    }

    pub fn transmission_text(&self) -> String {
        list_text(&self.how_contracted)
    }

    pub fn high_risk_area_text(&self) -> String {
        list_text(&self.high_risk_areas)
    }

    pub fn is_urgent(&self) -> bool {
        self.urgent.unwrap_or(false)
    }

    pub fn first_treatment(&self) -> Option<&str> {
        self.treatment.first().map(String::as_str)
    }
}


/// Raw catalog; each entry is converted on its own so one bad entry cannot sink the rest.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct DiseaseCatalog {
    #[serde(default, deserialize_with = "lenient_entries")]
    pub diseases: Vec<Value>,
}


fn lenient_entries<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Value>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries,
        _ => Vec::new(),
    })
}
