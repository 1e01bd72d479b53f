#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name used whenever no candidate name could be determined.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Structured output of one parse call.
///
/// Every field always holds either an extractor's output or its documented
/// default. `skills` is kept as a set: sorted ascending, no duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeData {
    #[serde(default = "unknown_name")]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

fn unknown_name() -> String {
    UNKNOWN_NAME.to_string()
}

impl Default for ResumeData {
    fn default() -> Self {
        Self {
            name: unknown_name(),
            email: String::new(),
            skills: Vec::new(),
        }
    }
}

impl ResumeData {
    pub fn new(name: impl Into<String>, email: impl Into<String>, mut skills: Vec<String>) -> Self {
        skills.sort();
        skills.dedup();
        Self {
            name: name.into(),
            email: email.into(),
            skills,
        }
    }

    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("name".to_string(), Value::String(self.name.clone()));
        map.insert("email".to_string(), Value::String(self.email.clone()));
        map.insert(
            "skills".to_string(),
            Value::Array(self.skills.iter().cloned().map(Value::String).collect()),
        );
        map
    }

    /// Rebuilds a record from its map form. Absent keys take the field defaults.
    pub fn from_map(map: Map<String, Value>) -> Result<Self, serde_json::Error> {
        let data: ResumeData = serde_json::from_value(Value::Object(map))?;
        Ok(Self::new(data.name, data.email, data.skills))
    }

    /// Pretty JSON with 2-space indentation.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
