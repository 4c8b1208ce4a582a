use serde::Deserialize;
use std::collections::HashMap;

// A write answers with one entry per changed attribute, e.g. [{ "success": { "/lights/1/state/on": true } }]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HueWriteResult {
    Success(HashMap<String, serde_json::Value>),
    Error(HueError),
}

#[derive(Debug, Deserialize)]
pub struct HueError {
    pub r#type: u32,
    pub address: String,
    pub description: String,
}
