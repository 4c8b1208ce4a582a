use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Initial vendor state of a mocked device plus, per test case, the mutations expected in order.
#[derive(Debug, Clone, Deserialize)]
pub struct MockFixture {
    pub base_state: Value,
    #[serde(default)]
    pub test_data: HashMap<String, Vec<Value>>,
}

impl MockFixture {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
