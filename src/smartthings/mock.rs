use crate::mock_hub::{MockVendor, merge_json};
use serde_json::Value;

/// SmartThings takes flat attribute updates and reports them under `attributes`.
#[derive(Debug)]
pub struct SmartThingsMockVendor;

impl MockVendor for SmartThingsMockVendor {
    fn modify_device_state(&self, state: &mut Value, mutation: &Value) {
        merge_json(&mut state["attributes"], mutation);
    }
}
