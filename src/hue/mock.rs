use crate::mock_hub::{MockVendor, merge_json};
use serde_json::Value;

/// Hue writes go to the `/state` sub resource, so mutations land in the `state` object.
#[derive(Debug)]
pub struct HueMockVendor;

impl MockVendor for HueMockVendor {
    fn modify_device_state(&self, state: &mut Value, mutation: &Value) {
        merge_json(&mut state["state"], mutation);
    }
}
