use crate::mock_hub::{MockHubError, MockVendor, json_subset, merge_json};
use serde_json::Value;

/// Wink only ever receives `{ "desired_state": {...} }` bodies and echoes them into its desired state.
#[derive(Debug)]
pub struct WinkMockVendor;

impl MockVendor for WinkMockVendor {
    fn modify_device_state(&self, state: &mut Value, mutation: &Value) {
        if let Some(desired_state) = mutation.get("desired_state") {
            merge_json(&mut state["desired_state"], desired_state);
        }
    }

    fn verify_payload(&self, expected: &Value, payload: &Value) -> Result<(), MockHubError> {
        let only_desired_state = payload.as_object().is_some_and(|body| body.keys().all(|key| key == "desired_state"));
        if only_desired_state && json_subset(expected, payload) {
            Ok(())
        } else {
            Err(MockHubError::PayloadMismatch {
                expected: expected.clone(),
                actual: payload.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn modify_only_touches_the_desired_state() {
        let mut state = json!({ "desired_state": { "powered": false }, "last_reading": { "powered": false } });

        WinkMockVendor.modify_device_state(&mut state, &json!({ "desired_state": { "powered": true } }));

        assert_eq!(state, json!({ "desired_state": { "powered": true }, "last_reading": { "powered": false } }));
    }

    #[test]
    fn verify_rejects_fields_outside_the_desired_state() {
        let result = WinkMockVendor.verify_payload(
            &json!({ "desired_state": { "powered": true } }),
            &json!({ "desired_state": { "powered": true }, "name": "renamed" }),
        );

        assert!(matches!(result, Err(MockHubError::PayloadMismatch { .. })));
    }
}
