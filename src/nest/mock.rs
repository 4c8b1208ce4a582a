use crate::mock_hub::{MockHubError, MockVendor, json_subset, merge_json};
use serde_json::Value;

/// Nest writes are flat field updates on the thermostat itself.
#[derive(Debug)]
pub struct NestMockVendor;

impl MockVendor for NestMockVendor {
    fn modify_device_state(&self, state: &mut Value, mutation: &Value) {
        merge_json(state, mutation);

        // Nest keeps each `_f` field in sync with its `_c` counterpart, in whole degrees
        if let (Some(state), Some(mutation)) = (state.as_object_mut(), mutation.as_object()) {
            for (field, value) in mutation {
                if let (Some(name), Some(celsius)) = (field.strip_suffix("_c"), value.as_f64()) {
                    let fahrenheit = (celsius * 9.0 / 5.0 + 32.0).round();
                    state.insert(format!("{}_f", name), Value::from(fahrenheit));
                }
            }
        }
    }

    fn verify_payload(&self, expected: &Value, payload: &Value) -> Result<(), MockHubError> {
        // Every written field must be expected, Nest rejects unknown ones
        if json_subset(expected, payload) && json_subset(payload, expected) {
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
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn celsius_writes_update_the_fahrenheit_field() {
        let mut state = json!({ "target_temperature_c": 19.0, "target_temperature_f": 66 });

        NestMockVendor.modify_device_state(&mut state, &json!({ "target_temperature_c": 21.0 }));

        assert_eq!(state, json!({ "target_temperature_c": 21.0, "target_temperature_f": 70.0 }));
    }
}
