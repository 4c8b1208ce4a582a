use crate::mock_hub::MockVendor;
use serde_json::Value;

/// Insteon mutations are commands; the mock plays the device and adjusts its level.
#[derive(Debug)]
pub struct InsteonMockVendor;

impl MockVendor for InsteonMockVendor {
    fn modify_device_state(&self, state: &mut Value, mutation: &Value) {
        let level = match mutation.get("command").and_then(Value::as_str) {
            Some("on") => mutation.get("level").cloned().unwrap_or(Value::from(100)),
            Some("off") => Value::from(0),
            _ => return,
        };
        state["Level"] = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn on_defaults_to_full_level() {
        let mut state = json!({ "Level": 0 });

        InsteonMockVendor.modify_device_state(&mut state, &json!({ "command": "on" }));

        assert_eq!(state, json!({ "Level": 100 }));
    }

    #[test]
    fn unknown_commands_leave_the_state_alone() {
        let mut state = json!({ "Level": 40 });

        InsteonMockVendor.modify_device_state(&mut state, &json!({ "command": "beep" }));

        assert_eq!(state, json!({ "Level": 40 }));
    }
}
