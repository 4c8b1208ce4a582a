use crate::domain::HubDeviceInfo;
use crate::error::TranslatorError;
use crate::hub::{Hub, HubDevice, HubTranslator};
use crate::schema::{BinarySwitch, BinarySwitchResource, ensure_device};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, instrument};

// Command class SWITCH_BINARY
const DEVICE_TYPE: &str = "switch_binary";

/// A Z-Wave switch is always reached through the hub translator that owns the Z-Wave controller.
#[derive(Debug)]
pub struct ZwaveBinarySwitch {
    device: HubDevice,
}

impl HubTranslator for ZwaveBinarySwitch {
    const TRANSLATOR: &'static str = "opent2t-translator-com-zwave-binaryswitch";

    fn from_hub(device_info: &HubDeviceInfo, hub: Arc<dyn Hub>) -> Result<Self, TranslatorError> {
        let device_id = device_info.control_id_for(Self::TRANSLATOR)?;
        Ok(ZwaveBinarySwitch {
            device: HubDevice::new(hub, DEVICE_TYPE, device_id),
        })
    }
}

fn power(data: &Value) -> Result<BinarySwitchResource, TranslatorError> {
    data.get("value")
        .and_then(Value::as_bool)
        .map(BinarySwitchResource::new)
        .ok_or_else(|| TranslatorError::schema("value"))
}

#[async_trait]
impl BinarySwitch for ZwaveBinarySwitch {
    fn device_id(&self) -> &str {
        self.device.id()
    }

    #[instrument(skip(self))]
    async fn get_devices_power(&self, device_id: &str) -> Result<BinarySwitchResource, TranslatorError> {
        ensure_device(self.device.id(), device_id)?;
        power(&self.device.details().await?)
    }

    #[instrument(skip(self))]
    async fn post_devices_power(&self, device_id: &str, payload: BinarySwitchResource) -> Result<BinarySwitchResource, TranslatorError> {
        ensure_device(self.device.id(), device_id)?;
        info!(device_id, "🟢 Turn {} switch", if payload.value { "on" } else { "off" });

        power(&self.device.update(json!({ "value": payload.value })).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_hub::{MockFixture, MockHub, MockHubError};
    use crate::schema::conformance;
    use crate::zwave::ZwaveMockVendor;
    use pretty_assertions::assert_eq;
    use test_log::test;

    fn mock_hub() -> Result<Arc<MockHub<ZwaveMockVendor>>, serde_json::Error> {
        let fixture = MockFixture::from_json(include_str!("../../tests/resources/zwave_binary_switch.json"))?;
        Ok(Arc::new(MockHub::new(ZwaveMockVendor, fixture)))
    }

    #[test(tokio::test)]
    async fn post_devices_power_returns_the_canonical_state() -> Result<(), Box<dyn std::error::Error>> {
        let hub = mock_hub()?;
        hub.set_test_case("postDevicesPower").await?;
        let translator = hub.create_translator::<ZwaveBinarySwitch>(ZwaveBinarySwitch::TRANSLATOR, "7")()?;

        let on = translator.post_devices_power("7", BinarySwitchResource::new(true)).await?;
        assert_eq!(
            serde_json::to_value(&on)?,
            json!({ "rt": ["oic.r.switch.binary"], "id": "power", "value": true })
        );

        let off = translator.post_devices_power("7", BinarySwitchResource::new(false)).await?;
        assert_eq!(off.value, false);

        // Both queued mutations are consumed, a third write has nothing left to match
        let third = translator.post_devices_power("7", BinarySwitchResource::new(true)).await;
        assert!(matches!(third, Err(TranslatorError::MockHub(MockHubError::NoPendingMutation { .. }))));
        Ok(())
    }

    #[test(tokio::test)]
    async fn post_devices_power_verifies_each_payload_in_order() -> Result<(), Box<dyn std::error::Error>> {
        let hub = mock_hub()?;
        hub.set_test_case("postDevicesPower").await?;
        let translator = hub.create_translator::<ZwaveBinarySwitch>(ZwaveBinarySwitch::TRANSLATOR, "7")()?;

        // The first queued mutation expects the switch to turn on
        let result = translator.post_devices_power("7", BinarySwitchResource::new(false)).await;

        assert!(matches!(result, Err(TranslatorError::MockHub(MockHubError::PayloadMismatch { .. }))));
        assert_eq!(translator.get_value().await?, false);
        Ok(())
    }

    #[test(tokio::test)]
    async fn passes_the_binary_switch_suite() -> Result<(), Box<dyn std::error::Error>> {
        let hub = mock_hub()?;
        hub.set_test_case("postDevicesPower").await?;
        let translator = hub.create_translator::<ZwaveBinarySwitch>(ZwaveBinarySwitch::TRANSLATOR, "7")()?;

        conformance::binary_switch_round_trip(&translator).await?;
        Ok(())
    }

    #[test]
    fn missing_value_is_a_schema_error() {
        let result = power(&json!({ "node_id": 7 }));

        assert!(matches!(result, Err(TranslatorError::Schema { field }) if field == "value"));
    }
}
