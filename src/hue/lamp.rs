use crate::app_config::AppConfig;
use crate::domain::{DeviceDescriptor, HubDeviceInfo, HueProps};
use crate::error::TranslatorError;
use crate::hub::{Hub, HubDevice, HubTranslator};
use crate::hue::HueHub;
use crate::schema::{BinarySwitch, BinarySwitchResource, DimmingResource, Lamp, ensure_device};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, instrument};

const DEVICE_TYPE: &str = "lights";
const MAX_BRIGHTNESS: f64 = 254.0;

#[derive(Debug, Deserialize)]
struct LightGet {
    state: LightState,
}

#[derive(Debug, Deserialize)]
struct LightState {
    on: bool,
    bri: Option<u8>,
}

fn parse_light(data: Value) -> Result<LightState, TranslatorError> {
    let state = data.get("state").ok_or_else(|| TranslatorError::schema("state"))?;
    if state.get("on").and_then(Value::as_bool).is_none() {
        return Err(TranslatorError::schema("state.on"));
    }
    serde_json::from_value::<LightGet>(data)
        .map(|light| light.state)
        .map_err(|_| TranslatorError::schema("state.bri"))
}

fn dimming(state: &LightState) -> Result<DimmingResource, TranslatorError> {
    let bri = state.bri.ok_or_else(|| TranslatorError::schema("state.bri"))?;
    Ok(DimmingResource::from_fraction(f64::from(bri) / MAX_BRIGHTNESS))
}

// Hue brightness ranges from 1 to 254
fn brightness(dimming: &DimmingResource) -> u8 {
    (dimming.fraction() * MAX_BRIGHTNESS).round().max(1.0) as u8
}

#[derive(Debug)]
pub struct HueLamp {
    device: HubDevice,
}

impl HueLamp {
    pub fn new(descriptor: &DeviceDescriptor, config: &AppConfig) -> Result<Self, TranslatorError> {
        let props = descriptor.parse::<HueProps>()?;
        let hub = HueHub::new(config.hue().url(), &props.access_token, props.bridge_id, props.whitelist_id)?;
        Ok(HueLamp::with_hub(props.id, Arc::new(hub)))
    }

    fn with_hub(device_id: String, hub: Arc<dyn Hub>) -> Self {
        HueLamp {
            device: HubDevice::new(hub, DEVICE_TYPE, device_id),
        }
    }
}

impl HubTranslator for HueLamp {
    const TRANSLATOR: &'static str = "opent2t-translator-com-hue-lightbulb";

    fn from_hub(device_info: &HubDeviceInfo, hub: Arc<dyn Hub>) -> Result<Self, TranslatorError> {
        let device_id = device_info.control_id_for(Self::TRANSLATOR)?;
        Ok(HueLamp::with_hub(device_id.to_string(), hub))
    }
}

#[async_trait]
impl BinarySwitch for HueLamp {
    fn device_id(&self) -> &str {
        self.device.id()
    }

    #[instrument(skip(self))]
    async fn get_devices_power(&self, device_id: &str) -> Result<BinarySwitchResource, TranslatorError> {
        ensure_device(self.device.id(), device_id)?;
        let state = parse_light(self.device.details().await?)?;
        Ok(BinarySwitchResource::new(state.on))
    }

    #[instrument(skip(self))]
    async fn post_devices_power(&self, device_id: &str, payload: BinarySwitchResource) -> Result<BinarySwitchResource, TranslatorError> {
        ensure_device(self.device.id(), device_id)?;
        info!(device_id, "🟢 Turn {} light", if payload.value { "on" } else { "off" });

        let state = parse_light(self.device.update(json!({ "on": payload.value })).await?)?;
        Ok(BinarySwitchResource::new(state.on))
    }
}

#[async_trait]
impl Lamp for HueLamp {
    #[instrument(skip(self))]
    async fn get_devices_dim(&self, device_id: &str) -> Result<DimmingResource, TranslatorError> {
        ensure_device(self.device.id(), device_id)?;
        let state = parse_light(self.device.details().await?)?;
        dimming(&state)
    }

    #[instrument(skip(self))]
    async fn post_devices_dim(&self, device_id: &str, payload: DimmingResource) -> Result<DimmingResource, TranslatorError> {
        ensure_device(self.device.id(), device_id)?;
        info!(device_id, "🟢 Dim light to {}%", payload.dimming_setting);

        let state = parse_light(self.device.update(json!({ "bri": brightness(&payload) })).await?)?;
        dimming(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;
    use crate::error::ArgumentError;
    use crate::hue::HueMockVendor;
    use crate::mock_hub::{MockFixture, MockHub};
    use crate::schema::conformance;
    use test_log::test;

    fn mock_hub() -> Result<Arc<MockHub<HueMockVendor>>, serde_json::Error> {
        let fixture = MockFixture::from_json(include_str!("../../tests/resources/hue_lamp.json"))?;
        Ok(Arc::new(MockHub::new(HueMockVendor, fixture)))
    }

    #[test(tokio::test)]
    async fn passes_the_binary_switch_suite() -> Result<(), Box<dyn std::error::Error>> {
        let hub = mock_hub()?;
        hub.set_test_case("postDevicesPower").await?;
        let translator = hub.create_translator::<HueLamp>(HueLamp::TRANSLATOR, "1")()?;

        conformance::binary_switch_round_trip(&translator).await?;
        Ok(())
    }

    #[test(tokio::test)]
    async fn passes_the_lamp_suite() -> Result<(), Box<dyn std::error::Error>> {
        let hub = mock_hub()?;
        hub.set_test_case("postDevicesDim").await?;
        let translator = hub.create_translator::<HueLamp>(HueLamp::TRANSLATOR, "1")()?;

        conformance::lamp_dim_round_trip(&translator, 60).await?;
        Ok(())
    }

    #[test]
    fn brightness_round_trips_every_percentage() {
        for setting in 0..=100u8 {
            let state = LightState {
                on: true,
                bri: Some(brightness(&DimmingResource::new(setting))),
            };
            assert_eq!(dimming(&state).ok(), Some(DimmingResource::new(setting)));
        }
    }

    #[test]
    fn missing_on_flag_is_a_schema_error() {
        let result = parse_light(json!({ "state": { "bri": 3 } }));

        assert!(matches!(result, Err(TranslatorError::Schema { field }) if field == "state.on"));
    }

    #[tokio::test]
    async fn new_reads_the_light_through_the_remote_api() -> Result<(), TranslatorError> {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/v2/bridges/001788/whitelist/lights/3")
            .match_header("authorization", "Bearer secret")
            .with_status(200)
            .with_body(r#"{ "state": { "on": true, "bri": 127, "reachable": true }, "type": "Dimmable light", "name": "Hue white lamp 1" }"#)
            .create_async()
            .await;

        let config = AppConfigBuilder::new().hue_url(server.url()).build();
        let descriptor = DeviceDescriptor::new(
            "Desk",
            r#"{ "id": "3", "access_token": "secret", "bridge_id": "001788", "whitelist_id": "whitelist" }"#,
        );
        let translator = HueLamp::new(&descriptor, &config)?;

        let dim = translator.get_devices_dim("3").await?;

        mock.assert_async().await;
        assert_eq!(dim, DimmingResource::new(50));
        Ok(())
    }

    #[test]
    fn new_requires_the_bridge_id() {
        let config = AppConfigBuilder::new().build();
        let descriptor = DeviceDescriptor::new("Desk", r#"{ "id": "3", "access_token": "secret", "whitelist_id": "whitelist" }"#);

        let result = HueLamp::new(&descriptor, &config);

        assert!(matches!(
            result,
            Err(TranslatorError::Argument(ArgumentError::MissingField(field))) if field == "bridge_id"
        ));
    }
}
