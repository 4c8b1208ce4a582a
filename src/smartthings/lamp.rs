use crate::domain::{DeviceDescriptor, HubDeviceInfo, SmartThingsProps};
use crate::error::TranslatorError;
use crate::hub::{Hub, HubDevice, HubTranslator};
use crate::schema::{BinarySwitch, BinarySwitchResource, DimmingResource, Lamp, ensure_device};
use crate::smartthings::SmartThingsHub;
use crate::smartthings::attributes::{level, power, switch_value};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, instrument};

const DEVICE_TYPE: &str = "light";

#[derive(Debug)]
pub struct SmartThingsLamp {
    device: HubDevice,
}

impl SmartThingsLamp {
    pub fn new(descriptor: &DeviceDescriptor) -> Result<Self, TranslatorError> {
        let props = descriptor.parse::<SmartThingsProps>()?;
        let hub = SmartThingsHub::new(&props.endpoint_uri, &props.access_token)?;
        Ok(SmartThingsLamp::with_hub(props.id, Arc::new(hub)))
    }

    fn with_hub(device_id: String, hub: Arc<dyn Hub>) -> Self {
        SmartThingsLamp {
            device: HubDevice::new(hub, DEVICE_TYPE, device_id),
        }
    }
}

impl HubTranslator for SmartThingsLamp {
    const TRANSLATOR: &'static str = "opent2t-translator-com-smartthings-lightbulb";

    fn from_hub(device_info: &HubDeviceInfo, hub: Arc<dyn Hub>) -> Result<Self, TranslatorError> {
        let device_id = device_info.control_id_for(Self::TRANSLATOR)?;
        Ok(SmartThingsLamp::with_hub(device_id.to_string(), hub))
    }
}

#[async_trait]
impl BinarySwitch for SmartThingsLamp {
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
        info!(device_id, "🟢 Turn {} light", switch_value(payload.value));

        power(&self.device.update(json!({ "switch": switch_value(payload.value) })).await?)
    }
}

#[async_trait]
impl Lamp for SmartThingsLamp {
    #[instrument(skip(self))]
    async fn get_devices_dim(&self, device_id: &str) -> Result<DimmingResource, TranslatorError> {
        ensure_device(self.device.id(), device_id)?;
        level(&self.device.details().await?)
    }

    #[instrument(skip(self))]
    async fn post_devices_dim(&self, device_id: &str, payload: DimmingResource) -> Result<DimmingResource, TranslatorError> {
        ensure_device(self.device.id(), device_id)?;
        info!(device_id, "🟢 Dim light to {}%", payload.dimming_setting);

        level(&self.device.update(json!({ "level": payload.dimming_setting })).await?)
    }
}
