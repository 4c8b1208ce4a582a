use crate::app_config::AppConfig;
use crate::domain::{CloudProps, DeviceDescriptor, HubDeviceInfo};
use crate::error::TranslatorError;
use crate::hub::{Hub, HubDevice, HubTranslator};
use crate::insteon::InsteonHub;
use crate::schema::{BinarySwitch, BinarySwitchResource, ensure_device};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, instrument};

const DEVICE_TYPE: &str = "switch";

#[derive(Debug)]
pub struct InsteonBinarySwitch {
    device: HubDevice,
}

impl InsteonBinarySwitch {
    pub fn new(descriptor: &DeviceDescriptor, config: &AppConfig) -> Result<Self, TranslatorError> {
        let props = descriptor.parse::<CloudProps>()?;
        let hub = InsteonHub::new(config.insteon().url(), &props.access_token)?;
        Ok(InsteonBinarySwitch::with_hub(props.id, Arc::new(hub)))
    }

    fn with_hub(device_id: String, hub: Arc<dyn Hub>) -> Self {
        InsteonBinarySwitch {
            device: HubDevice::new(hub, DEVICE_TYPE, device_id),
        }
    }
}

impl HubTranslator for InsteonBinarySwitch {
    const TRANSLATOR: &'static str = "opent2t-translator-com-insteon-binaryswitch";

    fn from_hub(device_info: &HubDeviceInfo, hub: Arc<dyn Hub>) -> Result<Self, TranslatorError> {
        let device_id = device_info.control_id_for(Self::TRANSLATOR)?;
        Ok(InsteonBinarySwitch::with_hub(device_id.to_string(), hub))
    }
}

// An Insteon switch is on whenever its level is above zero
fn power(data: &Value) -> Result<BinarySwitchResource, TranslatorError> {
    data.get("Level")
        .and_then(Value::as_f64)
        .map(|level| BinarySwitchResource::new(level > 0.0))
        .ok_or_else(|| TranslatorError::schema("Level"))
}

#[async_trait]
impl BinarySwitch for InsteonBinarySwitch {
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
        let command = if payload.value { "on" } else { "off" };
        info!(device_id, "🟢 Turn {} switch", command);

        power(&self.device.update(json!({ "command": command })).await?)
    }
}
