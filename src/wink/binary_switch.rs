use crate::app_config::AppConfig;
use crate::domain::{CloudProps, DeviceDescriptor, HubDeviceInfo};
use crate::error::TranslatorError;
use crate::hub::{Hub, HubDevice, HubTranslator};
use crate::schema::{BinarySwitch, BinarySwitchResource, ensure_device};
use crate::wink::WinkHub;
use crate::wink::state::required_bool;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, instrument};

const DEVICE_TYPE: &str = "binary_switches";

#[derive(Debug)]
pub struct WinkBinarySwitch {
    device: HubDevice,
}

impl WinkBinarySwitch {
    pub fn new(descriptor: &DeviceDescriptor, config: &AppConfig) -> Result<Self, TranslatorError> {
        let props = descriptor.parse::<CloudProps>()?;
        let hub = WinkHub::new(config.wink().url(), &props.access_token)?;
        Ok(WinkBinarySwitch::with_hub(props.id, Arc::new(hub)))
    }

    fn with_hub(device_id: String, hub: Arc<dyn Hub>) -> Self {
        WinkBinarySwitch {
            device: HubDevice::new(hub, DEVICE_TYPE, device_id),
        }
    }
}

impl HubTranslator for WinkBinarySwitch {
    const TRANSLATOR: &'static str = "opent2t-translator-com-wink-binaryswitch";

    fn from_hub(device_info: &HubDeviceInfo, hub: Arc<dyn Hub>) -> Result<Self, TranslatorError> {
        let device_id = device_info.control_id_for(Self::TRANSLATOR)?;
        Ok(WinkBinarySwitch::with_hub(device_id.to_string(), hub))
    }
}

#[async_trait]
impl BinarySwitch for WinkBinarySwitch {
    fn device_id(&self) -> &str {
        self.device.id()
    }

    #[instrument(skip(self))]
    async fn get_devices_power(&self, device_id: &str) -> Result<BinarySwitchResource, TranslatorError> {
        ensure_device(self.device.id(), device_id)?;
        let data = self.device.details().await?;
        Ok(BinarySwitchResource::new(required_bool(&data, "powered")?))
    }

    #[instrument(skip(self))]
    async fn post_devices_power(&self, device_id: &str, payload: BinarySwitchResource) -> Result<BinarySwitchResource, TranslatorError> {
        ensure_device(self.device.id(), device_id)?;
        info!(device_id, "🟢 Turn {} binary switch", if payload.value { "on" } else { "off" });

        let data = self.device.update(json!({ "desired_state": { "powered": payload.value } })).await?;
        Ok(BinarySwitchResource::new(required_bool(&data, "powered")?))
    }
}
