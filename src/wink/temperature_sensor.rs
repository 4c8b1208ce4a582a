use crate::app_config::AppConfig;
use crate::domain::{CloudProps, DeviceDescriptor, HubDeviceInfo};
use crate::error::TranslatorError;
use crate::hub::{Hub, HubDevice, HubTranslator};
use crate::schema::{Temperature, TemperatureSensor, TemperatureSensorResource, TemperatureUnits};
use crate::wink::WinkHub;
use crate::wink::state::reading_value;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

const DEVICE_TYPE: &str = "sensor_pods";

#[derive(Debug)]
pub struct WinkTemperatureSensor {
    device: HubDevice,
}

impl WinkTemperatureSensor {
    pub fn new(descriptor: &DeviceDescriptor, config: &AppConfig) -> Result<Self, TranslatorError> {
        let props = descriptor.parse::<CloudProps>()?;
        let hub = WinkHub::new(config.wink().url(), &props.access_token)?;
        Ok(WinkTemperatureSensor::with_hub(props.id, Arc::new(hub)))
    }

    fn with_hub(device_id: String, hub: Arc<dyn Hub>) -> Self {
        WinkTemperatureSensor {
            device: HubDevice::new(hub, DEVICE_TYPE, device_id),
        }
    }
}

impl HubTranslator for WinkTemperatureSensor {
    const TRANSLATOR: &'static str = "opent2t-translator-com-wink-temperaturesensor";

    fn from_hub(device_info: &HubDeviceInfo, hub: Arc<dyn Hub>) -> Result<Self, TranslatorError> {
        let device_id = device_info.control_id_for(Self::TRANSLATOR)?;
        Ok(WinkTemperatureSensor::with_hub(device_id.to_string(), hub))
    }
}

fn units(data: &Value) -> Result<TemperatureUnits, TranslatorError> {
    match data.get("units").and_then(|units| units.get("temperature")) {
        None | Some(Value::Null) => Ok(TemperatureUnits::C),
        Some(value) => value
            .as_str()
            .and_then(TemperatureUnits::parse)
            .ok_or_else(|| TranslatorError::schema("units.temperature")),
    }
}

#[async_trait]
impl TemperatureSensor for WinkTemperatureSensor {
    #[instrument(skip(self), fields(device_id = self.device.id()))]
    async fn get_temperature_sensor_res_uri(&self) -> Result<TemperatureSensorResource, TranslatorError> {
        let data = self.device.details().await?;

        let temperature = reading_value(&data, "temperature")
            .and_then(Value::as_f64)
            .ok_or_else(|| TranslatorError::schema("temperature"))?;

        Ok(TemperatureSensorResource::new(Temperature {
            temperature,
            units: units(&data)?,
        }))
    }
}
