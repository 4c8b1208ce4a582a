use crate::app_config::AppConfig;
use crate::domain::{CloudProps, DeviceDescriptor, HubDeviceInfo};
use crate::error::TranslatorError;
use crate::hub::{Hub, HubDevice, HubTranslator};
use crate::schema::{HvacMode, Temperature, Thermostat, ThermostatPatch, ThermostatResource};
use crate::wink::WinkHub;
use crate::wink::state::{optional_bool, optional_f64, optional_str, reading_value, required_bool};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, instrument};

const DEVICE_TYPE: &str = "thermostats";

// Wink stores set points in Celsius. The heat set point is `min_set_point`, the cool set point `max_set_point`.
#[derive(Debug)]
pub struct WinkThermostat {
    device: HubDevice,
}

impl WinkThermostat {
    pub fn new(descriptor: &DeviceDescriptor, config: &AppConfig) -> Result<Self, TranslatorError> {
        let props = descriptor.parse::<CloudProps>()?;
        let hub = WinkHub::new(config.wink().url(), &props.access_token)?;
        Ok(WinkThermostat::with_hub(props.id, Arc::new(hub)))
    }

    fn with_hub(device_id: String, hub: Arc<dyn Hub>) -> Self {
        WinkThermostat {
            device: HubDevice::new(hub, DEVICE_TYPE, device_id),
        }
    }
}

impl HubTranslator for WinkThermostat {
    const TRANSLATOR: &'static str = "opent2t-translator-com-wink-thermostat";

    fn from_hub(device_info: &HubDeviceInfo, hub: Arc<dyn Hub>) -> Result<Self, TranslatorError> {
        let device_id = device_info.control_id_for(Self::TRANSLATOR)?;
        Ok(WinkThermostat::with_hub(device_id.to_string(), hub))
    }
}

fn hvac_mode(data: &Value) -> Result<Option<HvacMode>, TranslatorError> {
    if !required_bool(data, "powered")? {
        return Ok(Some(HvacMode::Off));
    }

    Ok(optional_str(data, "mode")?.and_then(|mode| match mode {
        "heat_only" => Some(HvacMode::Heat),
        "cool_only" => Some(HvacMode::Cool),
        "auto" => Some(HvacMode::Auto),
        "eco" => Some(HvacMode::Eco),
        _ => None,
    }))
}

fn wink_mode(mode: HvacMode) -> Option<&'static str> {
    match mode {
        HvacMode::Heat => Some("heat_only"),
        HvacMode::Cool => Some("cool_only"),
        HvacMode::Auto => Some("auto"),
        HvacMode::Eco => Some("eco"),
        HvacMode::Off => None,
    }
}

fn map_thermostat(data: &Value) -> Result<ThermostatResource, TranslatorError> {
    let ambient = reading_value(data, "temperature")
        .and_then(Value::as_f64)
        .ok_or_else(|| TranslatorError::schema("temperature"))?;

    let mode = hvac_mode(data)?;
    let min_set_point = optional_f64(data, "min_set_point")?;
    let max_set_point = optional_f64(data, "max_set_point")?;

    let target = match mode {
        Some(HvacMode::Heat) => min_set_point,
        Some(HvacMode::Cool) => max_set_point,
        Some(HvacMode::Auto) | Some(HvacMode::Eco) => min_set_point.zip(max_set_point).map(|(low, high)| (low + high) / 2.0),
        _ => None,
    };

    let mut resource = ThermostatResource::new(Temperature::celsius(ambient));
    resource.target_temperature = target.map(Temperature::celsius);
    resource.target_temperature_high = max_set_point.map(Temperature::celsius);
    resource.target_temperature_low = min_set_point.map(Temperature::celsius);
    resource.away_mode = optional_bool(data, "users_away")?;
    resource.hvac_mode = mode;
    resource.humidity = reading_value(data, "humidity").and_then(Value::as_f64);
    Ok(resource)
}

impl WinkThermostat {
    async fn desired_state(&self, patch: &ThermostatPatch) -> Result<Map<String, Value>, TranslatorError> {
        let mut desired_state = Map::new();

        if let Some(mode) = patch.hvac_mode {
            desired_state.insert("powered".to_string(), Value::Bool(mode != HvacMode::Off));
            if let Some(wink_mode) = wink_mode(mode) {
                desired_state.insert("mode".to_string(), Value::from(wink_mode));
            }
        }

        if let Some(high) = patch.target_temperature_high {
            desired_state.insert("max_set_point".to_string(), Value::from(high.to_celsius()));
        }
        if let Some(low) = patch.target_temperature_low {
            desired_state.insert("min_set_point".to_string(), Value::from(low.to_celsius()));
        }

        if let Some(target) = patch.target_temperature {
            let target = target.to_celsius();
            let current = self.device.details().await?;
            let mode = match patch.hvac_mode {
                Some(mode) => Some(mode),
                None => hvac_mode(&current)?,
            };

            match mode {
                Some(HvacMode::Cool) => {
                    desired_state.insert("max_set_point".to_string(), Value::from(target));
                }
                Some(HvacMode::Auto) | Some(HvacMode::Eco) => {
                    // Keep the current spread between both set points around the new target
                    let low = optional_f64(&current, "min_set_point")?;
                    let high = optional_f64(&current, "max_set_point")?;
                    let half_spread = low.zip(high).map(|(low, high)| (high - low) / 2.0).unwrap_or(1.0);
                    desired_state.insert("min_set_point".to_string(), Value::from(target - half_spread));
                    desired_state.insert("max_set_point".to_string(), Value::from(target + half_spread));
                }
                _ => {
                    desired_state.insert("min_set_point".to_string(), Value::from(target));
                }
            }
        }

        if let Some(away) = patch.away_mode {
            desired_state.insert("users_away".to_string(), Value::Bool(away));
        }

        Ok(desired_state)
    }
}

#[async_trait]
impl Thermostat for WinkThermostat {
    #[instrument(skip(self), fields(device_id = self.device.id()))]
    async fn get_thermostat_res_uri(&self) -> Result<ThermostatResource, TranslatorError> {
        let data = self.device.details().await?;
        map_thermostat(&data)
    }

    #[instrument(skip(self), fields(device_id = self.device.id()))]
    async fn post_thermostat_res_uri(&self, patch: ThermostatPatch) -> Result<ThermostatResource, TranslatorError> {
        let desired_state = self.desired_state(&patch).await?;
        if desired_state.is_empty() {
            debug!("Nothing to update, returning the current state");
            return self.get_thermostat_res_uri().await;
        }

        info!("🟢 Updating thermostat: {:?}", desired_state);
        let mut payload = Map::new();
        payload.insert("desired_state".to_string(), Value::Object(desired_state));
        let data = self.device.update(Value::Object(payload)).await?;
        map_thermostat(&data)
    }
}
