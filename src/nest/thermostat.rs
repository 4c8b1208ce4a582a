use crate::app_config::AppConfig;
use crate::domain::{CloudProps, DeviceDescriptor, HubDeviceInfo};
use crate::error::{ArgumentError, TranslatorError};
use crate::hub::{Hub, HubDevice, HubTranslator};
use crate::nest::NestHub;
use crate::schema::{HvacMode, Temperature, TemperatureUnits, Thermostat, ThermostatPatch, ThermostatResource};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{info, instrument};

const DEVICE_TYPE: &str = "thermostats";

#[derive(Debug)]
pub struct NestThermostat {
    device: HubDevice,
}

impl NestThermostat {
    pub fn new(descriptor: &DeviceDescriptor, config: &AppConfig) -> Result<Self, TranslatorError> {
        let props = descriptor.parse::<CloudProps>()?;
        let hub = NestHub::new(config.nest().url(), &props.access_token)?;
        Ok(NestThermostat::with_hub(props.id, Arc::new(hub)))
    }

    fn with_hub(device_id: String, hub: Arc<dyn Hub>) -> Self {
        NestThermostat {
            device: HubDevice::new(hub, DEVICE_TYPE, device_id),
        }
    }
}

impl HubTranslator for NestThermostat {
    const TRANSLATOR: &'static str = "opent2t-translator-com-nest-thermostat";

    fn from_hub(device_info: &HubDeviceInfo, hub: Arc<dyn Hub>) -> Result<Self, TranslatorError> {
        let device_id = device_info.control_id_for(Self::TRANSLATOR)?;
        Ok(NestThermostat::with_hub(device_id.to_string(), hub))
    }
}

/// Nest exposes every temperature twice, suffixed `_c` and `_f`. The device scale decides which one is reported.
fn scale(data: &Value) -> Result<TemperatureUnits, TranslatorError> {
    match data.get("temperature_scale") {
        None | Some(Value::Null) => Ok(TemperatureUnits::C),
        Some(value) => value
            .as_str()
            .and_then(TemperatureUnits::parse)
            .ok_or_else(|| TranslatorError::schema("temperature_scale")),
    }
}

fn field_name(name: &str, units: TemperatureUnits) -> String {
    match units {
        TemperatureUnits::C => format!("{}_c", name),
        TemperatureUnits::F => format!("{}_f", name),
    }
}

fn temperature(data: &Value, name: &str, units: TemperatureUnits) -> Result<Option<Temperature>, TranslatorError> {
    let field = field_name(name, units);
    match data.get(&field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_f64()
            .map(|temperature| Some(Temperature { temperature, units }))
            .ok_or_else(|| TranslatorError::schema(field)),
    }
}

fn hvac_mode(data: &Value) -> Result<HvacMode, TranslatorError> {
    match data.get("hvac_mode").and_then(Value::as_str) {
        Some("heat") => Ok(HvacMode::Heat),
        Some("cool") => Ok(HvacMode::Cool),
        Some("heat-cool") => Ok(HvacMode::Auto),
        Some("eco") => Ok(HvacMode::Eco),
        Some("off") => Ok(HvacMode::Off),
        _ => Err(TranslatorError::schema("hvac_mode")),
    }
}

fn nest_mode(mode: HvacMode) -> &'static str {
    match mode {
        HvacMode::Heat => "heat",
        HvacMode::Cool => "cool",
        HvacMode::Auto => "heat-cool",
        HvacMode::Eco => "eco",
        HvacMode::Off => "off",
    }
}

fn map_thermostat(data: &Value) -> Result<ThermostatResource, TranslatorError> {
    let units = scale(data)?;
    let ambient = temperature(data, "ambient_temperature", units)?.ok_or_else(|| TranslatorError::schema(field_name("ambient_temperature", units)))?;
    let mode = hvac_mode(data)?;

    let mut resource = ThermostatResource::new(ambient);
    resource.target_temperature = match mode {
        HvacMode::Heat | HvacMode::Cool | HvacMode::Auto => temperature(data, "target_temperature", units)?,
        HvacMode::Eco | HvacMode::Off => None,
    };
    resource.target_temperature_high = temperature(data, "target_temperature_high", units)?;
    resource.target_temperature_low = temperature(data, "target_temperature_low", units)?;
    resource.hvac_mode = Some(mode);
    resource.humidity = data.get("humidity").and_then(Value::as_f64);
    Ok(resource)
}

#[async_trait]
impl Thermostat for NestThermostat {
    #[instrument(skip(self), fields(device_id = self.device.id()))]
    async fn get_thermostat_res_uri(&self) -> Result<ThermostatResource, TranslatorError> {
        map_thermostat(&self.device.details().await?)
    }

    #[instrument(skip(self), fields(device_id = self.device.id()))]
    async fn post_thermostat_res_uri(&self, patch: ThermostatPatch) -> Result<ThermostatResource, TranslatorError> {
        // Away mode belongs to the Nest structure, not to the thermostat
        if patch.away_mode.is_some() {
            return Err(ArgumentError::UnsupportedProperty("awayMode").into());
        }

        // The `_f` fields only take whole degrees, so writes always go through the Celsius fields
        let mut payload = Map::new();
        if let Some(mode) = patch.hvac_mode {
            payload.insert("hvac_mode".to_string(), Value::from(nest_mode(mode)));
        }
        for (name, value) in [
            ("target_temperature", patch.target_temperature),
            ("target_temperature_high", patch.target_temperature_high),
            ("target_temperature_low", patch.target_temperature_low),
        ] {
            if let Some(value) = value {
                payload.insert(field_name(name, TemperatureUnits::C), Value::from(value.to_celsius()));
            }
        }

        if payload.is_empty() {
            return self.get_thermostat_res_uri().await;
        }

        info!("🟢 Updating thermostat: {:?}", payload);
        map_thermostat(&self.device.update(Value::Object(payload)).await?)
    }
}
