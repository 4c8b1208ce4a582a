use crate::error::TranslatorError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub const TEMPERATURE_SENSOR_RESOURCE_TYPE: &str = "org.opent2t.sample.temperaturesensor.superpopular";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureUnits {
    C,
    F,
}

impl TemperatureUnits {
    /// Parses vendor spellings such as `c`, `F` or `celsius`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "c" | "celsius" => Some(TemperatureUnits::C),
            "f" | "fahrenheit" => Some(TemperatureUnits::F),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub temperature: f64,
    pub units: TemperatureUnits,
}

impl Temperature {
    pub fn celsius(temperature: f64) -> Self {
        Temperature {
            temperature,
            units: TemperatureUnits::C,
        }
    }

    pub fn fahrenheit(temperature: f64) -> Self {
        Temperature {
            temperature,
            units: TemperatureUnits::F,
        }
    }

    pub fn to_celsius(&self) -> f64 {
        match self.units {
            TemperatureUnits::C => self.temperature,
            TemperatureUnits::F => (self.temperature - 32.0) * 5.0 / 9.0,
        }
    }

    pub fn to_fahrenheit(&self) -> f64 {
        match self.units {
            TemperatureUnits::C => self.temperature * 9.0 / 5.0 + 32.0,
            TemperatureUnits::F => self.temperature,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureSensorResource {
    pub rt: String,
    pub ambient_temperature: Temperature,
}

impl TemperatureSensorResource {
    pub fn new(ambient_temperature: Temperature) -> Self {
        TemperatureSensorResource {
            rt: TEMPERATURE_SENSOR_RESOURCE_TYPE.to_string(),
            ambient_temperature,
        }
    }
}

#[async_trait]
pub trait TemperatureSensor: Debug + Send + Sync {
    async fn get_temperature_sensor_res_uri(&self) -> Result<TemperatureSensorResource, TranslatorError>;
}
