use crate::error::TranslatorError;
use crate::schema::Temperature;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub const THERMOSTAT_RESOURCE_TYPE: &str = "org.opent2t.sample.thermostat.superpopular";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HvacMode {
    Heat,
    Cool,
    Auto,
    Eco,
    Off,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThermostatResource {
    pub rt: String,
    pub ambient_temperature: Temperature,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_temperature: Option<Temperature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_temperature_high: Option<Temperature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_temperature_low: Option<Temperature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub away_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hvac_mode: Option<HvacMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
}

impl ThermostatResource {
    pub fn new(ambient_temperature: Temperature) -> Self {
        ThermostatResource {
            rt: THERMOSTAT_RESOURCE_TYPE.to_string(),
            ambient_temperature,
            target_temperature: None,
            target_temperature_high: None,
            target_temperature_low: None,
            away_mode: None,
            hvac_mode: None,
            humidity: None,
        }
    }
}

/// Writable subset of a thermostat. Absent fields are left untouched on the device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThermostatPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_temperature: Option<Temperature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_temperature_high: Option<Temperature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_temperature_low: Option<Temperature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub away_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hvac_mode: Option<HvacMode>,
}

#[async_trait]
pub trait Thermostat: Debug + Send + Sync {
    async fn get_thermostat_res_uri(&self) -> Result<ThermostatResource, TranslatorError>;

    async fn post_thermostat_res_uri(&self, patch: ThermostatPatch) -> Result<ThermostatResource, TranslatorError>;

    async fn get_ambient_temperature(&self) -> Result<Temperature, TranslatorError> {
        Ok(self.get_thermostat_res_uri().await?.ambient_temperature)
    }

    async fn get_target_temperature(&self) -> Result<Option<Temperature>, TranslatorError> {
        Ok(self.get_thermostat_res_uri().await?.target_temperature)
    }

    async fn set_target_temperature(&self, temperature: Temperature) -> Result<Option<Temperature>, TranslatorError> {
        let patch = ThermostatPatch {
            target_temperature: Some(temperature),
            ..ThermostatPatch::default()
        };
        Ok(self.post_thermostat_res_uri(patch).await?.target_temperature)
    }

    async fn get_hvac_mode(&self) -> Result<Option<HvacMode>, TranslatorError> {
        Ok(self.get_thermostat_res_uri().await?.hvac_mode)
    }

    async fn set_hvac_mode(&self, mode: HvacMode) -> Result<Option<HvacMode>, TranslatorError> {
        let patch = ThermostatPatch {
            hvac_mode: Some(mode),
            ..ThermostatPatch::default()
        };
        Ok(self.post_thermostat_res_uri(patch).await?.hvac_mode)
    }

    async fn get_away_mode(&self) -> Result<Option<bool>, TranslatorError> {
        Ok(self.get_thermostat_res_uri().await?.away_mode)
    }

    async fn set_away_mode(&self, away: bool) -> Result<Option<bool>, TranslatorError> {
        let patch = ThermostatPatch {
            away_mode: Some(away),
            ..ThermostatPatch::default()
        };
        Ok(self.post_thermostat_res_uri(patch).await?.away_mode)
    }
}
