use crate::error::TranslatorError;
use crate::schema::BinarySwitch;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const DIMMING_RESOURCE_TYPE: &str = "oic.r.light.dimming";

// Schema: oic.r.light.dimming, dimmingSetting in percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimmingResource {
    pub rt: Vec<String>,
    pub id: String,
    pub dimming_setting: u8,
}

impl DimmingResource {
    pub fn new(dimming_setting: u8) -> Self {
        DimmingResource {
            rt: vec![DIMMING_RESOURCE_TYPE.to_string()],
            id: "dim".to_string(),
            dimming_setting: dimming_setting.min(100),
        }
    }

    /// Maps a fraction of a vendor range onto a percentage.
    pub fn from_fraction(fraction: f64) -> Self {
        DimmingResource::new((fraction.clamp(0.0, 1.0) * 100.0).round() as u8)
    }

    pub fn fraction(&self) -> f64 {
        f64::from(self.dimming_setting.min(100)) / 100.0
    }
}

#[async_trait]
pub trait Lamp: BinarySwitch {
    async fn get_devices_dim(&self, device_id: &str) -> Result<DimmingResource, TranslatorError>;

    async fn post_devices_dim(&self, device_id: &str, payload: DimmingResource) -> Result<DimmingResource, TranslatorError>;

    async fn get_dimming(&self) -> Result<u8, TranslatorError> {
        Ok(self.get_devices_dim(self.device_id()).await?.dimming_setting)
    }

    async fn set_dimming(&self, dimming_setting: u8) -> Result<u8, TranslatorError> {
        Ok(self.post_devices_dim(self.device_id(), DimmingResource::new(dimming_setting)).await?.dimming_setting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(0.0, 0)]
    #[case(0.5, 50)]
    #[case(0.333, 33)]
    #[case(1.0, 100)]
    #[case(1.7, 100)]
    #[case(-0.2, 0)]
    fn from_fraction_maps_to_a_percentage(#[case] fraction: f64, #[case] expected: u8) {
        assert_eq!(DimmingResource::from_fraction(fraction).dimming_setting, expected);
    }

    #[test]
    fn new_clamps_the_setting() {
        assert_eq!(DimmingResource::new(140).dimming_setting, 100);
    }

    #[test]
    fn serializes_to_the_canonical_shape() -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(DimmingResource::new(42))?;

        assert_eq!(value, json!({ "rt": ["oic.r.light.dimming"], "id": "dim", "dimmingSetting": 42 }));
        Ok(())
    }
}
