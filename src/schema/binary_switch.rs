use crate::error::TranslatorError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub const POWER_RESOURCE_TYPE: &str = "oic.r.switch.binary";

// Schema: oic.r.switch.binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinarySwitchResource {
    pub rt: Vec<String>,
    pub id: String,
    pub value: bool,
}

impl BinarySwitchResource {
    pub fn new(value: bool) -> Self {
        BinarySwitchResource {
            rt: vec![POWER_RESOURCE_TYPE.to_string()],
            id: "power".to_string(),
            value,
        }
    }
}

#[async_trait]
pub trait BinarySwitch: Debug + Send + Sync {
    /// Vendor identifier of the device this translator owns.
    fn device_id(&self) -> &str;

    async fn get_devices_power(&self, device_id: &str) -> Result<BinarySwitchResource, TranslatorError>;

    async fn post_devices_power(&self, device_id: &str, payload: BinarySwitchResource) -> Result<BinarySwitchResource, TranslatorError>;

    async fn get_value(&self) -> Result<bool, TranslatorError> {
        Ok(self.get_devices_power(self.device_id()).await?.value)
    }

    async fn set_value(&self, value: bool) -> Result<bool, TranslatorError> {
        Ok(self.post_devices_power(self.device_id(), BinarySwitchResource::new(value)).await?.value)
    }
}

/// Rejects calls addressed to another device than the one a translator owns.
pub(crate) fn ensure_device(owned: &str, requested: &str) -> Result<(), TranslatorError> {
    if owned == requested {
        Ok(())
    } else {
        Err(TranslatorError::UnknownDevice(requested.to_string()))
    }
}
