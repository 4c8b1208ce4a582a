use crate::domain::HubDeviceInfo;
use crate::error::TranslatorError;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;
use std::sync::Arc;

/// A vendor backend that stores device state: a cloud API, a local bridge or an in-memory double.
#[async_trait]
pub trait Hub: Debug + Send + Sync {
    async fn get_device_details(&self, device_type: &str, device_id: &str) -> Result<Value, TranslatorError>;

    /// Applies `payload` and returns the device state after the mutation.
    async fn put_device_details(&self, device_type: &str, device_id: &str, payload: Value) -> Result<Value, TranslatorError>;
}

/// A translator that can be wired to an arbitrary hub instead of building its own vendor client.
pub trait HubTranslator: Sized {
    const TRANSLATOR: &'static str;

    fn from_hub(device_info: &HubDeviceInfo, hub: Arc<dyn Hub>) -> Result<Self, TranslatorError>;
}

/// One device of a hub, as seen by the translator that exclusively owns it.
#[derive(Debug, Clone)]
pub struct HubDevice {
    hub: Arc<dyn Hub>,
    device_type: &'static str,
    device_id: String,
}

impl HubDevice {
    pub fn new(hub: Arc<dyn Hub>, device_type: &'static str, device_id: impl Into<String>) -> Self {
        HubDevice {
            hub,
            device_type,
            device_id: device_id.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.device_id
    }

    pub async fn details(&self) -> Result<Value, TranslatorError> {
        self.hub.get_device_details(self.device_type, &self.device_id).await
    }

    pub async fn update(&self, payload: Value) -> Result<Value, TranslatorError> {
        self.hub.put_device_details(self.device_type, &self.device_id, payload).await
    }
}
