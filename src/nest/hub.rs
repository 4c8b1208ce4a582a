use crate::error::TranslatorError;
use crate::http::VendorClient;
use crate::hub::Hub;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, instrument};

// API: https://developers.nest.com, devices live under /devices/{deviceType}/{deviceId}
#[derive(Debug)]
pub struct NestHub {
    client: VendorClient,
}

impl NestHub {
    pub fn new(url: &str, access_token: &str) -> Result<Self, TranslatorError> {
        Ok(NestHub {
            client: VendorClient::new(url, access_token)?,
        })
    }
}

#[async_trait]
impl Hub for NestHub {
    #[instrument(skip(self))]
    async fn get_device_details(&self, device_type: &str, device_id: &str) -> Result<Value, TranslatorError> {
        self.client.get_json(&format!("/devices/{}/{}", device_type, device_id)).await
    }

    #[instrument(skip(self, payload))]
    async fn put_device_details(&self, device_type: &str, device_id: &str, payload: Value) -> Result<Value, TranslatorError> {
        info!(device_id, "🟢 Updating {} '{}'", device_type, device_id);
        // Nest echoes only the written fields
        self.client.put_json(&format!("/devices/{}/{}", device_type, device_id), &payload).await?;
        self.get_device_details(device_type, device_id).await
    }
}
