use crate::error::TranslatorError;
use crate::http::VendorClient;
use crate::hub::Hub;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, instrument};

// API: the SmartApp endpoint installed for the user, devices live under {endpointUri}/devices/{id}
#[derive(Debug)]
pub struct SmartThingsHub {
    client: VendorClient,
}

impl SmartThingsHub {
    pub fn new(endpoint_uri: &str, access_token: &str) -> Result<Self, TranslatorError> {
        Ok(SmartThingsHub {
            client: VendorClient::new(endpoint_uri, access_token)?,
        })
    }
}

#[async_trait]
impl Hub for SmartThingsHub {
    #[instrument(skip(self))]
    async fn get_device_details(&self, device_type: &str, device_id: &str) -> Result<Value, TranslatorError> {
        self.client.get_json(&format!("/devices/{}", device_id)).await
    }

    #[instrument(skip(self, payload))]
    async fn put_device_details(&self, device_type: &str, device_id: &str, payload: Value) -> Result<Value, TranslatorError> {
        info!(device_id, "🟢 Updating {} '{}'", device_type, device_id);
        self.client.put_json(&format!("/devices/{}", device_id), &payload).await?;
        self.get_device_details(device_type, device_id).await
    }
}
