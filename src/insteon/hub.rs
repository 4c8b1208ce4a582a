use crate::error::TranslatorError;
use crate::http::VendorClient;
use crate::hub::Hub;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, instrument};

// API: Insteon REST v2, reads from /api/v2/devices/{id}, writes are commands posted to /api/v2/commands
#[derive(Debug)]
pub struct InsteonHub {
    client: VendorClient,
}

impl InsteonHub {
    pub fn new(url: &str, access_token: &str) -> Result<Self, TranslatorError> {
        Ok(InsteonHub {
            client: VendorClient::new(url, access_token)?,
        })
    }
}

#[async_trait]
impl Hub for InsteonHub {
    #[instrument(skip(self))]
    async fn get_device_details(&self, device_type: &str, device_id: &str) -> Result<Value, TranslatorError> {
        self.client.get_json(&format!("/api/v2/devices/{}", device_id)).await
    }

    #[instrument(skip(self, payload))]
    async fn put_device_details(&self, device_type: &str, device_id: &str, mut payload: Value) -> Result<Value, TranslatorError> {
        info!(device_id, "🟢 Sending command to {} '{}'", device_type, device_id);
        if let Value::Object(command) = &mut payload {
            command.insert("device_id".to_string(), Value::from(device_id));
        }

        let response = self.client.post_json("/api/v2/commands", &payload).await?;
        debug!(device_id, "Command accepted: {}", response);
        self.get_device_details(device_type, device_id).await
    }
}
