use crate::error::TranslatorError;
use crate::http::VendorClient;
use crate::hub::Hub;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, instrument};

// API: https://winkapiv2.docs.apiary.io, every response is wrapped in a `data` envelope
#[derive(Debug)]
pub struct WinkHub {
    client: VendorClient,
}

impl WinkHub {
    pub fn new(url: &str, access_token: &str) -> Result<Self, TranslatorError> {
        Ok(WinkHub {
            client: VendorClient::new(url, access_token)?,
        })
    }
}

fn unwrap_data(mut response: Value) -> Result<Value, TranslatorError> {
    match response.get_mut("data") {
        Some(data) if data.is_object() => Ok(data.take()),
        _ => Err(TranslatorError::schema("data")),
    }
}

#[async_trait]
impl Hub for WinkHub {
    #[instrument(skip(self))]
    async fn get_device_details(&self, device_type: &str, device_id: &str) -> Result<Value, TranslatorError> {
        let response = self.client.get_json(&format!("/{}/{}", device_type, device_id)).await?;
        unwrap_data(response)
    }

    #[instrument(skip(self, payload))]
    async fn put_device_details(&self, device_type: &str, device_id: &str, payload: Value) -> Result<Value, TranslatorError> {
        info!(device_id, "🟢 Updating desired state of {} '{}'", device_type, device_id);
        let response = self.client.put_json(&format!("/{}/{}/desired_state", device_type, device_id), &payload).await?;
        unwrap_data(response)
    }
}
