use crate::error::TranslatorError;
use crate::http::VendorClient;
use crate::hub::Hub;
use crate::hue::response::HueWriteResult;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

// API: Hue remote API, /v2/bridges/{bridgeId}/{whitelistId}/{deviceType}/{deviceId}
#[derive(Debug)]
pub struct HueHub {
    client: VendorClient,
    bridge_id: String,
    whitelist_id: String,
}

impl HueHub {
    pub fn new(url: &str, access_token: &str, bridge_id: impl Into<String>, whitelist_id: impl Into<String>) -> Result<Self, TranslatorError> {
        Ok(HueHub {
            client: VendorClient::new(url, access_token)?,
            bridge_id: bridge_id.into(),
            whitelist_id: whitelist_id.into(),
        })
    }

    fn device_path(&self, device_type: &str, device_id: &str) -> String {
        format!("/v2/bridges/{}/{}/{}/{}", self.bridge_id, self.whitelist_id, device_type, device_id)
    }
}

#[async_trait]
impl Hub for HueHub {
    #[instrument(skip(self))]
    async fn get_device_details(&self, device_type: &str, device_id: &str) -> Result<Value, TranslatorError> {
        self.client.get_json(&self.device_path(device_type, device_id)).await
    }

    #[instrument(skip(self, payload))]
    async fn put_device_details(&self, device_type: &str, device_id: &str, payload: Value) -> Result<Value, TranslatorError> {
        info!(device_id, "🟢 Updating state of {} '{}'", device_type, device_id);
        let response = self
            .client
            .put_json(&format!("{}/state", self.device_path(device_type, device_id)), &payload)
            .await?;

        let results = serde_json::from_value::<Vec<HueWriteResult>>(response).map_err(|e| TranslatorError::Transport {
            status: None,
            message: format!("unexpected Hue write response: {}", e),
        })?;

        for result in &results {
            match result {
                HueWriteResult::Success(changes) => {
                    for (address, value) in changes {
                        debug!(device_id, "Hue bridge set {} to {}", address, value);
                    }
                }
                HueWriteResult::Error(error) => {
                    warn!(device_id, "⚠️ Hue bridge rejected the update: {}", error.description);
                    return Err(TranslatorError::Transport {
                        status: None,
                        message: format!("Hue bridge rejected '{}' (type {}): {}", error.address, error.r#type, error.description),
                    });
                }
            }
        }

        debug!(device_id, "Hue bridge accepted {} change(s)", results.len());
        // The write only acknowledges the changed attributes, read the full state back
        self.get_device_details(device_type, device_id).await
    }
}
