use crate::error::{ArgumentError, TranslatorError};
use reqwest::header::HeaderValue;
use reqwest::{Client, RequestBuilder, header};
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// JSON over HTTPS against one vendor API, authenticated with a bearer token.
#[derive(Debug, Clone)]
pub struct VendorClient {
    client: Client,
    base_url: String,
}

impl VendorClient {
    pub fn new(base_url: impl Into<String>, access_token: &str) -> Result<Self, TranslatorError> {
        let mut headers = header::HeaderMap::new();
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", access_token))
            .map_err(|_| ArgumentError::InvalidHeaderValue("access_token".to_string()))?;
        authorization.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, authorization);

        let client = Client::builder().default_headers(headers).build()?;
        Ok(VendorClient {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    #[instrument(skip(self))]
    pub async fn get_json(&self, path: &str) -> Result<Value, TranslatorError> {
        self.send(self.client.get(self.url(path))).await
    }

    #[instrument(skip(self, body))]
    pub async fn put_json(&self, path: &str, body: &Value) -> Result<Value, TranslatorError> {
        self.send(self.client.put(self.url(path)).json(body)).await
    }

    #[instrument(skip(self, body))]
    pub async fn post_json(&self, path: &str, body: &Value) -> Result<Value, TranslatorError> {
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, TranslatorError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status_code = %status, "⚠️ Vendor request failed. Response: {:?}", body);
            return Err(TranslatorError::Transport {
                status: Some(status.as_u16()),
                message: body,
            });
        }

        let bytes = response.bytes().await?;
        debug!(status_code = %status, "Vendor request... OK, {} byte(s)", bytes.len());
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| TranslatorError::Transport {
            status: Some(status.as_u16()),
            message: format!("invalid JSON body: {}", e),
        })
    }
}
