use crate::error::TranslatorError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub const HEART_RATE_RESOURCE_TYPE: &str = "org.opent2t.sample.heartratemonitor.superpopular";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateResource {
    pub rt: String,
    pub heart_rate: u16,
}

impl HeartRateResource {
    pub fn new(heart_rate: u16) -> Self {
        HeartRateResource {
            rt: HEART_RATE_RESOURCE_TYPE.to_string(),
            heart_rate,
        }
    }
}

#[async_trait]
pub trait HeartRate: Debug + Send + Sync {
    async fn get_heart_rate_res_uri(&self) -> Result<HeartRateResource, TranslatorError>;
}
