use crate::domain::HubDeviceInfo;
use crate::error::TranslatorError;
use crate::hub::{Hub, HubTranslator};
use crate::mock_hub::{MockFixture, json_subset, merge_json};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

/// The vendor specific part of a mock hub: how a mutation lands in the stored state and how an
/// outgoing request is checked against the mutation the test expects.
pub trait MockVendor: Debug + Send + Sync {
    fn modify_device_state(&self, state: &mut Value, mutation: &Value) {
        merge_json(state, mutation);
    }

    fn verify_payload(&self, expected: &Value, payload: &Value) -> Result<(), MockHubError> {
        if json_subset(expected, payload) {
            Ok(())
        } else {
            Err(MockHubError::PayloadMismatch {
                expected: expected.clone(),
                actual: payload.clone(),
            })
        }
    }
}

/// In-memory stand-in for a vendor backend holding the state of a single device.
#[derive(Debug)]
pub struct MockHub<V: MockVendor> {
    vendor: V,
    state: Mutex<Value>,
    test_data: HashMap<String, Vec<Value>>,
    pending: Mutex<VecDeque<Value>>,
}

impl<V: MockVendor + 'static> MockHub<V> {
    pub fn new(vendor: V, fixture: MockFixture) -> Self {
        MockHub {
            vendor,
            state: Mutex::new(fixture.base_state),
            test_data: fixture.test_data,
            pending: Mutex::new(VecDeque::new()),
        }
    }

    /// Queues the mutations of `test_case`, dropping whatever was left of a previous case.
    pub async fn set_test_case(&self, test_case: &str) -> Result<(), MockHubError> {
        let mutations = self
            .test_data
            .get(test_case)
            .ok_or_else(|| MockHubError::UnknownTestCase(test_case.to_string()))?;

        let mut pending = self.pending.lock().await;
        *pending = mutations.iter().cloned().collect();
        debug!(test_case, "Queued {} mutation(s)", pending.len());
        Ok(())
    }

    pub async fn pending_mutations(&self) -> usize {
        self.pending.lock().await.len()
    }

    pub async fn state(&self) -> Value {
        self.state.lock().await.clone()
    }

    /// Returns a factory that builds a real translator wired to this hub.
    pub fn create_translator<T: HubTranslator>(self: &Arc<Self>, translator: &str, control_id: &str) -> impl FnOnce() -> Result<T, TranslatorError> {
        let hub: Arc<dyn Hub> = self.clone();
        let device_info = HubDeviceInfo::new(translator, control_id);
        move || T::from_hub(&device_info, hub)
    }
}

#[async_trait]
impl<V: MockVendor + 'static> Hub for MockHub<V> {
    #[instrument(skip(self))]
    async fn get_device_details(&self, device_type: &str, device_id: &str) -> Result<Value, TranslatorError> {
        Ok(self.state.lock().await.clone())
    }

    #[instrument(skip(self, payload))]
    async fn put_device_details(&self, device_type: &str, device_id: &str, payload: Value) -> Result<Value, TranslatorError> {
        let expected = self.pending.lock().await.pop_front().ok_or_else(|| {
            warn!("⚠️ Received a mutation while none is pending");
            MockHubError::NoPendingMutation {
                device_id: device_id.to_string(),
            }
        })?;

        self.vendor.verify_payload(&expected, &payload)?;

        let mut state = self.state.lock().await;
        self.vendor.modify_device_state(&mut state, &expected);
        debug!("Applied mutation {}", expected);
        Ok(state.clone())
    }
}

#[derive(Error, Debug)]
pub enum MockHubError {
    #[error("no pending mutation left for device '{device_id}'")]
    NoPendingMutation { device_id: String },
    #[error("payload {actual} does not match the expected mutation {expected}")]
    PayloadMismatch { expected: Value, actual: Value },
    #[error("unknown test case '{0}'")]
    UnknownTestCase(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[derive(Debug)]
    struct PlainVendor;

    impl MockVendor for PlainVendor {}

    fn hub() -> MockHub<PlainVendor> {
        let fixture = MockFixture {
            base_state: json!({ "value": false }),
            test_data: HashMap::from([("postPower".to_string(), vec![json!({ "value": true }), json!({ "value": false })])]),
        };
        MockHub::new(PlainVendor, fixture)
    }

    #[tokio::test]
    async fn put_consumes_mutations_in_order() -> Result<(), TranslatorError> {
        let hub = hub();
        hub.set_test_case("postPower").await?;

        let first = hub.put_device_details("switch", "1", json!({ "value": true })).await?;
        assert_eq!(first, json!({ "value": true }));

        let second = hub.put_device_details("switch", "1", json!({ "value": false })).await?;
        assert_eq!(second, json!({ "value": false }));

        assert_eq!(hub.pending_mutations().await, 0);
        Ok(())
    }

    #[tokio::test]
    async fn put_rejects_a_payload_out_of_order() -> Result<(), TranslatorError> {
        let hub = hub();
        hub.set_test_case("postPower").await?;

        let result = hub.put_device_details("switch", "1", json!({ "value": false })).await;

        assert!(matches!(result, Err(TranslatorError::MockHub(MockHubError::PayloadMismatch { .. }))));
        assert_eq!(hub.state().await, json!({ "value": false }));
        Ok(())
    }

    #[tokio::test]
    async fn put_without_pending_mutation_fails() -> Result<(), TranslatorError> {
        let hub = hub();

        let result = hub.put_device_details("switch", "1", json!({ "value": true })).await;

        assert!(matches!(
            result,
            Err(TranslatorError::MockHub(MockHubError::NoPendingMutation { device_id })) if device_id == "1"
        ));
        Ok(())
    }

    #[tokio::test]
    async fn set_test_case_rejects_unknown_cases() {
        let hub = hub();

        let result = hub.set_test_case("postDim").await;

        assert!(matches!(result, Err(MockHubError::UnknownTestCase(name)) if name == "postDim"));
    }

    #[tokio::test]
    async fn get_returns_the_base_state() -> Result<(), TranslatorError> {
        let hub = hub();

        let state = hub.get_device_details("switch", "1").await?;

        assert_eq!(state, json!({ "value": false }));
        Ok(())
    }
}
