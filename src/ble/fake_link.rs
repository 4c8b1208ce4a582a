use crate::ble::{BleError, BleLink};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Radio {
    connected: bool,
    calls: Vec<String>,
    values: HashMap<Uuid, Vec<u8>>,
    notifications: HashMap<Uuid, VecDeque<Vec<u8>>>,
    written: Vec<(Uuid, Vec<u8>)>,
}

/// In-memory peripheral that answers GATT calls from canned values.
#[derive(Debug)]
pub struct FakeLink {
    peripheral_id: String,
    radio: Mutex<Radio>,
}

impl FakeLink {
    pub fn new(peripheral_id: &str) -> Self {
        FakeLink {
            peripheral_id: peripheral_id.to_string(),
            radio: Mutex::new(Radio::default()),
        }
    }

    pub fn with_value(self, characteristic: Uuid, value: &[u8]) -> Self {
        self.radio.lock().unwrap().values.insert(characteristic, value.to_vec());
        self
    }

    pub fn with_notification(self, characteristic: Uuid, value: &[u8]) -> Self {
        self.radio
            .lock()
            .unwrap()
            .notifications
            .entry(characteristic)
            .or_default()
            .push_back(value.to_vec());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.radio.lock().unwrap().calls.clone()
    }

    pub fn written(&self) -> Vec<(Uuid, Vec<u8>)> {
        self.radio.lock().unwrap().written.clone()
    }

    pub fn drop_connection(&self) {
        self.radio.lock().unwrap().connected = false;
    }

    fn record(&self, call: String) -> std::sync::MutexGuard<'_, Radio> {
        let mut radio = self.radio.lock().unwrap();
        radio.calls.push(call);
        radio
    }
}

#[async_trait]
impl BleLink for FakeLink {
    async fn discover(&self, peripheral_id: &str) -> Result<(), BleError> {
        self.record(format!("discover {}", peripheral_id));
        if peripheral_id == self.peripheral_id {
            Ok(())
        } else {
            Err(BleError::PeripheralNotFound(peripheral_id.to_string()))
        }
    }

    async fn connect(&self) -> Result<(), BleError> {
        self.record("connect".to_string()).connected = true;
        Ok(())
    }

    async fn read(&self, service: Uuid, characteristic: Uuid) -> Result<Vec<u8>, BleError> {
        let radio = self.record(format!("read {}", characteristic));
        if !radio.connected {
            return Err(BleError::NotConnected);
        }
        radio
            .values
            .get(&characteristic)
            .cloned()
            .ok_or(BleError::CharacteristicNotFound { service, characteristic })
    }

    async fn write(&self, _service: Uuid, characteristic: Uuid, value: &[u8]) -> Result<(), BleError> {
        let mut radio = self.record(format!("write {}", characteristic));
        if !radio.connected {
            return Err(BleError::NotConnected);
        }
        radio.written.push((characteristic, value.to_vec()));
        Ok(())
    }

    async fn next_notification(&self, service: Uuid, characteristic: Uuid) -> Result<Vec<u8>, BleError> {
        let mut radio = self.record(format!("notify {}", characteristic));
        if !radio.connected {
            return Err(BleError::NotConnected);
        }
        radio
            .notifications
            .get_mut(&characteristic)
            .and_then(VecDeque::pop_front)
            .ok_or(BleError::CharacteristicNotFound { service, characteristic })
    }

    async fn disconnect(&self) -> Result<(), BleError> {
        self.record("disconnect".to_string()).connected = false;
        Ok(())
    }
}
