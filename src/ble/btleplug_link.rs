use crate::ble::{BleError, BleLink};
use async_trait::async_trait;
use btleplug::api::{Central, Characteristic, Manager as _, Peripheral as _, ScanFilter, WriteType};
use btleplug::platform::{Adapter, Manager, Peripheral};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

const SCAN_POLL_INTERVAL: Duration = Duration::from_millis(500);
const SCAN_POLLS: usize = 20;

impl From<btleplug::Error> for BleError {
    fn from(error: btleplug::Error) -> Self {
        match error {
            btleplug::Error::NotConnected => BleError::NotConnected,
            other => BleError::Link(other.to_string()),
        }
    }
}

// Only discovery knows which peripheral went missing
fn discovery_error(error: btleplug::Error, peripheral_id: &str) -> BleError {
    match error {
        btleplug::Error::DeviceNotFound => BleError::PeripheralNotFound(peripheral_id.to_string()),
        other => other.into(),
    }
}

/// Radio backend on the first Bluetooth adapter of the host. A peripheral is matched on its
/// address or platform id.
#[derive(Debug)]
pub struct BtleplugLink {
    adapter: Adapter,
    peripheral: Mutex<Option<Peripheral>>,
}

impl BtleplugLink {
    pub async fn new() -> Result<Self, BleError> {
        let manager = Manager::new().await?;
        let adapter = manager
            .adapters()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| BleError::Link("no Bluetooth adapter available".to_string()))?;
        info!("🔵 Using Bluetooth adapter {:?}", adapter.adapter_info().await.ok());

        Ok(BtleplugLink {
            adapter,
            peripheral: Mutex::new(None),
        })
    }

    async fn find_peripheral(&self, peripheral_id: &str) -> Result<Option<Peripheral>, BleError> {
        let peripherals = self.adapter.peripherals().await.map_err(|e| discovery_error(e, peripheral_id))?;
        for peripheral in peripherals {
            let properties = peripheral.properties().await.map_err(|e| discovery_error(e, peripheral_id))?;
            let address = properties.map(|properties| properties.address.to_string());
            let matches = address.is_some_and(|address| address.eq_ignore_ascii_case(peripheral_id))
                || format!("{:?}", peripheral.id()).contains(peripheral_id);
            if matches {
                return Ok(Some(peripheral));
            }
        }
        Ok(None)
    }

    async fn peripheral(&self) -> Result<Peripheral, BleError> {
        self.peripheral.lock().await.clone().ok_or(BleError::NotConnected)
    }

    fn characteristic(peripheral: &Peripheral, service: Uuid, characteristic: Uuid) -> Result<Characteristic, BleError> {
        peripheral
            .characteristics()
            .into_iter()
            .find(|c| c.service_uuid == service && c.uuid == characteristic)
            .ok_or(BleError::CharacteristicNotFound { service, characteristic })
    }
}

#[async_trait]
impl BleLink for BtleplugLink {
    #[instrument(skip(self))]
    async fn discover(&self, peripheral_id: &str) -> Result<(), BleError> {
        self.adapter
            .start_scan(ScanFilter::default())
            .await
            .map_err(|e| discovery_error(e, peripheral_id))?;

        let mut found = None;
        for _ in 0..SCAN_POLLS {
            found = self.find_peripheral(peripheral_id).await?;
            if found.is_some() {
                break;
            }
            tokio::time::sleep(SCAN_POLL_INTERVAL).await;
        }

        if let Err(e) = self.adapter.stop_scan().await {
            warn!("⚠️ Unable to stop scanning: {}", e);
        }

        let peripheral = found.ok_or_else(|| BleError::PeripheralNotFound(peripheral_id.to_string()))?;
        debug!("Found peripheral {:?}", peripheral.id());
        *self.peripheral.lock().await = Some(peripheral);
        Ok(())
    }

    async fn connect(&self) -> Result<(), BleError> {
        let peripheral = self.peripheral().await?;
        if !peripheral.is_connected().await? {
            peripheral.connect().await?;
        }
        peripheral.discover_services().await?;
        debug!("Discovered {} characteristic(s)", peripheral.characteristics().len());
        Ok(())
    }

    async fn read(&self, service: Uuid, characteristic: Uuid) -> Result<Vec<u8>, BleError> {
        let peripheral = self.peripheral().await?;
        let characteristic = Self::characteristic(&peripheral, service, characteristic)?;
        Ok(peripheral.read(&characteristic).await?)
    }

    async fn write(&self, service: Uuid, characteristic: Uuid, value: &[u8]) -> Result<(), BleError> {
        let peripheral = self.peripheral().await?;
        let characteristic = Self::characteristic(&peripheral, service, characteristic)?;
        Ok(peripheral.write(&characteristic, value, WriteType::WithResponse).await?)
    }

    async fn next_notification(&self, service: Uuid, characteristic: Uuid) -> Result<Vec<u8>, BleError> {
        let peripheral = self.peripheral().await?;
        let target = Self::characteristic(&peripheral, service, characteristic)?;
        let mut notifications = peripheral.notifications().await?;
        peripheral.subscribe(&target).await?;

        let mut value = None;
        while let Some(notification) = notifications.next().await {
            if notification.uuid == characteristic {
                value = Some(notification.value);
                break;
            }
        }

        if let Err(e) = peripheral.unsubscribe(&target).await {
            warn!("⚠️ Unable to unsubscribe from {}: {}", characteristic, e);
        }
        value.ok_or(BleError::NotConnected)
    }

    async fn disconnect(&self) -> Result<(), BleError> {
        if let Some(peripheral) = self.peripheral.lock().await.take() {
            if peripheral.is_connected().await? {
                peripheral.disconnect().await?;
            }
        }
        Ok(())
    }
}
