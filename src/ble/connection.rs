use crate::ble::{BleError, BleLink};
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Scanning,
    Connecting,
    Connected,
}

/// Connection lifecycle of one peripheral. Operations are serialized: the operation lock is held
/// from the first transition to the last, so at most one is in flight per peripheral.
#[derive(Debug)]
pub struct BleConnection<L: BleLink> {
    peripheral_id: String,
    link: L,
    operation: Mutex<()>,
    state_tx: watch::Sender<ConnectionState>,
}

impl<L: BleLink> BleConnection<L> {
    pub fn new(peripheral_id: impl Into<String>, link: L) -> Self {
        let (state_tx, _) = watch::channel(ConnectionState::Disconnected);
        BleConnection {
            peripheral_id: peripheral_id.into(),
            link,
            operation: Mutex::new(()),
            state_tx,
        }
    }

    pub fn peripheral_id(&self) -> &str {
        &self.peripheral_id
    }

    pub fn state(&self) -> ConnectionState {
        *self.state_tx.borrow()
    }

    /// Follows every state transition.
    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.state_tx.subscribe()
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    fn transition(&self, state: ConnectionState) {
        let previous = self.state_tx.send_replace(state);
        debug!(peripheral_id = self.peripheral_id, "🔵 {:?} -> {:?}", previous, state);
    }

    #[instrument(skip(self), fields(peripheral_id = self.peripheral_id))]
    pub async fn connect(&self) -> Result<(), BleError> {
        let _operation = self.operation.lock().await;
        if self.state() == ConnectionState::Connected {
            debug!("Already connected");
            return Ok(());
        }

        self.transition(ConnectionState::Scanning);
        let result = match self.link.discover(&self.peripheral_id).await {
            Ok(()) => {
                self.transition(ConnectionState::Connecting);
                self.link.connect().await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                self.transition(ConnectionState::Connected);
                info!("✅  Connected to peripheral '{}'", self.peripheral_id);
                Ok(())
            }
            Err(e) => {
                self.transition(ConnectionState::Disconnected);
                warn!("⚠️ Unable to connect to peripheral '{}': {}", self.peripheral_id, e);
                Err(e)
            }
        }
    }

    /// Idempotent: disconnecting a peripheral that is not connected only logs.
    #[instrument(skip(self), fields(peripheral_id = self.peripheral_id))]
    pub async fn disconnect(&self) -> Result<(), BleError> {
        let _operation = self.operation.lock().await;
        if self.state() == ConnectionState::Disconnected {
            info!("Peripheral '{}' is not connected, nothing to disconnect", self.peripheral_id);
            return Ok(());
        }

        let result = self.link.disconnect().await;
        self.transition(ConnectionState::Disconnected);
        info!("🔴 Disconnected from peripheral '{}'", self.peripheral_id);
        result
    }

    pub async fn read(&self, service: Uuid, characteristic: Uuid) -> Result<Vec<u8>, BleError> {
        let _operation = self.operation.lock().await;
        self.ensure_connected()?;
        let result = self.link.read(service, characteristic).await;
        self.track_link_loss(result)
    }

    pub async fn write(&self, service: Uuid, characteristic: Uuid, value: &[u8]) -> Result<(), BleError> {
        let _operation = self.operation.lock().await;
        self.ensure_connected()?;
        let result = self.link.write(service, characteristic, value).await;
        self.track_link_loss(result)
    }

    pub async fn next_notification(&self, service: Uuid, characteristic: Uuid) -> Result<Vec<u8>, BleError> {
        let _operation = self.operation.lock().await;
        self.ensure_connected()?;
        let result = self.link.next_notification(service, characteristic).await;
        self.track_link_loss(result)
    }

    fn ensure_connected(&self) -> Result<(), BleError> {
        if self.state() == ConnectionState::Connected {
            Ok(())
        } else {
            Err(BleError::NotConnected)
        }
    }

    // A link that reports the peripheral as gone leaves the connection disconnected
    fn track_link_loss<T>(&self, result: Result<T, BleError>) -> Result<T, BleError> {
        if matches!(result, Err(BleError::NotConnected)) {
            warn!(peripheral_id = self.peripheral_id, "⚠️ Lost connection to the peripheral");
            self.transition(ConnectionState::Disconnected);
        }
        result
    }
}
