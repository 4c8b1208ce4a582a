use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;
use uuid::Uuid;

const BLUETOOTH_BASE_UUID: u128 = 0x0000_0000_0000_1000_8000_0080_5f9b_34fb;

/// Expands an assigned 16 bit GATT number such as `0x180d` into its full UUID.
pub const fn short_uuid(short: u16) -> Uuid {
    Uuid::from_u128(BLUETOOTH_BASE_UUID | ((short as u128) << 96))
}

/// GATT access to a single peripheral. Implementations talk to the radio; the connection state
/// machine on top decides when each call is allowed.
#[async_trait]
pub trait BleLink: Debug + Send + Sync {
    async fn discover(&self, peripheral_id: &str) -> Result<(), BleError>;

    async fn connect(&self) -> Result<(), BleError>;

    async fn read(&self, service: Uuid, characteristic: Uuid) -> Result<Vec<u8>, BleError>;

    async fn write(&self, service: Uuid, characteristic: Uuid, value: &[u8]) -> Result<(), BleError>;

    /// Subscribes to `characteristic` and resolves with the next notified value.
    async fn next_notification(&self, service: Uuid, characteristic: Uuid) -> Result<Vec<u8>, BleError>;

    async fn disconnect(&self) -> Result<(), BleError>;
}

#[derive(Error, Debug, PartialEq)]
pub enum BleError {
    #[error("peripheral '{0}' not found")]
    PeripheralNotFound(String),
    #[error("peripheral is not connected")]
    NotConnected,
    #[error("characteristic {characteristic} not found in service {service}")]
    CharacteristicNotFound { service: Uuid, characteristic: Uuid },
    #[error("malformed value for characteristic {characteristic}: {reason}")]
    MalformedValue { characteristic: Uuid, reason: String },
    #[error("link error: {0}")]
    Link(String),
}
