use crate::ble::{BleConnection, BleError, BleLink, ConnectionState, short_uuid};
use crate::domain::{BleProps, DeviceDescriptor};
use crate::error::TranslatorError;
use crate::schema::{HeartRate, HeartRateResource};
use async_trait::async_trait;
use tracing::{debug, instrument};
use uuid::Uuid;

const HEART_RATE_SERVICE: Uuid = short_uuid(0x180d);
const HEART_RATE_MEASUREMENT: Uuid = short_uuid(0x2a37);

/// Bluetooth heart rate monitor. The measurement is only ever notified, so every read waits for
/// the next notification.
#[derive(Debug)]
pub struct HeartRateMonitor<L: BleLink> {
    connection: BleConnection<L>,
}

impl<L: BleLink> HeartRateMonitor<L> {
    pub fn new(descriptor: &DeviceDescriptor, link: L) -> Result<Self, TranslatorError> {
        let props = descriptor.parse::<BleProps>()?;
        Ok(HeartRateMonitor {
            connection: BleConnection::new(props.id, link),
        })
    }

    pub async fn connect(&self) -> Result<(), TranslatorError> {
        Ok(self.connection.connect().await?)
    }

    pub async fn disconnect(&self) -> Result<(), TranslatorError> {
        Ok(self.connection.disconnect().await?)
    }

    pub fn state(&self) -> ConnectionState {
        self.connection.state()
    }
}

/// Bit 0 of the flags byte tells whether the value is a u8 or a little endian u16.
fn parse_measurement(value: &[u8]) -> Result<u16, BleError> {
    let malformed = |reason: &str| BleError::MalformedValue {
        characteristic: HEART_RATE_MEASUREMENT,
        reason: reason.to_string(),
    };

    let flags = value.first().ok_or_else(|| malformed("empty measurement"))?;
    if flags & 0x01 == 0 {
        value.get(1).map(|rate| u16::from(*rate)).ok_or_else(|| malformed("missing u8 heart rate"))
    } else {
        match value.get(1..3) {
            Some([low, high]) => Ok(u16::from_le_bytes([*low, *high])),
            _ => Err(malformed("missing u16 heart rate")),
        }
    }
}

#[async_trait]
impl<L: BleLink> HeartRate for HeartRateMonitor<L> {
    #[instrument(skip(self), fields(peripheral_id = self.connection.peripheral_id()))]
    async fn get_heart_rate_res_uri(&self) -> Result<HeartRateResource, TranslatorError> {
        let value = self.connection.next_notification(HEART_RATE_SERVICE, HEART_RATE_MEASUREMENT).await?;
        let heart_rate = parse_measurement(&value)?;
        debug!("Heart rate is {} bpm", heart_rate);
        Ok(HeartRateResource::new(heart_rate))
    }
}
