use crate::ble::{BleConnection, BleError, BleLink, ConnectionState};
use crate::domain::{BleProps, DeviceDescriptor};
use crate::error::TranslatorError;
use crate::schema::{Temperature, TemperatureSensor, TemperatureSensorResource};
use async_trait::async_trait;
use tracing::{debug, info, instrument};
use uuid::Uuid;

const IR_TEMPERATURE_SERVICE: Uuid = Uuid::from_u128(0xf000aa00_0451_4000_b000_000000000000);
const IR_TEMPERATURE_DATA: Uuid = Uuid::from_u128(0xf000aa01_0451_4000_b000_000000000000);
const IR_TEMPERATURE_CONFIG: Uuid = Uuid::from_u128(0xf000aa02_0451_4000_b000_000000000000);

const SENSOR_ENABLE: u8 = 0x01;

/// TI SensorTag, read through its IR temperature service. The sensor stays off until enabled.
#[derive(Debug)]
pub struct TemperatureTag<L: BleLink> {
    connection: BleConnection<L>,
}

impl<L: BleLink> TemperatureTag<L> {
    pub fn new(descriptor: &DeviceDescriptor, link: L) -> Result<Self, TranslatorError> {
        let props = descriptor.parse::<BleProps>()?;
        Ok(TemperatureTag {
            connection: BleConnection::new(props.id, link),
        })
    }

    /// Connects and switches the temperature sensor on.
    pub async fn connect(&self) -> Result<(), TranslatorError> {
        self.connection.connect().await?;
        self.connection
            .write(IR_TEMPERATURE_SERVICE, IR_TEMPERATURE_CONFIG, &[SENSOR_ENABLE])
            .await?;
        info!("🟢 Enabled the IR temperature sensor of '{}'", self.connection.peripheral_id());
        Ok(())
    }

    pub async fn disconnect(&self) -> Result<(), TranslatorError> {
        Ok(self.connection.disconnect().await?)
    }

    pub fn state(&self) -> ConnectionState {
        self.connection.state()
    }
}

// Bytes 2..4 hold the ambient die temperature, 14 bits left aligned, 1/32 °C per step
fn parse_ambient(value: &[u8]) -> Result<f64, BleError> {
    match value {
        [_, _, low, high] => Ok(f64::from(u16::from_le_bytes([*low, *high]) >> 2) * 0.03125),
        _ => Err(BleError::MalformedValue {
            characteristic: IR_TEMPERATURE_DATA,
            reason: format!("expected 4 bytes, got {}", value.len()),
        }),
    }
}

#[async_trait]
impl<L: BleLink> TemperatureSensor for TemperatureTag<L> {
    #[instrument(skip(self), fields(peripheral_id = self.connection.peripheral_id()))]
    async fn get_temperature_sensor_res_uri(&self) -> Result<TemperatureSensorResource, TranslatorError> {
        let value = self.connection.read(IR_TEMPERATURE_SERVICE, IR_TEMPERATURE_DATA).await?;
        let ambient = parse_ambient(&value)?;
        debug!("Ambient temperature is {} °C", ambient);
        Ok(TemperatureSensorResource::new(Temperature::celsius(ambient)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ble::fake_link::FakeLink;
    use pretty_assertions::assert_eq;
    use test_log::test;

    const PERIPHERAL: &str = "b0:b4:48:c9:a2:85";

    fn descriptor() -> DeviceDescriptor {
        DeviceDescriptor::new("Sensor tag", format!(r#"{{ "id": "{}" }}"#, PERIPHERAL))
    }

    #[test]
    fn service_uuids_match_the_sensor_tag_layout() {
        assert_eq!(IR_TEMPERATURE_SERVICE.to_string(), "f000aa00-0451-4000-b000-000000000000");
        assert_eq!(IR_TEMPERATURE_DATA.to_string(), "f000aa01-0451-4000-b000-000000000000");
        assert_eq!(IR_TEMPERATURE_CONFIG.to_string(), "f000aa02-0451-4000-b000-000000000000");
    }

    #[test]
    fn parses_the_ambient_temperature() {
        // 0x0b00 >> 2 = 704 steps of 1/32 °C
        assert_eq!(parse_ambient(&[0x00, 0x00, 0x00, 0x0b]), Ok(22.0));
    }

    #[test]
    fn rejects_short_values() {
        assert!(matches!(parse_ambient(&[0x00, 0x0b]), Err(BleError::MalformedValue { .. })));
    }

    #[test(tokio::test)]
    async fn connect_enables_the_sensor_before_reading() -> Result<(), TranslatorError> {
        let link = FakeLink::new(PERIPHERAL).with_value(IR_TEMPERATURE_DATA, &[0x5c, 0x0b, 0x40, 0x0c]);
        let tag = TemperatureTag::new(&descriptor(), link)?;

        tag.connect().await?;
        let resource = tag.get_temperature_sensor_res_uri().await?;

        // 0x0c40 >> 2 = 784 steps
        assert_eq!(resource, TemperatureSensorResource::new(Temperature::celsius(24.5)));
        assert_eq!(tag.connection.link().written(), vec![(IR_TEMPERATURE_CONFIG, vec![SENSOR_ENABLE])]);
        Ok(())
    }

    #[test(tokio::test)]
    async fn disconnect_on_a_never_connected_tag_is_ok() -> Result<(), TranslatorError> {
        let tag = TemperatureTag::new(&descriptor(), FakeLink::new(PERIPHERAL))?;

        tag.disconnect().await?;

        assert_eq!(tag.state(), ConnectionState::Disconnected);
        Ok(())
    }

    #[test(tokio::test)]
    async fn unknown_peripheral_leaves_the_tag_disconnected() -> Result<(), TranslatorError> {
        let tag = TemperatureTag::new(&descriptor(), FakeLink::new("00:00:00:00:00:00"))?;

        let result = tag.connect().await;

        assert!(matches!(result, Err(TranslatorError::Ble(BleError::PeripheralNotFound(_)))));
        assert_eq!(tag.state(), ConnectionState::Disconnected);
        Ok(())
    }
}
