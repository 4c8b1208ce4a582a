use crate::app_config::{AppConfig, Category, DeviceEntry, Vendor};
use crate::error::{ArgumentError, TranslatorError};
use crate::hue::HueLamp;
use crate::insteon::InsteonBinarySwitch;
use crate::nest::NestThermostat;
use crate::schema::{BinarySwitch, Lamp, TemperatureSensor, Thermostat};
use crate::smartthings::{SmartThingsBinarySwitch, SmartThingsLamp};
use crate::wink::{WinkBinarySwitch, WinkLamp, WinkTemperatureSensor, WinkThermostat};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{instrument, warn};

fn to_json<T: Serialize>(resource: &T) -> Result<Value, TranslatorError> {
    Ok(serde_json::to_value(resource)?)
}

async fn switch_state(translator: &impl BinarySwitch) -> Result<Value, TranslatorError> {
    to_json(&translator.get_devices_power(translator.device_id()).await?)
}

async fn lamp_state(translator: &impl Lamp) -> Result<Value, TranslatorError> {
    let power = translator.get_devices_power(translator.device_id()).await?;
    let dim = translator.get_devices_dim(translator.device_id()).await?;
    Ok(json!({ "power": to_json(&power)?, "dim": to_json(&dim)? }))
}

/// Builds the translator for a configured device and reads its canonical state once.
#[instrument(skip_all, fields(device = entry.name()))]
pub async fn probe(entry: &DeviceEntry, config: &AppConfig) -> Result<Value, TranslatorError> {
    let descriptor = entry.descriptor();

    match (entry.vendor(), entry.category()) {
        (Vendor::Wink, Category::BinarySwitch) => switch_state(&WinkBinarySwitch::new(&descriptor, config)?).await,
        (Vendor::Wink, Category::Lamp) => lamp_state(&WinkLamp::new(&descriptor, config)?).await,
        (Vendor::Wink, Category::Thermostat) => to_json(&WinkThermostat::new(&descriptor, config)?.get_thermostat_res_uri().await?),
        (Vendor::Wink, Category::TemperatureSensor) => to_json(
            &WinkTemperatureSensor::new(&descriptor, config)?
                .get_temperature_sensor_res_uri()
                .await?,
        ),
        (Vendor::Hue, Category::Lamp) => lamp_state(&HueLamp::new(&descriptor, config)?).await,
        (Vendor::SmartThings, Category::BinarySwitch) => switch_state(&SmartThingsBinarySwitch::new(&descriptor)?).await,
        (Vendor::SmartThings, Category::Lamp) => lamp_state(&SmartThingsLamp::new(&descriptor)?).await,
        (Vendor::Nest, Category::Thermostat) => to_json(&NestThermostat::new(&descriptor, config)?.get_thermostat_res_uri().await?),
        (Vendor::Insteon, Category::BinarySwitch) => switch_state(&InsteonBinarySwitch::new(&descriptor, config)?).await,
        (Vendor::Ble, category) => probe_ble(&descriptor, category).await,
        (vendor, category) => {
            warn!("⚠️ No translator for {:?} {:?}", vendor, category);
            Err(ArgumentError::TranslatorMismatch {
                expected: "a supported vendor and category",
                actual: format!("{:?} {:?}", vendor, category),
            }
            .into())
        }
    }
}

#[cfg(feature = "btleplug")]
async fn probe_ble(descriptor: &crate::domain::DeviceDescriptor, category: Category) -> Result<Value, TranslatorError> {
    use crate::ble::{BtleplugLink, HeartRateMonitor, TemperatureTag};
    use crate::schema::HeartRate;

    let link = BtleplugLink::new().await?;
    match category {
        Category::HeartRate => {
            let monitor = HeartRateMonitor::new(descriptor, link)?;
            monitor.connect().await?;
            let state = monitor.get_heart_rate_res_uri().await;
            monitor.disconnect().await?;
            to_json(&state?)
        }
        Category::TemperatureSensor => {
            let tag = TemperatureTag::new(descriptor, link)?;
            tag.connect().await?;
            let state = tag.get_temperature_sensor_res_uri().await;
            tag.disconnect().await?;
            to_json(&state?)
        }
        other => Err(ArgumentError::TranslatorMismatch {
            expected: "heart_rate or temperature_sensor",
            actual: format!("{:?}", other),
        }
        .into()),
    }
}

#[cfg(not(feature = "btleplug"))]
async fn probe_ble(_descriptor: &crate::domain::DeviceDescriptor, category: Category) -> Result<Value, TranslatorError> {
    warn!("⚠️ Built without the btleplug feature, unable to probe a BLE {:?}", category);
    Err(crate::ble::BleError::Link("built without Bluetooth support".to_string()).into())
}
