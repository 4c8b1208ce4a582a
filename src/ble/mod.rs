#[cfg(feature = "btleplug")]
mod btleplug_link;
mod connection;
#[cfg(test)]
mod fake_link;
mod heart_rate;
mod link;
mod temperature_tag;

#[cfg(feature = "btleplug")]
pub use btleplug_link::BtleplugLink;
pub use connection::{BleConnection, ConnectionState};
pub use heart_rate::HeartRateMonitor;
pub use link::{BleError, BleLink, short_uuid};
pub use temperature_tag::TemperatureTag;
