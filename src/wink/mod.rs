mod binary_switch;
mod hub;
mod lamp;
#[cfg(test)]
mod mock;
mod state;
mod temperature_sensor;
mod thermostat;

pub use binary_switch::WinkBinarySwitch;
pub use hub::WinkHub;
pub use lamp::WinkLamp;
#[cfg(test)]
pub use mock::WinkMockVendor;
pub use temperature_sensor::WinkTemperatureSensor;
pub use thermostat::WinkThermostat;
