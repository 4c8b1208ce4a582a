mod binary_switch;
#[cfg(test)]
pub mod conformance;
mod heart_rate;
mod lamp;
mod temperature;
mod thermostat;

pub use binary_switch::{BinarySwitch, BinarySwitchResource, POWER_RESOURCE_TYPE};
pub(crate) use binary_switch::ensure_device;
pub use heart_rate::{HEART_RATE_RESOURCE_TYPE, HeartRate, HeartRateResource};
pub use lamp::{DIMMING_RESOURCE_TYPE, DimmingResource, Lamp};
pub use temperature::{TEMPERATURE_SENSOR_RESOURCE_TYPE, Temperature, TemperatureSensor, TemperatureSensorResource, TemperatureUnits};
pub use thermostat::{HvacMode, THERMOSTAT_RESOURCE_TYPE, Thermostat, ThermostatPatch, ThermostatResource};
