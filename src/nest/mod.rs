mod hub;
#[cfg(test)]
mod mock;
mod thermostat;

pub use hub::NestHub;
#[cfg(test)]
pub use mock::NestMockVendor;
pub use thermostat::NestThermostat;
