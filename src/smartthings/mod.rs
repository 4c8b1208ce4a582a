mod attributes;
mod binary_switch;
mod hub;
mod lamp;
#[cfg(test)]
mod mock;

pub use binary_switch::SmartThingsBinarySwitch;
pub use hub::SmartThingsHub;
pub use lamp::SmartThingsLamp;
#[cfg(test)]
pub use mock::SmartThingsMockVendor;
