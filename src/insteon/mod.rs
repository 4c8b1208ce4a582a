mod binary_switch;
mod hub;
#[cfg(test)]
mod mock;

pub use binary_switch::InsteonBinarySwitch;
pub use hub::InsteonHub;
#[cfg(test)]
pub use mock::InsteonMockVendor;
