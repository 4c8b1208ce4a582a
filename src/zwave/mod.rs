mod binary_switch;
#[cfg(test)]
mod mock;

pub use binary_switch::ZwaveBinarySwitch;
#[cfg(test)]
pub use mock::ZwaveMockVendor;
