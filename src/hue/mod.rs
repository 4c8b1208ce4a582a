mod hub;
mod lamp;
#[cfg(test)]
mod mock;
mod response;

pub use hub::HueHub;
pub use lamp::HueLamp;
#[cfg(test)]
pub use mock::HueMockVendor;
