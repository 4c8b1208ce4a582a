mod vendor_client;

pub use vendor_client::VendorClient;
