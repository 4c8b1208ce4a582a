pub mod app_config;
pub mod ble;
pub mod domain;
pub mod error;
pub mod http;
pub mod hub;
pub mod hue;
pub mod insteon;
pub mod mock_hub;
pub mod nest;
pub mod probe;
pub mod schema;
pub mod smartthings;
pub mod wink;
pub mod zwave;
