use crate::domain::DeviceDescriptor;
use config::{Config, ConfigError};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    core: Core,
    wink: VendorApi,
    hue: VendorApi,
    nest: VendorApi,
    insteon: VendorApi,
    #[serde(default)]
    devices: Vec<DeviceEntry>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::default().separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn core(&self) -> &Core {
        &self.core
    }

    pub fn wink(&self) -> &VendorApi {
        &self.wink
    }

    pub fn hue(&self) -> &VendorApi {
        &self.hue
    }

    pub fn nest(&self) -> &VendorApi {
        &self.nest
    }

    pub fn insteon(&self) -> &VendorApi {
        &self.insteon
    }

    pub fn devices(&self) -> &[DeviceEntry] {
        &self.devices
    }
}

#[derive(Debug, Deserialize)]
pub struct Core {
    log_level: String,
}

impl Core {
    /// Falls back to `info` for anything `tracing` does not recognize.
    pub fn log_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

#[derive(Debug, Deserialize)]
pub struct VendorApi {
    url: String,
}

impl VendorApi {
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    Wink,
    Hue,
    SmartThings,
    Nest,
    Insteon,
    Ble,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    BinarySwitch,
    Lamp,
    Thermostat,
    TemperatureSensor,
    HeartRate,
}

/// A device the probe builds a translator for. `props` is the JSON object handed to the translator.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceEntry {
    vendor: Vendor,
    category: Category,
    name: String,
    props: Value,
}

impl DeviceEntry {
    pub fn vendor(&self) -> Vendor {
        self.vendor
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn descriptor(&self) -> DeviceDescriptor {
        DeviceDescriptor::new(&self.name, self.props.to_string())
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        let api = |url: &str| VendorApi { url: url.to_string() };
        AppConfigBuilder {
            config: AppConfig {
                core: Core {
                    log_level: "debug".to_string(),
                },
                wink: api("https://api.wink.url"),
                hue: api("https://api.hue.url"),
                nest: api("https://api.nest.url"),
                insteon: api("https://api.insteon.url"),
                devices: vec![],
            },
        }
    }

    pub fn wink_url(mut self, url: String) -> Self {
        self.config.wink.url = url;
        self
    }

    pub fn hue_url(mut self, url: String) -> Self {
        self.config.hue.url = url;
        self
    }

    pub fn nest_url(mut self, url: String) -> Self {
        self.config.nest.url = url;
        self
    }

    pub fn insteon_url(mut self, url: String) -> Self {
        self.config.insteon.url = url;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
