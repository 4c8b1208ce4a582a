use crate::error::ArgumentError;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Identity of a single vendor device as handed over by the host runtime. `props` is a JSON
/// encoded object whose fields differ per vendor but conventionally contain `id` and `access_token`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeviceDescriptor {
    pub name: String,
    pub props: String,
}

impl DeviceDescriptor {
    pub fn new(name: impl Into<String>, props: impl Into<String>) -> Self {
        DeviceDescriptor {
            name: name.into(),
            props: props.into(),
        }
    }

    pub fn props(&self) -> Result<Props, ArgumentError> {
        match serde_json::from_str::<Value>(&self.props) {
            Ok(Value::Object(map)) => Ok(Props { map }),
            Ok(other) => Err(ArgumentError::InvalidProps(format!("expected an object, found {}", other))),
            Err(e) => Err(ArgumentError::InvalidProps(e.to_string())),
        }
    }

    /// Parses and validates the props into the typed shape an adapter requires.
    pub fn parse<P: FromProps>(&self) -> Result<P, ArgumentError> {
        P::from_props(&self.props()?)
    }
}

#[derive(Debug)]
pub struct Props {
    map: Map<String, Value>,
}

impl Props {
    pub fn required_str(&self, field: &str) -> Result<String, ArgumentError> {
        self.optional_str(field)?.ok_or_else(|| ArgumentError::MissingField(field.to_string()))
    }

    pub fn optional_str(&self, field: &str) -> Result<Option<String>, ArgumentError> {
        match self.map.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.clone())),
            Some(_) => Err(ArgumentError::InvalidType {
                field: field.to_string(),
                expected: "string",
            }),
        }
    }
}

pub trait FromProps: Sized {
    fn from_props(props: &Props) -> Result<Self, ArgumentError>;
}

/// Props of a device reached through a vendor cloud with a bearer token.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudProps {
    pub id: String,
    pub access_token: String,
}

impl FromProps for CloudProps {
    fn from_props(props: &Props) -> Result<Self, ArgumentError> {
        Ok(CloudProps {
            id: props.required_str("id")?,
            access_token: props.required_str("access_token")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HueProps {
    pub id: String,
    pub access_token: String,
    pub bridge_id: String,
    pub whitelist_id: String,
}

impl FromProps for HueProps {
    fn from_props(props: &Props) -> Result<Self, ArgumentError> {
        Ok(HueProps {
            id: props.required_str("id")?,
            access_token: props.required_str("access_token")?,
            bridge_id: props.required_str("bridge_id")?,
            whitelist_id: props.required_str("whitelist_id")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SmartThingsProps {
    pub id: String,
    pub access_token: String,
    pub endpoint_uri: String,
}

impl FromProps for SmartThingsProps {
    fn from_props(props: &Props) -> Result<Self, ArgumentError> {
        Ok(SmartThingsProps {
            id: props.required_str("id")?,
            access_token: props.required_str("access_token")?,
            endpoint_uri: props.required_str("endpoint_uri")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BleProps {
    pub id: String,
}

impl FromProps for BleProps {
    fn from_props(props: &Props) -> Result<Self, ArgumentError> {
        Ok(BleProps {
            id: props.required_str("id")?,
        })
    }
}

/// A device reached indirectly through a hub translator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HubDeviceInfo {
    opent2t: OpenT2tInfo,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OpenT2tInfo {
    translator: String,
    control_id: String,
}

impl HubDeviceInfo {
    pub fn new(translator: impl Into<String>, control_id: impl Into<String>) -> Self {
        HubDeviceInfo {
            opent2t: OpenT2tInfo {
                translator: translator.into(),
                control_id: control_id.into(),
            },
        }
    }

    pub fn translator(&self) -> &str {
        &self.opent2t.translator
    }

    pub fn control_id(&self) -> &str {
        &self.opent2t.control_id
    }

    /// Returns the control id when the info targets `expected`.
    pub fn control_id_for(&self, expected: &'static str) -> Result<&str, ArgumentError> {
        if self.translator() != expected {
            return Err(ArgumentError::TranslatorMismatch {
                expected,
                actual: self.translator().to_string(),
            });
        }
        Ok(self.control_id())
    }
}
