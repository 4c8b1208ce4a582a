use crate::ble::BleError;
use crate::mock_hub::MockHubError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslatorError {
    #[error(transparent)]
    Argument(#[from] ArgumentError),
    #[error("vendor request failed{}: {message}", status_suffix(.status))]
    Transport { status: Option<u16>, message: String },
    #[error("vendor response is missing field '{field}'")]
    Schema { field: String },
    #[error("unknown device '{0}'")]
    UnknownDevice(String),
    #[error(transparent)]
    MockHub(#[from] MockHubError),
    #[error(transparent)]
    Ble(#[from] BleError),
    #[error("unable to serialize resource: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TranslatorError {
    pub fn schema(field: impl Into<String>) -> Self {
        TranslatorError::Schema { field: field.into() }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            TranslatorError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" with status {}", s)).unwrap_or_default()
}

impl From<reqwest::Error> for TranslatorError {
    fn from(error: reqwest::Error) -> Self {
        TranslatorError::Transport {
            status: error.status().map(|s| s.as_u16()),
            message: error.to_string(),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ArgumentError {
    #[error("missing required property '{0}'")]
    MissingField(String),
    #[error("property '{field}' must be a {expected}")]
    InvalidType { field: String, expected: &'static str },
    #[error("device props are not a JSON object: {0}")]
    InvalidProps(String),
    #[error("device is bound to translator '{actual}', expected '{expected}'")]
    TranslatorMismatch { expected: &'static str, actual: String },
    #[error("property '{0}' is not supported by this device")]
    UnsupportedProperty(&'static str),
    #[error("invalid header value for property '{0}'")]
    InvalidHeaderValue(String),
}

impl ArgumentError {
    pub fn field(&self) -> Option<&str> {
        match self {
            ArgumentError::MissingField(field) => Some(field),
            ArgumentError::InvalidType { field, .. } => Some(field),
            ArgumentError::InvalidHeaderValue(field) => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn transport_error_message_includes_the_status_code() {
        let error = TranslatorError::Transport {
            status: Some(404),
            message: "Not Found".to_string(),
        };

        assert_eq!(error.to_string(), "vendor request failed with status 404: Not Found");
        assert_eq!(error.status(), Some(404));
    }

    #[test]
    fn transport_error_without_status_omits_it() {
        let error = TranslatorError::Transport {
            status: None,
            message: "connection refused".to_string(),
        };

        assert_eq!(error.to_string(), "vendor request failed: connection refused");
    }

    #[test]
    fn argument_error_names_the_field() {
        let error = ArgumentError::InvalidType {
            field: "id".to_string(),
            expected: "string",
        };

        assert_eq!(error.field(), Some("id"));
        assert_eq!(error.to_string(), "property 'id' must be a string");
    }
}
