use crate::error::TranslatorError;
use serde_json::Value;

const DESIRED_STATE: &str = "desired_state";
const LAST_READING: &str = "last_reading";

/// Looks a field up in `desired_state` first and falls back to `last_reading`. A value the client
/// just wrote lands in the desired state before the device reports it back, so it takes precedence.
pub fn state_value<'a>(data: &'a Value, field: &str) -> Option<&'a Value> {
    [DESIRED_STATE, LAST_READING]
        .iter()
        .find_map(|section| data.get(section).and_then(|state| state.get(field)).filter(|value| !value.is_null()))
}

pub fn reading_value<'a>(data: &'a Value, field: &str) -> Option<&'a Value> {
    data.get(LAST_READING).and_then(|reading| reading.get(field)).filter(|value| !value.is_null())
}

pub fn required_bool(data: &Value, field: &str) -> Result<bool, TranslatorError> {
    state_value(data, field).and_then(Value::as_bool).ok_or_else(|| TranslatorError::schema(field))
}

pub fn required_f64(data: &Value, field: &str) -> Result<f64, TranslatorError> {
    state_value(data, field).and_then(Value::as_f64).ok_or_else(|| TranslatorError::schema(field))
}

pub fn optional_f64(data: &Value, field: &str) -> Result<Option<f64>, TranslatorError> {
    state_value(data, field)
        .map(|value| value.as_f64().ok_or_else(|| TranslatorError::schema(field)))
        .transpose()
}

pub fn optional_bool(data: &Value, field: &str) -> Result<Option<bool>, TranslatorError> {
    state_value(data, field)
        .map(|value| value.as_bool().ok_or_else(|| TranslatorError::schema(field)))
        .transpose()
}

pub fn optional_str<'a>(data: &'a Value, field: &str) -> Result<Option<&'a str>, TranslatorError> {
    state_value(data, field)
        .map(|value| value.as_str().ok_or_else(|| TranslatorError::schema(field)))
        .transpose()
}
