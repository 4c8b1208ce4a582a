use crate::error::TranslatorError;
use crate::schema::{BinarySwitchResource, DimmingResource};
use serde_json::Value;

fn attribute<'a>(data: &'a Value, name: &str) -> Option<&'a Value> {
    data.get("attributes").and_then(|attributes| attributes.get(name)).filter(|value| !value.is_null())
}

pub fn power(data: &Value) -> Result<BinarySwitchResource, TranslatorError> {
    match attribute(data, "switch").and_then(Value::as_str) {
        Some("on") => Ok(BinarySwitchResource::new(true)),
        Some("off") => Ok(BinarySwitchResource::new(false)),
        _ => Err(TranslatorError::schema("attributes.switch")),
    }
}

pub fn switch_value(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

pub fn level(data: &Value) -> Result<DimmingResource, TranslatorError> {
    attribute(data, "level")
        .and_then(Value::as_f64)
        .map(|level| DimmingResource::new(level.clamp(0.0, 100.0).round() as u8))
        .ok_or_else(|| TranslatorError::schema("attributes.level"))
}
