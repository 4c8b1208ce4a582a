//! Shared checks every translator of a category must pass, run against a mock hub that expects
//! the mutations listed under the matching test case of its fixture.

use crate::error::TranslatorError;
use crate::schema::{BinarySwitch, BinarySwitchResource, DimmingResource, HvacMode, Lamp, Temperature, Thermostat, ThermostatPatch};
use pretty_assertions::assert_eq;

/// Test case `postDevicesPower`: two mutations, on then off.
pub async fn binary_switch_round_trip<T: BinarySwitch>(translator: &T) -> Result<(), TranslatorError> {
    let device_id = translator.device_id().to_string();

    let on = translator.post_devices_power(&device_id, BinarySwitchResource::new(true)).await?;
    assert_eq!(on, BinarySwitchResource::new(true));
    assert_eq!(translator.get_devices_power(&device_id).await?, BinarySwitchResource::new(true));

    let off = translator.post_devices_power(&device_id, BinarySwitchResource::new(false)).await?;
    assert_eq!(off, BinarySwitchResource::new(false));
    assert_eq!(translator.get_value().await?, false);

    let unknown = translator.get_devices_power("unknown-device").await;
    assert!(matches!(unknown, Err(TranslatorError::UnknownDevice(id)) if id == "unknown-device"));

    Ok(())
}

/// Test case `setValue`: a single mutation turning the switch on.
pub async fn binary_switch_set_value<T: BinarySwitch>(translator: &T) -> Result<(), TranslatorError> {
    assert_eq!(translator.set_value(true).await?, true);
    assert_eq!(translator.get_value().await?, true);
    Ok(())
}

/// Test case `postDevicesDim`: a single mutation to `dimming_setting`.
pub async fn lamp_dim_round_trip<T: Lamp>(translator: &T, dimming_setting: u8) -> Result<(), TranslatorError> {
    let device_id = translator.device_id().to_string();

    let dim = translator.post_devices_dim(&device_id, DimmingResource::new(dimming_setting)).await?;
    assert_eq!(dim, DimmingResource::new(dimming_setting));
    assert_eq!(translator.get_dimming().await?, dimming_setting);

    let unknown = translator.post_devices_dim("unknown-device", DimmingResource::new(dimming_setting)).await;
    assert!(matches!(unknown, Err(TranslatorError::UnknownDevice(_))));

    Ok(())
}

/// Test case `postThermostatResURI`: one mutation switching to heat with `target` (Celsius).
pub async fn thermostat_round_trip<T: Thermostat>(translator: &T, target: f64) -> Result<(), TranslatorError> {
    let patch = ThermostatPatch {
        target_temperature: Some(Temperature::celsius(target)),
        hvac_mode: Some(HvacMode::Heat),
        ..ThermostatPatch::default()
    };

    let written = translator.post_thermostat_res_uri(patch).await?;
    assert_eq!(written.hvac_mode, Some(HvacMode::Heat));
    assert_eq!(written.target_temperature.map(|t| t.to_celsius()), Some(target));

    let read = translator.get_thermostat_res_uri().await?;
    assert_eq!(read, written);

    Ok(())
}

/// Test case `setAwayMode`: a single mutation setting away mode.
pub async fn thermostat_away_mode<T: Thermostat>(translator: &T) -> Result<(), TranslatorError> {
    assert_eq!(translator.set_away_mode(true).await?, Some(true));
    assert_eq!(translator.get_away_mode().await?, Some(true));

    Ok(())
}
