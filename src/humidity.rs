//! Sensor readings and the quantities derived from them.
//!
//! Absolute humidity uses the Magnus approximation of saturation vapour
//! pressure over water, which stays within 0.1 % of the reference tables
//! between −40 °C and 50 °C:
//!
//! ```text
//! Es(T) = 6.112 · exp(17.67·T / (T + 243.5))        [hPa]
//! AH    = Es(T) · RH · 2.1674 / (273.15 + T)         [g/m³]
//! ```

use crate::config::SensorModel;
use crate::error::SensorError;

const MAGNUS_E0_HPA: f32 = 6.112;
const MAGNUS_B: f32 = 17.67;
const MAGNUS_C_C: f32 = 243.5;
/// Molar mass of water over the gas constant, scaled for hPa and %RH.
const VAPOUR_DENSITY_FACTOR: f32 = 2.1674;
const ZERO_C_IN_K: f32 = 273.15;

/// One temperature / humidity sample from the DHT sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub temperature_c: f32,
    /// Relative humidity, 0–100 %.
    pub relative_humidity: f32,
}

impl Reading {
    pub fn new(temperature_c: f32, relative_humidity: f32) -> Self {
        Self {
            temperature_c,
            relative_humidity,
        }
    }

    /// Reject readings the fitted sensor model cannot produce.
    pub fn checked(self, model: SensorModel) -> Result<Self, SensorError> {
        if !self.temperature_c.is_finite() || !self.relative_humidity.is_finite() {
            return Err(SensorError::NonFinite);
        }
        let (t_min, t_max) = model.temperature_range_c();
        let (rh_min, rh_max) = model.humidity_range_percent();
        if !(t_min..=t_max).contains(&self.temperature_c)
            || !(rh_min..=rh_max).contains(&self.relative_humidity)
        {
            return Err(SensorError::OutOfRange);
        }
        Ok(self)
    }

    /// Absolute humidity of this sample in g/m³.
    pub fn absolute_humidity(&self) -> f32 {
        absolute_humidity(self.temperature_c, self.relative_humidity)
    }
}

/// Saturation vapour pressure over water in hPa.
pub fn saturation_vapour_pressure(temperature_c: f32) -> f32 {
    MAGNUS_E0_HPA * ((MAGNUS_B * temperature_c) / (temperature_c + MAGNUS_C_C)).exp()
}

/// Water vapour density in g/m³ for the given air temperature and %RH.
pub fn absolute_humidity(temperature_c: f32, relative_humidity: f32) -> f32 {
    saturation_vapour_pressure(temperature_c) * relative_humidity * VAPOUR_DENSITY_FACTOR
        / (ZERO_C_IN_K + temperature_c)
}

pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 9.0 / 5.0 + 32.0
}
