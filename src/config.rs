//! Hygrometer configuration.
//!
//! Every tunable of the device lives in [`HygrometerConfig`]: sensor wiring,
//! LCD geometry, polling interval, which quantity goes on which LCD row, and
//! whether the PIR motion sensor gates the display. Values can be overridden
//! from NVS (see [`NvsAdapter`](crate::adapters::nvs::NvsAdapter)) or from a
//! JSON document.
//!
//! Validation is a `const fn`, so the factory default is checked at compile
//! time and a stored or provisioned config is checked again at startup.

use core::fmt;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::pins;

/// Most lines an HD44780 controller can address.
pub const MAX_LCD_ROWS: u8 = 4;
/// Widest line an HD44780 controller can address.
pub const MAX_LCD_COLUMNS: u8 = 40;
/// Display data RAM cells available across all lines.
const LCD_DDRAM_CELLS: u16 = 80;

/// Lowest and highest non-reserved 7-bit I²C addresses.
const I2C_ADDRESS_MIN: u8 = 0x08;
const I2C_ADDRESS_MAX: u8 = 0x77;

// ---------------------------------------------------------------------------
// Enumerated options
// ---------------------------------------------------------------------------

/// DHT sensor variant fitted to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorModel {
    Dht11,
    Dht22,
}

impl SensorModel {
    /// Shortest interval between conversions the sensor supports.
    pub const fn min_sample_period_ms(self) -> u32 {
        match self {
            Self::Dht11 => 1000,
            Self::Dht22 => 2000,
        }
    }

    /// Measuring range in °C, inclusive.
    pub const fn temperature_range_c(self) -> (f32, f32) {
        match self {
            Self::Dht11 => (0.0, 50.0),
            Self::Dht22 => (-40.0, 80.0),
        }
    }

    /// Measuring range in %RH, inclusive.
    pub const fn humidity_range_percent(self) -> (f32, f32) {
        match self {
            Self::Dht11 => (5.0, 95.0),
            Self::Dht22 => (0.0, 100.0),
        }
    }
}

/// Unit used when the temperature row is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

/// A quantity that can be given an LCD row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    Temperature,
    RelativeHumidity,
    /// Derived from temperature and relative humidity.
    AbsoluteHumidity,
}

impl Quantity {
    /// Every quantity, in validation order.
    pub const ALL: [Quantity; 3] = [
        Quantity::Temperature,
        Quantity::RelativeHumidity,
        Quantity::AbsoluteHumidity,
    ];
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => write!(f, "temperature"),
            Self::RelativeHumidity => write!(f, "relative humidity"),
            Self::AbsoluteHumidity => write!(f, "absolute humidity"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sub-configurations
// ---------------------------------------------------------------------------

/// Whether a quantity is shown and on which LCD row.
///
/// `row` is ignored while `enabled` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowToggle {
    pub enabled: bool,
    pub row: u8,
}

impl RowToggle {
    pub const fn on(row: u8) -> Self {
        Self { enabled: true, row }
    }

    pub const fn off(row: u8) -> Self {
        Self {
            enabled: false,
            row,
        }
    }
}

/// Character LCD wiring and geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LcdConfig {
    /// 7-bit I²C address of the backpack.
    pub i2c_address: u8,
    pub columns: u8,
    pub rows: u8,
}

impl LcdConfig {
    pub const DEFAULT: Self = Self {
        i2c_address: pins::LCD_I2C_ADDRESS,
        columns: pins::LCD_COLUMNS,
        rows: pins::LCD_ROWS,
    };
}

impl Default for LcdConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Which quantities are displayed, and where.
///
/// Serialized through [`DisplayRepr`], so a document may set a single field
/// of a toggle and the other keeps its per-quantity default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DisplayRepr", into = "DisplayRepr")]
pub struct DisplayConfig {
    pub temperature: RowToggle,
    pub relative_humidity: RowToggle,
    /// Needs `temperature` and `relative_humidity` enabled as well.
    pub absolute_humidity: RowToggle,
    pub temperature_unit: TemperatureUnit,
}

impl DisplayConfig {
    pub const DEFAULT: Self = Self {
        temperature: RowToggle::on(0),
        relative_humidity: RowToggle::on(1),
        absolute_humidity: RowToggle::on(2),
        temperature_unit: TemperatureUnit::Celsius,
    };

    pub const fn toggle(&self, quantity: Quantity) -> RowToggle {
        match quantity {
            Quantity::Temperature => self.temperature,
            Quantity::RelativeHumidity => self.relative_humidity,
            Quantity::AbsoluteHumidity => self.absolute_humidity,
        }
    }

    pub const fn is_enabled(&self, quantity: Quantity) -> bool {
        self.toggle(quantity).enabled
    }

    /// Row of `quantity`, or `None` while it is disabled.
    pub const fn row_of(&self, quantity: Quantity) -> Option<u8> {
        let toggle = self.toggle(quantity);
        if toggle.enabled {
            Some(toggle.row)
        } else {
            None
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Wire form of a [`RowToggle`]. Absent fields fall back to the default
/// toggle of the quantity.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
struct ToggleRepr {
    enabled: Option<bool>,
    row: Option<u8>,
}

impl ToggleRepr {
    fn merge(self, base: RowToggle) -> RowToggle {
        RowToggle {
            enabled: self.enabled.unwrap_or(base.enabled),
            row: self.row.unwrap_or(base.row),
        }
    }
}

impl From<RowToggle> for ToggleRepr {
    fn from(t: RowToggle) -> Self {
        Self {
            enabled: Some(t.enabled),
            row: Some(t.row),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
struct DisplayRepr {
    temperature: ToggleRepr,
    relative_humidity: ToggleRepr,
    absolute_humidity: ToggleRepr,
    temperature_unit: Option<TemperatureUnit>,
}

impl From<DisplayRepr> for DisplayConfig {
    fn from(r: DisplayRepr) -> Self {
        let base = Self::DEFAULT;
        Self {
            temperature: r.temperature.merge(base.temperature),
            relative_humidity: r.relative_humidity.merge(base.relative_humidity),
            absolute_humidity: r.absolute_humidity.merge(base.absolute_humidity),
            temperature_unit: r.temperature_unit.unwrap_or(base.temperature_unit),
        }
    }
}

impl From<DisplayConfig> for DisplayRepr {
    fn from(c: DisplayConfig) -> Self {
        Self {
            temperature: c.temperature.into(),
            relative_humidity: c.relative_humidity.into(),
            absolute_humidity: c.absolute_humidity.into(),
            temperature_unit: Some(c.temperature_unit),
        }
    }
}

/// PIR motion gating of the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub enabled: bool,
    pub pir_pin: u8,
}

impl MotionConfig {
    pub const DEFAULT: Self = Self {
        enabled: false,
        pir_pin: pins::PIR_GPIO,
    };

    /// PIR input pin. `None` unless motion gating is enabled.
    pub const fn pin(&self) -> Option<u8> {
        if self.enabled {
            Some(self.pir_pin)
        } else {
            None
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ---------------------------------------------------------------------------
// HygrometerConfig
// ---------------------------------------------------------------------------

/// Complete device configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HygrometerConfig {
    /// Pin wired to the DHT data line.
    pub dht_pin: u8,
    pub sensor_model: SensorModel,
    pub lcd: LcdConfig,
    /// Minimum time between sensor polls (milliseconds).
    pub reading_interval_ms: u32,
    pub display: DisplayConfig,
    pub motion: MotionConfig,
}

impl HygrometerConfig {
    /// Factory configuration: DHT11 on pin 2, 20x4 LCD at 0x27, all three
    /// quantities on rows 0–2, motion gating off.
    pub const DEFAULT: Self = Self {
        dht_pin: pins::DHT_DATA_GPIO,
        sensor_model: SensorModel::Dht11,
        lcd: LcdConfig::DEFAULT,
        reading_interval_ms: 2000,
        display: DisplayConfig::DEFAULT,
        motion: MotionConfig::DEFAULT,
    };

    /// Check every structural invariant.
    ///
    /// Order: interval, LCD geometry, I²C address, display dependencies,
    /// row assignment, pins. The first violation is returned.
    pub const fn check(&self) -> core::result::Result<(), ConfigError> {
        if self.reading_interval_ms == 0 {
            return Err(ConfigError::ZeroReadingInterval);
        }

        let lcd = self.lcd;
        if lcd.columns == 0
            || lcd.rows == 0
            || lcd.columns > MAX_LCD_COLUMNS
            || lcd.rows > MAX_LCD_ROWS
            || (lcd.columns as u16) * (lcd.rows as u16) > LCD_DDRAM_CELLS
        {
            return Err(ConfigError::LcdGeometry {
                columns: lcd.columns,
                rows: lcd.rows,
            });
        }

        if lcd.i2c_address < I2C_ADDRESS_MIN || lcd.i2c_address > I2C_ADDRESS_MAX {
            return Err(ConfigError::I2cAddress(lcd.i2c_address));
        }

        let display = &self.display;
        if display.absolute_humidity.enabled {
            if !display.relative_humidity.enabled {
                return Err(ConfigError::MissingDependency {
                    quantity: Quantity::AbsoluteHumidity,
                    requires: Quantity::RelativeHumidity,
                });
            }
            if !display.temperature.enabled {
                return Err(ConfigError::MissingDependency {
                    quantity: Quantity::AbsoluteHumidity,
                    requires: Quantity::Temperature,
                });
            }
        }

        let mut i = 0;
        while i < Quantity::ALL.len() {
            let quantity = Quantity::ALL[i];
            let toggle = display.toggle(quantity);
            if toggle.enabled {
                if toggle.row >= lcd.rows {
                    return Err(ConfigError::RowOutOfRange {
                        quantity,
                        row: toggle.row,
                        rows: lcd.rows,
                    });
                }
                let mut j = 0;
                while j < i {
                    let earlier = Quantity::ALL[j];
                    let other = display.toggle(earlier);
                    if other.enabled && other.row == toggle.row {
                        return Err(ConfigError::RowCollision {
                            row: toggle.row,
                            first: earlier,
                            second: quantity,
                        });
                    }
                    j += 1;
                }
            }
            i += 1;
        }

        if self.motion.enabled && self.motion.pir_pin == self.dht_pin {
            return Err(ConfigError::PinConflict(self.dht_pin));
        }

        Ok(())
    }

    /// Startup validation: [`check`](Self::check) plus advisory warnings.
    pub fn validate(&self) -> Result<()> {
        if let Err(e) = self.check() {
            warn!("Config rejected: {}", e);
            return Err(e.into());
        }

        let min_period = self.sensor_model.min_sample_period_ms();
        if self.reading_interval_ms < min_period {
            warn!(
                "Reading interval {} ms is below the {:?} sample period of {} ms",
                self.reading_interval_ms, self.sensor_model, min_period
            );
        }
        if !Quantity::ALL.iter().any(|q| self.display.is_enabled(*q)) {
            warn!("No quantity enabled; the LCD will stay blank");
        }
        Ok(())
    }

    /// Parse a JSON document and validate it.
    ///
    /// Missing fields keep their factory defaults, so a document may carry
    /// only the settings it changes.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            warn!("Config JSON malformed: {}", e);
            ConfigError::Malformed
        })?;
        config.validate()?;
        info!("Config parsed from JSON");
        Ok(config)
    }
}

impl Default for HygrometerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

const _: () = assert!(
    HygrometerConfig::DEFAULT.check().is_ok(),
    "factory configuration must validate"
);
