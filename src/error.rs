//! Unified error types for the hygrometer crate.
//!
//! `Error` covers configuration and sensor failures; storage failures stay
//! in [`StoreError`](crate::app::ports::StoreError). All variants
//! are `Copy` so they can be carried in events and returned from `const`
//! validation without allocation.

use core::fmt;

use crate::config::Quantity;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Failure of a configuration or reading operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration failed validation.
    Config(ConfigError),
    /// A sensor reading was unusable.
    Sensor(SensorError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Sensor(e) => write!(f, "sensor: {e}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Reasons a [`HygrometerConfig`](crate::config::HygrometerConfig) is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The document could not be decoded.
    Malformed,
    /// The sensor polling interval is zero.
    ZeroReadingInterval,
    /// LCD geometry is empty or beyond what an HD44780 can address.
    LcdGeometry { columns: u8, rows: u8 },
    /// LCD I²C address is outside the non-reserved 7-bit range.
    I2cAddress(u8),
    /// `quantity` is displayed but `requires` is not.
    MissingDependency { quantity: Quantity, requires: Quantity },
    /// An enabled row does not exist on the display.
    RowOutOfRange { quantity: Quantity, row: u8, rows: u8 },
    /// Two enabled quantities share a row.
    RowCollision { row: u8, first: Quantity, second: Quantity },
    /// The PIR and DHT sensors are assigned the same pin.
    PinConflict(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed document"),
            Self::ZeroReadingInterval => write!(f, "reading interval must be positive"),
            Self::LcdGeometry { columns, rows } => {
                write!(f, "unsupported LCD geometry {columns}x{rows}")
            }
            Self::I2cAddress(addr) => write!(f, "I2C address 0x{addr:02x} is reserved"),
            Self::MissingDependency { quantity, requires } => {
                write!(f, "{quantity} display requires {requires} display")
            }
            Self::RowOutOfRange {
                quantity,
                row,
                rows,
            } => write!(f, "{quantity} row {row} outside 0..{rows}"),
            Self::RowCollision { row, first, second } => {
                write!(f, "{first} and {second} both use row {row}")
            }
            Self::PinConflict(pin) => write!(f, "PIR and DHT share pin {pin}"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The reading contained NaN or infinity.
    NonFinite,
    /// Reading is outside the sensor model's measuring range.
    OutOfRange,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite => write!(f, "reading not finite"),
            Self::OutOfRange => write!(f, "reading out of range"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
