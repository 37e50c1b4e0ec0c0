//! Board-level pin and bus assignments for the hygrometer.
//!
//! Single source of truth for the factory defaults in
//! [`HygrometerConfig::DEFAULT`](crate::config::HygrometerConfig::DEFAULT).
//! A stored configuration may override any of these at runtime.

// ---------------------------------------------------------------------------
// DHT temperature / humidity sensor (single-wire)
// ---------------------------------------------------------------------------

/// Digital pin wired to the DHT data line.
pub const DHT_DATA_GPIO: u8 = 2;

// ---------------------------------------------------------------------------
// PIR motion sensor
// ---------------------------------------------------------------------------

/// Digital input from the PIR module. HIGH = motion detected.
/// Only read when motion gating is enabled in the configuration.
pub const PIR_GPIO: u8 = 3;

// ---------------------------------------------------------------------------
// Character LCD (HD44780 behind a PCF8574 I²C backpack)
// ---------------------------------------------------------------------------

/// 7-bit I²C address of the PCF8574 backpack (A0–A2 pulled high).
pub const LCD_I2C_ADDRESS: u8 = 0x27;
/// Characters per line on the fitted 2004 module.
pub const LCD_COLUMNS: u8 = 20;
/// Lines on the fitted 2004 module.
pub const LCD_ROWS: u8 = 4;
