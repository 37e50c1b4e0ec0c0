//! HygroLCD — configuration and display layout for a DHT hygrometer.
//!
//! The device reads a DHT11/DHT22 temperature and humidity sensor and shows
//! the readings on an HD44780 character LCD behind an I²C backpack,
//! optionally gated by a PIR motion sensor. This library holds the pure
//! logic: the typed configuration and its validation, LCD row assignment,
//! derived quantities and line formatting, plus the storage and logging
//! adapters. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod frame;
pub mod humidity;
pub mod layout;
pub mod pins;
