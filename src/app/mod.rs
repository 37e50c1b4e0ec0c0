//! Application core — pure domain logic, zero I/O.
//!
//! Owns the running configuration and its row layout, turns readings into
//! LCD frames, and applies configuration commands. All interaction with
//! storage and logging happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
