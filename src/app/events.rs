//! Outbound application events.
//!
//! The [`HygrometerService`](super::service::HygrometerService) emits these
//! through the [`EventSink`](super::ports::EventSink) port. Adapters on the
//! other side decide what to do with them.

use crate::error::{ConfigError, SensorError};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service is running with a validated configuration.
    Started {
        rows: u8,
        columns: u8,
        motion_gated: bool,
    },

    /// A new configuration replaced the running one.
    ConfigApplied,

    /// A configuration was refused; the running one is unchanged.
    ConfigRejected(ConfigError),

    /// The running configuration was written to storage.
    ConfigSaved,

    /// A sensor reading was discarded instead of being displayed.
    ReadingRejected(SensorError),
}
