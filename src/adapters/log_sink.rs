//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC on the device, `env_logger`-style capture
//! on the host).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started {
                rows,
                columns,
                motion_gated,
            } => {
                info!(
                    "START | lcd={}x{} | motion_gated={}",
                    columns, rows, motion_gated
                );
            }
            AppEvent::ConfigApplied => {
                info!("CONFIG | applied");
            }
            AppEvent::ConfigRejected(reason) => {
                warn!("CONFIG | rejected: {}", reason);
            }
            AppEvent::ConfigSaved => {
                info!("CONFIG | saved");
            }
            AppEvent::ReadingRejected(reason) => {
                warn!("READING | rejected: {}", reason);
            }
        }
    }
}
