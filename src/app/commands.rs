//! Inbound commands to the application service.
//!
//! These represent configuration changes requested by the outside world
//! (serial console, provisioning) that the
//! [`HygrometerService`](super::service::HygrometerService) validates and
//! applies.

use crate::config::HygrometerConfig;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Replace the running configuration. Rejected if it fails validation.
    UpdateConfig(HygrometerConfig),

    /// Persist the running configuration immediately.
    SaveConfig,

    /// Return to the factory configuration (not persisted until saved).
    ResetDefaults,
}
