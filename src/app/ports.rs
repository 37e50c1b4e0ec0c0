//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ HygrometerService (domain)
//! ```
//!
//! Driven adapters (config storage, event sinks) implement these traits.
//! The [`HygrometerService`](super::service::HygrometerService) consumes
//! them via generics, so the domain core never touches NVS or the logger
//! directly.

use crate::config::HygrometerConfig;
use crate::error::ConfigError;

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists the device configuration.
///
/// Implementations MUST run [`HygrometerConfig::check`] before persisting
/// and refuse with [`StoreError::Rejected`] rather than store a config the
/// next boot would have to discard.
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    /// Returns [`StoreError::NotFound`] if nothing has been stored yet.
    fn load(&self) -> Result<HygrometerConfig, StoreError>;

    /// Validate and persist configuration.
    fn save(&self, config: &HygrometerConfig) -> Result<(), StoreError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// No config found in storage (first boot).
    NotFound,
    /// Stored blob failed to deserialize.
    Corrupted,
    /// The config failed validation and was not persisted.
    Rejected(ConfigError),
    /// Underlying storage is full.
    StorageFull,
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for StoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::Rejected(e) => write!(f, "validation failed: {}", e),
            Self::StorageFull => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
