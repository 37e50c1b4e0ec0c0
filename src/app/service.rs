//! Application service — the hexagonal core.
//!
//! [`HygrometerService`] owns the running configuration and the row layout
//! derived from it. It exposes a hardware-agnostic API: readings go in,
//! LCD frames come out, and configuration commands are validated before
//! they replace anything. All I/O flows through port traits injected at
//! call sites.
//!
//! ```text
//!  ConfigPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                 │    HygrometerService     │
//!    Reading  ──▶ │  Config · Layout · Frame │ ──▶ Frame
//!                 └──────────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::config::HygrometerConfig;
use crate::error::{Error, Result};
use crate::frame::{self, Frame};
use crate::humidity::Reading;
use crate::layout::RowLayout;

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{ConfigPort, EventSink, StoreError};

pub struct HygrometerService {
    config: HygrometerConfig,
    layout: RowLayout,
    config_dirty: bool,
    frames_composed: u64,
}

impl HygrometerService {
    /// Construct the service from an explicit configuration.
    pub fn new(config: HygrometerConfig) -> Result<Self> {
        config.validate()?;
        let layout = RowLayout::from_config(&config)?;
        Ok(Self {
            config,
            layout,
            config_dirty: false,
            frames_composed: 0,
        })
    }

    /// Service running the factory configuration.
    pub fn factory() -> Self {
        let config = HygrometerConfig::DEFAULT;
        Self {
            config,
            layout: RowLayout::resolve(&config),
            config_dirty: false,
            frames_composed: 0,
        }
    }

    /// Load the stored configuration, falling back to the factory one when
    /// nothing is stored or the stored copy is unusable.
    pub fn load(port: &impl ConfigPort, sink: &mut impl EventSink) -> Self {
        let stored = match port.load() {
            Ok(cfg) => Some(cfg),
            Err(StoreError::NotFound) => {
                info!("No stored config, using defaults");
                None
            }
            Err(e) => {
                warn!("Config load failed ({}), using defaults", e);
                None
            }
        };

        let service = match stored.map(Self::new) {
            Some(Ok(service)) => service,
            Some(Err(e)) => {
                warn!("Stored config invalid ({}), using defaults", e);
                if let Error::Config(reason) = e {
                    sink.emit(&AppEvent::ConfigRejected(reason));
                }
                Self::factory()
            }
            None => Self::factory(),
        };

        sink.emit(&AppEvent::Started {
            rows: service.layout.rows(),
            columns: service.layout.columns(),
            motion_gated: service.motion_pin().is_some(),
        });
        info!(
            "HygrometerService started: {:?}, {}x{} LCD, {} row(s) assigned",
            service.config.sensor_model,
            service.layout.columns(),
            service.layout.rows(),
            service.layout.assigned().count()
        );
        service
    }

    // ── Readings ──────────────────────────────────────────────

    /// Format a sensor reading for the LCD.
    ///
    /// Readings the configured sensor model cannot produce are reported
    /// through the sink and not displayed.
    pub fn compose(&mut self, reading: Reading, sink: &mut impl EventSink) -> Result<Frame> {
        let reading = match reading.checked(self.config.sensor_model) {
            Ok(r) => r,
            Err(e) => {
                warn!("Reading discarded ({}): {:?}", e, reading);
                sink.emit(&AppEvent::ReadingRejected(e));
                return Err(e.into());
            }
        };

        self.frames_composed += 1;
        let frame = frame::compose(&self.layout, self.config.display.temperature_unit, &reading);
        debug!(
            "Frame #{}: T={:.1}C RH={:.1}%",
            self.frames_composed, reading.temperature_c, reading.relative_humidity
        );
        Ok(frame)
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external configuration command.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        port: &impl ConfigPort,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            AppCommand::UpdateConfig(new_config) => {
                if new_config == self.config {
                    debug!("Config update identical to running config, ignored");
                    return;
                }
                match new_config.validate() {
                    Ok(()) => {
                        self.install(new_config, RowLayout::resolve(&new_config));
                        sink.emit(&AppEvent::ConfigApplied);
                        info!("Configuration updated at runtime");
                    }
                    Err(e) => {
                        warn!("Config update rejected: {}", e);
                        if let Error::Config(reason) = e {
                            sink.emit(&AppEvent::ConfigRejected(reason));
                        }
                    }
                }
            }
            AppCommand::SaveConfig => {
                self.save(port, sink);
            }
            AppCommand::ResetDefaults => {
                if self.config == HygrometerConfig::DEFAULT {
                    debug!("Already running factory defaults, reset ignored");
                    return;
                }
                let config = HygrometerConfig::DEFAULT;
                self.install(config, RowLayout::resolve(&config));
                sink.emit(&AppEvent::ConfigApplied);
                info!("Configuration reset to factory defaults");
            }
        }
    }

    /// Persist the running config if it has unsaved changes.
    /// Returns `true` if a save happened.
    pub fn save_if_dirty(&mut self, port: &impl ConfigPort, sink: &mut impl EventSink) -> bool {
        if !self.config_dirty {
            return false;
        }
        self.save(port, sink)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn config(&self) -> &HygrometerConfig {
        &self.config
    }

    pub fn layout(&self) -> &RowLayout {
        &self.layout
    }

    /// PIR input pin when the display is motion-gated.
    pub fn motion_pin(&self) -> Option<u8> {
        self.config.motion.pin()
    }

    pub fn reading_interval_ms(&self) -> u32 {
        self.config.reading_interval_ms
    }

    /// Frames produced since startup.
    pub fn frames_composed(&self) -> u64 {
        self.frames_composed
    }

    /// Whether the config has unsaved changes.
    pub fn is_config_dirty(&self) -> bool {
        self.config_dirty
    }

    // ── Internal ──────────────────────────────────────────────

    fn install(&mut self, config: HygrometerConfig, layout: RowLayout) {
        if config != self.config {
            self.config_dirty = true;
        }
        self.config = config;
        self.layout = layout;
    }

    fn save(&mut self, port: &impl ConfigPort, sink: &mut impl EventSink) -> bool {
        match port.save(&self.config) {
            Ok(()) => {
                self.config_dirty = false;
                sink.emit(&AppEvent::ConfigSaved);
                info!("Config saved");
                true
            }
            Err(e) => {
                warn!("Config save failed: {}", e);
                false
            }
        }
    }
}
