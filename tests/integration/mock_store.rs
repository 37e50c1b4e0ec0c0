//! Mock adapters for integration tests.
//!
//! Records every emitted event and every save so tests can assert on the
//! full history without touching NVS or the logger.

use hygrolcd::app::events::AppEvent;
use hygrolcd::app::ports::{ConfigPort, EventSink, StoreError};
use hygrolcd::config::HygrometerConfig;
use std::cell::{Cell, RefCell};

// ── MockStore ─────────────────────────────────────────────────

pub struct MockStore {
    stored: RefCell<Option<HygrometerConfig>>,
    saves: Cell<usize>,
    pub fail_saves: bool,
}

#[allow(dead_code)]
impl MockStore {
    pub fn new() -> Self {
        Self {
            stored: RefCell::new(None),
            saves: Cell::new(0),
            fail_saves: false,
        }
    }

    /// A store that already holds `config`, valid or not.
    pub fn holding(config: HygrometerConfig) -> Self {
        let store = Self::new();
        *store.stored.borrow_mut() = Some(config);
        store
    }

    pub fn stored(&self) -> Option<HygrometerConfig> {
        *self.stored.borrow()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigPort for MockStore {
    fn load(&self) -> Result<HygrometerConfig, StoreError> {
        self.stored.borrow().ok_or(StoreError::NotFound)
    }

    fn save(&self, config: &HygrometerConfig) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(StoreError::IoError);
        }
        config.check().map_err(StoreError::Rejected)?;
        *self.stored.borrow_mut() = Some(*config);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn last(&self) -> Option<&AppEvent> {
        self.events.last()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
