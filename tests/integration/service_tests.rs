//! Integration tests for the ConfigPort → HygrometerService → Frame pipeline.

use crate::mock_store::{MockStore, RecordingSink};

use hygrolcd::app::commands::AppCommand;
use hygrolcd::app::events::AppEvent;
use hygrolcd::app::service::HygrometerService;
use hygrolcd::config::{HygrometerConfig, Quantity, RowToggle, SensorModel};
use hygrolcd::error::{ConfigError, Error, SensorError};
use hygrolcd::humidity::Reading;

fn started_factory() -> (HygrometerService, MockStore, RecordingSink) {
    let store = MockStore::new();
    let mut sink = RecordingSink::new();
    let service = HygrometerService::load(&store, &mut sink);
    (service, store, sink)
}

fn two_line_config() -> HygrometerConfig {
    let mut c = HygrometerConfig::DEFAULT;
    c.lcd.columns = 16;
    c.lcd.rows = 2;
    c.display.absolute_humidity = RowToggle::off(0);
    c
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn empty_store_starts_with_factory_config() {
    let (service, _store, sink) = started_factory();

    assert_eq!(service.config(), &HygrometerConfig::DEFAULT);
    assert_eq!(
        sink.events,
        vec![AppEvent::Started {
            rows: 4,
            columns: 20,
            motion_gated: false,
        }]
    );
    assert_eq!(service.motion_pin(), None);
}

#[test]
fn stored_config_is_used() {
    let mut stored = two_line_config();
    stored.motion.enabled = true;
    stored.sensor_model = SensorModel::Dht22;
    let store = MockStore::holding(stored);
    let mut sink = RecordingSink::new();

    let service = HygrometerService::load(&store, &mut sink);

    assert_eq!(service.config(), &stored);
    assert_eq!(service.motion_pin(), Some(stored.motion.pir_pin));
    assert_eq!(service.layout().row_of(Quantity::AbsoluteHumidity), None);
    assert_eq!(
        sink.last(),
        Some(&AppEvent::Started {
            rows: 2,
            columns: 16,
            motion_gated: true,
        })
    );
}

#[test]
fn invalid_stored_config_falls_back_to_factory() {
    let mut stored = HygrometerConfig::DEFAULT;
    stored.display.relative_humidity.enabled = false;
    let store = MockStore::holding(stored);
    let mut sink = RecordingSink::new();

    let service = HygrometerService::load(&store, &mut sink);

    assert_eq!(service.config(), &HygrometerConfig::DEFAULT);
    assert_eq!(
        sink.events[0],
        AppEvent::ConfigRejected(ConfigError::MissingDependency {
            quantity: Quantity::AbsoluteHumidity,
            requires: Quantity::RelativeHumidity,
        })
    );
    assert!(matches!(sink.events[1], AppEvent::Started { .. }));
}

// ── Readings ──────────────────────────────────────────────────

#[test]
fn reading_becomes_frame() {
    let (mut service, _store, mut sink) = started_factory();

    let frame = service.compose(Reading::new(20.0, 50.0), &mut sink).unwrap();

    assert_eq!(frame.line(0).map(str::trim_end), Some("Temp: 20.0 C"));
    assert_eq!(frame.line(1).map(str::trim_end), Some("RH: 50.0 %"));
    assert_eq!(frame.line(2).map(str::trim_end), Some("AH: 8.64 g/m3"));
    assert_eq!(service.frames_composed(), 1);
}

#[test]
fn implausible_reading_is_rejected_and_reported() {
    let (mut service, _store, mut sink) = started_factory();

    // Below the DHT11 measuring range.
    let result = service.compose(Reading::new(-10.0, 50.0), &mut sink);

    assert_eq!(result, Err(Error::Sensor(SensorError::OutOfRange)));
    assert_eq!(
        sink.last(),
        Some(&AppEvent::ReadingRejected(SensorError::OutOfRange))
    );
    assert_eq!(service.frames_composed(), 0);
}

// ── Commands ──────────────────────────────────────────────────

#[test]
fn invalid_update_keeps_running_config() {
    let (mut service, store, mut sink) = started_factory();
    let mut bad = HygrometerConfig::DEFAULT;
    bad.display.temperature.row = 1;

    service.handle_command(AppCommand::UpdateConfig(bad), &store, &mut sink);

    assert_eq!(service.config(), &HygrometerConfig::DEFAULT);
    assert!(!service.is_config_dirty());
    assert_eq!(
        sink.last(),
        Some(&AppEvent::ConfigRejected(ConfigError::RowCollision {
            row: 1,
            first: Quantity::Temperature,
            second: Quantity::RelativeHumidity,
        }))
    );
}

#[test]
fn valid_update_relayouts_and_marks_dirty() {
    let (mut service, store, mut sink) = started_factory();

    service.handle_command(AppCommand::UpdateConfig(two_line_config()), &store, &mut sink);

    assert_eq!(sink.last(), Some(&AppEvent::ConfigApplied));
    assert!(service.is_config_dirty());
    assert_eq!(service.layout().rows(), 2);
    let frame = service.compose(Reading::new(20.0, 50.0), &mut sink).unwrap();
    assert_eq!(frame.line(2), None);
    assert!(frame.lines().all(|(_, l)| l.len() == 16));
}

#[test]
fn identical_update_is_ignored() {
    let (mut service, store, mut sink) = started_factory();
    let before = sink.events.len();

    service.handle_command(
        AppCommand::UpdateConfig(HygrometerConfig::DEFAULT),
        &store,
        &mut sink,
    );

    assert_eq!(sink.events.len(), before);
    assert!(!service.is_config_dirty());
}

#[test]
fn save_persists_and_clears_dirty() {
    let (mut service, store, mut sink) = started_factory();
    service.handle_command(AppCommand::UpdateConfig(two_line_config()), &store, &mut sink);

    service.handle_command(AppCommand::SaveConfig, &store, &mut sink);

    assert_eq!(sink.last(), Some(&AppEvent::ConfigSaved));
    assert!(!service.is_config_dirty());
    assert_eq!(store.stored(), Some(two_line_config()));
}

#[test]
fn save_if_dirty_only_writes_changes() {
    let (mut service, store, mut sink) = started_factory();
    assert!(!service.save_if_dirty(&store, &mut sink));
    assert_eq!(store.save_count(), 0);

    service.handle_command(AppCommand::UpdateConfig(two_line_config()), &store, &mut sink);
    assert!(service.save_if_dirty(&store, &mut sink));
    assert!(!service.save_if_dirty(&store, &mut sink));
    assert_eq!(store.save_count(), 1);
}

#[test]
fn failed_save_stays_dirty() {
    let mut store = MockStore::new();
    store.fail_saves = true;
    let mut sink = RecordingSink::new();
    let mut service = HygrometerService::load(&store, &mut sink);
    service.handle_command(AppCommand::UpdateConfig(two_line_config()), &store, &mut sink);

    assert!(!service.save_if_dirty(&store, &mut sink));
    assert!(service.is_config_dirty());
    assert_ne!(sink.last(), Some(&AppEvent::ConfigSaved));
}

#[test]
fn reset_restores_factory_layout() {
    let (mut service, store, mut sink) = started_factory();
    service.handle_command(AppCommand::UpdateConfig(two_line_config()), &store, &mut sink);
    service.handle_command(AppCommand::SaveConfig, &store, &mut sink);

    service.handle_command(AppCommand::ResetDefaults, &store, &mut sink);

    assert_eq!(service.config(), &HygrometerConfig::DEFAULT);
    assert_eq!(service.layout().rows(), 4);
    assert!(service.is_config_dirty());
    assert_eq!(sink.last(), Some(&AppEvent::ConfigApplied));
}

#[test]
fn short_interval_update_is_applied() {
    let (mut service, store, mut sink) = started_factory();
    let mut fast = HygrometerConfig::DEFAULT;
    fast.sensor_model = SensorModel::Dht22;
    fast.reading_interval_ms = 500;

    service.handle_command(AppCommand::UpdateConfig(fast), &store, &mut sink);

    assert_eq!(sink.last(), Some(&AppEvent::ConfigApplied));
    assert_eq!(service.reading_interval_ms(), 500);
}

#[test]
fn zero_interval_update_is_rejected() {
    let (mut service, store, mut sink) = started_factory();
    let mut bad = HygrometerConfig::DEFAULT;
    bad.reading_interval_ms = 0;

    service.handle_command(AppCommand::UpdateConfig(bad), &store, &mut sink);

    assert_eq!(
        sink.last(),
        Some(&AppEvent::ConfigRejected(ConfigError::ZeroReadingInterval))
    );
    assert_eq!(
        service.reading_interval_ms(),
        HygrometerConfig::DEFAULT.reading_interval_ms
    );
}

#[test]
fn reset_while_on_defaults_is_ignored() {
    let (mut service, store, mut sink) = started_factory();
    let before = sink.events.len();

    service.handle_command(AppCommand::ResetDefaults, &store, &mut sink);

    assert_eq!(sink.events.len(), before);
    assert!(!service.is_config_dirty());
}
