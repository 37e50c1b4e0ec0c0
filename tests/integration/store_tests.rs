//! Integration tests: HygrometerService against the simulated NVS backend.

use crate::mock_store::RecordingSink;

use hygrolcd::adapters::nvs::NvsAdapter;
use hygrolcd::app::commands::AppCommand;
use hygrolcd::app::events::AppEvent;
use hygrolcd::app::ports::{ConfigPort, StoreError};
use hygrolcd::app::service::HygrometerService;
use hygrolcd::config::{HygrometerConfig, TemperatureUnit};
use hygrolcd::error::ConfigError;
use hygrolcd::humidity::Reading;

#[test]
fn config_survives_a_restart() {
    let nvs = NvsAdapter::new().unwrap();
    let mut sink = RecordingSink::new();

    let mut service = HygrometerService::load(&nvs, &mut sink);
    let mut updated = HygrometerConfig::DEFAULT;
    updated.display.temperature_unit = TemperatureUnit::Fahrenheit;
    updated.reading_interval_ms = 10_000;
    service.handle_command(AppCommand::UpdateConfig(updated), &nvs, &mut sink);
    service.handle_command(AppCommand::SaveConfig, &nvs, &mut sink);

    // Same backing store, fresh service.
    let mut restarted = HygrometerService::load(&nvs, &mut sink);
    assert_eq!(restarted.config(), &updated);
    assert_eq!(restarted.reading_interval_ms(), 10_000);

    let frame = restarted.compose(Reading::new(25.0, 40.0), &mut sink).unwrap();
    assert_eq!(frame.line(0).map(str::trim_end), Some("Temp: 77.0 F"));
}

#[test]
fn corrupted_blob_falls_back_without_rejection_event() {
    let nvs = NvsAdapter::new().unwrap();
    nvs.sim_write_blob(&[0xff, 0xff, 0xff]);
    assert_eq!(nvs.load(), Err(StoreError::Corrupted));

    let mut sink = RecordingSink::new();
    let service = HygrometerService::load(&nvs, &mut sink);

    assert_eq!(service.config(), &HygrometerConfig::DEFAULT);
    assert_eq!(sink.events.len(), 1);
    assert!(matches!(sink.events[0], AppEvent::Started { .. }));
}

#[test]
fn nvs_refuses_invalid_config() {
    let nvs = NvsAdapter::new().unwrap();
    let mut bad = HygrometerConfig::DEFAULT;
    bad.motion.enabled = true;
    bad.motion.pir_pin = bad.dht_pin;

    assert_eq!(
        nvs.save(&bad),
        Err(StoreError::Rejected(ConfigError::PinConflict(bad.dht_pin)))
    );
    assert_eq!(nvs.load(), Err(StoreError::NotFound));
}
