//! HygroLCD firmware — startup entry point.
//!
//! Brings up logging and NVS, loads and validates the stored
//! configuration (falling back to the factory one), and reports the
//! resolved LCD layout on the console.
//!
//! ```text
//! ┌────────────────────────────────────────────────────┐
//! │  NvsAdapter (ConfigPort)     LogEventSink (Sink)   │
//! │  ────────────── Port Trait Boundary ────────────   │
//! │        HygrometerService (config · layout)         │
//! └────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{info, warn};

use hygrolcd::adapters::log_sink::LogEventSink;
use hygrolcd::adapters::nvs::NvsAdapter;
use hygrolcd::app::ports::ConfigPort;
use hygrolcd::app::service::HygrometerService;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("HygroLCD v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Load config from NVS (or defaults) ─────────────────
    let mut sink = LogEventSink::new();
    let service = match NvsAdapter::new() {
        Ok(nvs) => {
            let service = HygrometerService::load(&nvs, &mut sink);
            // Replace a missing, corrupted or invalid blob with what is running.
            if nvs.load().ok().as_ref() != Some(service.config()) {
                info!("Writing running config back to NVS");
                if let Err(e) = nvs.save(service.config()) {
                    warn!("NVS seed failed: {}", e);
                }
            }
            service
        }
        Err(e) => {
            warn!("NVS init failed ({}), running with defaults and no persistence", e);
            HygrometerService::factory()
        }
    };

    // ── 3. Report the resolved layout ─────────────────────────
    let config = service.config();
    info!(
        "DHT {:?} on GPIO{}, polled every {} ms",
        config.sensor_model,
        config.dht_pin,
        service.reading_interval_ms()
    );
    info!(
        "LCD {}x{} at I2C 0x{:02x}",
        config.lcd.columns, config.lcd.rows, config.lcd.i2c_address
    );
    for (row, quantity) in service.layout().assigned() {
        info!("LCD row {}: {}", row, quantity);
    }
    match service.motion_pin() {
        Some(pin) => info!("Display gated by PIR on GPIO{}", pin),
        None => info!("Motion gating disabled"),
    }

    Ok(())
}
