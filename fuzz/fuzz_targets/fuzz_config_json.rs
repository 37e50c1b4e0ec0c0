//! Fuzz target: `HygrometerConfig::from_json`
//!
//! Feeds arbitrary UTF-8 to the JSON config parser.
//!
//! Invariants checked:
//! - No panics under any input
//! - Every accepted config passes `check` and survives an NVS round trip
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use hygrolcd::adapters::nvs::NvsAdapter;
use hygrolcd::app::ports::ConfigPort;
use hygrolcd::config::HygrometerConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    let Ok(config) = HygrometerConfig::from_json(text) else {
        return;
    };

    assert!(config.check().is_ok());

    let Ok(nvs) = NvsAdapter::new() else {
        return;
    };
    nvs.save(&config).unwrap();
    assert_eq!(nvs.load(), Ok(config));
});
