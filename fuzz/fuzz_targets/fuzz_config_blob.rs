//! Fuzz target: stored configuration blob
//!
//! Writes arbitrary bytes into the simulated NVS slot and loads them back
//! through `NvsAdapter`, the same path the device takes at boot.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - A decoded config either fails `check` or yields a layout whose rows
//!   all fit the configured display
//! - Composing a frame from a decoded config never exceeds the line width
//!
//! cargo fuzz run fuzz_config_blob

#![no_main]

use hygrolcd::adapters::nvs::NvsAdapter;
use hygrolcd::app::ports::ConfigPort;
use hygrolcd::frame::compose;
use hygrolcd::humidity::Reading;
use hygrolcd::layout::RowLayout;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(nvs) = NvsAdapter::new() else {
        return;
    };
    nvs.sim_write_blob(data);

    let Ok(config) = nvs.load() else {
        return;
    };

    let Ok(layout) = RowLayout::from_config(&config) else {
        assert!(config.check().is_err());
        return;
    };

    for (row, _) in layout.assigned() {
        assert!(row < config.lcd.rows, "row {row} outside {} rows", config.lcd.rows);
    }

    let frame = compose(
        &layout,
        config.display.temperature_unit,
        &Reading::new(21.5, 48.0),
    );
    for (_, line) in frame.lines() {
        assert_eq!(line.chars().count(), usize::from(config.lcd.columns));
    }
});
