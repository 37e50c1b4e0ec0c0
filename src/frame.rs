//! Value formatting for the character LCD.
//!
//! [`compose`] turns one [`Reading`] into the text of every assigned row.
//! Each line is exactly as wide as the display, space-padded or truncated,
//! so writing it over the previous frame leaves no stale characters.

use core::fmt::Write;

use crate::config::{MAX_LCD_COLUMNS, MAX_LCD_ROWS, Quantity, TemperatureUnit};
use crate::humidity::{Reading, celsius_to_fahrenheit};
use crate::layout::RowLayout;

/// Longest line any supported display can show.
pub const MAX_LINE_CHARS: usize = MAX_LCD_COLUMNS as usize;

/// One LCD line of text.
pub type Line = heapless::String<MAX_LINE_CHARS>;

/// Scratch space for a formatted value before it is fitted to the display.
type Scratch = heapless::String<64>;

/// Text for every assigned row of one refresh.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    lines: heapless::Vec<(u8, Line), { MAX_LCD_ROWS as usize }>,
}

impl Frame {
    /// Text for `row`, or `None` if the row has no quantity.
    pub fn line(&self, row: u8) -> Option<&str> {
        self.lines
            .iter()
            .find(|(r, _)| *r == row)
            .map(|(_, line)| line.as_str())
    }

    /// `(row, text)` pairs in row order.
    pub fn lines(&self) -> impl Iterator<Item = (u8, &str)> + '_ {
        self.lines.iter().map(|(row, line)| (*row, line.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Format `reading` for every row in `layout`.
pub fn compose(layout: &RowLayout, unit: TemperatureUnit, reading: &Reading) -> Frame {
    let mut frame = Frame::default();
    for (row, quantity) in layout.assigned() {
        let line = fit(&format_value(quantity, unit, reading), layout.columns());
        // A layout never has more than MAX_LCD_ROWS rows.
        let _ = frame.lines.push((row, line));
    }
    frame
}

fn format_value(quantity: Quantity, unit: TemperatureUnit, reading: &Reading) -> Scratch {
    let mut text = Scratch::new();
    // Overflow only truncates, which `fit` would do anyway.
    let _ = match quantity {
        Quantity::Temperature => match unit {
            TemperatureUnit::Celsius => write!(text, "Temp: {:.1} C", reading.temperature_c),
            TemperatureUnit::Fahrenheit => write!(
                text,
                "Temp: {:.1} F",
                celsius_to_fahrenheit(reading.temperature_c)
            ),
        },
        Quantity::RelativeHumidity => write!(text, "RH: {:.1} %", reading.relative_humidity),
        Quantity::AbsoluteHumidity => {
            write!(text, "AH: {:.2} g/m3", reading.absolute_humidity())
        }
    };
    text
}

/// Pad with spaces or truncate to exactly `columns` characters.
fn fit(text: &str, columns: u8) -> Line {
    let mut line = Line::new();
    for c in text
        .chars()
        .chain(core::iter::repeat(' '))
        .take(usize::from(columns).min(MAX_LINE_CHARS))
    {
        let _ = line.push(c);
    }
    line
}
