//! LCD row assignment.
//!
//! A [`RowLayout`] is the resolved form of [`DisplayConfig`]: one slot per
//! physical LCD row, holding the quantity shown there. It can only be built
//! from a configuration that passes [`HygrometerConfig::check`], so every
//! slot index is in range and no two quantities share a slot.
//!
//! [`DisplayConfig`]: crate::config::DisplayConfig

use crate::config::{HygrometerConfig, MAX_LCD_ROWS, Quantity};
use crate::error::ConfigError;

const SLOTS: usize = MAX_LCD_ROWS as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    slots: [Option<Quantity>; SLOTS],
    rows: u8,
    columns: u8,
}

impl RowLayout {
    pub fn from_config(config: &HygrometerConfig) -> Result<Self, ConfigError> {
        config.check()?;
        Ok(Self::resolve(config))
    }

    /// Build the layout of a config already known to pass `check`.
    pub(crate) fn resolve(config: &HygrometerConfig) -> Self {
        let mut slots = [None; SLOTS];
        for quantity in Quantity::ALL {
            if let Some(row) = config.display.row_of(quantity) {
                if let Some(slot) = slots.get_mut(row as usize) {
                    *slot = Some(quantity);
                }
            }
        }

        Self {
            slots,
            rows: config.lcd.rows.min(MAX_LCD_ROWS),
            columns: config.lcd.columns,
        }
    }

    /// Quantity shown on `row`, if any.
    pub fn quantity_at(&self, row: u8) -> Option<Quantity> {
        if row >= self.rows {
            return None;
        }
        self.slots[row as usize]
    }

    pub fn row_of(&self, quantity: Quantity) -> Option<u8> {
        self.assigned().find_map(|(row, q)| (q == quantity).then_some(row))
    }

    /// `(row, quantity)` pairs in row order.
    pub fn assigned(&self) -> impl Iterator<Item = (u8, Quantity)> + '_ {
        self.slots[..self.rows as usize]
            .iter()
            .enumerate()
            .filter_map(|(row, q)| q.map(|q| (row as u8, q)))
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn columns(&self) -> u8 {
        self.columns
    }

    /// Whether any row needs a value derived from the raw reading.
    pub fn needs_derivation(&self) -> bool {
        self.row_of(Quantity::AbsoluteHumidity).is_some()
    }
}
