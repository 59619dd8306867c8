//! Live rendering capability.
//!
//! The driver hands each updated window snapshot (plus computed axis
//! bounds) to a [`LiveView`]. A plotting frontend would redraw the whole
//! series; the built-in terminal view prints a bar for the newest reading,
//! which is all a scrolling terminal can usefully show.

use crate::models::Reading;
use crate::sensing::window::ViewBounds;

/// Rendering capability for live mode.
pub trait LiveView {
    fn render(&mut self, snapshot: &[Reading], bounds: ViewBounds);
}

/// One `#` per 2 cm, capped at 50 columns.
const BAR_SCALE_CM: f64 = 2.0;
const BAR_MAX_COLS: usize = 50;

/// Terminal bar-chart view.
pub struct AsciiView;

impl AsciiView {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AsciiView {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveView for AsciiView {
    fn render(&mut self, snapshot: &[Reading], _bounds: ViewBounds) {
        if let Some(reading) = snapshot.last() {
            if reading.valid {
                println!("{:5.1} cm | {}", reading.distance_cm, ascii_bar(reading.distance_cm));
            } else {
                println!("  --- cm | (timeout)");
            }
        }
    }
}

fn ascii_bar(distance_cm: f64) -> String {
    let cols = ((distance_cm / BAR_SCALE_CM) as usize).min(BAR_MAX_COLS);
    "#".repeat(cols)
}
