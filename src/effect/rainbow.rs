//! Rainbow effects
//!
//! - `Solid`: the whole keyboard sweeps around the color wheel
//! - `Columns`, `Rows`: hue drifts across the matrix along one axis

use embassy_time::Instant;

use super::Effect;
use crate::{
    color::wrap_hue,
    controller::Canvas,
    keys::KeyState,
    math8::beat8,
};

const SOLID_BPM: u16 = 8;
const GRADIENT_BPM: u16 = 32;
const GRADIENT_RATE: f32 = -0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RainbowLayout {
    Solid,
    Columns,
    Rows,
}

#[derive(Debug, Clone)]
pub struct RainbowEffect {
    layout: RainbowLayout,
    /// Full hue sweeps per minute
    beats_per_minute: u16,
    /// Rainbows spanning the matrix at once; the sign sets the flow direction
    rate: f32,
}

impl RainbowEffect {
    pub fn new(layout: RainbowLayout) -> Self {
        let beats_per_minute = match layout {
            RainbowLayout::Solid => SOLID_BPM,
            RainbowLayout::Columns | RainbowLayout::Rows => GRADIENT_BPM,
        };
        Self {
            layout,
            beats_per_minute,
            rate: GRADIENT_RATE,
        }
    }

    #[must_use]
    pub fn with_speed(mut self, beats_per_minute: u16) -> Self {
        self.beats_per_minute = beats_per_minute;
        self
    }

    #[must_use]
    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = rate;
        self
    }

    pub fn layout(&self) -> RainbowLayout {
        self.layout
    }

    /// Hue of the line at `index` out of `span` for a base hue
    #[allow(clippy::cast_precision_loss)]
    pub fn line_hue(&self, base: u8, index: usize, span: usize) -> u8 {
        if span == 0 {
            return base;
        }
        let offset = self.rate * 255.0 / span as f32 * index as f32;
        wrap_hue(f32::from(base) + offset)
    }
}

impl Effect for RainbowEffect {
    fn process(&mut self, now: Instant, _keys: &[KeyState], canvas: &mut Canvas<'_>) {
        let settings = canvas.settings();
        let base = beat8(self.beats_per_minute, now);

        let matrix = canvas.matrix();
        match self.layout {
            RainbowLayout::Solid => canvas.fill(settings.color_with_hue(base)),
            RainbowLayout::Columns => {
                for col in 0..matrix.cols() {
                    let color = settings.color_with_hue(self.line_hue(base, col, matrix.cols()));
                    for led in matrix.column(col) {
                        canvas.set_pixel(led, color);
                    }
                }
            }
            RainbowLayout::Rows => {
                for row in 0..matrix.rows() {
                    let color = settings.color_with_hue(self.line_hue(base, row, matrix.rows()));
                    for led in matrix.row(row).iter().flatten() {
                        canvas.set_pixel(*led, color);
                    }
                }
            }
        }
    }
}

impl From<RainbowLayout> for RainbowEffect {
    fn from(layout: RainbowLayout) -> Self {
        Self::new(layout)
    }
}
