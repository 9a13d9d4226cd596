//! Scanning line effects
//!
//! A lit line sweeps across the matrix one row or column at a time and
//! leaves a fading trail behind it.

use embassy_time::{Duration, Instant};

use super::Effect;
use crate::{
    color::LedColor,
    controller::Canvas,
    keys::KeyState,
    math8::{decay, elapsed_since},
};

const DEFAULT_STEP_MS: u64 = 50;
const COLUMNS_TAIL_MS: u64 = 750;
const ROWS_TAIL_MS: u64 = 450;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanAxis {
    Rows,
    Columns,
}

#[derive(Debug, Clone)]
pub struct ScanEffect {
    axis: ScanAxis,
    /// Time between two moves of the line
    step: Duration,
    /// Time for a lit line to fade out
    tail: Duration,
    position: usize,
    last_step: Option<Instant>,
    last_pass: Option<Instant>,
}

impl ScanEffect {
    pub fn new(axis: ScanAxis, step: Duration, tail: Duration) -> Self {
        Self {
            axis,
            step,
            tail,
            position: 0,
            last_step: None,
            last_pass: None,
        }
    }

    /// Line sweeping left to right
    pub fn columns() -> Self {
        Self::new(
            ScanAxis::Columns,
            Duration::from_millis(DEFAULT_STEP_MS),
            Duration::from_millis(COLUMNS_TAIL_MS),
        )
    }

    /// Line sweeping top to bottom
    pub fn rows() -> Self {
        Self::new(
            ScanAxis::Rows,
            Duration::from_millis(DEFAULT_STEP_MS),
            Duration::from_millis(ROWS_TAIL_MS),
        )
    }

    pub fn axis(&self) -> ScanAxis {
        self.axis
    }

    /// Row or column lit last
    pub fn position(&self) -> usize {
        self.position
    }

    fn light_line(&self, canvas: &mut Canvas<'_>, val: f32) {
        let matrix = canvas.matrix();
        match self.axis {
            ScanAxis::Columns => {
                for led in matrix.column(self.position) {
                    canvas.set_value(led, val);
                }
            }
            ScanAxis::Rows => {
                for led in matrix.row(self.position).iter().flatten() {
                    canvas.set_value(*led, val);
                }
            }
        }
    }
}

impl Effect for ScanEffect {
    fn setup(&mut self, now: Instant, canvas: &mut Canvas<'_>) {
        self.position = 0;
        self.last_step = Some(now);
        self.last_pass = Some(now);
        let settings = canvas.settings();
        canvas.fill(LedColor::new(settings.hue, settings.saturation_level(), 0.0));
    }

    fn process(&mut self, now: Instant, _keys: &[KeyState], canvas: &mut Canvas<'_>) {
        let settings = canvas.settings();
        canvas.tint_all(settings.hue, settings.saturation_level());

        let elapsed = elapsed_since(self.last_pass, now);
        canvas.fade_all(decay(settings.brightness_level(), self.tail, elapsed));
        self.last_pass = Some(now);

        let matrix = canvas.matrix();
        let lines = match self.axis {
            ScanAxis::Columns => matrix.cols(),
            ScanAxis::Rows => matrix.rows(),
        };
        if lines == 0 || elapsed_since(self.last_step, now) <= self.step {
            return;
        }
        self.position = (self.position + 1) % lines;
        self.light_line(canvas, settings.brightness_level());
        self.last_step = Some(now);
    }

    fn teardown(&mut self, _canvas: &mut Canvas<'_>) {
        self.last_step = None;
        self.last_pass = None;
    }
}
