//! Snake effect
//!
//! A short lit segment crawls along the LED matrix in boustrophedon order,
//! brightest at the head and dimming toward the tail.

use embassy_time::{Duration, Instant};
use heapless::Vec;

use super::Effect;
use crate::{color::LedColor, controller::Canvas, keys::KeyState};

/// Longest path the snake can follow
///
/// [`RgbController::new`](crate::RgbController::new) rejects LED matrices
/// with more cells than this.
pub const MAX_PATH_LEN: usize = 256;

const DEFAULT_LENGTH: usize = 8;
const DEFAULT_STEP_MS: u64 = 60;

#[derive(Debug, Clone)]
pub struct SnakeEffect {
    /// Segment length in LEDs
    length: usize,
    /// Time between two moves
    step: Duration,
    path: Vec<u16, MAX_PATH_LEN>,
    head: usize,
    last_step: Option<Instant>,
}

impl Default for SnakeEffect {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            step: Duration::from_millis(DEFAULT_STEP_MS),
            path: Vec::new(),
            head: 0,
            last_step: None,
        }
    }
}

impl SnakeEffect {
    #[must_use]
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length.max(1);
        self
    }

    #[must_use]
    pub fn with_step(mut self, step: Duration) -> Self {
        self.step = step;
        self
    }

    /// LEDs visited by the snake, in order
    ///
    /// Empty until the effect is set up.
    pub fn path(&self) -> &[u16] {
        &self.path
    }

    /// Path position of the head
    pub fn head(&self) -> usize {
        self.head
    }

    fn advance(&mut self, now: Instant) {
        let Some(last_step) = self.last_step else {
            self.last_step = Some(now);
            return;
        };
        let step_ms = self.step.as_millis().max(1);
        let steps = now.saturating_duration_since(last_step).as_millis() / step_ms;
        if steps == 0 || self.path.is_empty() {
            return;
        }

        #[allow(clippy::cast_possible_truncation)]
        let offset = (steps % self.path.len() as u64) as usize;
        self.head = (self.head + offset) % self.path.len();
        self.last_step = Some(last_step + Duration::from_millis(steps * step_ms));
    }
}

impl Effect for SnakeEffect {
    fn setup(&mut self, now: Instant, canvas: &mut Canvas<'_>) {
        self.path.clear();
        for led in canvas.matrix().serpentine() {
            // Unreachable through a controller, which rejects larger matrices
            if self.path.push(led).is_err() {
                break;
            }
        }
        self.head = 0;
        self.last_step = Some(now);
        canvas.fill(LedColor::BLACK);
    }

    #[allow(clippy::cast_precision_loss)]
    fn process(&mut self, now: Instant, _keys: &[KeyState], canvas: &mut Canvas<'_>) {
        self.advance(now);

        let settings = canvas.settings();
        let base = LedColor::new(settings.hue, settings.saturation_level(), 0.0);
        canvas.fill(base);

        let len = self.path.len();
        let window = self.length.min(len);
        let ceiling = settings.brightness_level();
        for i in 0..window {
            let led = self.path[(self.head + len - i) % len];
            let val = ceiling * (window - i) as f32 / window as f32;
            canvas.set_pixel(led, base.with_value(val));
        }
    }

    fn teardown(&mut self, _canvas: &mut Canvas<'_>) {
        self.path.clear();
        self.last_step = None;
    }
}
