//! Breathing effect
//!
//! Pulses the whole keyboard between a dim floor and the configured
//! brightness along an exp-of-sine curve.

use embassy_time::Instant;

use super::Effect;
use crate::{color::LedColor, controller::Canvas, keys::KeyState, math8::breathe};

const DEFAULT_PULSE: f32 = 0.5;
const DEFAULT_START_BRIGHTNESS: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct BreathingEffect {
    /// Breaths per 4 seconds
    pulse: f32,
    /// Value at the bottom of a breath
    start_brightness: f32,
}

impl Default for BreathingEffect {
    fn default() -> Self {
        Self {
            pulse: DEFAULT_PULSE,
            start_brightness: DEFAULT_START_BRIGHTNESS,
        }
    }
}

impl BreathingEffect {
    #[must_use]
    pub fn with_pulse(mut self, pulse: f32) -> Self {
        self.pulse = pulse;
        self
    }

    #[must_use]
    pub fn with_start_brightness(mut self, brightness: f32) -> Self {
        self.start_brightness = brightness.clamp(0.0, 1.0);
        self
    }

    /// Value of the breath at `now` for the given ceiling
    pub fn level(&self, now: Instant, end_brightness: f32) -> f32 {
        breathe(now, self.pulse, self.start_brightness, end_brightness)
    }
}

impl Effect for BreathingEffect {
    fn process(&mut self, now: Instant, _keys: &[KeyState], canvas: &mut Canvas<'_>) {
        let settings = canvas.settings();
        let val = self.level(now, settings.brightness_level());
        canvas.fill(LedColor::new(
            settings.hue,
            settings.saturation_level(),
            val,
        ));
    }
}
