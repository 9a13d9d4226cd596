//! Key-reactive effects
//!
//! - `ReactiveEffect`: held keys light up, everything fades at a global rate
//! - `ReactiveFadeEffect`: every key fades on its own clock after release

use embassy_time::{Duration, Instant};

use super::Effect;
use crate::{
    color::LedColor,
    controller::Canvas,
    keys::KeyState,
    math8::{beat8, decay, elapsed_since},
};

const DEFAULT_FADE_MS: u64 = 1000;
const DEFAULT_FADE_WINDOW_MS: u64 = 1500;
const DEFAULT_RAINBOW_BPM: u16 = 32;

/// Hue source of a reactive effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactiveHue {
    /// Controller hue
    Fixed,
    /// Hue sweeping around the wheel at the given rate
    Rainbow { beats_per_minute: u16 },
}

/// Lights held keys and fades the whole strip toward black
#[derive(Debug, Clone)]
pub struct ReactiveEffect {
    /// Time for a full-brightness LED to fade out
    fade: Duration,
    hue: ReactiveHue,
    last_pass: Option<Instant>,
}

impl Default for ReactiveEffect {
    fn default() -> Self {
        Self {
            fade: Duration::from_millis(DEFAULT_FADE_MS),
            hue: ReactiveHue::Fixed,
            last_pass: None,
        }
    }
}

impl ReactiveEffect {
    /// Reactive effect with a sweeping hue
    pub fn rainbow() -> Self {
        Self::default().with_hue(ReactiveHue::Rainbow {
            beats_per_minute: DEFAULT_RAINBOW_BPM,
        })
    }

    #[must_use]
    pub fn with_hue(mut self, hue: ReactiveHue) -> Self {
        self.hue = hue;
        self
    }

    #[must_use]
    pub fn with_fade(mut self, fade: Duration) -> Self {
        self.fade = fade;
        self
    }

    pub fn hue(&self) -> ReactiveHue {
        self.hue
    }
}

impl Effect for ReactiveEffect {
    fn setup(&mut self, now: Instant, _canvas: &mut Canvas<'_>) {
        self.last_pass = Some(now);
    }

    fn process(&mut self, now: Instant, keys: &[KeyState], canvas: &mut Canvas<'_>) {
        let settings = canvas.settings();
        let elapsed = elapsed_since(self.last_pass, now);
        canvas.fade_all(decay(settings.brightness_level(), self.fade, elapsed));

        let hue = match self.hue {
            ReactiveHue::Fixed => settings.hue,
            ReactiveHue::Rainbow { beats_per_minute } => beat8(beats_per_minute, now),
        };
        let color = settings.color_with_hue(hue);
        for (key, state) in (0u16..).zip(keys) {
            if state.is_pressed() {
                canvas.set_pixel_by_key(key, color);
            }
        }

        self.last_pass = Some(now);
    }

    fn teardown(&mut self, _canvas: &mut Canvas<'_>) {
        self.last_pass = None;
    }
}

/// Lights held keys; released keys fade out linearly over a fixed window
///
/// Unlike [`ReactiveEffect`] the brightness of each key is computed from its
/// own release time, so the result does not depend on the frame rate.
#[derive(Debug, Clone)]
pub struct ReactiveFadeEffect {
    window: Duration,
}

impl Default for ReactiveFadeEffect {
    fn default() -> Self {
        Self {
            window: Duration::from_millis(DEFAULT_FADE_WINDOW_MS),
        }
    }
}

impl ReactiveFadeEffect {
    #[must_use]
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Relative brightness of a key at `now`, in `0.0..=1.0`
    ///
    /// Held keys are at 1. Released keys decay linearly to 0 over the
    /// window and stay at exactly 0 afterwards; keys never touched are 0.
    #[allow(clippy::cast_precision_loss)]
    pub fn level(&self, state: &KeyState, now: Instant) -> f32 {
        if state.is_pressed() {
            return 1.0;
        }
        let Some(since) = state.millis_since_change(now) else {
            return 0.0;
        };
        let window = self.window.as_millis();
        if since >= window {
            return 0.0;
        }
        1.0 - since as f32 / window as f32
    }
}

impl Effect for ReactiveFadeEffect {
    fn setup(&mut self, _now: Instant, canvas: &mut Canvas<'_>) {
        let settings = canvas.settings();
        canvas.fill(LedColor::new(settings.hue, settings.saturation_level(), 0.0));
    }

    fn process(&mut self, now: Instant, keys: &[KeyState], canvas: &mut Canvas<'_>) {
        let settings = canvas.settings();
        let base = LedColor::new(settings.hue, settings.saturation_level(), 0.0);
        let ceiling = settings.brightness_level();
        for (key, state) in (0u16..).zip(keys) {
            let val = ceiling * self.level(state, now);
            canvas.set_pixel_by_key(key, base.with_value(val));
        }
    }
}
