//! Twinkling stars effect

use embassy_time::{Duration, Instant};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use super::Effect;
use crate::{
    controller::Canvas,
    keys::KeyState,
    math8::{decay, elapsed_since},
};

const DEFAULT_INTERVAL_MS: u64 = 200;
const DEFAULT_FADE_MS: u64 = 600;
const DEFAULT_SEED: u64 = 1337;

/// Lights a random LED at a fixed interval while the rest fade out
#[derive(Debug, Clone)]
pub struct StarsEffect {
    /// Time between two new stars
    interval: Duration,
    /// Time for a star to fade out completely
    fade: Duration,
    rng: SmallRng,
    last_star: Option<Instant>,
    last_pass: Option<Instant>,
}

impl Default for StarsEffect {
    fn default() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }
}

impl StarsEffect {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            fade: Duration::from_millis(DEFAULT_FADE_MS),
            rng: SmallRng::seed_from_u64(seed),
            last_star: None,
            last_pass: None,
        }
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn with_fade(mut self, fade: Duration) -> Self {
        self.fade = fade;
        self
    }
}

impl Effect for StarsEffect {
    fn setup(&mut self, now: Instant, _canvas: &mut Canvas<'_>) {
        self.last_star = Some(now);
        self.last_pass = Some(now);
    }

    fn process(&mut self, now: Instant, _keys: &[KeyState], canvas: &mut Canvas<'_>) {
        let settings = canvas.settings();
        let elapsed = elapsed_since(self.last_pass, now);
        canvas.fade_all(decay(settings.brightness_level(), self.fade, elapsed));
        self.last_pass = Some(now);

        let num_leds = canvas.num_leds();
        if num_leds == 0 || elapsed_since(self.last_star, now) <= self.interval {
            return;
        }
        let led = self.rng.gen_range(0..num_leds);
        canvas.set_pixel(led, settings.color());
        self.last_star = Some(now);
    }

    fn teardown(&mut self, _canvas: &mut Canvas<'_>) {
        self.last_star = None;
        self.last_pass = None;
    }
}
