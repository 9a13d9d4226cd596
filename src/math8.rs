use core::f64::consts::{E, PI};

use embassy_time::{Duration, Instant};

const MILLIS_PER_MINUTE: u64 = 60_000;

/// Sawtooth wave of wall-clock time
///
/// Ramps linearly from 0 to 255 `beats_per_minute` times per minute and
/// wraps. A rate of zero holds the wave at 0.
#[allow(clippy::cast_possible_truncation)]
pub fn beat8(beats_per_minute: u16, now: Instant) -> u8 {
    if beats_per_minute == 0 {
        return 0;
    }
    // (now % period) / period == frac(now * bpm / 60000)
    let phase = (now.as_millis() * u64::from(beats_per_minute)) % MILLIS_PER_MINUTE;
    ((phase * 256) / MILLIS_PER_MINUTE) as u8
}

/// Breathing curve
///
/// Maps a sine wave through an exponential, so the light lingers near the
/// bottom and swells quickly to the top. The result spans exactly
/// `start..=end`; `pulse` is the number of breaths per 4 seconds.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn breathe(now: Instant, pulse: f32, start: f32, end: f32) -> f32 {
    let millis = now.as_millis() as f64;
    let phase = PI * f64::from(pulse) * millis / 2000.0;
    let shape = (libm::exp(libm::sin(phase)) - 1.0 / E) / (E - 1.0 / E);
    start + (shape as f32) * (end - start)
}

/// Amount to fade during `elapsed` so that `level` reaches zero in `window`
///
/// A zero window fades everything at once.
#[allow(clippy::cast_precision_loss)]
pub fn decay(level: f32, window: Duration, elapsed: Duration) -> f32 {
    let window_ms = window.as_millis();
    if window_ms == 0 {
        return level;
    }
    level / window_ms as f32 * elapsed.as_millis() as f32
}

/// Time elapsed since `since`, zero if unknown or in the future
pub fn elapsed_since(since: Option<Instant>, now: Instant) -> Duration {
    since.map_or(Duration::from_millis(0), |since| {
        now.saturating_duration_since(since)
    })
}
