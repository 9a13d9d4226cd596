//! Solid color effect

use embassy_time::Instant;

use super::Effect;
use crate::{controller::Canvas, keys::KeyState};

/// Fills every LED with the current hue, saturation and brightness
#[derive(Debug, Clone, Copy, Default)]
pub struct SolidEffect;

impl Effect for SolidEffect {
    fn process(&mut self, _now: Instant, _keys: &[KeyState], canvas: &mut Canvas<'_>) {
        let color = canvas.settings().color();
        canvas.fill(color);
    }
}
