use embassy_time::Instant;

use super::{EFFECT_COUNT, Effect, EffectSlot};
use crate::{controller::Canvas, keys::KeyState};

/// Fixed ring of effects with exactly one active
///
/// Switching tears the active effect down before the next one is set up, so
/// at most one effect holds state at a time.
#[derive(Debug, Clone)]
pub struct EffectCycle<E, const N: usize> {
    effects: [E; N],
    index: usize,
}

impl EffectCycle<EffectSlot, EFFECT_COUNT> {
    /// Every built-in effect in registry order
    pub fn registry() -> Self {
        Self::new(EffectSlot::registry())
    }
}

impl<E: Effect, const N: usize> EffectCycle<E, N> {
    /// Create a cycle whose first effect is active
    ///
    /// The first effect is not set up until [`Self::start`].
    pub const fn new(effects: [E; N]) -> Self {
        const { assert!(N > 0, "effect cycle must not be empty") };
        Self { effects, index: 0 }
    }

    /// Set up the active effect
    pub fn start(&mut self, now: Instant, canvas: &mut Canvas<'_>) {
        self.effects[self.index].setup(now, canvas);
    }

    /// Switch to the next effect, wrapping after the last one
    pub fn advance(&mut self, now: Instant, canvas: &mut Canvas<'_>) {
        self.effects[self.index].teardown(canvas);
        self.index = (self.index + 1) % N;
        self.effects[self.index].setup(now, canvas);
    }

    /// Render one frame of the active effect
    pub fn process(&mut self, now: Instant, keys: &[KeyState], canvas: &mut Canvas<'_>) {
        self.effects[self.index].process(now, keys, canvas);
    }

    pub const fn active_index(&self) -> usize {
        self.index
    }

    pub fn active(&self) -> &E {
        &self.effects[self.index]
    }

    pub fn effects(&self) -> &[E] {
        &self.effects
    }

    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> usize {
        N
    }
}
