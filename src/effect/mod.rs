//! Lighting effects
//!
//! Every built-in effect is a variant of [`EffectSlot`], so the cycle lives
//! in a fixed array. Effects draw through a [`Canvas`] and never touch the
//! strip directly.

mod breathing;
mod cycle;
mod rainbow;
mod reactive;
mod scan;
mod snake;
mod solid;
mod stars;

use embassy_time::Instant;

pub use breathing::BreathingEffect;
pub use cycle::EffectCycle;
pub use rainbow::{RainbowEffect, RainbowLayout};
pub use reactive::{ReactiveEffect, ReactiveFadeEffect, ReactiveHue};
pub use scan::{ScanAxis, ScanEffect};
pub use snake::{MAX_PATH_LEN, SnakeEffect};
pub use solid::SolidEffect;
pub use stars::StarsEffect;

use crate::controller::Canvas;
use crate::keys::KeyState;

const EFFECT_NAME_SOLID: &str = "solid";
const EFFECT_NAME_BREATHING: &str = "breathing";
const EFFECT_NAME_REACTIVE: &str = "reactive";
const EFFECT_NAME_REACTIVE_FADE: &str = "reactive_fade";
const EFFECT_NAME_STARS: &str = "stars";
const EFFECT_NAME_SNAKE: &str = "snake";
const EFFECT_NAME_SCAN_COLS: &str = "scan_cols";
const EFFECT_NAME_SCAN_ROWS: &str = "scan_rows";
const EFFECT_NAME_RAINBOW: &str = "rainbow";
const EFFECT_NAME_RAINBOW_COLS: &str = "rainbow_cols";
const EFFECT_NAME_RAINBOW_ROWS: &str = "rainbow_rows";
const EFFECT_NAME_RAINBOW_REACTIVE: &str = "rainbow_reactive";

const EFFECT_ID_SOLID: u8 = 0;
const EFFECT_ID_BREATHING: u8 = 1;
const EFFECT_ID_REACTIVE: u8 = 2;
const EFFECT_ID_REACTIVE_FADE: u8 = 3;
const EFFECT_ID_STARS: u8 = 4;
const EFFECT_ID_SNAKE: u8 = 5;
const EFFECT_ID_SCAN_COLS: u8 = 6;
const EFFECT_ID_SCAN_ROWS: u8 = 7;
const EFFECT_ID_RAINBOW: u8 = 8;
const EFFECT_ID_RAINBOW_COLS: u8 = 9;
const EFFECT_ID_RAINBOW_ROWS: u8 = 10;
const EFFECT_ID_RAINBOW_REACTIVE: u8 = 11;

/// Number of registered effects
pub const EFFECT_COUNT: usize = 12;

/// Per-frame lighting algorithm
///
/// `process` is called once per loop iteration with no guarantee on the
/// interval between calls, so effects derive their motion from stored
/// instants rather than from a frame count.
pub trait Effect {
    /// Prepare the effect before its first frame
    fn setup(&mut self, _now: Instant, _canvas: &mut Canvas<'_>) {}

    /// Render a single frame into the canvas
    fn process(&mut self, now: Instant, keys: &[KeyState], canvas: &mut Canvas<'_>);

    /// Release the effect when another one takes over
    fn teardown(&mut self, _canvas: &mut Canvas<'_>) {}
}

/// Effect slot - enum containing all possible effects
#[derive(Debug, Clone)]
pub enum EffectSlot {
    Solid(SolidEffect),
    Breathing(BreathingEffect),
    Reactive(ReactiveEffect),
    ReactiveFade(ReactiveFadeEffect),
    Stars(StarsEffect),
    Snake(SnakeEffect),
    Scan(ScanEffect),
    Rainbow(RainbowEffect),
}

/// Known effect ids, in cycle order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum EffectId {
    Solid = EFFECT_ID_SOLID,
    Breathing = EFFECT_ID_BREATHING,
    Reactive = EFFECT_ID_REACTIVE,
    ReactiveFade = EFFECT_ID_REACTIVE_FADE,
    Stars = EFFECT_ID_STARS,
    Snake = EFFECT_ID_SNAKE,
    ScanCols = EFFECT_ID_SCAN_COLS,
    ScanRows = EFFECT_ID_SCAN_ROWS,
    Rainbow = EFFECT_ID_RAINBOW,
    RainbowCols = EFFECT_ID_RAINBOW_COLS,
    RainbowRows = EFFECT_ID_RAINBOW_ROWS,
    RainbowReactive = EFFECT_ID_RAINBOW_REACTIVE,
}

impl Default for EffectSlot {
    fn default() -> Self {
        Self::Solid(SolidEffect)
    }
}

impl EffectId {
    /// Every effect in cycle order
    pub const ALL: [Self; EFFECT_COUNT] = [
        Self::Solid,
        Self::Breathing,
        Self::Reactive,
        Self::ReactiveFade,
        Self::Stars,
        Self::Snake,
        Self::ScanCols,
        Self::ScanRows,
        Self::Rainbow,
        Self::RainbowCols,
        Self::RainbowRows,
        Self::RainbowReactive,
    ];

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            EFFECT_ID_SOLID => Self::Solid,
            EFFECT_ID_BREATHING => Self::Breathing,
            EFFECT_ID_REACTIVE => Self::Reactive,
            EFFECT_ID_REACTIVE_FADE => Self::ReactiveFade,
            EFFECT_ID_STARS => Self::Stars,
            EFFECT_ID_SNAKE => Self::Snake,
            EFFECT_ID_SCAN_COLS => Self::ScanCols,
            EFFECT_ID_SCAN_ROWS => Self::ScanRows,
            EFFECT_ID_RAINBOW => Self::Rainbow,
            EFFECT_ID_RAINBOW_COLS => Self::RainbowCols,
            EFFECT_ID_RAINBOW_ROWS => Self::RainbowRows,
            EFFECT_ID_RAINBOW_REACTIVE => Self::RainbowReactive,
            _ => return None,
        })
    }

    pub const fn to_raw(self) -> u8 {
        self as u8
    }

    pub fn to_slot(self) -> EffectSlot {
        match self {
            Self::Solid => EffectSlot::Solid(SolidEffect),
            Self::Breathing => EffectSlot::Breathing(BreathingEffect::default()),
            Self::Reactive => EffectSlot::Reactive(ReactiveEffect::default()),
            Self::ReactiveFade => EffectSlot::ReactiveFade(ReactiveFadeEffect::default()),
            Self::Stars => EffectSlot::Stars(StarsEffect::default()),
            Self::Snake => EffectSlot::Snake(SnakeEffect::default()),
            Self::ScanCols => EffectSlot::Scan(ScanEffect::columns()),
            Self::ScanRows => EffectSlot::Scan(ScanEffect::rows()),
            Self::Rainbow => EffectSlot::Rainbow(RainbowEffect::new(RainbowLayout::Solid)),
            Self::RainbowCols => EffectSlot::Rainbow(RainbowEffect::new(RainbowLayout::Columns)),
            Self::RainbowRows => EffectSlot::Rainbow(RainbowEffect::new(RainbowLayout::Rows)),
            Self::RainbowReactive => EffectSlot::Reactive(ReactiveEffect::rainbow()),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Solid => EFFECT_NAME_SOLID,
            Self::Breathing => EFFECT_NAME_BREATHING,
            Self::Reactive => EFFECT_NAME_REACTIVE,
            Self::ReactiveFade => EFFECT_NAME_REACTIVE_FADE,
            Self::Stars => EFFECT_NAME_STARS,
            Self::Snake => EFFECT_NAME_SNAKE,
            Self::ScanCols => EFFECT_NAME_SCAN_COLS,
            Self::ScanRows => EFFECT_NAME_SCAN_ROWS,
            Self::Rainbow => EFFECT_NAME_RAINBOW,
            Self::RainbowCols => EFFECT_NAME_RAINBOW_COLS,
            Self::RainbowRows => EFFECT_NAME_RAINBOW_ROWS,
            Self::RainbowReactive => EFFECT_NAME_RAINBOW_REACTIVE,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == s)
    }
}

impl EffectSlot {
    /// One instance of every effect, in cycle order
    pub fn registry() -> [Self; EFFECT_COUNT] {
        EffectId::ALL.map(EffectId::to_slot)
    }

    /// Get the effect ID for external observation
    pub fn id(&self) -> EffectId {
        match self {
            Self::Solid(_) => EffectId::Solid,
            Self::Breathing(_) => EffectId::Breathing,
            Self::Reactive(effect) => match effect.hue() {
                ReactiveHue::Fixed => EffectId::Reactive,
                ReactiveHue::Rainbow { .. } => EffectId::RainbowReactive,
            },
            Self::ReactiveFade(_) => EffectId::ReactiveFade,
            Self::Stars(_) => EffectId::Stars,
            Self::Snake(_) => EffectId::Snake,
            Self::Scan(effect) => match effect.axis() {
                ScanAxis::Columns => EffectId::ScanCols,
                ScanAxis::Rows => EffectId::ScanRows,
            },
            Self::Rainbow(effect) => match effect.layout() {
                RainbowLayout::Solid => EffectId::Rainbow,
                RainbowLayout::Columns => EffectId::RainbowCols,
                RainbowLayout::Rows => EffectId::RainbowRows,
            },
        }
    }
}

impl Effect for EffectSlot {
    fn setup(&mut self, now: Instant, canvas: &mut Canvas<'_>) {
        match self {
            Self::Solid(effect) => effect.setup(now, canvas),
            Self::Breathing(effect) => effect.setup(now, canvas),
            Self::Reactive(effect) => effect.setup(now, canvas),
            Self::ReactiveFade(effect) => effect.setup(now, canvas),
            Self::Stars(effect) => effect.setup(now, canvas),
            Self::Snake(effect) => effect.setup(now, canvas),
            Self::Scan(effect) => effect.setup(now, canvas),
            Self::Rainbow(effect) => effect.setup(now, canvas),
        }
    }

    fn process(&mut self, now: Instant, keys: &[KeyState], canvas: &mut Canvas<'_>) {
        match self {
            Self::Solid(effect) => effect.process(now, keys, canvas),
            Self::Breathing(effect) => effect.process(now, keys, canvas),
            Self::Reactive(effect) => effect.process(now, keys, canvas),
            Self::ReactiveFade(effect) => effect.process(now, keys, canvas),
            Self::Stars(effect) => effect.process(now, keys, canvas),
            Self::Snake(effect) => effect.process(now, keys, canvas),
            Self::Scan(effect) => effect.process(now, keys, canvas),
            Self::Rainbow(effect) => effect.process(now, keys, canvas),
        }
    }

    fn teardown(&mut self, canvas: &mut Canvas<'_>) {
        match self {
            Self::Solid(effect) => effect.teardown(canvas),
            Self::Breathing(effect) => effect.teardown(canvas),
            Self::Reactive(effect) => effect.teardown(canvas),
            Self::ReactiveFade(effect) => effect.teardown(canvas),
            Self::Stars(effect) => effect.teardown(canvas),
            Self::Snake(effect) => effect.teardown(canvas),
            Self::Scan(effect) => effect.teardown(canvas),
            Self::Rainbow(effect) => effect.teardown(canvas),
        }
    }
}
