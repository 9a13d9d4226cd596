//! Hotkeys
//!
//! Maps key indices to lighting actions. Actions can also be queued from
//! outside the frame loop through an [`ActionQueue`].

use heapless::LinearMap;

use crate::channel::{Channel, Receiver, Sender};

/// Maximum number of bound hotkeys
pub const MAX_HOTKEYS: usize = 16;

/// Capacity of the action queue
pub const ACTION_QUEUE_SIZE: usize = 8;

const ACTION_NAME_NEXT_EFFECT: &str = "next_effect";
const ACTION_NAME_TOGGLE_POWER: &str = "toggle_power";
const ACTION_NAME_CYCLE_HUE: &str = "cycle_hue";
const ACTION_NAME_RAISE_SATURATION: &str = "raise_saturation";
const ACTION_NAME_LOWER_SATURATION: &str = "lower_saturation";
const ACTION_NAME_RAISE_BRIGHTNESS: &str = "raise_brightness";
const ACTION_NAME_LOWER_BRIGHTNESS: &str = "lower_brightness";

/// Lighting control action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    NextEffect,
    TogglePower,
    CycleHue,
    RaiseSaturation,
    LowerSaturation,
    RaiseBrightness,
    LowerBrightness,
}

impl Action {
    pub const ALL: [Self; 7] = [
        Self::NextEffect,
        Self::TogglePower,
        Self::CycleHue,
        Self::RaiseSaturation,
        Self::LowerSaturation,
        Self::RaiseBrightness,
        Self::LowerBrightness,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NextEffect => ACTION_NAME_NEXT_EFFECT,
            Self::TogglePower => ACTION_NAME_TOGGLE_POWER,
            Self::CycleHue => ACTION_NAME_CYCLE_HUE,
            Self::RaiseSaturation => ACTION_NAME_RAISE_SATURATION,
            Self::LowerSaturation => ACTION_NAME_LOWER_SATURATION,
            Self::RaiseBrightness => ACTION_NAME_RAISE_BRIGHTNESS,
            Self::LowerBrightness => ACTION_NAME_LOWER_BRIGHTNESS,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.as_str() == s)
    }
}

pub type ActionQueue = Channel<Action, ACTION_QUEUE_SIZE>;
pub type ActionSender<'a> = Sender<'a, Action, ACTION_QUEUE_SIZE>;
pub type ActionReceiver<'a> = Receiver<'a, Action, ACTION_QUEUE_SIZE>;

/// Key index to action bindings
#[derive(Debug, Clone, Default)]
pub struct HotkeyMap {
    bindings: LinearMap<u16, Action, MAX_HOTKEYS>,
}

impl HotkeyMap {
    pub const fn new() -> Self {
        Self {
            bindings: LinearMap::new(),
        }
    }

    /// Build a map from `(key, action)` pairs
    ///
    /// Later bindings of the same key win. Returns `None` when there are more
    /// distinct keys than [`MAX_HOTKEYS`].
    pub fn from_bindings(bindings: &[(u16, Action)]) -> Option<Self> {
        let mut map = Self::new();
        for &(key, action) in bindings {
            map.bind(key, action).ok()?;
        }
        Some(map)
    }

    /// Bind a key, replacing its previous action
    ///
    /// Hands the binding back if the map is full.
    pub fn bind(&mut self, key: u16, action: Action) -> Result<Option<Action>, (u16, Action)> {
        self.bindings.insert(key, action)
    }

    pub fn unbind(&mut self, key: u16) -> Option<Action> {
        self.bindings.remove(&key)
    }

    pub fn action_for(&self, key: u16) -> Option<Action> {
        self.bindings.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
