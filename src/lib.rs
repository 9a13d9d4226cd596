#![no_std]

pub mod channel;
pub mod color;
pub mod controller;
pub mod effect;
pub mod error;
pub mod frame_scheduler;
pub mod hotkey;
pub mod keys;
pub mod math8;
pub mod renderer;
pub mod topology;

pub use color::{ChannelOrder, Hsv, LedColor, Rgb};
pub use controller::{Canvas, LightingConfig, NoPowerPin, RgbController, Settings};
pub use effect::{EFFECT_COUNT, Effect, EffectCycle, EffectId, EffectSlot};
pub use error::{Error, HardwareError, Result};
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use hotkey::{Action, ActionQueue, ActionReceiver, ActionSender, HotkeyMap};
pub use keys::{KeyState, Keyboard};
pub use renderer::Renderer;
pub use topology::{Layout, Matrix, Topology, TopologyConfig};

pub use embassy_time::{Duration, Instant};
