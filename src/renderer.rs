use embassy_time::Instant;
use embedded_hal::digital::OutputPin;
#[cfg(feature = "esp32-log")]
use esp_println::println;
use smart_leds::SmartLedsWrite;

use crate::color::Rgb;
use crate::controller::RgbController;
use crate::effect::{EFFECT_COUNT, EffectCycle, EffectId, EffectSlot};
use crate::error::HardwareError;
use crate::hotkey::Action;
use crate::keys::KeyState;

/// Lighting engine - the controller plus the effect cycle
pub struct Renderer<D, P, const ROWS: usize, const COLS: usize, const LEDS: usize> {
    controller: RgbController<D, P, ROWS, COLS, LEDS>,
    effects: EffectCycle<EffectSlot, EFFECT_COUNT>,
}

impl<D, P, const ROWS: usize, const COLS: usize, const LEDS: usize> Renderer<D, P, ROWS, COLS, LEDS>
where
    D: SmartLedsWrite<Color = Rgb>,
    P: OutputPin,
{
    /// Create a renderer cycling through every built-in effect
    pub fn new(controller: RgbController<D, P, ROWS, COLS, LEDS>) -> Self {
        Self {
            controller,
            effects: EffectCycle::registry(),
        }
    }

    /// Bring up the hardware and set up the first effect
    pub fn start(&mut self, now: Instant) -> Result<(), HardwareError<D::Error, P::Error>> {
        self.controller.begin()?;
        self.effects.start(now, &mut self.controller.canvas());
        Ok(())
    }

    /// Apply a lighting action
    ///
    /// Only a power toggle touches the hardware.
    pub fn apply(&mut self, action: Action, now: Instant) -> Result<(), P::Error> {
        match action {
            Action::NextEffect => {
                self.effects.advance(now, &mut self.controller.canvas());
                #[cfg(feature = "esp32-log")]
                println!("[Renderer.apply] effect {}", self.effect_id().as_str());
            }
            Action::TogglePower => self.controller.toggle()?,
            Action::CycleHue => self.controller.cycle_hue(),
            Action::RaiseSaturation => self.controller.raise_saturation(),
            Action::LowerSaturation => self.controller.lower_saturation(),
            Action::RaiseBrightness => self.controller.raise_brightness(),
            Action::LowerBrightness => self.controller.lower_brightness(),
        }
        Ok(())
    }

    /// Render one frame of the active effect and push it to the strip
    pub fn render(&mut self, now: Instant, keys: &[KeyState]) -> Result<(), D::Error> {
        self.effects
            .process(now, keys, &mut self.controller.canvas());
        self.controller.show()
    }

    pub fn effect_id(&self) -> EffectId {
        self.effects.active().id()
    }

    pub fn effects(&self) -> &EffectCycle<EffectSlot, EFFECT_COUNT> {
        &self.effects
    }

    pub fn controller(&self) -> &RgbController<D, P, ROWS, COLS, LEDS> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut RgbController<D, P, ROWS, COLS, LEDS> {
        &mut self.controller
    }
}
