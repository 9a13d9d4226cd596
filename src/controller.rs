//! RGB controller
//!
//! Owns the LED state buffer, the strip driver and the power-enable pin.
//! The strip is write-only, so the buffer is the only record of what every
//! LED shows; effects mutate it through a [`Canvas`] and [`RgbController::show`]
//! packs it onto the wire.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin, PinState};
#[cfg(feature = "esp32-log")]
use esp_println::println;
use smart_leds::{SmartLedsWrite, gamma};

use crate::color::{ChannelOrder, LedColor, Rgb, unit_from_u8};
use crate::effect::MAX_PATH_LEN;
use crate::error::{Error, HardwareError, Result};
use crate::topology::{Matrix, Topology};

pub const DEFAULT_HUE_STEP: u8 = 8;
pub const DEFAULT_SATURATION_STEP: u8 = 16;
pub const DEFAULT_BRIGHTNESS_STEP: u8 = 16;

/// Startup configuration of the controller
#[derive(Debug, Clone, Copy)]
pub struct LightingConfig {
    /// Initial power state
    pub power_on: bool,
    /// Channel order of the strip
    pub channel_order: ChannelOrder,
    /// Apply gamma correction when packing frames
    pub gamma: bool,
    /// Default hue (0-255 color wheel)
    pub hue: u8,
    /// Default saturation (0-255)
    pub saturation: u8,
    /// Default brightness ceiling (0-255)
    pub brightness: u8,
    pub hue_step: u8,
    pub saturation_step: u8,
    pub brightness_step: u8,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            power_on: true,
            channel_order: ChannelOrder::Rgb,
            gamma: false,
            hue: 0,
            saturation: 255,
            brightness: 255,
            hue_step: DEFAULT_HUE_STEP,
            saturation_step: DEFAULT_SATURATION_STEP,
            brightness_step: DEFAULT_BRIGHTNESS_STEP,
        }
    }
}

/// Global color settings read by effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub hue: u8,
    pub saturation: u8,
    pub brightness: u8,
    pub is_on: bool,
    /// Values captured at startup
    pub default_hue: u8,
    pub default_saturation: u8,
    pub default_brightness: u8,
}

impl Settings {
    fn new(config: &LightingConfig) -> Self {
        Self {
            hue: config.hue,
            saturation: config.saturation,
            brightness: config.brightness,
            is_on: config.power_on,
            default_hue: config.hue,
            default_saturation: config.saturation,
            default_brightness: config.brightness,
        }
    }

    /// Current hue at full configured saturation and brightness
    pub fn color(&self) -> LedColor {
        self.color_with_hue(self.hue)
    }

    pub fn color_with_hue(&self, hue: u8) -> LedColor {
        LedColor::from_hsv8(hue, self.saturation, self.brightness)
    }

    /// Brightness as a normalized level
    pub fn brightness_level(&self) -> f32 {
        unit_from_u8(self.brightness)
    }

    /// Saturation as a normalized level
    pub fn saturation_level(&self) -> f32 {
        unit_from_u8(self.saturation)
    }
}

/// Placeholder for boards without a power-enable pin
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPowerPin;

impl ErrorType for NoPowerPin {
    type Error = Infallible;
}

impl OutputPin for NoPowerPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }
}

/// Mutable view of the LED state buffer handed to effects
///
/// All writes are bounds-checked against the strip length; an LED index past
/// the strip is a bug in the caller and trips a debug assertion.
pub struct Canvas<'a> {
    leds: &'a mut [LedColor],
    matrix: Matrix<'a>,
    key_leds: &'a [Option<u16>],
    settings: Settings,
}

impl<'a> Canvas<'a> {
    /// Create a canvas over a raw buffer
    pub fn new(
        leds: &'a mut [LedColor],
        matrix: Matrix<'a>,
        key_leds: &'a [Option<u16>],
        settings: Settings,
    ) -> Self {
        Self {
            leds,
            matrix,
            key_leds,
            settings,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn num_leds(&self) -> u16 {
        self.leds.len() as u16
    }

    pub fn matrix(&self) -> Matrix<'a> {
        self.matrix
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn leds(&self) -> &[LedColor] {
        &*self.leds
    }

    pub fn led(&self, led: u16) -> Option<LedColor> {
        self.leds.get(usize::from(led)).copied()
    }

    pub fn led_for_key(&self, key: u16) -> Option<u16> {
        self.key_leds.get(usize::from(key)).copied().flatten()
    }

    /// Set every LED
    pub fn fill(&mut self, color: LedColor) {
        self.leds.fill(color);
    }

    /// Set one LED
    pub fn set_pixel(&mut self, led: u16, color: LedColor) {
        if let Some(slot) = self.slot(led) {
            *slot = color;
        }
    }

    /// Set the LED under a key; keys without an LED are skipped
    pub fn set_pixel_by_key(&mut self, key: u16, color: LedColor) {
        if let Some(led) = self.led_for_key(key) {
            self.set_pixel(led, color);
        }
    }

    /// Set only the value of one LED
    pub fn set_value(&mut self, led: u16, val: f32) {
        if let Some(slot) = self.slot(led) {
            slot.val = val.clamp(0.0, 1.0);
        }
    }

    /// Set hue and saturation of every LED, keeping their values
    pub fn tint_all(&mut self, hue: u8, sat: f32) {
        let sat = sat.clamp(0.0, 1.0);
        for led in self.leds.iter_mut() {
            led.hue = hue;
            led.sat = sat;
        }
    }

    /// Lower the value of every LED by `amount`, stopping at zero
    pub fn fade_all(&mut self, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        for led in self.leds.iter_mut() {
            led.val = (led.val - amount).max(0.0);
        }
    }

    /// Lower the value of one LED by `amount`, stopping at zero
    pub fn fade_one(&mut self, led: u16, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        if let Some(slot) = self.slot(led) {
            slot.val = (slot.val - amount).max(0.0);
        }
    }

    fn slot(&mut self, led: u16) -> Option<&mut LedColor> {
        let len = self.leds.len();
        let slot = self.leds.get_mut(usize::from(led));
        debug_assert!(slot.is_some(), "LED {led} is outside of a {len} LED strip");
        slot
    }
}

/// RGB controller
///
/// * `D` - strip driver
/// * `P` - power-enable pin of the LED supply
/// * `ROWS`, `COLS` - matrix size
/// * `LEDS` - capacity of the LED state buffer
pub struct RgbController<D, P, const ROWS: usize, const COLS: usize, const LEDS: usize> {
    driver: D,
    power_pin: P,
    topology: Topology<ROWS, COLS>,
    leds: [LedColor; LEDS],
    settings: Settings,
    channel_order: ChannelOrder,
    gamma: bool,
    hue_step: u8,
    saturation_step: u8,
    brightness_step: u8,
}

impl<D, P, const ROWS: usize, const COLS: usize, const LEDS: usize>
    RgbController<D, P, ROWS, COLS, LEDS>
where
    D: SmartLedsWrite<Color = Rgb>,
    P: OutputPin,
{
    /// Create a controller
    ///
    /// Does not touch the hardware; call [`Self::begin`] before the first
    /// frame. Fails when the strip does not fit in `LEDS` or the matrix
    /// holds more than [`MAX_PATH_LEN`] LEDs.
    pub fn new(
        driver: D,
        power_pin: P,
        topology: Topology<ROWS, COLS>,
        config: &LightingConfig,
    ) -> Result<Self> {
        if usize::from(topology.num_leds()) > LEDS {
            return Err(Error::TooManyLeds(topology.num_leds()));
        }
        let path_len = topology.matrix().serpentine().count();
        if path_len > MAX_PATH_LEN {
            return Err(Error::MatrixTooLarge(path_len));
        }
        Ok(Self {
            driver,
            power_pin,
            topology,
            leds: [LedColor::BLACK; LEDS],
            settings: Settings::new(config),
            channel_order: config.channel_order,
            gamma: config.gamma,
            hue_step: config.hue_step.max(1),
            saturation_step: config.saturation_step,
            brightness_step: config.brightness_step,
        })
    }

    /// Apply the initial power state and blank the strip
    pub fn begin(&mut self) -> core::result::Result<(), HardwareError<D::Error, P::Error>> {
        self.apply_power().map_err(HardwareError::PowerPin)?;
        self.canvas().fill(LedColor::BLACK);
        self.show().map_err(HardwareError::Strip)
    }

    /// Borrow the LED state buffer for drawing
    pub fn canvas(&mut self) -> Canvas<'_> {
        let len = usize::from(self.topology.num_leds());
        Canvas::new(
            &mut self.leds[..len],
            self.topology.matrix(),
            self.topology.key_leds(),
            self.settings,
        )
    }

    /// Pack the state buffer and write it to the strip
    ///
    /// A powered-off controller writes black.
    pub fn show(&mut self) -> core::result::Result<(), D::Error> {
        let len = usize::from(self.topology.num_leds());
        let order = self.channel_order;
        let is_on = self.settings.is_on;
        let pixels = self.leds[..len].iter().map(move |led| {
            if is_on {
                led.to_rgb()
            } else {
                Rgb::default()
            }
        });

        if self.gamma {
            self.driver.write(gamma(pixels).map(|color| order.apply(color)))
        } else {
            self.driver.write(pixels.map(|color| order.apply(color)))
        }
    }

    pub fn fill(&mut self, color: LedColor) {
        self.canvas().fill(color);
    }

    pub fn set_pixel(&mut self, led: u16, color: LedColor) {
        self.canvas().set_pixel(led, color);
    }

    pub fn set_pixel_by_key(&mut self, key: u16, color: LedColor) {
        self.canvas().set_pixel_by_key(key, color);
    }

    pub fn fade_all(&mut self, amount: f32) {
        self.canvas().fade_all(amount);
    }

    pub fn fade_one(&mut self, led: u16, amount: f32) {
        self.canvas().fade_one(led, amount);
    }

    /// Flip the power state
    pub fn toggle(&mut self) -> core::result::Result<(), P::Error> {
        self.set_power(!self.settings.is_on)
    }

    pub fn set_power(&mut self, on: bool) -> core::result::Result<(), P::Error> {
        self.settings.is_on = on;
        #[cfg(feature = "esp32-log")]
        println!("[RgbController.set_power] power {}", if on { "on" } else { "off" });
        self.apply_power()
    }

    fn apply_power(&mut self) -> core::result::Result<(), P::Error> {
        self.power_pin
            .set_state(PinState::from(self.settings.is_on))
    }

    /// Advance the hue by one step
    ///
    /// Off-grid hues snap up to the next step. Cycling passes through the
    /// startup hue exactly, even when it is not a multiple of the step.
    #[allow(clippy::cast_possible_truncation)]
    pub fn cycle_hue(&mut self) {
        let step = u16::from(self.hue_step);
        let hue = u16::from(self.settings.hue);
        let default = u16::from(self.settings.default_hue);

        let next = if hue % step == 0 {
            if default - default % step == hue && hue != default {
                default
            } else {
                hue + step
            }
        } else {
            hue - hue % step + step
        };
        self.settings.hue = (next % 256) as u8;
    }

    pub fn raise_saturation(&mut self) {
        self.settings.saturation = self.settings.saturation.saturating_add(self.saturation_step);
    }

    pub fn lower_saturation(&mut self) {
        self.settings.saturation = self.settings.saturation.saturating_sub(self.saturation_step);
    }

    pub fn raise_brightness(&mut self) {
        self.settings.brightness = self.settings.brightness.saturating_add(self.brightness_step);
    }

    pub fn lower_brightness(&mut self) {
        self.settings.brightness = self.settings.brightness.saturating_sub(self.brightness_step);
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn topology(&self) -> &Topology<ROWS, COLS> {
        &self.topology
    }

    /// LED state buffer, one entry per strip LED
    pub fn leds(&self) -> &[LedColor] {
        &self.leds[..usize::from(self.topology.num_leds())]
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn power_pin(&self) -> &P {
        &self.power_pin
    }
}
