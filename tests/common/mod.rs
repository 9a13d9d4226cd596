#![allow(dead_code, unreachable_pub)]

use std::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use keyglow::{
    LightingConfig, RgbController, Rgb, Topology, TopologyConfig,
    topology::Layout,
};
use smart_leds::SmartLedsWrite;

/// Strip driver recording every written frame
#[derive(Debug, Default)]
pub struct MockStrip {
    pub frames: Vec<Vec<Rgb>>,
}

impl MockStrip {
    pub fn last_frame(&self) -> &[Rgb] {
        match self.frames.last() {
            Some(frame) => frame,
            None => &[],
        }
    }
}

impl SmartLedsWrite for MockStrip {
    type Error = Infallible;
    type Color = Rgb;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        self.frames.push(iterator.into_iter().map(Into::into).collect());
        Ok(())
    }
}

/// Strip driver whose transport always fails
#[derive(Debug, Default)]
pub struct FailingStrip;

impl SmartLedsWrite for FailingStrip {
    type Error = &'static str;
    type Color = Rgb;

    fn write<T, I>(&mut self, _iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        Err("transport down")
    }
}

/// Power pin recording every level it was driven to
#[derive(Debug, Default)]
pub struct MockPin {
    pub states: Vec<bool>,
}

impl MockPin {
    pub fn is_high(&self) -> Option<bool> {
        self.states.last().copied()
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.states.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.states.push(true);
        Ok(())
    }
}

pub type TestController = RgbController<MockStrip, MockPin, 2, 3, 6>;

/// 2x3 keyboard, keys and LEDs both numbered row-major
pub fn topology_2x3() -> Topology<2, 3> {
    Topology::build(&TopologyConfig::new(Layout::row_major(), 6)).unwrap()
}

pub fn controller_2x3() -> TestController {
    controller_with(topology_2x3(), &LightingConfig::default())
}

pub fn controller_with(topology: Topology<2, 3>, config: &LightingConfig) -> TestController {
    RgbController::new(MockStrip::default(), MockPin::default(), topology, config).unwrap()
}

/// LEDs with a non-zero value
pub fn lit(controller: &TestController) -> Vec<u16> {
    (0u16..)
        .zip(controller.leds())
        .filter(|(_, led)| led.val > 0.0)
        .map(|(i, _)| i)
        .collect()
}

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}
