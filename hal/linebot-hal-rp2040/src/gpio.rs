//! GPIO wrappers
//!
//! Thin newtypes over embassy-rp `Output`/`Input` implementing the
//! `linebot-hal` pin traits.

use embassy_rp::gpio::{Input, Level, Output, Pin, Pull};
use embassy_rp::Peri;

/// Push-pull output pin
pub struct RpOutput<'d>(Output<'d>);

impl<'d> RpOutput<'d> {
    /// Configure `pin` as an output starting LOW
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        Self(Output::new(pin, Level::Low))
    }
}

impl linebot_hal::OutputPin for RpOutput<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Digital input pin
pub struct RpInput<'d>(Input<'d>);

impl<'d> RpInput<'d> {
    /// Configure `pin` as a floating input (module drives the line)
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        Self(Input::new(pin, Pull::None))
    }

    /// Configure `pin` as an input with a pull-down
    pub fn pull_down(pin: Peri<'d, impl Pin>) -> Self {
        Self(Input::new(pin, Pull::Down))
    }
}

impl linebot_hal::InputPin for RpInput<'_> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}
