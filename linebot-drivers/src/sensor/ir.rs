//! Digital IR reflectance sensor
//!
//! The common comparator modules pull their output LOW over a dark surface.
//! Modules wired the other way round are configured as `inverted`.

use linebot_core::traits::LineSensor;
use linebot_hal::InputPin;

/// IR line sensor on a single digital input
pub struct IrLineSensor<P> {
    pin: P,
    inverted: bool,
}

impl<P: InputPin> IrLineSensor<P> {
    /// Create a sensor; `inverted` means the module reads HIGH on black
    pub fn new(pin: P, inverted: bool) -> Self {
        Self { pin, inverted }
    }

    /// Check if the output polarity is inverted
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }
}

impl<P: InputPin> LineSensor for IrLineSensor<P> {
    fn line_detected(&mut self) -> bool {
        self.pin.is_low() != self.inverted
    }
}
