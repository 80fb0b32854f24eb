//! Blocking I2C bus
//!
//! The inertial sensor is read once per control cycle from the control
//! task itself, so the blocking driver is sufficient.

use embassy_rp::i2c::{Blocking, Config, Error, I2c, Instance, SclPin, SdaPin};
use embassy_rp::Peri;
use linebot_hal::i2c::I2cConfig;

/// I2C master in blocking mode
pub struct RpI2c<'d, T: Instance>(I2c<'d, T, Blocking>);

impl<'d, T: Instance> RpI2c<'d, T> {
    /// Set up the peripheral on the given pins
    pub fn new(
        peri: Peri<'d, T>,
        scl: Peri<'d, impl SclPin<T>>,
        sda: Peri<'d, impl SdaPin<T>>,
        config: I2cConfig,
    ) -> Self {
        let mut rp_config = Config::default();
        rp_config.frequency = config.frequency;
        Self(I2c::new_blocking(peri, scl, sda, rp_config))
    }
}

impl<T: Instance> linebot_hal::I2cBus for RpI2c<'_, T> {
    type Error = Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Error> {
        self.0.blocking_write(address, data)
    }

    fn write_read(&mut self, address: u8, write_data: &[u8], read_buf: &mut [u8]) -> Result<(), Error> {
        self.0.blocking_write_read(address, write_data, read_buf)
    }
}
