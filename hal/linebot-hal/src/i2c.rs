//! I2C bus abstractions
//!
//! Register-oriented access as used by the inertial sensor.

/// I2C bus master
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `write_data` - Bytes to write (typically register address)
    /// * `read_buf` - Buffer to read into
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Write a single 8-bit register
    fn write_register(&mut self, address: u8, register: u8, value: u8) -> Result<(), Self::Error> {
        self.write(address, &[register, value])
    }

    /// Read a single 8-bit register
    fn read_register(&mut self, address: u8, register: u8) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.write_read(address, &[register], &mut buf)?;
        Ok(buf[0])
    }

    /// Burst-read consecutive registers starting at `register`
    fn read_registers(
        &mut self,
        address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.write_read(address, &[register], buf)
    }
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::FAST
    }
}

impl I2cConfig {
    /// Fast mode (400 kHz), the MPU6050 maximum
    pub const FAST: Self = Self { frequency: 400_000 };
}
