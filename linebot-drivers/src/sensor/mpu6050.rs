//! MPU6050 accelerometer/gyroscope over I2C
//!
//! Configured for +-8 g, +-500 deg/s and the 5 Hz digital low-pass filter.
//! Readings are converted to milli-g and tenths of a degree per second.

use linebot_core::sensor::{InertialReading, Vector3};
use linebot_core::traits::{InertialSensor, SensorError};
use linebot_hal::I2cBus;

/// Default 7-bit address (AD0 low)
pub const DEFAULT_ADDRESS: u8 = 0x68;

/// Expected WHO_AM_I value
const DEVICE_ID: u8 = 0x68;

mod reg {
    pub const CONFIG: u8 = 0x1A;
    pub const GYRO_CONFIG: u8 = 0x1B;
    pub const ACCEL_CONFIG: u8 = 0x1C;
    pub const ACCEL_XOUT_H: u8 = 0x3B;
    pub const PWR_MGMT_1: u8 = 0x6B;
    pub const WHO_AM_I: u8 = 0x75;
}

/// DLPF_CFG = 6: 5 Hz bandwidth
const DLPF_5HZ: u8 = 0x06;
/// FS_SEL = 1: +-500 deg/s
const GYRO_500DPS: u8 = 0x08;
/// AFS_SEL = 2: +-8 g
const ACCEL_8G: u8 = 0x10;

/// LSB per g at +-8 g
const ACCEL_LSB_PER_G: i32 = 4096;
/// LSB per deg/s at +-500 deg/s, times 10
const GYRO_LSB_PER_DPS_X10: i32 = 655;

/// Burst length: accel (6), temperature (2), gyro (6)
const SAMPLE_LEN: usize = 14;

/// MPU6050 errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImuError {
    /// No answer on the bus
    NotFound,
    /// WHO_AM_I returned something else
    WrongDevice(u8),
    /// Transfer failed after the device was found
    Bus,
}

impl From<ImuError> for SensorError {
    fn from(err: ImuError) -> Self {
        match err {
            ImuError::NotFound => SensorError::NotFound,
            ImuError::WrongDevice(_) => SensorError::WrongDevice,
            ImuError::Bus => SensorError::Bus,
        }
    }
}

/// MPU6050 driver
pub struct Mpu6050<I> {
    i2c: I,
    address: u8,
}

impl<I: I2cBus> Mpu6050<I> {
    /// Create a driver at the default address
    pub fn new(i2c: I) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Create a driver at a specific address (0x69 with AD0 high)
    pub fn with_address(i2c: I, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Check identity, wake the device and set ranges and filter
    pub fn init(&mut self) -> Result<(), ImuError> {
        let id = self
            .i2c
            .read_register(self.address, reg::WHO_AM_I)
            .map_err(|_| ImuError::NotFound)?;
        if id != DEVICE_ID {
            return Err(ImuError::WrongDevice(id));
        }

        self.write(reg::PWR_MGMT_1, 0x00)?;
        self.write(reg::ACCEL_CONFIG, ACCEL_8G)?;
        self.write(reg::GYRO_CONFIG, GYRO_500DPS)?;
        self.write(reg::CONFIG, DLPF_5HZ)?;
        Ok(())
    }

    fn write(&mut self, register: u8, value: u8) -> Result<(), ImuError> {
        self.i2c
            .write_register(self.address, register, value)
            .map_err(|_| ImuError::Bus)
    }

    /// Read one sample of acceleration and angular rate
    pub fn read_sample(&mut self) -> Result<InertialReading, ImuError> {
        let mut buf = [0u8; SAMPLE_LEN];
        self.i2c
            .read_registers(self.address, reg::ACCEL_XOUT_H, &mut buf)
            .map_err(|_| ImuError::Bus)?;
        Ok(convert(&buf))
    }

    /// Release the bus
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2cBus> InertialSensor for Mpu6050<I> {
    fn read(&mut self) -> Result<InertialReading, SensorError> {
        Ok(self.read_sample()?)
    }
}

fn word(buf: &[u8], offset: usize) -> i32 {
    i16::from_be_bytes([buf[offset], buf[offset + 1]]) as i32
}

/// Convert a raw burst into scaled units
fn convert(buf: &[u8; SAMPLE_LEN]) -> InertialReading {
    let accel = |offset| (word(buf, offset) * 1000 / ACCEL_LSB_PER_G) as i16;
    let gyro = |offset| (word(buf, offset) * 100 / GYRO_LSB_PER_DPS_X10) as i16;

    InertialReading {
        accel_mg: Vector3::new(accel(0), accel(2), accel(4)),
        gyro_dps_x10: Vector3::new(gyro(8), gyro(10), gyro(12)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Register file behind a fake bus
    struct FakeI2c {
        present: bool,
        regs: [u8; 128],
        writes: heapless::Vec<(u8, u8), 8>,
    }

    impl FakeI2c {
        fn new(who_am_i: u8) -> Self {
            let mut regs = [0u8; 128];
            regs[reg::WHO_AM_I as usize] = who_am_i;
            Self {
                present: true,
                regs,
                writes: heapless::Vec::new(),
            }
        }
    }

    impl I2cBus for FakeI2c {
        type Error = ();

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), ()> {
            if !self.present || address != DEFAULT_ADDRESS {
                return Err(());
            }
            self.regs[data[0] as usize] = data[1];
            self.writes.push((data[0], data[1])).map_err(|_| ())
        }

        fn write_read(&mut self, address: u8, write: &[u8], read: &mut [u8]) -> Result<(), ()> {
            if !self.present || address != DEFAULT_ADDRESS {
                return Err(());
            }
            let start = write[0] as usize;
            read.copy_from_slice(&self.regs[start..start + read.len()]);
            Ok(())
        }
    }

    #[test]
    fn test_init_sequence() {
        let mut imu = Mpu6050::new(FakeI2c::new(0x68));
        imu.init().unwrap();

        let bus = imu.release();
        assert_eq!(
            bus.writes.as_slice(),
            &[(0x6B, 0x00), (0x1C, 0x10), (0x1B, 0x08), (0x1A, 0x06)]
        );
    }

    #[test]
    fn test_wrong_device_rejected() {
        let mut imu = Mpu6050::new(FakeI2c::new(0x70));
        assert_eq!(imu.init(), Err(ImuError::WrongDevice(0x70)));
        assert!(imu.release().writes.is_empty());
    }

    #[test]
    fn test_missing_device() {
        let mut bus = FakeI2c::new(0x68);
        bus.present = false;
        let mut imu = Mpu6050::new(bus);
        assert_eq!(imu.init(), Err(ImuError::NotFound));
        assert_eq!(imu.read(), Err(SensorError::Bus));
    }

    #[test]
    fn test_sample_scaling() {
        let mut bus = FakeI2c::new(0x68);
        let sample: [i16; 7] = [4096, -2048, 0, 0, 655, -6550, 0];
        for (i, value) in sample.iter().enumerate() {
            let [hi, lo] = value.to_be_bytes();
            bus.regs[reg::ACCEL_XOUT_H as usize + i * 2] = hi;
            bus.regs[reg::ACCEL_XOUT_H as usize + i * 2 + 1] = lo;
        }

        let mut imu = Mpu6050::new(bus);
        let reading = imu.read().unwrap();
        assert_eq!(reading.accel_mg, Vector3::new(1000, -500, 0));
        assert_eq!(reading.gyro_dps_x10, Vector3::new(100, -1000, 0));
    }
}
