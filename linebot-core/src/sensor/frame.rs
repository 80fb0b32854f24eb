//! Sensor snapshot types

/// Speed of sound as used for echo conversion: 0.034 cm/µs, as 17/1000 for
/// the halved round trip
const ECHO_CM_NUM: u32 = 17;
const ECHO_CM_DEN: u32 = 1_000;

/// Ultrasonic range reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Distance {
    /// Measured distance in centimeters
    Cm(u16),
    /// No echo within the timeout
    NoEcho,
}

impl Distance {
    /// Convert an echo pulse width to a distance
    ///
    /// `distance = duration_us * 0.034 / 2`, truncated to whole centimeters.
    pub fn from_echo_us(duration_us: u32) -> Self {
        let cm = duration_us as u64 * ECHO_CM_NUM as u64 / ECHO_CM_DEN as u64;
        Distance::Cm(cm.min(u16::MAX as u64) as u16)
    }

    /// Distance in centimeters, or `None` for no echo
    pub fn cm(self) -> Option<u16> {
        match self {
            Distance::Cm(cm) => Some(cm),
            Distance::NoEcho => None,
        }
    }
}

/// Three-axis integer vector in raw sensor counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vector3 {
    /// X axis, sensor frame
    pub x: i16,
    /// Y axis, sensor frame
    pub y: i16,
    /// Z axis, sensor frame
    pub z: i16,
}

impl Vector3 {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }
}

/// Inertial sensor reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InertialReading {
    /// Acceleration in milli-g
    pub accel_mg: Vector3,
    /// Angular rate in 0.1 °/s units (e.g., 125 = 12.5 °/s)
    pub gyro_dps_x10: Vector3,
}

/// One timestamped snapshot of every sensor
///
/// Built once per control cycle and never modified afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorFrame {
    /// Left IR sensor sees the black line
    pub left_ir: bool,
    /// Right IR sensor sees the black line
    pub right_ir: bool,
    /// Ultrasonic distance ahead
    pub distance: Distance,
    /// Inertial reading, `None` if the read failed this cycle
    pub orientation: Option<InertialReading>,
    /// Monotonic timestamp in milliseconds
    pub timestamp_ms: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_conversion() {
        // 1000 µs round trip = 17 cm
        assert_eq!(Distance::from_echo_us(1_000), Distance::Cm(17));
        // 588 µs * 0.017 = 9.996 → truncates to 9
        assert_eq!(Distance::from_echo_us(588), Distance::Cm(9));
        assert_eq!(Distance::from_echo_us(0), Distance::Cm(0));
    }

    #[test]
    fn test_echo_conversion_saturates() {
        assert_eq!(Distance::from_echo_us(u32::MAX), Distance::Cm(u16::MAX));
    }

    #[test]
    fn test_cm_accessor() {
        assert_eq!(Distance::Cm(42).cm(), Some(42));
        assert_eq!(Distance::NoEcho.cm(), None);
    }
}
