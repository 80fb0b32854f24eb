//! Sensor frame builder
//!
//! Polls every sensor once and packs the results into a [`SensorFrame`].
//! Sensor failures degrade the frame instead of failing the cycle:
//! a missing echo is already [`Distance::NoEcho`](super::Distance) and an
//! inertial read error leaves `orientation` empty.

use crate::traits::{InertialSensor, LineSensor, RangeSensor};

use super::SensorFrame;

/// Builds one [`SensorFrame`] per call from the robot's sensors
pub struct SensorFrameBuilder<L, R, U, I> {
    left: L,
    right: R,
    range: U,
    imu: I,
    /// Consecutive cycles with a failed inertial read
    imu_failures: u16,
}

impl<L, R, U, I> SensorFrameBuilder<L, R, U, I>
where
    L: LineSensor,
    R: LineSensor,
    U: RangeSensor,
    I: InertialSensor,
{
    /// Create a builder from the left/right IR sensors, the rangefinder
    /// and the inertial sensor
    pub fn new(left: L, right: R, range: U, imu: I) -> Self {
        Self {
            left,
            right,
            range,
            imu,
            imu_failures: 0,
        }
    }

    /// Poll all sensors and build a frame stamped with `now_ms`
    pub fn build(&mut self, now_ms: u32) -> SensorFrame {
        let left_ir = self.left.line_detected();
        let right_ir = self.right.line_detected();
        let distance = self.range.measure();

        let orientation = match self.imu.read() {
            Ok(reading) => {
                self.imu_failures = 0;
                Some(reading)
            }
            Err(_) => {
                self.imu_failures = self.imu_failures.saturating_add(1);
                None
            }
        };

        SensorFrame {
            left_ir,
            right_ir,
            distance,
            orientation,
            timestamp_ms: now_ms,
        }
    }

    /// Number of consecutive frames built without an inertial reading
    pub fn imu_failures(&self) -> u16 {
        self.imu_failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::{Distance, InertialReading, Vector3};
    use crate::traits::SensorError;

    struct FixedLine(bool);

    impl LineSensor for FixedLine {
        fn line_detected(&mut self) -> bool {
            self.0
        }
    }

    struct FixedRange(Distance);

    impl RangeSensor for FixedRange {
        fn measure(&mut self) -> Distance {
            self.0
        }
    }

    struct FlakyImu {
        fail: bool,
    }

    impl InertialSensor for FlakyImu {
        fn read(&mut self) -> Result<InertialReading, SensorError> {
            if self.fail {
                Err(SensorError::Bus)
            } else {
                Ok(InertialReading {
                    accel_mg: Vector3::new(0, 0, 1000),
                    gyro_dps_x10: Vector3::default(),
                })
            }
        }
    }

    #[test]
    fn test_build_frame() {
        let mut builder = SensorFrameBuilder::new(
            FixedLine(true),
            FixedLine(false),
            FixedRange(Distance::Cm(42)),
            FlakyImu { fail: false },
        );

        let frame = builder.build(1234);
        assert!(frame.left_ir);
        assert!(!frame.right_ir);
        assert_eq!(frame.distance, Distance::Cm(42));
        assert_eq!(frame.orientation.unwrap().accel_mg.z, 1000);
        assert_eq!(frame.timestamp_ms, 1234);
    }

    #[test]
    fn test_imu_failure_degrades() {
        let mut builder = SensorFrameBuilder::new(
            FixedLine(false),
            FixedLine(false),
            FixedRange(Distance::NoEcho),
            FlakyImu { fail: true },
        );

        let frame = builder.build(0);
        assert_eq!(frame.orientation, None);
        assert_eq!(frame.distance, Distance::NoEcho);

        builder.build(50);
        assert_eq!(builder.imu_failures(), 2);
    }
}
