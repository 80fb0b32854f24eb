//! Navigation control task
//!
//! One fixed-period loop: build a sensor frame, run the navigation step,
//! actuate the motors, hand the result to the bridge side.

use defmt::*;
use embassy_rp::peripherals::I2C0;
use embassy_rp::pwm::PwmOutput;
use embassy_time::{Delay, Duration, Ticker};

use linebot_core::control::{CheckpointPhase, NavigationController};
use linebot_core::sensor::SensorFrameBuilder;
use linebot_core::traits::DriveActuator;
use linebot_core::Telemetry;
use linebot_drivers::motor::Tb6612;
use linebot_drivers::sensor::{HcSr04, IrLineSensor, Mpu6050};
use linebot_hal::MonotonicClock;
use linebot_hal_rp2040::{EmbassyClock, RpI2c, RpInput, RpOutput};

use crate::context::SyncContext;

/// Motor driver as wired on the board
pub type Drive = Tb6612<RpOutput<'static>, PwmOutput<'static>>;

/// Sensor front-end as wired on the board
pub type Frames = SensorFrameBuilder<
    IrLineSensor<RpInput<'static>>,
    IrLineSensor<RpInput<'static>>,
    HcSr04<RpOutput<'static>, RpInput<'static>, EmbassyClock, Delay>,
    Mpu6050<RpI2c<'static, I2C0>>,
>;

/// Control task - runs the navigation loop at `period_ms`
#[embassy_executor::task]
pub async fn control_task(
    mut frames: Frames,
    mut nav: NavigationController,
    mut drive: Drive,
    ctx: &'static SyncContext,
    period_ms: u32,
) {
    info!("Control task started ({} ms period)", period_ms);

    let clock = EmbassyClock;
    let mut ticker = Ticker::every(Duration::from_millis(period_ms as u64));
    let mut checkpoint = CheckpointPhase::Following;

    loop {
        let now_ms = clock.now_ms();
        let frame = frames.build(now_ms);
        let remote = ctx.remote();

        let decision = nav.step(&frame, &remote, now_ms);
        drive.drive(decision.command);

        if decision.changed {
            debug!(
                "Drive {} {} ({})",
                decision.command.direction.as_str(),
                decision.command.speed,
                decision.reason.as_str()
            );
        }
        if decision.checkpoint != checkpoint {
            info!(
                "Checkpoint {} -> {}",
                checkpoint.as_str(),
                decision.checkpoint.as_str()
            );
            checkpoint = decision.checkpoint;
        }
        trace!("Frame: {:?}", frame);

        if frames.imu_failures() == 1 {
            warn!("IMU read failed, continuing without orientation");
        }

        ctx.publish_telemetry(Telemetry::new(frame, &decision, remote.mode));

        ticker.next().await;
    }
}
