//! Linebot - Line-Following Robot Firmware
//!
//! Main firmware binary for RP2040-based two-wheel line followers.
//! A single control loop fuses IR, ultrasonic and IMU readings, picks a
//! drive command and actuates the H-bridge; the network bridge on UART0
//! carries remote commands in and telemetry out.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::{Delay, Duration, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use linebot_core::config::{parse_config, RobotConfig};
use linebot_core::control::NavigationController;
use linebot_core::sensor::SensorFrameBuilder;
use linebot_core::traits::DriveActuator;
use linebot_drivers::motor::{Tb6612, Tb6612Pins};
use linebot_drivers::sensor::{HcSr04, IrLineSensor, Mpu6050};
use linebot_hal::i2c::I2cConfig;
use linebot_hal_rp2040::pwm::motor_channel;
use linebot_hal_rp2040::{Board, EmbassyClock, RpI2c, RpInput, RpOutput};

use crate::context::SyncContext;

/// Embedded configuration (compiled into firmware)
/// Edit robot.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../robot.toml");

mod channels;
mod context;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

static CONTEXT: StaticCell<SyncContext> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Linebot firmware starting...");

    let p = embassy_rp::init(Default::default());
    let board = Board::new(p);
    info!("Peripherals initialized");

    let config = load_config();
    let nav_config = config.navigation;
    info!(
        "Navigation: period={}ms threshold={}cm stale={}ms cruise={}",
        nav_config.control_period_ms,
        nav_config.obstacle_threshold_cm,
        nav_config.staleness_window_ms,
        nav_config.cruise_speed
    );

    // Motors
    let motor = board.motor;
    let (Some(pwm_a), Some(pwm_b)) = (
        motor_channel(motor.pwma_slice, motor.pwma),
        motor_channel(motor.pwmb_slice, motor.pwmb),
    ) else {
        error!("Motor PWM setup failed");
        loop {
            Timer::after(Duration::from_secs(1)).await;
        }
    };
    let mut drive = Tb6612::new(
        Tb6612Pins {
            ain1: RpOutput::new(motor.ain1),
            ain2: RpOutput::new(motor.ain2),
            bin1: RpOutput::new(motor.bin1),
            bin2: RpOutput::new(motor.bin2),
            stby: RpOutput::new(motor.stby),
        },
        pwm_a,
        pwm_b,
    );
    info!("Motor driver initialized");

    // Sensors
    let sensors = board.sensors;
    let left = IrLineSensor::new(RpInput::new(sensors.ir_left), config.sensors.ir_left_inverted);
    let right = IrLineSensor::new(
        RpInput::new(sensors.ir_right),
        config.sensors.ir_right_inverted,
    );
    let range = HcSr04::new(
        RpOutput::new(sensors.trigger),
        RpInput::pull_down(sensors.echo),
        EmbassyClock,
        Delay,
        config.sensors.echo_timeout_us,
    );

    let i2c = RpI2c::new(sensors.i2c, sensors.scl, sensors.sda, I2cConfig::FAST);
    let mut imu = Mpu6050::new(i2c);
    if let Err(e) = imu.init() {
        error!("IMU init failed: {:?}", e);
        drive.enable(false);
        loop {
            Timer::after(Duration::from_secs(1)).await;
        }
    }
    info!("Sensors initialized");

    let frames = SensorFrameBuilder::new(left, right, range, imu);
    let nav = NavigationController::from_config(&nav_config);

    // Bridge UART (115200 baud default)
    let bridge = board.bridge;
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(bridge.uart, bridge.tx, bridge.rx, UartConfig::default());
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();
    info!("UART initialized for bridge communication");

    let ctx: &'static SyncContext = CONTEXT.init(SyncContext::new(nav_config.cruise_speed));

    spawner
        .spawn(tasks::control_task(
            frames,
            nav,
            drive,
            ctx,
            nav_config.control_period_ms,
        ))
        .unwrap();
    spawner.spawn(tasks::bridge_rx_task(rx, ctx)).unwrap();
    spawner
        .spawn(tasks::bridge_tx_task(
            tx,
            ctx,
            config.bridge.telemetry_interval_ms,
            nav_config.cruise_speed,
        ))
        .unwrap();

    info!("All tasks spawned, entering main loop");

    loop {
        Timer::after(Duration::from_secs(10)).await;
        trace!("Main loop heartbeat");
    }
}

/// Parse the embedded configuration, falling back to defaults
fn load_config() -> RobotConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Configuration loaded from robot.toml");
            config
        }
        Err(e) => {
            warn!("Invalid robot.toml ({:?}), using defaults", e);
            RobotConfig::default()
        }
    }
}
