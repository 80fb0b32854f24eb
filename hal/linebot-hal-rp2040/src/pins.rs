//! Board pin map
//!
//! | Function          | GPIO | Peripheral       |
//! |-------------------|------|------------------|
//! | Bridge TX / RX    | 0/1  | UART0            |
//! | AIN1 / AIN2       | 2/3  |                  |
//! | PWMA              | 4    | PWM slice 2 A    |
//! | BIN1 / BIN2       | 6/7  |                  |
//! | PWMB              | 8    | PWM slice 4 A    |
//! | STBY              | 9    |                  |
//! | IR left / right   | 10/11|                  |
//! | Ultrasonic TRIG   | 14   |                  |
//! | Ultrasonic ECHO   | 15   |                  |
//! | IMU SDA / SCL     | 16/17| I2C0             |

use embassy_rp::peripherals::{
    I2C0, PIN_0, PIN_1, PIN_10, PIN_11, PIN_14, PIN_15, PIN_16, PIN_17, PIN_2, PIN_3, PIN_4,
    PIN_6, PIN_7, PIN_8, PIN_9, PWM_SLICE2, PWM_SLICE4, UART0,
};
use embassy_rp::{Peri, Peripherals};

/// Bridge UART pins
pub struct BridgePins {
    pub uart: Peri<'static, UART0>,
    pub tx: Peri<'static, PIN_0>,
    pub rx: Peri<'static, PIN_1>,
}

/// H-bridge pins and PWM slices
pub struct MotorPins {
    pub ain1: Peri<'static, PIN_2>,
    pub ain2: Peri<'static, PIN_3>,
    pub pwma: Peri<'static, PIN_4>,
    pub pwma_slice: Peri<'static, PWM_SLICE2>,
    pub bin1: Peri<'static, PIN_6>,
    pub bin2: Peri<'static, PIN_7>,
    pub pwmb: Peri<'static, PIN_8>,
    pub pwmb_slice: Peri<'static, PWM_SLICE4>,
    pub stby: Peri<'static, PIN_9>,
}

/// Sensor pins
pub struct SensorPins {
    pub ir_left: Peri<'static, PIN_10>,
    pub ir_right: Peri<'static, PIN_11>,
    pub trigger: Peri<'static, PIN_14>,
    pub echo: Peri<'static, PIN_15>,
    pub i2c: Peri<'static, I2C0>,
    pub sda: Peri<'static, PIN_16>,
    pub scl: Peri<'static, PIN_17>,
}

/// All peripherals the robot uses, grouped by function
pub struct Board {
    pub bridge: BridgePins,
    pub motor: MotorPins,
    pub sensors: SensorPins,
}

impl Board {
    /// Split the peripheral singletons into the board groups
    pub fn new(p: Peripherals) -> Self {
        Self {
            bridge: BridgePins {
                uart: p.UART0,
                tx: p.PIN_0,
                rx: p.PIN_1,
            },
            motor: MotorPins {
                ain1: p.PIN_2,
                ain2: p.PIN_3,
                pwma: p.PIN_4,
                pwma_slice: p.PWM_SLICE2,
                bin1: p.PIN_6,
                bin2: p.PIN_7,
                pwmb: p.PIN_8,
                pwmb_slice: p.PWM_SLICE4,
                stby: p.PIN_9,
            },
            sensors: SensorPins {
                ir_left: p.PIN_10,
                ir_right: p.PIN_11,
                trigger: p.PIN_14,
                echo: p.PIN_15,
                i2c: p.I2C0,
                sda: p.PIN_16,
                scl: p.PIN_17,
            },
        }
    }
}
