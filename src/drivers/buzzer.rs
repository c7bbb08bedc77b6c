//! Piezo buzzer driver.
//!
//! The buzzer is a plain on/off line through a driver transistor; no PWM
//! tone shaping.  Levels come from the FSM, this driver just writes them.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the buzzer GPIO via hw_init.
//! On host/test: tracks state in-memory only.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};

use crate::drivers::hw_init;
use crate::pins;

pub struct BuzzerDriver {
    level: bool,
}

impl BuzzerDriver {
    pub fn new() -> Self {
        Self { level: false }
    }

    pub fn set(&mut self, sounding: bool) {
        hw_init::gpio_write(pins::BUZZER_GPIO, sounding);
        self.level = sounding;
    }

    pub fn off(&mut self) {
        self.set(false);
    }

    pub fn is_sounding(&self) -> bool {
        self.level
    }
}

impl ErrorType for BuzzerDriver {
    type Error = Infallible;
}

impl OutputPin for BuzzerDriver {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true);
        Ok(())
    }
}
