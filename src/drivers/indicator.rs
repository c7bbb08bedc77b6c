//! Indicator LED driver.
//!
//! A dumb binary output: the FSM decides levels, this driver just writes
//! them and shadows the last commanded level for read-back.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives a real GPIO via hw_init.
//! On host/test: tracks state in-memory only.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};

use crate::drivers::hw_init;

pub struct IndicatorDriver {
    pin: i32,
    level: bool,
}

impl IndicatorDriver {
    /// Create a driver for the given output pin, assumed initialised low.
    pub fn new(pin: i32) -> Self {
        Self { pin, level: false }
    }

    pub fn set(&mut self, high: bool) {
        hw_init::gpio_write(self.pin, high);
        self.level = high;
    }

    pub fn off(&mut self) {
        self.set(false);
    }

    pub fn is_high(&self) -> bool {
        self.level
    }
}

// The driver doubles as an embedded-hal output pin so it can slot into
// any HAL-generic consumer.  GPIO writes cannot fail once configured.

impl ErrorType for IndicatorDriver {
    type Error = Infallible;
}

impl OutputPin for IndicatorDriver {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pins;

    #[test]
    fn hal_pin_interface_tracks_level() {
        let mut led = IndicatorDriver::new(pins::INDICATOR_A_GPIO);
        OutputPin::set_high(&mut led).unwrap();
        assert!(led.is_high());
        OutputPin::set_low(&mut led).unwrap();
        assert!(!led.is_high());
    }
}
