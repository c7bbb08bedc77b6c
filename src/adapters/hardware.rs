//! Hardware adapter — bridges real output drivers to the domain port.
//!
//! Owns the two indicator drivers and the buzzer driver, exposing them
//! through [`OutputPort`].  This is the only module in the system that
//! commands actual hardware.  On non-espidf targets, the underlying
//! drivers use cfg-gated simulation stubs.

use crate::app::ports::OutputPort;
use crate::drivers::buzzer::BuzzerDriver;
use crate::drivers::indicator::IndicatorDriver;

/// Concrete adapter that combines all outputs behind the port trait.
pub struct HardwareAdapter {
    indicator_a: IndicatorDriver,
    indicator_b: IndicatorDriver,
    buzzer: BuzzerDriver,
}

impl HardwareAdapter {
    pub fn new(
        indicator_a: IndicatorDriver,
        indicator_b: IndicatorDriver,
        buzzer: BuzzerDriver,
    ) -> Self {
        Self {
            indicator_a,
            indicator_b,
            buzzer,
        }
    }

    /// Last commanded levels `(A, B, buzzer)` — for diagnostics.
    pub fn levels(&self) -> (bool, bool, bool) {
        (
            self.indicator_a.is_high(),
            self.indicator_b.is_high(),
            self.buzzer.is_sounding(),
        )
    }
}

// ── OutputPort implementation ─────────────────────────────────

impl OutputPort for HardwareAdapter {
    fn set_indicator_a(&mut self, high: bool) {
        self.indicator_a.set(high);
    }

    fn set_indicator_b(&mut self, high: bool) {
        self.indicator_b.set(high);
    }

    fn set_buzzer(&mut self, high: bool) {
        self.buzzer.set(high);
    }

    fn all_off(&mut self) {
        self.indicator_a.off();
        self.indicator_b.off();
        self.buzzer.off();
    }
}
