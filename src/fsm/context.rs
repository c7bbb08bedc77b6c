//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to.  It contains the commanded output levels, timing information,
//! and configuration.  Think of it as the "blackboard" in a blackboard
//! architecture.

use crate::config::SystemConfig;

// ---------------------------------------------------------------------------
// Output commands (written by state handlers; consumed by the service)
// ---------------------------------------------------------------------------

/// Commanded levels for the three alarm outputs.
/// State handlers write these; the service applies them to the actual
/// drivers after each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputCommands {
    /// Indicator A level (`true` = high).
    pub indicator_a: bool,
    /// Indicator B level (`true` = high).
    pub indicator_b: bool,
    /// Buzzer level (`true` = sounding).
    pub buzzer: bool,
}

impl OutputCommands {
    /// All outputs low — safe default.
    pub fn all_off() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- Timing --
    /// Ticks elapsed since the current state was entered.
    pub ticks_in_state: u64,
    /// Monotonic total tick count.
    pub total_ticks: u64,
    /// Duration of one tick in seconds (inverse of control loop frequency).
    pub tick_period_secs: f32,

    // -- Output levels --
    /// Commands to be applied to the outputs after the FSM tick.
    pub commands: OutputCommands,

    // -- Configuration --
    /// System configuration (tunable parameters).
    pub config: SystemConfig,
}

impl FsmContext {
    /// Create a new context with the given configuration.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            ticks_in_state: 0,
            total_ticks: 0,
            tick_period_secs: config.control_loop_interval_ms as f32 / 1000.0,
            commands: OutputCommands::all_off(),
            config,
        }
    }

    /// Current half-period index within the flashing sequence.
    pub fn flash_phase(&self) -> u64 {
        self.ticks_in_state / self.config.ticks_per_phase()
    }

    /// Seconds elapsed since the current state was entered.
    pub fn secs_in_state(&self) -> f32 {
        self.ticks_in_state as f32 * self.tick_period_secs
    }
}
