//! Application service — the hexagonal core.
//!
//! [`AlarmService`] owns the FSM and shared context and exposes a clean,
//! hardware-agnostic API.  All I/O flows through port traits injected at
//! call sites, making the entire service testable with mock adapters.
//!
//! ```text
//!                ┌────────────────────────┐ ──▶ EventSink
//!                │      AlarmService       │
//!  OutputPort ◀──│      FSM · timing       │
//!                └────────────────────────┘
//! ```

use log::info;

use crate::config::SystemConfig;
use crate::fsm::context::FsmContext;
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};

use super::commands::AlarmCommand;
use super::events::{AppEvent, TelemetryData};
use super::ports::{EventSink, OutputPort};

// ───────────────────────────────────────────────────────────────
// AlarmService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AlarmService {
    fsm: Fsm,
    ctx: FsmContext,
    tick_count: u64,
}

impl AlarmService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM — call [`AlarmService::start`] next.
    pub fn new(config: SystemConfig) -> Self {
        let ctx = FsmContext::new(config);
        let state_table = build_state_table();
        let fsm = Fsm::new(state_table, StateId::Idle);

        Self {
            fsm,
            ctx,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the FSM in its default initial state (Idle).
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("AlarmService started in {:?}", self.fsm.current_state());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle: advance the FSM, then apply the commanded
    /// output levels through [`OutputPort`].
    pub fn tick(&mut self, hw: &mut impl OutputPort, sink: &mut impl EventSink) {
        self.tick_count += 1;
        let prev_state = self.fsm.current_state();

        self.fsm.tick(&mut self.ctx);
        self.apply_outputs(hw);

        let new_state = self.fsm.current_state();
        if new_state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: new_state,
            });
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command (from an HTTP route or serial console).
    ///
    /// Outputs are re-applied after every command so that `Silence` rewrites
    /// all three lines low even when the FSM was already idle.
    pub fn handle_command(
        &mut self,
        cmd: AlarmCommand,
        hw: &mut impl OutputPort,
        sink: &mut impl EventSink,
    ) {
        let prev = self.fsm.current_state();
        match cmd {
            AlarmCommand::Trigger => {
                // A trigger during a running sequence is ignored; from Idle
                // or Steady it (re)starts the sequence from phase zero.
                if prev == StateId::Flashing {
                    info!("Trigger ignored: sequence already running");
                    return;
                }
                self.fsm.force_transition(StateId::Flashing, &mut self.ctx);
            }
            AlarmCommand::Silence => {
                self.fsm.force_transition(StateId::Idle, &mut self.ctx);
            }
            AlarmCommand::ForceState(target) => {
                self.fsm.force_transition(target, &mut self.ctx);
            }
        }

        self.apply_outputs(hw);

        let new_state = self.fsm.current_state();
        if new_state != prev {
            sink.emit(&AppEvent::StateChanged {
                from: prev,
                to: new_state,
            });
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot from the current context.
    pub fn build_telemetry(&self) -> TelemetryData {
        TelemetryData {
            state: self.fsm.current_state(),
            indicator_a: self.ctx.commands.indicator_a,
            indicator_b: self.ctx.commands.indicator_b,
            buzzer: self.ctx.commands.buzzer,
            tick_count: self.tick_count,
        }
    }

    /// Current FSM state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    /// Translate FSM output commands into port calls.
    fn apply_outputs(&self, hw: &mut impl OutputPort) {
        let cmds = &self.ctx.commands;
        if *cmds == crate::fsm::context::OutputCommands::all_off() {
            hw.all_off();
        } else {
            hw.set_indicator_a(cmds.indicator_a);
            hw.set_indicator_b(cmds.indicator_b);
            hw.set_buzzer(cmds.buzzer);
        }
    }
}
