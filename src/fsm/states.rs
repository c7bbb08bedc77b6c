//! Concrete state handler functions and table builder.
//!
//! Each state is defined by three plain `fn` pointers — no closures, no
//! dynamic dispatch, no heap.  This is the classic embedded C FSM pattern
//! expressed in safe Rust.
//!
//! ```text
//!  IDLE ──[trigger]──▶ FLASHING ──[6 half-periods done]──▶ STEADY
//!    ▲                     │                                  │
//!    │                 [silence]                   [silence]  │ [trigger]
//!    └─────────────────────┴──────────────────────────────────┤
//!                                                  (restarts FLASHING)
//! ```
//!
//! During FLASHING the outputs alternate each half-period: indicator A and
//! the buzzer move together, indicator B opposes them.  STEADY holds
//! indicator A and the buzzer high until silenced.

use super::context::{FsmContext, OutputCommands};
use super::{StateDescriptor, StateId};
use log::info;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Idle
        StateDescriptor {
            id: StateId::Idle,
            name: "Idle",
            on_enter: Some(idle_enter),
            on_exit: None,
            on_update: idle_update,
        },
        // Index 1 — Flashing
        StateDescriptor {
            id: StateId::Flashing,
            name: "Flashing",
            on_enter: Some(flashing_enter),
            on_exit: None,
            on_update: flashing_update,
        },
        // Index 2 — Steady
        StateDescriptor {
            id: StateId::Steady,
            name: "Steady",
            on_enter: Some(steady_enter),
            on_exit: None,
            on_update: steady_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE state
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(ctx: &mut FsmContext) {
    // All outputs low, unconditionally.
    ctx.commands = OutputCommands::all_off();
    info!("IDLE: outputs cleared, awaiting trigger");
}

fn idle_update(_ctx: &mut FsmContext) -> Option<StateId> {
    // Leaves only on an operator command (service forces the transition).
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  FLASHING state — the three-repetition alternation
// ═══════════════════════════════════════════════════════════════════════════

fn flashing_enter(ctx: &mut FsmContext) {
    apply_phase(ctx, 0);
    info!(
        "FLASHING: {} repetitions at {}ms per half-period",
        ctx.config.flash_repetitions, ctx.config.phase_duration_ms
    );
}

fn flashing_update(ctx: &mut FsmContext) -> Option<StateId> {
    let phase = ctx.flash_phase();
    if phase >= ctx.config.total_phases() {
        return Some(StateId::Steady);
    }
    apply_phase(ctx, phase);
    None
}

/// Even half-periods drive A + buzzer, odd half-periods drive B alone.
fn apply_phase(ctx: &mut FsmContext, phase: u64) {
    let a_high = phase % 2 == 0;
    ctx.commands.indicator_a = a_high;
    ctx.commands.indicator_b = !a_high;
    ctx.commands.buzzer = a_high;
}

// ═══════════════════════════════════════════════════════════════════════════
//  STEADY state — alarm latched on until silenced
// ═══════════════════════════════════════════════════════════════════════════

fn steady_enter(ctx: &mut FsmContext) {
    // Indicator B is driven low explicitly so the steady state is
    // deterministic rather than inheriting the last half-period's level.
    ctx.commands.indicator_a = true;
    ctx.commands.indicator_b = false;
    ctx.commands.buzzer = true;
    info!("STEADY: alarm latched (indicator A + buzzer high)");
}

fn steady_update(_ctx: &mut FsmContext) -> Option<StateId> {
    // Holds until an operator command forces a transition.
    None
}
