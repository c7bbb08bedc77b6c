//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern expressed in Rust:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  StateTable                                              │
//! │  ┌──────────┬───────────┬──────────┬───────────────────┐ │
//! │  │ StateId  │ on_enter  │ on_exit  │ on_update         │ │
//! │  ├──────────┼───────────┼──────────┼───────────────────┤ │
//! │  │ Idle     │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │ │
//! │  │ Flashing │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │ │
//! │  │ Steady   │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │ │
//! │  └──────────┴───────────┴──────────┴───────────────────┘ │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** state.
//! If it returns `Some(next_id)`, the engine runs `on_exit` for the
//! current state, then `on_enter` for the next, and updates the
//! current pointer.  All functions receive `&mut FsmContext` which
//! holds output commands, config, and timing.

pub mod context;
pub mod states;

use context::FsmContext;
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of all possible alarm states.
/// Must stay in sync with the state table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    /// All outputs low, waiting for a trigger.
    Idle = 0,
    /// Alternating A/B half-periods with the buzzer mirroring A.
    Flashing = 1,
    /// Indicator A and buzzer held high until silenced.
    Steady = 2,
}

impl StateId {
    /// Total number of states — used to size the table array.
    pub const COUNT: usize = 3;

    /// Convert a `u8` index back to `StateId`.  Panics on out-of-range in
    /// debug builds; returns `Idle` in release (safe fallback — outputs low).
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Idle,
            1 => Self::Flashing,
            2 => Self::Steady,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Idle
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
/// These run exactly once on each state transition.
pub type StateActionFn = fn(&mut FsmContext);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut FsmContext) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
/// Stored in a fixed-size array — no heap, no `dyn`.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
///
/// Owns the state table (array of [`StateDescriptor`]) and is threaded a
/// mutable [`FsmContext`] through every handler call.
pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    /// Index of the currently active state.
    current: usize,
    /// Monotonically increasing tick counter (wraps at u64::MAX).
    tick_count: u64,
    /// Tick at which the current state was entered.
    state_entry_tick: u64,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        Self {
            table,
            current: initial as usize,
            tick_count: 0,
            state_entry_tick: 0,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut FsmContext) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the FSM by one tick.
    ///
    /// 1. Call `on_update` for the current state.
    /// 2. If it returns `Some(next)`, execute the transition:
    ///    `on_exit(current)` → update pointer → `on_enter(next)`.
    /// 3. Increment tick counter.
    pub fn tick(&mut self, ctx: &mut FsmContext) {
        self.tick_count += 1;
        ctx.ticks_in_state = self.tick_count - self.state_entry_tick;
        ctx.total_ticks = self.tick_count;

        let next = (self.table[self.current].on_update)(ctx);

        if let Some(next_id) = next {
            self.transition(next_id, ctx);
        }
    }

    /// Force an immediate transition (used by the service to act on
    /// operator commands regardless of what `on_update` returned).
    pub fn force_transition(&mut self, next: StateId, ctx: &mut FsmContext) {
        if next as usize != self.current {
            self.transition(next, ctx);
        }
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    /// How many ticks the FSM has been in the current state.
    pub fn ticks_in_current_state(&self) -> u64 {
        self.tick_count - self.state_entry_tick
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: StateId, ctx: &mut FsmContext) {
        let next_idx = next_id as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        // Exit current state
        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        // Update pointer and timing
        self.current = next_idx;
        self.state_entry_tick = self.tick_count;
        ctx.ticks_in_state = 0;

        // Enter new state
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::context::FsmContext;
    use super::*;
    use crate::config::SystemConfig;

    fn make_ctx() -> FsmContext {
        FsmContext::new(SystemConfig::default())
    }

    fn make_fsm() -> Fsm {
        Fsm::new(states::build_state_table(), StateId::Idle)
    }

    /// Ticks for one flashing half-period at the default config.
    fn phase_ticks(ctx: &FsmContext) -> u64 {
        ctx.config.ticks_per_phase()
    }

    #[test]
    fn starts_in_idle() {
        let fsm = make_fsm();
        assert_eq!(fsm.current_state(), StateId::Idle);
    }

    #[test]
    fn start_runs_on_enter() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        ctx.commands.indicator_a = true; // dirty — enter must clear it
        fsm.start(&mut ctx);
        assert_eq!(ctx.commands, super::context::OutputCommands::all_off());
    }

    #[test]
    fn tick_increments_counter() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        fsm.tick(&mut ctx);
        assert_eq!(fsm.ticks_in_current_state(), 1);
        fsm.tick(&mut ctx);
        assert_eq!(fsm.ticks_in_current_state(), 2);
    }

    #[test]
    fn idle_holds_without_trigger() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        for _ in 0..100 {
            fsm.tick(&mut ctx);
        }
        assert_eq!(fsm.current_state(), StateId::Idle);
        assert_eq!(ctx.commands, super::context::OutputCommands::all_off());
    }

    #[test]
    fn flashing_first_phase_drives_a_and_buzzer() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        fsm.force_transition(StateId::Flashing, &mut ctx);
        assert!(ctx.commands.indicator_a);
        assert!(!ctx.commands.indicator_b);
        assert!(ctx.commands.buzzer);
    }

    #[test]
    fn flashing_alternates_every_phase() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        fsm.force_transition(StateId::Flashing, &mut ctx);

        let mut phases_seen = 0u64;
        while fsm.current_state() == StateId::Flashing {
            let phase = ctx.flash_phase();
            let a_high = phase % 2 == 0;
            assert_eq!(ctx.commands.indicator_a, a_high, "phase {phase}");
            assert_eq!(ctx.commands.indicator_b, !a_high, "phase {phase}");
            assert_eq!(ctx.commands.buzzer, a_high, "phase {phase}");
            phases_seen = phases_seen.max(phase + 1);
            fsm.tick(&mut ctx);
        }
        assert_eq!(phases_seen, ctx.config.total_phases());
        assert_eq!(fsm.current_state(), StateId::Steady);
    }

    #[test]
    fn indicators_opposite_and_buzzer_mirrors_a_throughout() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        fsm.force_transition(StateId::Flashing, &mut ctx);

        while fsm.current_state() == StateId::Flashing {
            assert_ne!(
                ctx.commands.indicator_a, ctx.commands.indicator_b,
                "indicators must oppose each other at every sampled tick"
            );
            assert_eq!(
                ctx.commands.buzzer, ctx.commands.indicator_a,
                "buzzer must mirror indicator A"
            );
            fsm.tick(&mut ctx);
        }
    }

    #[test]
    fn flashing_completes_to_steady_after_six_phases() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        fsm.force_transition(StateId::Flashing, &mut ctx);

        let total_ticks = phase_ticks(&ctx) * ctx.config.total_phases();
        for _ in 0..total_ticks {
            fsm.tick(&mut ctx);
        }
        assert_eq!(fsm.current_state(), StateId::Steady);
    }

    #[test]
    fn steady_drives_a_and_buzzer_high() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        fsm.force_transition(StateId::Steady, &mut ctx);
        assert!(ctx.commands.indicator_a);
        assert!(ctx.commands.buzzer);
        assert!(!ctx.commands.indicator_b);
    }

    #[test]
    fn steady_persists_until_forced_out() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        fsm.force_transition(StateId::Steady, &mut ctx);
        for _ in 0..1000 {
            fsm.tick(&mut ctx);
        }
        assert_eq!(fsm.current_state(), StateId::Steady);
        assert!(ctx.commands.indicator_a && ctx.commands.buzzer);
    }

    #[test]
    fn silence_from_any_state_clears_outputs() {
        for start_state in [StateId::Flashing, StateId::Steady] {
            let mut fsm = make_fsm();
            let mut ctx = make_ctx();
            fsm.start(&mut ctx);
            fsm.force_transition(start_state, &mut ctx);

            fsm.force_transition(StateId::Idle, &mut ctx);
            assert_eq!(fsm.current_state(), StateId::Idle);
            assert_eq!(
                ctx.commands,
                super::context::OutputCommands::all_off(),
                "outputs must be low after silencing from {:?}",
                start_state
            );
        }
    }

    #[test]
    fn force_transition_to_current_state_is_noop() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        fsm.tick(&mut ctx);
        let ticks = fsm.ticks_in_current_state();
        fsm.force_transition(StateId::Idle, &mut ctx);
        assert_eq!(fsm.ticks_in_current_state(), ticks, "no re-entry on same state");
    }

    #[test]
    fn state_id_from_index_roundtrip() {
        for i in 0..StateId::COUNT {
            let id = StateId::from_index(i);
            assert_eq!(id as usize, i);
        }
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn state_id_from_invalid_index_returns_idle() {
        let id = StateId::from_index(99);
        assert_eq!(id, StateId::Idle);
    }
}

#[cfg(test)]
mod proptests {
    use super::context::FsmContext;
    use super::*;
    use crate::config::SystemConfig;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn no_invalid_state_reachable(ticks in proptest::collection::vec(0u8..3, 1..100)) {
            let mut fsm = Fsm::new(states::build_state_table(), StateId::Idle);
            let mut ctx = FsmContext::new(SystemConfig::default());
            fsm.start(&mut ctx);

            let valid_states = [StateId::Idle, StateId::Flashing, StateId::Steady];

            for op in ticks {
                match op {
                    0 => fsm.tick(&mut ctx),
                    1 => fsm.force_transition(StateId::Flashing, &mut ctx),
                    _ => fsm.force_transition(StateId::Idle, &mut ctx),
                }
                prop_assert!(valid_states.contains(&fsm.current_state()),
                    "FSM reached invalid state: {:?}", fsm.current_state());
            }
        }

        #[test]
        fn flashing_never_drives_both_indicators(extra_ticks in 0u64..64) {
            let mut fsm = Fsm::new(states::build_state_table(), StateId::Idle);
            let mut ctx = FsmContext::new(SystemConfig::default());
            fsm.start(&mut ctx);
            fsm.force_transition(StateId::Flashing, &mut ctx);

            for _ in 0..extra_ticks {
                if fsm.current_state() != StateId::Flashing {
                    break;
                }
                prop_assert_ne!(ctx.commands.indicator_a, ctx.commands.indicator_b);
                prop_assert_eq!(ctx.commands.buzzer, ctx.commands.indicator_a);
                fsm.tick(&mut ctx);
            }
        }
    }
}
