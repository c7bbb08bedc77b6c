//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (HTTP routes,
//! serial console) that the [`AlarmService`](super::service::AlarmService)
//! interprets and acts upon.

use crate::fsm::StateId;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmCommand {
    /// Run the alarm sequence (flashing alternation, then steady).
    Trigger,

    /// Clear all outputs immediately, no sequence or delay.
    Silence,

    /// Force the FSM into a specific state (debug / testing only).
    ForceState(StateId),
}
