//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AlarmService (domain)
//! ```
//!
//! Driven adapters (outputs, event sinks) implement these traits.  The
//! [`AlarmService`](super::service::AlarmService) consumes them via
//! generics, so the domain core never touches hardware directly.

// ───────────────────────────────────────────────────────────────
// Output port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to drive the three alarm outputs.
pub trait OutputPort {
    /// Set indicator A's level (`true` = high).
    fn set_indicator_a(&mut self, high: bool);

    /// Set indicator B's level (`true` = high).
    fn set_indicator_b(&mut self, high: bool);

    /// Set the buzzer's level (`true` = sounding).
    fn set_buzzer(&mut self, high: bool);

    /// Drive all three outputs low — safe shutdown.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log today;
/// a network sink would implement the same trait).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
