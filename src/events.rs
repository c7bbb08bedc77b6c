//! Event queue between the HTTP task and the main control loop.
//!
//! Events are produced by:
//! - HTTP route handlers (alarm / silence intents, from the httpd task)
//! - The control loop itself (periodic ticks)
//!
//! Events are consumed by the main control loop, which processes them
//! one at a time in FIFO order.
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ httpd task   │────▶│              │     │              │
//! │ (GET /on,    │     │  Event Queue │────▶│  Main Loop   │
//! │  GET /off)   │     │  (lock-free) │     │  (consumer)  │
//! │ tick source  │────▶│              │     │              │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```

use core::sync::atomic::{AtomicU8, Ordering};

/// Maximum number of pending events.
/// Power of 2 for efficient ring buffer modulo.
const EVENT_QUEUE_CAP: usize = 32;

/// System event types, ordered by rough priority.
/// Lower discriminant = higher priority when multiple events
/// are pending simultaneously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Event {
    // ── Operator intents ──────────────────────────────────
    /// `GET /off` received — silence the alarm.
    SilenceRequested = 0,
    /// `GET /on` received — run the alarm sequence.
    AlarmRequested   = 1,

    // ── Control ───────────────────────────────────────────
    /// Alarm sequencer tick (10 Hz).
    ControlTick      = 20,

    // ── Diagnostics ───────────────────────────────────────
    /// Telemetry report timer fired.
    TelemetryTick    = 30,
}

// ── Lock-free SPSC ring buffer ────────────────────────────────
//
// The httpd task writes (produces), the main loop reads (consumes).
// Uses atomic head/tail indices.  The buffer is intentionally kept
// in a static so the route-handler closures can access it.

static EVENT_HEAD: AtomicU8 = AtomicU8::new(0);
static EVENT_TAIL: AtomicU8 = AtomicU8::new(0);
// SAFETY: EVENT_BUFFER is accessed exclusively through push_event /
// pop_event.
// Producer (push_event): httpd task / control loop — one writer at a time
// (esp-idf httpd serves requests from a single task).
// Consumer (pop_event): main-loop task — one reader.
// The acquire/release pairs on EVENT_HEAD/EVENT_TAIL enforce the SPSC
// discipline.
static mut EVENT_BUFFER: [u8; EVENT_QUEUE_CAP] = [0; EVENT_QUEUE_CAP];

/// Push an event into the queue.
/// Safe to call from the httpd task (lock-free).
/// Returns `false` if the queue is full (event dropped).
pub fn push_event(event: Event) -> bool {
    let head = EVENT_HEAD.load(Ordering::Relaxed);
    let tail = EVENT_TAIL.load(Ordering::Acquire);
    let next_head = (head + 1) % EVENT_QUEUE_CAP as u8;

    if next_head == tail {
        return false; // Queue full — drop event.
    }

    // SAFETY: Only one producer; the slot at `head` is not visible to the
    // consumer until the Release store below.
    unsafe {
        EVENT_BUFFER[head as usize] = event as u8;
    }

    EVENT_HEAD.store(next_head, Ordering::Release);
    true
}

/// Pop the next event from the queue.
/// Called from the main loop (single consumer).
/// Returns `None` if the queue is empty.
pub fn pop_event() -> Option<Event> {
    let tail = EVENT_TAIL.load(Ordering::Relaxed);
    let head = EVENT_HEAD.load(Ordering::Acquire);

    if tail == head {
        return None; // Empty.
    }

    let raw = unsafe { EVENT_BUFFER[tail as usize] };
    EVENT_TAIL.store((tail + 1) % EVENT_QUEUE_CAP as u8, Ordering::Release);

    event_from_u8(raw)
}

/// Drain all pending events into a callback.
/// Processes events in FIFO order.
pub fn drain_events(mut handler: impl FnMut(Event)) {
    while let Some(event) = pop_event() {
        handler(event);
    }
}

/// Check if the event queue is empty.
pub fn queue_is_empty() -> bool {
    let tail = EVENT_TAIL.load(Ordering::Relaxed);
    let head = EVENT_HEAD.load(Ordering::Acquire);
    tail == head
}

// ── Internal ──────────────────────────────────────────────────

fn event_from_u8(raw: u8) -> Option<Event> {
    match raw {
        0  => Some(Event::SilenceRequested),
        1  => Some(Event::AlarmRequested),
        20 => Some(Event::ControlTick),
        30 => Some(Event::TelemetryTick),
        _  => None,
    }
}
