//! GPIO pin assignments for the AlarmBox main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Indicator outputs (discrete LEDs behind current-limit resistors)
// ---------------------------------------------------------------------------

/// Digital output: indicator A (red beacon LED, active HIGH).
pub const INDICATOR_A_GPIO: i32 = 12;
/// Digital output: indicator B (amber beacon LED, active HIGH).
pub const INDICATOR_B_GPIO: i32 = 14;

// ---------------------------------------------------------------------------
// Audible output
// ---------------------------------------------------------------------------

/// Digital output: piezo buzzer driver transistor (active HIGH).
pub const BUZZER_GPIO: i32 = 27;
