//! System configuration parameters
//!
//! All tunable parameters for the AlarmBox firmware.  Values are fixed at
//! compile time; there is no persistent or remote configuration surface.

use serde::{Deserialize, Serialize};

// --- Access point identity (fixed) ---

/// SSID of the access point the device advertises.
pub const AP_SSID: &str = "AlarmBox";
/// WPA2 passphrase for the access point (8-64 bytes).
pub const AP_PASSPHRASE: &str = "siren-crew-7731";

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Alarm sequence ---
    /// Duration of one flashing half-period (milliseconds)
    pub phase_duration_ms: u32,
    /// Number of A/B alternation repetitions before the steady state
    pub flash_repetitions: u8,

    // --- HTTP ---
    /// TCP port the web server binds
    pub http_port: u16,
    /// Maximum simultaneous stations on the access point
    pub ap_max_connections: u8,

    // --- Timing ---
    /// Control loop interval (milliseconds)
    pub control_loop_interval_ms: u32,
    /// Telemetry report interval (seconds)
    pub telemetry_interval_secs: u32,
}

impl SystemConfig {
    /// Control-loop ticks per flashing half-period (at least one).
    pub fn ticks_per_phase(&self) -> u64 {
        u64::from((self.phase_duration_ms / self.control_loop_interval_ms).max(1))
    }

    /// Total half-periods in the flashing sequence (two per repetition).
    pub fn total_phases(&self) -> u64 {
        u64::from(self.flash_repetitions) * 2
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Alarm sequence
            phase_duration_ms: 500,
            flash_repetitions: 3,

            // HTTP
            http_port: 80,
            ap_max_connections: 4,

            // Timing
            control_loop_interval_ms: 100, // 10 Hz
            telemetry_interval_secs: 60,   // 1/min
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = SystemConfig::default();
        assert!(c.phase_duration_ms > 0);
        assert!(c.flash_repetitions > 0);
        assert!(c.http_port > 0);
        assert!(c.control_loop_interval_ms > 0);
        assert!(c.telemetry_interval_secs > 0);
    }

    #[test]
    fn serde_roundtrip() {
        let c = SystemConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: SystemConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.phase_duration_ms, c2.phase_duration_ms);
        assert_eq!(c.flash_repetitions, c2.flash_repetitions);
        assert_eq!(c.http_port, c2.http_port);
    }

    #[test]
    fn timing_ratios_make_sense() {
        let c = SystemConfig::default();
        assert!(
            c.control_loop_interval_ms <= c.phase_duration_ms,
            "control loop must tick at least once per flashing phase"
        );
        assert!(
            c.control_loop_interval_ms < c.telemetry_interval_secs * 1000,
            "control loop should be faster than telemetry"
        );
    }

    #[test]
    fn phase_arithmetic() {
        let c = SystemConfig::default();
        assert_eq!(c.ticks_per_phase(), 5);
        assert_eq!(c.total_phases(), 6);
    }

    #[test]
    fn ap_passphrase_is_wpa2_length() {
        assert!(AP_PASSPHRASE.len() >= 8 && AP_PASSPHRASE.len() <= 64);
        assert!(!AP_SSID.is_empty() && AP_SSID.len() <= 32);
    }
}
