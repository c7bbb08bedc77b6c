//! AlarmBox Firmware — Main Entry Point
//!
//! Hexagonal architecture with a lock-free intent queue between the HTTP
//! task and the control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  SoftAP          HTTP routes          LogEventSink             │
//! │  (fixed SSID)    (/, /on, /off)       (EventSink)              │
//! │       │               │ push_event                             │
//! │       │               ▼                                        │
//! │  ─────┴──── lock-free event queue ── Port Trait Boundary ───   │
//! │                       │                                        │
//! │  ┌────────────────────▼───────────────────────────────────┐    │
//! │  │              AlarmService (pure logic)                 │    │
//! │  │  FSM: Idle · Flashing · Steady                         │    │
//! │  └────────────────────┬───────────────────────────────────┘    │
//! │                       │ OutputPort                             │
//! │              HardwareAdapter (indicator A/B, buzzer)           │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod config;
mod error;
mod events;
mod pins;

pub mod app;
mod adapters;
mod drivers;
pub mod fsm;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::{error, info};

use adapters::hardware::HardwareAdapter;
use adapters::log_sink::LogEventSink;
use adapters::softap::ApProfile;
use app::commands::AlarmCommand;
use app::events::AppEvent;
use app::ports::EventSink;
use app::service::AlarmService;
use config::{SystemConfig, AP_PASSPHRASE, AP_SSID};
use drivers::buzzer::BuzzerDriver;
use drivers::indicator::IndicatorDriver;
use error::{CommsError, Error};
use events::{push_event, Event};

// ── Fatal-error halt ──────────────────────────────────────────

/// Log the failure and halt in place.  There is no retry path for boot
/// failures; the device requires a physical reset.
fn halt(err: Error) -> ! {
    error!("FATAL: {} — halting", err);
    #[allow(clippy::empty_loop)]
    loop {}
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("AlarmBox v{}", env!("CARGO_PKG_VERSION"));

    let config = SystemConfig::default();
    info!("config: {}", serde_json::to_string(&config)?);

    // ── 2. Output GPIOs ───────────────────────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        error!("HAL init failed: {}", e);
        halt(Error::Init("GPIO outputs"));
    }

    // ── 3. SoftAP ─────────────────────────────────────────────
    let peripherals = esp_idf_hal::prelude::Peripherals::take()?;
    let sysloop = esp_idf_svc::eventloop::EspSystemEventLoop::take()?;

    let profile = match ApProfile::new(AP_SSID, AP_PASSPHRASE) {
        Ok(p) => p,
        Err(e) => halt(e.into()),
    };

    // AP bring-up failure is the one recognised runtime failure mode:
    // fatal, reported on the serial log only.
    let _wifi = match adapters::softap::start(peripherals.modem, sysloop, &profile, &config) {
        Ok(w) => w,
        Err(e) => {
            error!("SoftAP bring-up failed: {e:?}");
            halt(Error::Comms(CommsError::ApStartFailed));
        }
    };

    // ── 4. HTTP server ────────────────────────────────────────
    let _server = match adapters::http::start(&config) {
        Ok(s) => s,
        Err(e) => {
            error!("HTTP server start failed: {e:?}");
            halt(Error::Comms(CommsError::HttpServerFailed));
        }
    };

    // ── 5. Alarm core ─────────────────────────────────────────
    let mut hw = HardwareAdapter::new(
        IndicatorDriver::new(pins::INDICATOR_A_GPIO),
        IndicatorDriver::new(pins::INDICATOR_B_GPIO),
        BuzzerDriver::new(),
    );
    let mut sink = LogEventSink::new();
    let mut alarm = AlarmService::new(config.clone());
    alarm.start(&mut sink);

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    let tick_ms = u64::from(config.control_loop_interval_ms);
    let ticks_per_telemetry =
        (u64::from(config.telemetry_interval_secs) * 1000 / tick_ms).max(1);
    let mut telemetry_counter: u64 = 0;

    loop {
        // Fixed pause per iteration; the queue decouples the HTTP task.
        std::thread::sleep(std::time::Duration::from_millis(tick_ms));
        push_event(Event::ControlTick);

        telemetry_counter += 1;
        if telemetry_counter >= ticks_per_telemetry {
            push_event(Event::TelemetryTick);
            telemetry_counter = 0;
        }

        // Process all pending events.
        events::drain_events(|event| match event {
            Event::ControlTick => {
                alarm.tick(&mut hw, &mut sink);
            }

            Event::AlarmRequested => {
                info!("HTTP intent: trigger alarm");
                alarm.handle_command(AlarmCommand::Trigger, &mut hw, &mut sink);
            }

            Event::SilenceRequested => {
                info!("HTTP intent: silence");
                alarm.handle_command(AlarmCommand::Silence, &mut hw, &mut sink);
            }

            Event::TelemetryTick => {
                sink.emit(&AppEvent::Telemetry(alarm.build_telemetry()));
            }
        });
    }
}
