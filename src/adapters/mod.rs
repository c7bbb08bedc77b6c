//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements  | Connects to                  |
//! |------------|-------------|------------------------------|
//! | `hardware` | OutputPort  | ESP32 GPIO                   |
//! | `log_sink` | EventSink   | Serial log output            |
//! | `softap`   | —           | ESP-IDF WiFi SoftAP          |
//! | `http`     | —           | ESP-IDF HTTP server (routes) |
//!
//! `softap` and `http` are driving adapters: they sit outside the port
//! boundary and feed operator intents into the event queue.

pub mod hardware;
pub mod http;
pub mod log_sink;
pub mod softap;
