#![allow(dead_code)] // The top-level funnel is only constructed by the firmware binary

//! Unified error types for the AlarmBox firmware.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! top-level startup path's error handling uniform.  All variants are `Copy`
//! so they can be cheaply passed around without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A communication subsystem failed.
    Comms(CommsError),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comms(e) => write!(f, "comms: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Communications errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommsError {
    /// SSID failed validation (must be 1-32 printable ASCII bytes).
    ApSsidInvalid,
    /// Passphrase failed validation (must be 8-64 bytes for WPA2, or empty).
    ApPassphraseInvalid,
    /// The access point could not be started.  Fatal at boot.
    ApStartFailed,
    /// The HTTP server could not bind or register its routes.
    HttpServerFailed,
}

impl fmt::Display for CommsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApSsidInvalid => write!(f, "AP SSID invalid"),
            Self::ApPassphraseInvalid => write!(f, "AP passphrase invalid"),
            Self::ApStartFailed => write!(f, "AP start failed"),
            Self::HttpServerFailed => write!(f, "HTTP server start failed"),
        }
    }
}

impl From<CommsError> for Error {
    fn from(e: CommsError) -> Self {
        Self::Comms(e)
    }
}
