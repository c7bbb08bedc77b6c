//! HTTP control surface.
//!
//! Three routes, registered on the ESP-IDF HTTP server:
//!
//! | Route  | Effect                                           |
//! |--------|--------------------------------------------------|
//! | `/`    | 200, static control page                         |
//! | `/on`  | enqueue [`Event::AlarmRequested`], 303 → `/`     |
//! | `/off` | enqueue [`Event::SilenceRequested`], 303 → `/`   |
//!
//! Handlers never touch hardware: they push an intent into the lock-free
//! event queue and answer immediately, so a running alarm sequence never
//! blocks the HTTP layer.  Unmatched paths get the httpd stack's default
//! 404 — deliberately not customized.

use crate::events::Event;

/// Static control page served at `/`.
pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>AlarmBox</title>
<style>
body { font-family: sans-serif; text-align: center; margin-top: 3em; }
a.btn { display: inline-block; margin: 1em; padding: 1em 2em;
        font-size: 1.5em; color: #fff; text-decoration: none;
        border-radius: 6px; }
a.on  { background: #c0392b; }
a.off { background: #27ae60; }
</style>
</head>
<body>
<h1>AlarmBox</h1>
<p>
<a class="btn on" href="/on">Sound alarm</a>
<a class="btn off" href="/off">Silence</a>
</p>
</body>
</html>
"#;

/// Routes that mutate alarm state, and the event each one enqueues.
pub const CONTROL_ROUTES: [(&str, Event); 2] = [
    ("/on", Event::AlarmRequested),
    ("/off", Event::SilenceRequested),
];

// ───────────────────────────────────────────────────────────────
// Platform server (ESP-IDF only)
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
mod platform {
    use esp_idf_svc::{
        http::{
            server::{Configuration, EspHttpServer},
            Method,
        },
        io::Write,
    };
    use log::{info, warn};

    use super::{CONTROL_ROUTES, INDEX_HTML};
    use crate::config::SystemConfig;
    use crate::events::push_event;

    /// Bind the HTTP server and register the three routes.
    ///
    /// The returned server must be kept alive for the routes to stay
    /// registered.
    pub fn start(config: &SystemConfig) -> anyhow::Result<EspHttpServer<'static>> {
        let server_config = Configuration {
            http_port: config.http_port,
            max_uri_handlers: 8,
            ..Default::default()
        };

        let mut server = EspHttpServer::new(&server_config)?;

        server.fn_handler::<anyhow::Error, _>("/", Method::Get, |req| {
            let mut resp = req.into_ok_response()?;
            resp.write_all(INDEX_HTML.as_bytes())?;
            Ok(())
        })?;

        for (path, event) in CONTROL_ROUTES {
            server.fn_handler::<anyhow::Error, _>(path, Method::Get, move |req| {
                if !push_event(event) {
                    warn!("HTTP: event queue full, {:?} dropped", event);
                }
                // See Other — browsers re-GET the control page.
                req.into_response(303, Some("See Other"), &[("Location", "/")])?;
                Ok(())
            })?;
        }

        info!(
            "HTTP server up on port {} (routes: /, /on, /off)",
            config.http_port
        );
        Ok(server)
    }
}

#[cfg(target_os = "espidf")]
pub use platform::start;

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_page_links_both_control_routes() {
        assert!(INDEX_HTML.contains(r#"href="/on""#));
        assert!(INDEX_HTML.contains(r#"href="/off""#));
    }

    #[test]
    fn control_routes_map_to_the_expected_intents() {
        let on = CONTROL_ROUTES.iter().find(|(p, _)| *p == "/on").unwrap();
        assert_eq!(on.1, Event::AlarmRequested);
        let off = CONTROL_ROUTES.iter().find(|(p, _)| *p == "/off").unwrap();
        assert_eq!(off.1, Event::SilenceRequested);
    }

    #[test]
    fn control_routes_are_disjoint_from_index() {
        for (path, _) in CONTROL_ROUTES {
            assert_ne!(path, "/");
        }
    }
}
