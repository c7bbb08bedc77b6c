//! WiFi SoftAP adapter.
//!
//! The device never joins an existing network: it advertises its own
//! access point with a fixed SSID/passphrase and a fixed gateway address,
//! and clients connect directly to it.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver calls via
//!   `esp_idf_svc::wifi`.
//! - **all other targets**: only the credential validation logic compiles,
//!   for host-side tests.
//!
//! Failure to bring the access point up is fatal at boot — the caller
//! logs and halts (there is no retry; the device needs a physical reset).

use crate::error::CommsError;

/// Fixed IPv4 addressing for the AP subnet.
pub const AP_GATEWAY_OCTETS: [u8; 4] = [192, 168, 71, 1];
/// Network mask length for the AP subnet.
pub const AP_NETMASK_BITS: u8 = 24;
/// WiFi channel the AP advertises on.
pub const AP_CHANNEL: u8 = 1;

// ───────────────────────────────────────────────────────────────
// Credential validation (pure, host-testable)
// ───────────────────────────────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn validate_ssid(ssid: &str) -> Result<(), CommsError> {
    if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(CommsError::ApSsidInvalid);
    }
    Ok(())
}

fn validate_passphrase(passphrase: &str) -> Result<(), CommsError> {
    // Empty means an open network; otherwise WPA2 length rules apply.
    if passphrase.is_empty() {
        return Ok(());
    }
    if passphrase.len() < 8 || passphrase.len() > 64 {
        return Err(CommsError::ApPassphraseInvalid);
    }
    Ok(())
}

/// Validated access-point identity, held in fixed-capacity strings.
#[derive(Debug, Clone)]
pub struct ApProfile {
    ssid: heapless::String<32>,
    passphrase: heapless::String<64>,
}

impl ApProfile {
    pub fn new(ssid: &str, passphrase: &str) -> Result<Self, CommsError> {
        validate_ssid(ssid)?;
        validate_passphrase(passphrase)?;
        let mut s = heapless::String::new();
        s.push_str(ssid).map_err(|_| CommsError::ApSsidInvalid)?;
        let mut p = heapless::String::new();
        p.push_str(passphrase)
            .map_err(|_| CommsError::ApPassphraseInvalid)?;
        Ok(Self {
            ssid: s,
            passphrase: p,
        })
    }

    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }

    /// Open network when the passphrase is empty, WPA2 otherwise.
    pub fn is_open(&self) -> bool {
        self.passphrase.is_empty()
    }
}

// ───────────────────────────────────────────────────────────────
// Platform bring-up (ESP-IDF only)
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
mod platform {
    use anyhow::anyhow;
    use esp_idf_svc::{
        eventloop::EspSystemEventLoop,
        hal::modem::Modem,
        ipv4::{self, Mask, Subnet},
        netif::{EspNetif, NetifConfiguration, NetifStack},
        wifi::{
            AccessPointConfiguration, AuthMethod, BlockingWifi, Configuration as WifiConfig,
            EspWifi, WifiDriver,
        },
    };
    use log::info;

    use super::{ApProfile, AP_CHANNEL, AP_GATEWAY_OCTETS, AP_NETMASK_BITS};
    use crate::config::SystemConfig;

    /// Bring the SoftAP up and block until the interface is running.
    ///
    /// Returns the wifi handle, which must be kept alive for the AP to
    /// stay up.
    pub fn start(
        modem: Modem,
        sysloop: EspSystemEventLoop,
        profile: &ApProfile,
        config: &SystemConfig,
    ) -> anyhow::Result<BlockingWifi<EspWifi<'static>>> {
        let gateway = ipv4::Ipv4Addr::from(AP_GATEWAY_OCTETS);

        // AP netif with a fixed gateway address and DHCP for clients.
        let ap_netif_config = NetifConfiguration {
            ip_configuration: Some(ipv4::Configuration::Router(ipv4::RouterConfiguration {
                subnet: Subnet {
                    gateway,
                    mask: Mask(AP_NETMASK_BITS),
                },
                dhcp_enabled: true,
                dns: Some(gateway),
                secondary_dns: None,
            })),
            ..NetifConfiguration::wifi_default_router()
        };
        let ap_netif = EspNetif::new_with_conf(&ap_netif_config)?;

        let driver = WifiDriver::new(modem, sysloop.clone(), None)?;

        // STA netif is unused in AP mode but required by the wrap API.
        let sta_netif = EspNetif::new(NetifStack::Sta)?;

        let mut wifi =
            BlockingWifi::wrap(EspWifi::wrap_all(driver, sta_netif, ap_netif)?, sysloop)?;

        let auth_method = if profile.is_open() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };
        let ap_config = AccessPointConfiguration {
            // Lengths were validated by ApProfile; the driver limits match.
            ssid: profile
                .ssid()
                .try_into()
                .map_err(|_| anyhow!("SSID exceeds driver limit"))?,
            password: profile
                .passphrase()
                .try_into()
                .map_err(|_| anyhow!("passphrase exceeds driver limit"))?,
            auth_method,
            channel: AP_CHANNEL,
            ssid_hidden: false,
            max_connections: u16::from(config.ap_max_connections),
            ..Default::default()
        };

        wifi.set_configuration(&WifiConfig::AccessPoint(ap_config))?;
        wifi.start()?;
        wifi.wait_netif_up()?;

        let ip_info = wifi.wifi().ap_netif().get_ip_info()?;
        info!(
            "SoftAP up: SSID='{}' ip={} ({} clients max)",
            profile.ssid(),
            ip_info.ip,
            config.ap_max_connections
        );

        Ok(wifi)
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
    use crate::config::{AP_PASSPHRASE, AP_SSID};

    #[test]
    fn rejects_empty_ssid() {
        assert_eq!(
            ApProfile::new("", "password123").unwrap_err(),
            CommsError::ApSsidInvalid
        );
    }

    #[test]
    fn rejects_oversize_ssid() {
        let long = "x".repeat(33);
        assert_eq!(
            ApProfile::new(&long, "password123").unwrap_err(),
            CommsError::ApSsidInvalid
        );
    }

    #[test]
    fn rejects_non_printable_ssid() {
        assert_eq!(
            ApProfile::new("Alarm\u{7}Box", "password123").unwrap_err(),
            CommsError::ApSsidInvalid
        );
    }

    #[test]
    fn rejects_short_passphrase() {
        assert_eq!(
            ApProfile::new("AlarmBox", "short").unwrap_err(),
            CommsError::ApPassphraseInvalid
        );
    }

    #[test]
    fn accepts_open_network() {
        let p = ApProfile::new("AlarmBox", "").unwrap();
        assert!(p.is_open());
    }

    #[test]
    fn accepts_the_builtin_credentials() {
        let p = ApProfile::new(AP_SSID, AP_PASSPHRASE).unwrap();
        assert_eq!(p.ssid(), AP_SSID);
        assert!(!p.is_open());
    }
}
