//! Configuration for the portal service module

use serde::Deserialize;

/// Portal service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Per-tenant admin access codes
    #[serde(default)]
    pub access_codes: AccessCodes,

    /// HMAC secret used to sign session credentials
    #[serde(default)]
    pub session_secret: String,

    /// Session lifetime in days
    #[serde(default = "default_session_ttl_days")]
    pub session_ttl_days: u32,

    /// Mark the session cookie `Secure` (enable in production)
    #[serde(default = "default_true")]
    pub secure_cookies: bool,

    /// Look-back window for the activity chart, in months
    #[serde(default = "default_activity_window_months")]
    pub activity_window_months: u32,
}

/// Shared secret per tenant scope; unset or blank codes never match
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessCodes {
    #[serde(default)]
    pub kenya: Option<String>,
    #[serde(default)]
    pub uganda: Option<String>,
    #[serde(default)]
    pub tanzania: Option<String>,
    /// Super-admin code resolving to the Global scope
    #[serde(default)]
    pub global: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_codes: AccessCodes::default(),
            session_secret: String::new(),
            session_ttl_days: default_session_ttl_days(),
            secure_cookies: true,
            activity_window_months: default_activity_window_months(),
        }
    }
}

impl Config {
    /// Reject settings that would make the module unusable
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.session_ttl_days > 0,
            "session_ttl_days must be at least 1"
        );
        anyhow::ensure!(
            self.activity_window_months > 0,
            "activity_window_months must be at least 1"
        );
        Ok(())
    }
}

fn default_session_ttl_days() -> u32 {
    7
}

fn default_true() -> bool {
    true
}

fn default_activity_window_months() -> u32 {
    6
}
