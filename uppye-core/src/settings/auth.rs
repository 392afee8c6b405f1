use serde::Deserialize;

use crate::settings::interval::Interval;
use crate::utils::secret::MaskedSecret;

/// Token lifecycle settings.
///
/// Access and refresh tokens are signed with separate secrets, so a
/// token of one kind never verifies as the other.
#[derive(Debug, Deserialize, Clone)]
#[allow(unused)]
#[readonly::make]
pub struct AuthSettings {
    pub access_token_secret: MaskedSecret,
    pub refresh_token_secret: MaskedSecret,
    #[serde(default = "default_access_token_ttl")]
    pub access_token_ttl: Interval,
    #[serde(default = "default_refresh_token_ttl")]
    pub refresh_token_ttl: Interval,
    /// How often the expiry sweeper purges stale refresh sessions.
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval: Interval,
}

fn default_access_token_ttl() -> Interval {
    Interval::Minutes(15)
}

fn default_refresh_token_ttl() -> Interval {
    Interval::Days(7)
}

fn default_cleanup_interval() -> Interval {
    Interval::Hours(12)
}
