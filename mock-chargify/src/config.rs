//! Configuration types for the mock Chargify server

use crate::error::MockError;
use crate::error::MockResult;
use crate::signing::SigningZone;
use serde::Deserialize;
use serde::Serialize;
use std::path::PathBuf;

/// Environment variable holding the Chargify Direct API identifier
pub const API_ID_ENV: &str = "CHARGIFY_DIRECT_API_ID";
/// Environment variable holding the Chargify Direct shared secret
pub const API_SECRET_ENV: &str = "CHARGIFY_DIRECT_API_SECRET";

/// Mock server configuration, fixed at startup and never mutated afterwards
#[derive(Clone, Serialize, Deserialize)]
pub struct MockConfig {
    /// Host to bind the server to
    pub host: String,

    /// Port to bind the server to
    pub port: u16,

    /// Host of the application under test that receives the signup redirect
    pub redirect_host: String,

    /// Port of the application under test that receives the signup redirect
    pub redirect_port: u16,

    /// Chargify Direct API identifier echoed back as `api_id`
    pub api_id: String,

    /// Shared secret used as the HMAC key
    #[serde(default, skip_serializing)]
    pub api_secret: String,

    /// Zone the `timestamp` parameter is rendered in: `UTC`, `±HH:MM` or an
    /// IANA name such as `America/New_York`
    pub time_zone: String,

    /// Directory the `/calls` fixture is read from
    pub fixtures_dir: PathBuf,
}

impl std::fmt::Debug for MockConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("redirect_host", &self.redirect_host)
            .field("redirect_port", &self.redirect_port)
            .field("api_id", &self.api_id)
            .field("api_secret", &"<redacted>")
            .field("time_zone", &self.time_zone)
            .field("fixtures_dir", &self.fixtures_dir)
            .finish()
    }
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4567,
            redirect_host: "127.0.0.1".to_string(),
            redirect_port: 3000,
            api_id: String::new(),
            api_secret: String::new(),
            time_zone: "UTC".to_string(),
            fixtures_dir: default_fixtures_dir(),
        }
    }
}

/// Fixture directory bundled with this crate
pub fn default_fixtures_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures"))
}

impl MockConfig {
    /// Config with the given credentials and defaults for everything else
    pub fn new(api_id: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_id: api_id.into(),
            api_secret: api_secret.into(),
            ..Default::default()
        }
    }

    /// Set the host and port the signup redirect points at
    pub fn with_redirect_target(mut self, host: impl Into<String>, port: u16) -> Self {
        self.redirect_host = host.into();
        self.redirect_port = port;
        self
    }

    /// Create a new config from environment variables
    ///
    /// Unset variables fall back to [`MockConfig::default`]; set but
    /// unparseable ones are a [`MockError::Config`].
    pub fn from_env() -> MockResult<Self> {
        let defaults = Self::default();

        let host = std::env::var("MOCK_CHARGIFY_HOST").unwrap_or(defaults.host);
        let port = parse_port("MOCK_CHARGIFY_PORT", defaults.port)?;
        let redirect_host =
            std::env::var("MOCK_CHARGIFY_REDIRECT_HOST").unwrap_or(defaults.redirect_host);
        let redirect_port = parse_port("MOCK_CHARGIFY_REDIRECT_PORT", defaults.redirect_port)?;

        let time_zone = match std::env::var("MOCK_CHARGIFY_TIME_ZONE") {
            Ok(raw) => {
                SigningZone::parse(&raw)?;
                raw.trim().to_string()
            }
            Err(_) => defaults.time_zone,
        };

        let fixtures_dir = std::env::var("MOCK_CHARGIFY_FIXTURES_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.fixtures_dir);

        Ok(Self {
            host,
            port,
            redirect_host,
            redirect_port,
            api_id: std::env::var(API_ID_ENV).unwrap_or_default(),
            api_secret: std::env::var(API_SECRET_ENV).unwrap_or_default(),
            time_zone,
            fixtures_dir,
        })
    }

    /// Reject configurations that would sign with bad data
    pub fn validate(&self) -> MockResult<()> {
        if self.api_id.trim().is_empty() {
            return Err(MockError::Config(format!("{API_ID_ENV} is not set")));
        }
        if self.api_secret.is_empty() {
            return Err(MockError::Config(format!("{API_SECRET_ENV} is not set")));
        }
        if self.redirect_host.trim().is_empty() {
            return Err(MockError::Config("redirect host is empty".to_string()));
        }
        self.signing_zone()?;
        Ok(())
    }

    /// Resolve [`MockConfig::time_zone`]
    pub fn signing_zone(&self) -> MockResult<SigningZone> {
        SigningZone::parse(&self.time_zone)
    }

    /// Get the full bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Base URL of the application under test
    pub fn redirect_base(&self) -> String {
        format!("http://{}:{}", self.redirect_host, self.redirect_port)
    }
}

fn parse_port(env_var: &str, default: u16) -> MockResult<u16> {
    match std::env::var(env_var) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| MockError::Config(format!("invalid {env_var} value '{raw}': {e}"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_fails_validation_without_credentials() {
        let err = MockConfig::default().validate().unwrap_err();
        assert!(matches!(err, MockError::Config(_)));
        assert!(err.to_string().contains(API_ID_ENV));
    }

    #[test]
    fn empty_secret_is_rejected() {
        let err = MockConfig::new("abc123", "").validate().unwrap_err();
        assert!(err.to_string().contains(API_SECRET_ENV));
    }

    #[test]
    fn valid_config_passes() {
        let config = MockConfig::new("abc123", "s3cret").with_redirect_target("localhost", 9887);
        config.validate().unwrap();
        assert_eq!(config.redirect_base(), "http://localhost:9887");
        assert_eq!(config.bind_address(), "127.0.0.1:4567");
    }

    #[test]
    fn bad_time_zones_are_rejected() {
        for zone in ["+25:00", "Eastern Time (US & Canada)", "eastern"] {
            let config = MockConfig {
                time_zone: zone.to_string(),
                ..MockConfig::new("abc123", "s3cret")
            };
            assert!(
                matches!(config.validate(), Err(MockError::Config(_))),
                "{zone} should be rejected"
            );
        }
    }

    #[test]
    fn resolves_offsets_and_iana_names() {
        let zone_for = |raw: &str| {
            MockConfig {
                time_zone: raw.to_string(),
                ..MockConfig::new("abc123", "s3cret")
            }
            .signing_zone()
            .unwrap()
        };
        assert_eq!(zone_for("UTC"), SigningZone::default());
        assert_eq!(zone_for("+09:00"), SigningZone::parse("+09:00").unwrap());
        assert_eq!(
            zone_for("America/New_York"),
            SigningZone::Named(chrono_tz::Tz::America__New_York)
        );
    }

    #[test]
    fn serialized_config_omits_secret() {
        let config = MockConfig {
            time_zone: "Asia/Tokyo".to_string(),
            ..MockConfig::new("abc123", "s3cret").with_redirect_target("localhost", 9887)
        };

        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("api_secret").is_none());
        assert!(!json.to_string().contains("s3cret"));
        assert_eq!(json["api_id"], "abc123");
        assert_eq!(json["time_zone"], "Asia/Tokyo");

        let restored: MockConfig = serde_json::from_value(json).unwrap();
        assert_eq!(restored.api_secret, "");
        assert_eq!(restored.api_id, "abc123");
        assert_eq!(restored.redirect_base(), "http://localhost:9887");
        assert_eq!(restored.time_zone, "Asia/Tokyo");
        assert_eq!(restored.fixtures_dir, config.fixtures_dir);
    }

    #[test]
    fn debug_redacts_secret() {
        let rendered = format!("{:?}", MockConfig::new("abc123", "s3cret"));
        assert!(rendered.contains("abc123"));
        assert!(!rendered.contains("s3cret"));
    }

    #[test]
    fn test_from_env() {
        unsafe {
            std::env::set_var(API_ID_ENV, "env-id");
            std::env::set_var(API_SECRET_ENV, "env-secret");
            std::env::set_var("MOCK_CHARGIFY_REDIRECT_PORT", "3999");
            std::env::set_var("MOCK_CHARGIFY_TIME_ZONE", "Europe/Berlin");
        }

        let config = MockConfig::from_env().unwrap();
        assert_eq!(config.api_id, "env-id");
        assert_eq!(config.api_secret, "env-secret");
        assert_eq!(config.redirect_port, 3999);
        assert_eq!(config.time_zone, "Europe/Berlin");
        config.validate().unwrap();

        unsafe {
            std::env::set_var("MOCK_CHARGIFY_TIME_ZONE", "Eastern Time (US & Canada)");
        }
        assert!(matches!(MockConfig::from_env(), Err(MockError::Config(_))));
        unsafe {
            std::env::remove_var("MOCK_CHARGIFY_TIME_ZONE");
        }

        unsafe {
            std::env::set_var("MOCK_CHARGIFY_REDIRECT_PORT", "not-a-port");
        }
        assert!(matches!(MockConfig::from_env(), Err(MockError::Config(_))));

        // Clean up
        unsafe {
            std::env::remove_var(API_ID_ENV);
            std::env::remove_var(API_SECRET_ENV);
            std::env::remove_var("MOCK_CHARGIFY_REDIRECT_PORT");
        }
    }
}
