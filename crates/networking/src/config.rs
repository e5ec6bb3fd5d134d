//! Client configuration loaded from the environment

use flowva_core::{Error, Result};
use std::env;
use tracing::{debug, info};

/// Origin used for referral links when none is configured
pub const DEFAULT_SITE_ORIGIN: &str = "https://app.flowvahub.com";

/// Connection settings for the hosted backend
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub supabase_url: String,
    /// Public anon key sent as `apikey` on every request
    pub anon_key: String,
    /// Origin of the web app, used to build referral links
    pub site_origin: String,
    /// Access token of a previously established session
    pub access_token: Option<String>,
}

impl ClientConfig {
    pub fn new(supabase_url: &str, anon_key: &str) -> Self {
        Self {
            supabase_url: supabase_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            site_origin: DEFAULT_SITE_ORIGIN.to_string(),
            access_token: None,
        }
    }

    /// Load from process env, reading a `.env` file first if present
    ///
    /// `SUPABASE_URL` and `SUPABASE_ANON_KEY` are required.
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenv::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| Error::Config(format!("missing environment variable {}", key)))
        };

        let mut config = Self::new(&required("SUPABASE_URL")?, &required("SUPABASE_ANON_KEY")?);

        match lookup("FLOWVA_SITE_ORIGIN").filter(|v| !v.trim().is_empty()) {
            Some(origin) => config.site_origin = origin.trim_end_matches('/').to_string(),
            None => info!("FLOWVA_SITE_ORIGIN not set, using default: {}", DEFAULT_SITE_ORIGIN),
        }
        config.access_token = lookup("FLOWVA_ACCESS_TOKEN").filter(|v| !v.trim().is_empty());

        Ok(config)
    }

    /// PostgREST base, `{url}/rest/v1`
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.supabase_url)
    }

    /// GoTrue base, `{url}/auth/v1`
    pub fn auth_url(&self) -> String {
        format!("{}/auth/v1", self.supabase_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_required_keys() {
        let err = ClientConfig::from_lookup(lookup(&[("SUPABASE_URL", "https://x.supabase.co")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("SUPABASE_ANON_KEY")));
    }

    #[test]
    fn test_urls_and_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://x.supabase.co/"),
            ("SUPABASE_ANON_KEY", "anon"),
        ]))
        .unwrap();
        assert_eq!(config.rest_url(), "https://x.supabase.co/rest/v1");
        assert_eq!(config.auth_url(), "https://x.supabase.co/auth/v1");
        assert_eq!(config.site_origin, DEFAULT_SITE_ORIGIN);
        assert_eq!(config.access_token, None);
    }

    #[test]
    fn test_optional_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://x.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
            ("FLOWVA_SITE_ORIGIN", "http://localhost:5173/"),
            ("FLOWVA_ACCESS_TOKEN", "jwt"),
        ]))
        .unwrap();
        assert_eq!(config.site_origin, "http://localhost:5173");
        assert_eq!(config.access_token.as_deref(), Some("jwt"));
    }
}
