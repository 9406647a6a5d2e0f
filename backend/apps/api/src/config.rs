//! Process Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).
//! A missing or short `JWT_SECRET` aborts startup.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::config::MAX_TOKEN_TTL;
use platform::secret::SigningSecret;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Clone)]
pub struct ApiConfig {
    pub token_secret: SigningSecret,
    pub token_ttl: Option<Duration>,
    /// `None` runs on in-memory stores
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub password_pepper: Option<String>,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the process environment in production)
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let Some(raw_secret) = non_empty("JWT_SECRET") else {
            bail!("JWT_SECRET must be set");
        };
        let token_secret =
            SigningSecret::from_config_value(&raw_secret).context("JWT_SECRET is invalid")?;

        let token_ttl = match non_empty("TOKEN_TTL_HOURS") {
            Some(hours) => {
                let hours: u64 = hours
                    .trim()
                    .parse()
                    .context("TOKEN_TTL_HOURS must be a whole number of hours")?;
                if hours == 0 {
                    bail!("TOKEN_TTL_HOURS must be positive");
                }
                let ttl = hours
                    .checked_mul(3600)
                    .map(Duration::from_secs)
                    .filter(|ttl| *ttl <= MAX_TOKEN_TTL);
                let Some(ttl) = ttl else {
                    bail!(
                        "TOKEN_TTL_HOURS must be at most {}",
                        MAX_TOKEN_TTL.as_secs() / 3600
                    );
                };
                Some(ttl)
            }
            None => None,
        };

        let bind_addr: SocketAddr = non_empty("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .trim()
            .parse()
            .context("BIND_ADDR must be host:port")?;

        let frontend_origins = non_empty("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let config = Self {
            token_secret,
            token_ttl,
            database_url: non_empty("DATABASE_URL"),
            bind_addr,
            frontend_origins,
            password_pepper: non_empty("PASSWORD_PEPPER"),
        };
        config.auth_config()?;

        Ok(config)
    }

    /// Auth settings, checked so that signing cannot fail per request
    pub fn auth_config(&self) -> anyhow::Result<AuthConfig> {
        let mut config = AuthConfig::new(self.token_secret.clone());
        if let Some(ttl) = self.token_ttl {
            config = config.with_token_ttl(ttl);
        }
        if let Some(pepper) = &self.password_pepper {
            config = config.with_pepper(pepper.as_bytes());
        }
        config.validate().context("invalid token settings")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<ApiConfig> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| map.get(key).cloned())
    }

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_missing_secret_is_fatal() {
        assert!(load(&[]).is_err());
        assert!(load(&[("JWT_SECRET", "  ")]).is_err());
    }

    #[test]
    fn test_short_secret_is_fatal() {
        assert!(load(&[("JWT_SECRET", "too-short")]).is_err());
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("JWT_SECRET", SECRET)]).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:5000".parse::<SocketAddr>().unwrap());
        assert!(config.database_url.is_none());
        assert_eq!(config.frontend_origins.len(), 2);
        assert_eq!(config.auth_config().unwrap().token_ttl, Duration::from_secs(24 * 3600));
        assert!(config.auth_config().unwrap().password_pepper.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("JWT_SECRET", SECRET),
            ("TOKEN_TTL_HOURS", "2"),
            ("DATABASE_URL", "postgres://localhost/blog"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("FRONTEND_ORIGINS", "https://a.example, https://b.example,"),
            ("PASSWORD_PEPPER", "pepper"),
        ])
        .unwrap();

        assert_eq!(config.auth_config().unwrap().token_ttl, Duration::from_secs(7200));
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/blog"));
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(
            config.frontend_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert!(config.auth_config().unwrap().password_pepper.is_some());
    }

    #[test]
    fn test_invalid_ttl() {
        assert!(load(&[("JWT_SECRET", SECRET), ("TOKEN_TTL_HOURS", "soon")]).is_err());
        assert!(load(&[("JWT_SECRET", SECRET), ("TOKEN_TTL_HOURS", "0")]).is_err());
    }

    #[test]
    fn test_oversized_ttl_fails_at_startup() {
        let ttl = |hours: &str| load(&[("JWT_SECRET", SECRET), ("TOKEN_TTL_HOURS", hours)]);
        // overflows the seconds multiply
        assert!(ttl("18446744073709551615").is_err());
        // fits in u64 but overflows a timestamp
        assert!(ttl("2000000000000").is_err());
        assert!(ttl("8761").is_err());

        let config = load(&[("JWT_SECRET", SECRET), ("TOKEN_TTL_HOURS", "8760")]).unwrap();
        let issued = auth::TokenIssuer::new(&config.auth_config().unwrap())
            .issue(&auth::models::UserId::new());
        assert!(issued.is_ok());
    }
}
