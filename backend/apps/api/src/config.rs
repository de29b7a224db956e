//! Server configuration from the environment

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::{AuthConfig, AuthServices, SigningSecret};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

/// Everything `main` needs to start serving
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl ApiConfig {
    /// Read from process environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read through an arbitrary variable lookup
    ///
    /// `JWT_SECRET` and `DATABASE_URL` are required. Blank values count as
    /// unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let secret = var("JWT_SECRET").context("JWT_SECRET must be set")?;
        let mut auth = AuthConfig::new(SigningSecret::new(secret.into_bytes())?);

        if let Some(ttl) = var("TOKEN_TTL_SECS") {
            let secs: u64 = ttl
                .trim()
                .parse()
                .with_context(|| format!("TOKEN_TTL_SECS is not a number: {ttl}"))?;
            auth.token_ttl = Duration::from_secs(secs);
        }
        if let Some(secure) = var("COOKIE_SECURE") {
            auth.cookie.secure = parse_bool(&secure)
                .with_context(|| format!("COOKIE_SECURE must be true or false: {secure}"))?;
        }
        if let Some(n) = var("PASSWORD_HASH_CONCURRENCY") {
            auth.hash_concurrency = n
                .trim()
                .parse()
                .with_context(|| format!("PASSWORD_HASH_CONCURRENCY is not a number: {n}"))?;
            if auth.hash_concurrency == 0 {
                bail!("PASSWORD_HASH_CONCURRENCY must be at least 1");
            }
        }

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let bind_addr = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .trim()
            .parse()
            .with_context(|| format!("BIND_ADDR is not a socket address: {bind_addr}"))?;

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            database_url,
            bind_addr,
            frontend_origins,
            auth,
        })
    }
}

/// Build the auth services and prepare the hasher
///
/// Needs no database, so `main` runs it before connecting.
pub async fn build_auth_services(config: AuthConfig) -> anyhow::Result<AuthServices> {
    let services = AuthServices::new(config)?;
    services.hasher.warm_up().await?;
    Ok(services)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("DATABASE_URL", "postgres://localhost/tasks"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.auth.token_ttl, Duration::from_secs(1800));
        assert!(config.auth.cookie.secure);
        assert_eq!(config.frontend_origins.len(), 2);
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("DATABASE_URL", "postgres://localhost/tasks"),
            ("TOKEN_TTL_SECS", "600"),
            ("COOKIE_SECURE", "false"),
            ("PASSWORD_HASH_CONCURRENCY", "2"),
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("FRONTEND_ORIGINS", "https://app.example.com, "),
        ]))
        .unwrap();

        assert_eq!(config.auth.token_ttl, Duration::from_secs(600));
        assert!(!config.auth.cookie.secure);
        assert_eq!(config.auth.hash_concurrency, 2);
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.frontend_origins, vec!["https://app.example.com"]);
    }

    #[test]
    fn test_secret_required() {
        for secret in [None, Some(""), Some("   ")] {
            let mut pairs = vec![("DATABASE_URL", "postgres://localhost/tasks")];
            if let Some(secret) = secret {
                pairs.push(("JWT_SECRET", secret));
            }
            assert!(ApiConfig::from_lookup(lookup(&pairs)).is_err());
        }
    }

    #[tokio::test]
    async fn test_auth_services_checked_without_database() {
        let base = [
            ("JWT_SECRET", "s3cret"),
            ("DATABASE_URL", "postgres://unreachable.invalid/tasks"),
        ];

        let config = ApiConfig::from_lookup(lookup(&[base[0], base[1], ("TOKEN_TTL_SECS", "0")]))
            .unwrap();
        assert!(build_auth_services(config.auth).await.is_err());

        let config = ApiConfig::from_lookup(lookup(&[
            base[0],
            base[1],
            ("TOKEN_TTL_SECS", "31536001"),
        ]))
        .unwrap();
        assert!(build_auth_services(config.auth).await.is_err());

        let config = ApiConfig::from_lookup(lookup(&base)).unwrap();
        let services = build_auth_services(config.auth).await.unwrap();
        assert_eq!(services.config.token_ttl_secs(), 1800);
    }

    #[test]
    fn test_bad_values_rejected() {
        for (key, value) in [
            ("TOKEN_TTL_SECS", "soon"),
            ("COOKIE_SECURE", "maybe"),
            ("PASSWORD_HASH_CONCURRENCY", "0"),
            ("BIND_ADDR", "localhost"),
        ] {
            let result = ApiConfig::from_lookup(lookup(&[
                ("JWT_SECRET", "s3cret"),
                ("DATABASE_URL", "postgres://localhost/tasks"),
                (key, value),
            ]));
            assert!(result.is_err(), "{key}={value} should be rejected");
        }
    }
}
