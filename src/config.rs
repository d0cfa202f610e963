/*
 * Responsibility
 * - Environment / configuration loading (DATABASE_URL, CORS allowlist, Auth0 settings)
 * - Validation of configured values (startup fails on missing/invalid keys)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use jsonwebtoken::Algorithm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    /// Auth0 tenant domain, e.g. `dev-xyz.us.auth0.com` (no scheme, no path).
    pub auth0_domain: String,
    /// Allow-list of accepted token signing algorithms. Never empty.
    pub algorithms: Vec<Algorithm>,
    /// Expected `aud` claim (the API identifier registered with the authority).
    pub api_audience: String,

    pub token_leeway_seconds: u64,
    pub jwks_timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let auth0_domain = std::env::var("AUTH0_DOMAIN")
            .map_err(|_| ConfigError::Missing("AUTH0_DOMAIN"))?
            .trim()
            .to_string();
        // The domain is interpolated into URLs; reject values smuggling a scheme or path.
        if auth0_domain.is_empty() || auth0_domain.contains('/') {
            return Err(ConfigError::Invalid("AUTH0_DOMAIN"));
        }

        let algorithms = parse_algorithms(
            &std::env::var("ALGORITHMS").map_err(|_| ConfigError::Missing("ALGORITHMS"))?,
        )?;

        let api_audience =
            std::env::var("API_AUDIENCE").map_err(|_| ConfigError::Missing("API_AUDIENCE"))?;
        if api_audience.trim().is_empty() {
            return Err(ConfigError::Invalid("API_AUDIENCE"));
        }

        let token_leeway_seconds = std::env::var("ACCESS_TOKEN_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        let jwks_timeout_seconds = std::env::var("JWKS_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(10);

        Ok(Self {
            addr,
            database_url,
            app_env,
            cors_allowed_origins,
            auth0_domain,
            algorithms,
            api_audience,
            token_leeway_seconds,
            jwks_timeout_seconds,
        })
    }
}

/// Parse a comma-separated algorithm allow-list (e.g. `RS256` or `RS256,RS384`).
///
/// The allow-list must not end up empty: verifying tokens with no accepted
/// algorithm is a configuration mistake, not a runtime condition.
fn parse_algorithms(raw: &str) -> Result<Vec<Algorithm>, ConfigError> {
    let algorithms = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Algorithm::from_str(s).map_err(|_| ConfigError::Invalid("ALGORITHMS")))
        .collect::<Result<Vec<_>, _>>()?;

    if algorithms.is_empty() {
        return Err(ConfigError::Invalid("ALGORITHMS"));
    }

    Ok(algorithms)
}
