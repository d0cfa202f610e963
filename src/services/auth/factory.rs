/// Factory: build `AuthService` from application `Config`.
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use url::Url;

use crate::config::Config;
use crate::services::auth::AuthService;
use crate::services::auth::jwks::HttpKeySource;

pub fn build_auth_service(config: &Config) -> Result<Arc<AuthService>> {
    let jwks_url = Url::parse(&format!(
        "https://{}/.well-known/jwks.json",
        config.auth0_domain
    ))
    .context("AUTH0_DOMAIN does not form a valid JWKS URL")?;

    let issuer = format!("https://{}/", config.auth0_domain);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.jwks_timeout_seconds))
        .build()
        .context("failed to build JWKS HTTP client")?;

    let auth = AuthService::new(
        Arc::new(HttpKeySource::new(client, jwks_url)),
        config.algorithms.clone(),
        &config.api_audience,
        &issuer,
        config.token_leeway_seconds,
    )
    .map_err(|e| anyhow!(e))?;

    Ok(Arc::new(auth))
}
