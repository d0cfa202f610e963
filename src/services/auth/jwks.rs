//! Remote JSON Web Key Set handling.
//!
//! The authority publishes its signing keys at
//! `https://<domain>/.well-known/jwks.json`; [`HttpKeySource`] fetches that
//! document fresh on every verification (no cache in this design — a rotated
//! key is rejected immediately, at the cost of one fetch per request).
//! [`KeySource`] is the seam a TTL cache could later sit behind without
//! touching the verifier.

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

/// A published key set (`keys` array of JWK descriptors).
#[derive(Debug, Clone, Deserialize)]
pub struct Jwks {
    pub keys: Vec<Jwk>,
}

/// One key descriptor. Only the fields verification needs; RSA material is
/// optional so a set mixing in EC keys still deserializes.
#[derive(Debug, Clone, Deserialize)]
pub struct Jwk {
    pub kty: String,
    #[serde(default)]
    pub kid: Option<String>,
    #[serde(rename = "use", default)]
    pub use_: Option<String>,
    #[serde(default)]
    pub alg: Option<String>,
    #[serde(default)]
    pub n: Option<String>,
    #[serde(default)]
    pub e: Option<String>,
}

/// The resolved subset of one descriptor, copied verbatim. Derived per
/// verification, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningKey {
    pub kty: String,
    pub kid: String,
    pub use_: Option<String>,
    pub n: String,
    pub e: String,
}

impl Jwks {
    /// Find the descriptor whose `kid` matches the token's declared one.
    pub fn find(&self, kid: &str) -> Option<&Jwk> {
        self.keys.iter().find(|k| k.kid.as_deref() == Some(kid))
    }
}

impl Jwk {
    /// Extract the RSA verification material, or `None` when the descriptor
    /// is not a usable RSA key.
    pub fn signing_key(&self) -> Option<SigningKey> {
        if self.kty != "RSA" {
            return None;
        }
        Some(SigningKey {
            kty: self.kty.clone(),
            kid: self.kid.clone()?,
            use_: self.use_.clone(),
            n: self.n.clone()?,
            e: self.e.clone()?,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KeySourceError {
    #[error("jwks request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("jwks endpoint returned {0}")]
    Status(reqwest::StatusCode),
}

/// Where signing keys come from. Object-safe so the verifier can hold it as
/// `Arc<dyn KeySource>` (swapped for a stub in tests).
#[async_trait]
pub trait KeySource: Send + Sync {
    async fn fetch(&self) -> Result<Jwks, KeySourceError>;
}

/// Fetches the key set over HTTPS. The client carries a bounded timeout so an
/// unreachable authority cannot stall a request indefinitely.
#[derive(Debug, Clone)]
pub struct HttpKeySource {
    client: reqwest::Client,
    jwks_url: Url,
}

impl HttpKeySource {
    pub fn new(client: reqwest::Client, jwks_url: Url) -> Self {
        Self { client, jwks_url }
    }
}

#[async_trait]
impl KeySource for HttpKeySource {
    async fn fetch(&self) -> Result<Jwks, KeySourceError> {
        let response = self.client.get(self.jwks_url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(KeySourceError::Status(status));
        }

        Ok(response.json::<Jwks>().await?)
    }
}
