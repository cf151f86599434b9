//! Service-account authorization for the Sheets API.
//!
//! Standard two-legged OAuth: sign a JWT with the key file's RSA key and
//! exchange it at the token endpoint for a short-lived bearer token.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use std::path::Path;

const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// The fields we need from a Google service-account key file.
#[derive(Debug, Deserialize)]
struct ServiceAccountKey {
    client_email: String,
    private_key: String,
    token_uri: String,
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Bearer token for the lifetime of one run. Runs are far shorter than the
/// token's validity window, so there is no refresh path.
#[derive(Debug, Clone)]
pub struct AccessToken {
    secret: String,
}

impl AccessToken {
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

/// Exchange the service-account key for a bearer token.
pub async fn authorize(http: &reqwest::Client, key_file: &Path) -> Result<AccessToken> {
    let raw = std::fs::read_to_string(key_file)
        .with_context(|| format!("Failed to read credentials file: {}", key_file.display()))?;
    let key: ServiceAccountKey = serde_json::from_str(&raw)
        .with_context(|| format!("Malformed service-account key file: {}", key_file.display()))?;

    let now = Utc::now();
    let claims = Claims {
        iss: &key.client_email,
        scope: SHEETS_SCOPE,
        aud: &key.token_uri,
        iat: now.timestamp(),
        exp: (now + Duration::hours(1)).timestamp(),
    };

    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .context("Service-account private key is not valid RSA PEM")?;
    let assertion = encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
        .context("Failed to sign token assertion")?;

    let response = http
        .post(&key.token_uri)
        .form(&[("grant_type", GRANT_TYPE), ("assertion", assertion.as_str())])
        .send()
        .await
        .context("Token request failed")?
        .error_for_status()
        .context("Token request was rejected")?;

    let token: TokenResponse = response
        .json()
        .await
        .context("Malformed token response")?;

    log::debug!(
        "Authorized as {}; token valid until {}",
        key.client_email,
        now + Duration::seconds(token.expires_in)
    );

    Ok(AccessToken {
        secret: token.access_token,
    })
}
