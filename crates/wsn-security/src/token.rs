//! A JWT-shaped token for the login demo.
//!
//! The signature segment is a fixed placeholder; nothing is ever verified.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::{SecurityError, SecurityResult};

pub const DEMO_USERNAME: &str = "admin";
pub const DEMO_PASSWORD: &str = "password";
pub const FAKE_SIGNATURE: &str = "FAKE_SIGNATURE_FOR_DEMO_PURPOSES_ONLY";
/// Seconds between `iat` and `exp`.
pub const TOKEN_LIFETIME_SECS: i64 = 3_600;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    pub alg: String,
    pub typ: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub:  String,
    pub name: String,
    pub role: String,
    pub iat:  i64,
    pub exp:  i64,
}

/// An issued token: the decoded parts plus the encoded string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoToken {
    pub header:  TokenHeader,
    pub claims:  TokenClaims,
    pub encoded: String,
}

impl DemoToken {
    /// Issue a token for the single demo account.
    pub fn issue(username: &str, password: &str, now: DateTime<Utc>) -> SecurityResult<Self> {
        if username != DEMO_USERNAME || password != DEMO_PASSWORD {
            return Err(SecurityError::InvalidCredentials);
        }

        let header = TokenHeader { alg: "RS256".to_owned(), typ: "JWT".to_owned() };
        let iat = now.timestamp();
        let claims = TokenClaims {
            sub:  "1234567890".to_owned(),
            name: "Admin User".to_owned(),
            role: "admin".to_owned(),
            iat,
            exp:  iat + TOKEN_LIFETIME_SECS,
        };

        let encoded = format!(
            "{}.{}.{FAKE_SIGNATURE}",
            STANDARD.encode(serde_json::to_vec(&header)?),
            STANDARD.encode(serde_json::to_vec(&claims)?),
        );
        info!("issued demo token for {username}");
        Ok(Self { header, claims, encoded })
    }

    /// Split `token` into its three segments and decode the first two.
    pub fn decode(token: &str) -> SecurityResult<Self> {
        let mut parts = token.split('.');
        let (Some(header), Some(claims), Some(_signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(SecurityError::MalformedToken("expected three segments".to_owned()));
        };

        Ok(Self {
            header:  serde_json::from_slice(&STANDARD.decode(header)?)?,
            claims:  serde_json::from_slice(&STANDARD.decode(claims)?)?,
            encoded: token.to_owned(),
        })
    }

    /// Whether `exp` has passed at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.claims.exp
    }
}
