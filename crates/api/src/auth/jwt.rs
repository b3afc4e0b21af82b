//! Access-token validation.
//!
//! The marketplace identity service issues HS256 access tokens; this
//! backend only validates them. The signing secret is shared via
//! configuration — no issuance or refresh handling happens here.

use bom_core::types::Id;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's id at the identity service.
    pub sub: Id,
    /// The user's role name (e.g. `"ADMIN"`, `"STAR"`).
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// Configuration for access-token validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the identity service.
    pub secret: String,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");
        Self { secret }
    }
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration automatically.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use uuid::Uuid;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
        }
    }

    /// Mint a token the way the identity service does.
    fn mint(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("encoding should succeed")
    }

    #[test]
    fn valid_token_decodes() {
        let config = test_config();
        let now = chrono::Utc::now().timestamp();
        let user_id = Uuid::new_v4();
        let token = mint(
            &Claims {
                sub: user_id,
                role: "STAR".to_string(),
                exp: now + 900,
                iat: now,
            },
            &config.secret,
        );

        let claims = validate_token(&token, &config).expect("validation should succeed");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, "STAR");
    }

    #[test]
    fn expired_token_fails() {
        let config = test_config();
        // Expired well past the default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let token = mint(
            &Claims {
                sub: Uuid::new_v4(),
                role: "STAR".to_string(),
                exp: now - 300,
                iat: now - 600,
            },
            &config.secret,
        );

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn wrong_secret_fails() {
        let config = test_config();
        let now = chrono::Utc::now().timestamp();
        let token = mint(
            &Claims {
                sub: Uuid::new_v4(),
                role: "ADMIN".to_string(),
                exp: now + 900,
                iat: now,
            },
            "a-different-secret",
        );

        assert!(validate_token(&token, &config).is_err());
    }
}
