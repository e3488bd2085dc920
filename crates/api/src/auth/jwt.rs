//! Bearer token issuance and verification.
//!
//! Tokens are HS256-signed JWTs carrying a [`Claims`] payload. They are
//! stateless: validity depends only on the signature and, when configured,
//! the expiry. There is no revocation list.

use bloglist_core::types::DbId;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's id.
    pub sub: DbId,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp). Absent when expiry is disabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Unique token identifier (UUID v4) so two tokens never collide.
    pub jti: String,
}

/// Configuration for token signing.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in minutes. `None` issues tokens that never expire.
    pub expiry_mins: Option<i64>,
}

impl JwtConfig {
    /// Load token configuration from environment variables.
    ///
    /// | Env Var             | Required | Default          |
    /// |---------------------|----------|------------------|
    /// | `SECRET`            | **yes**  | --               |
    /// | `TOKEN_EXPIRY_MINS` | no       | unset (no expiry)|
    ///
    /// A `TOKEN_EXPIRY_MINS` of `0` also disables expiry.
    ///
    /// # Panics
    ///
    /// Panics if `SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret = std::env::var("SECRET").expect("SECRET must be set in the environment");
        assert!(!secret.is_empty(), "SECRET must not be empty");

        let expiry_mins = std::env::var("TOKEN_EXPIRY_MINS")
            .ok()
            .map(|raw| {
                raw.parse::<i64>()
                    .expect("TOKEN_EXPIRY_MINS must be a valid i64")
            })
            .filter(|mins| *mins > 0);

        Self {
            secret,
            expiry_mins,
        }
    }
}

/// Why a token could not be issued or accepted.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token is invalid: {0}")]
    Invalid(jsonwebtoken::errors::Error),

    #[error("token could not be signed: {0}")]
    Signing(jsonwebtoken::errors::Error),
}

/// Issues and verifies bearer tokens with a signing key fixed at construction.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry: Option<chrono::Duration>,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        let expiry = config.expiry_mins.map(chrono::Duration::minutes);

        let mut validation = Validation::new(Algorithm::HS256);
        if expiry.is_none() {
            validation.validate_exp = false;
            validation.required_spec_claims.clear();
        }

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            expiry,
            validation,
        }
    }

    /// Token lifetime in seconds, if tokens expire.
    pub fn expires_in_secs(&self) -> Option<i64> {
        self.expiry.map(|d| d.num_seconds())
    }

    /// Issue a token for `user_id`.
    pub fn issue(&self, user_id: DbId) -> Result<String, TokenError> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: self.expiry.map(|d| (now + d).timestamp()),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)
    }

    /// Verify a presented token and return its claims.
    ///
    /// Fails on a bad signature, a malformed payload, or (when expiry is
    /// enabled) an expired or missing `exp` claim.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(err),
            })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    /// Helper to build a test config with a known secret.
    fn test_config(expiry_mins: Option<i64>) -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_mins,
        }
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let service = TokenService::new(&test_config(None));
        let token = service.issue(42).expect("token generation should succeed");

        let claims = service.verify(&token).expect("token validation should succeed");
        assert_eq!(claims.sub, 42);
        assert!(claims.exp.is_none());
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_tokens_for_same_user_differ() {
        let service = TokenService::new(&test_config(None));
        let a = service.issue(1).unwrap();
        let b = service.issue(1).unwrap();
        assert_ne!(a, b, "jti must make every token unique");
    }

    #[test]
    fn test_any_single_character_change_fails() {
        let service = TokenService::new(&test_config(None));
        let token = service.issue(7).unwrap();

        for (index, original) in token.char_indices() {
            let replacement = if original == 'A' { 'B' } else { 'A' };
            let mut tampered = token.clone();
            tampered.replace_range(index..index + original.len_utf8(), &replacement.to_string());

            assert!(
                service.verify(&tampered).is_err(),
                "altering character {index} must invalidate the token"
            );
        }
    }

    #[test]
    fn test_garbage_is_rejected() {
        let service = TokenService::new(&test_config(None));
        assert_matches!(service.verify("not-a-token"), Err(TokenError::Invalid(_)));
        assert_matches!(service.verify(""), Err(TokenError::Invalid(_)));
    }

    #[test]
    fn test_different_secrets_fail() {
        let service_a = TokenService::new(&JwtConfig {
            secret: "secret-alpha".to_string(),
            expiry_mins: None,
        });
        let service_b = TokenService::new(&JwtConfig {
            secret: "secret-bravo".to_string(),
            expiry_mins: None,
        });

        let token = service_a.issue(1).unwrap();
        assert!(
            service_b.verify(&token).is_err(),
            "token signed with a different secret must fail"
        );
    }

    #[test]
    fn test_expiring_token_carries_exp() {
        let service = TokenService::new(&test_config(Some(15)));
        let token = service.issue(3).unwrap();

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.exp, Some(claims.iat + 15 * 60));
        assert_eq!(service.expires_in_secs(), Some(900));
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config(Some(15));
        let service = TokenService::new(&config);

        // Use a margin well beyond the default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            iat: now - 600,
            exp: Some(now - 300),
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        assert_matches!(service.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_token_without_exp_rejected_when_expiry_enabled() {
        let never_expiring = TokenService::new(&test_config(None));
        let expiring = TokenService::new(&test_config(Some(15)));

        let token = never_expiring.issue(5).unwrap();
        assert!(expiring.verify(&token).is_err());
    }
}
