//! Signs and verifies JWTs with a shared HMAC secret.

use std::str::FromStr;

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use userhub_core::config::AuthConfig;
use userhub_core::error::{AppError, ErrorKind};
use userhub_core::result::AppResult;

use super::claims::{ClaimSet, Claims};

/// Token codec: pure functions of the input and the shared secret.
#[derive(Clone)]
pub struct TokenCodec {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.algorithm)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl TokenCodec {
    /// Creates a codec from auth configuration. Only HMAC algorithms are accepted.
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        let algorithm = Algorithm::from_str(&config.jwt_algorithm).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Unknown JWT algorithm '{}'", config.jwt_algorithm),
                e,
            )
        })?;
        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(AppError::configuration(format!(
                "JWT algorithm '{}' is not a shared-secret algorithm",
                config.jwt_algorithm
            )));
        }
        if config.jwt_secret.is_empty() {
            return Err(AppError::configuration("JWT secret must not be empty"));
        }

        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;

        Ok(Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            access_ttl: Duration::seconds(config.access_token_ttl_seconds as i64),
            refresh_ttl: Duration::seconds(config.refresh_token_ttl_seconds as i64),
        })
    }

    /// Default access token lifetime.
    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    /// Default refresh token lifetime.
    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Signs `claims` with a fresh jti and `exp = now + lifetime`.
    ///
    /// Negative lifetimes are allowed and produce an already-expired token.
    pub fn issue(&self, claims: &ClaimSet, lifetime: Duration) -> AppResult<String> {
        let now = Utc::now();
        let payload = Claims {
            sub: claims.sub.clone(),
            id: claims.id,
            role: claims.role,
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
            jti: Uuid::new_v4(),
            kind: claims.kind,
        };

        encode(&Header::new(self.algorithm), &payload, &self.encoding_key).map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Failed to encode token", e)
        })
    }

    /// Verifies signature and expiry, returning the decoded claims.
    pub fn parse(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => AppError::token_expired("Token has expired"),
                _ => AppError::malformed_token("Could not validate credentials"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::claims::TokenKind;
    use userhub_entity::user::UserRole;

    fn codec_with_secret(secret: &str) -> TokenCodec {
        let config = AuthConfig {
            jwt_secret: secret.to_string(),
            ..AuthConfig::default()
        };
        TokenCodec::new(&config).unwrap()
    }

    fn codec() -> TokenCodec {
        codec_with_secret("test-secret-key-for-unit-tests")
    }

    #[test]
    fn test_issue_and_parse_access() {
        let codec = codec();
        let input = ClaimSet::access("a@x.com", Uuid::new_v4());
        let token = codec.issue(&input, codec.access_ttl()).unwrap();

        let claims = codec.parse(&token).unwrap();
        assert_eq!(claims.claim_set(), input);
        assert_eq!(claims.kind, TokenKind::Access);
        assert!(claims.role.is_none());
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_issue_and_parse_refresh_keeps_role() {
        let codec = codec();
        let input = ClaimSet::refresh("admin@x.com", Uuid::new_v4(), UserRole::Admin);
        let token = codec.issue(&input, Duration::seconds(1)).unwrap();

        let claims = codec.parse(&token).unwrap();
        assert_eq!(claims.claim_set(), input);
    }

    #[test]
    fn test_each_issue_gets_a_fresh_jti() {
        let codec = codec();
        let input = ClaimSet::access("a@x.com", Uuid::new_v4());
        let first = codec.parse(&codec.issue(&input, codec.access_ttl()).unwrap()).unwrap();
        let second = codec.parse(&codec.issue(&input, codec.access_ttl()).unwrap()).unwrap();
        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_negative_lifetime_is_expired() {
        let codec = codec();
        let input = ClaimSet::access("a@x.com", Uuid::new_v4());
        let token = codec.issue(&input, Duration::seconds(-1)).unwrap();

        let err = codec.parse(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenExpired);
    }

    #[test]
    fn test_wrong_secret_is_malformed() {
        let token = codec_with_secret("secret-one")
            .issue(&ClaimSet::access("a@x.com", Uuid::new_v4()), Duration::hours(1))
            .unwrap();

        let err = codec_with_secret("secret-two").parse(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedToken);
    }

    #[test]
    fn test_garbage_is_malformed() {
        let err = codec().parse("not.a.jwt").unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedToken);
        let err = codec().parse("").unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedToken);
    }

    #[test]
    fn test_tampered_payload_is_malformed() {
        let codec = codec();
        let forged = codec
            .issue(&ClaimSet::access("evil@x.com", Uuid::new_v4()), Duration::hours(1))
            .unwrap();
        let token = codec
            .issue(&ClaimSet::access("a@x.com", Uuid::new_v4()), Duration::hours(1))
            .unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        parts[1] = forged.split('.').nth(1).unwrap();

        let err = codec.parse(&parts.join(".")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedToken);
    }

    #[test]
    fn test_rejects_asymmetric_algorithm() {
        let config = AuthConfig {
            jwt_algorithm: "RS256".to_string(),
            ..AuthConfig::default()
        };
        let err = TokenCodec::new(&config).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
