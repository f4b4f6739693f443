use std::time::Duration;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, warn};

use crate::{auth::claims::Claims, auth::error::AuthError, config::JwtConfig};

#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    pub ttl: Duration,
}

impl JwtKeys {
    pub fn new(cfg: &JwtConfig) -> anyhow::Result<Self> {
        let ttl_secs = u64::try_from(cfg.ttl_minutes)
            .ok()
            .and_then(|m| m.checked_mul(60))
            .ok_or_else(|| anyhow::anyhow!("invalid token ttl: {} minutes", cfg.ttl_minutes))?;
        Ok(Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            ttl: Duration::from_secs(ttl_secs),
        })
    }

    pub fn sign(&self, user_id: u64) -> anyhow::Result<String> {
        self.sign_at(user_id, OffsetDateTime::now_utc())
    }

    pub fn sign_at(&self, user_id: u64, now: OffsetDateTime) -> anyhow::Result<String> {
        let exp = i64::try_from(self.ttl.as_secs())
            .ok()
            .and_then(|secs| now.checked_add(TimeDuration::seconds(secs)))
            .ok_or_else(|| anyhow::anyhow!("token expiry out of range"))?;
        let claims = Claims {
            id: user_id,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id, "jwt signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        self.verify_at(token, OffsetDateTime::now_utc())
    }

    /// Checks the signature, then expiry against `now` with no leeway.
    pub fn verify_at(&self, token: &str, now: OffsetDateTime) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.validate_exp = false;
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        if now.unix_timestamp() >= data.claims.exp as i64 {
            anyhow::bail!("token expired");
        }
        debug!(user_id = data.claims.id, "jwt verified");
        Ok(data.claims)
    }
}

/// Extracts and validates a bearer token, yielding the user id.
pub struct AuthUser(pub u64);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AuthError::Unauthorized("Missing Authorization header".into()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .or_else(|| auth_header.strip_prefix("bearer "))
            .ok_or_else(|| AuthError::Unauthorized("Invalid Authorization header".into()))?;

        match keys.verify(token) {
            Ok(claims) => Ok(AuthUser(claims.id)),
            Err(e) => {
                warn!(error = %e, "invalid or expired token");
                Err(AuthError::Unauthorized("Invalid or expired token".into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys(secret: &str) -> JwtKeys {
        JwtKeys::new(&JwtConfig {
            secret: secret.into(),
            ttl_minutes: 60,
        })
        .expect("valid ttl")
    }

    fn t0() -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap()
    }

    #[test]
    fn sign_and_verify_token() {
        let keys = make_keys("dev-secret");
        let token = keys.sign(42).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.id, 42);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn token_valid_at_59_minutes_and_expired_at_61() {
        let keys = make_keys("dev-secret");
        let token = keys.sign_at(7, t0()).expect("sign");

        let before = keys.verify_at(&token, t0() + TimeDuration::minutes(59));
        assert_eq!(before.expect("still valid").id, 7);

        let after = keys.verify_at(&token, t0() + TimeDuration::minutes(61));
        assert!(after.unwrap_err().to_string().contains("expired"));
    }

    #[test]
    fn token_expires_exactly_at_ttl() {
        let keys = make_keys("dev-secret");
        let token = keys.sign_at(7, t0()).unwrap();
        assert!(keys.verify_at(&token, t0() + TimeDuration::minutes(60)).is_err());
        assert!(keys
            .verify_at(&token, t0() + TimeDuration::minutes(60) - TimeDuration::seconds(1))
            .is_ok());
    }

    #[test]
    fn unrepresentable_ttl_is_an_error_not_a_panic() {
        assert!(JwtKeys::new(&JwtConfig {
            secret: "k".into(),
            ttl_minutes: -5,
        })
        .is_err());

        let keys = JwtKeys::new(&JwtConfig {
            secret: "k".into(),
            ttl_minutes: 100_000_000_000,
        })
        .expect("fits in a Duration");
        let err = keys.sign(1).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = make_keys("secret-a").sign(1).unwrap();
        assert!(make_keys("secret-b").verify(&token).is_err());
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let keys = make_keys("dev-secret");
        let token = keys.sign(1).unwrap();
        let other = keys.sign(2).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        parts[1] = other.split('.').nth(1).unwrap();
        let forged = parts.join(".");
        assert!(keys.verify(&forged).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(make_keys("dev-secret").verify("not.a.jwt").is_err());
    }
}
