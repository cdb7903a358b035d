use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

use crate::auth::claims::Claims;
use crate::state::AppState;

/// Holds JWT signing and verification keys.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn sign(&self, user_id: i64, username: &str) -> anyhow::Result<String> {
        let claims = Claims {
            id: user_id,
            username: username.to_string(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id, "jwt signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        // Tokens have no exp claim, so expiry validation must be off.
        let mut validation = Validation::default();
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(user_id = data.claims.id, "jwt verified");
        Ok(data.claims)
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::new(&state.config.jwt.secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify_roundtrip() {
        let keys = JwtKeys::new("dev-secret");
        let token = keys.sign(42, "alice").expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.id, 42);
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn tokens_from_different_secrets_are_rejected() {
        let good = JwtKeys::new("secret-a");
        let bad = JwtKeys::new("secret-b");
        let token = good.sign(1, "alice").expect("sign");
        assert!(bad.verify(&token).is_err());
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        let keys = JwtKeys::new("dev-secret");
        assert!(keys.verify("not.a.token").is_err());
        assert!(keys.verify("").is_err());
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let keys = JwtKeys::new("dev-secret");
        let token = keys.sign(1, "alice").expect("sign");
        let mut parts: Vec<&str> = token.split('.').collect();
        let other = keys.sign(2, "mallory").expect("sign");
        let other_payload = other.split('.').nth(1).expect("payload");
        parts[1] = other_payload;
        assert!(keys.verify(&parts.join(".")).is_err());
    }
}
