use serde::{Deserialize, Serialize};

/// JWT payload: the authenticated identity embedded in every bearer token.
///
/// Tokens carry no expiration; they stay valid until the signing secret
/// rotates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,          // user ID
    pub username: String,
}
