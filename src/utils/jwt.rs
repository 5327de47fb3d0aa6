use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::{Claims, Role};
use crate::utils::errors::AppError;

/// Issues a signed, expiring bearer token for a validated principal. The
/// lifetime is a fixed process-wide duration, not per-role.
pub fn create_access_token(
    subject: &str,
    role: Role,
    user_id: Uuid,
    school_id: Uuid,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: subject.to_string(),
        role,
        user_id,
        school_id,
        iat: now,
        exp: now + jwt_config.expiry_seconds,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Verifies signature and expiry, returning the embedded claims. The error
/// branch carries the verification failure so callers can decide explicitly
/// how to treat an invalid token; nothing is swallowed here.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}
