use std::env;

/// Token signing configuration. Loaded once at process start and never
/// mutated; the same secret is shared by the issuer and the request
/// authenticator. There is no runtime rotation.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_seconds: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            expiry_seconds: env::var("JWT_EXPIRY_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(36000), // 10 hours
        }
    }
}
