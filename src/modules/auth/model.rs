use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Closed set of roles a caller can claim at login. The original system passed
/// these around as free-form strings; here every component works against the
/// enum and parsing happens exactly once, at the login boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Student,
    Teacher,
    Principal,
    Manager,
}

impl Role {
    /// Normalizes and parses a claimed role. Matching is case-insensitive and
    /// ignores surrounding whitespace; anything outside the closed set is
    /// rejected rather than defaulted.
    pub fn parse(raw: &str) -> Option<Role> {
        match raw.trim().to_uppercase().as_str() {
            "STUDENT" => Some(Role::Student),
            "TEACHER" => Some(Role::Teacher),
            "PRINCIPAL" => Some(Role::Principal),
            "MANAGER" => Some(Role::Manager),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Teacher => "TEACHER",
            Role::Principal => "PRINCIPAL",
            Role::Manager => "MANAGER",
        }
    }
}

/// JWT claims embedded in every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username (email) of the principal.
    pub sub: String,
    pub role: Role,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[serde(rename = "schoolId")]
    pub school_id: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// Authenticated identity reconstructed from a verified token (or produced by
/// a successful login). Lives only for the duration of one request.
#[derive(Debug, Clone)]
pub struct Principal {
    pub subject: String,
    pub role: Role,
    pub user_id: Uuid,
    pub school_id: Uuid,
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Principal {
            subject: claims.sub,
            role: claims.role,
            user_id: claims.user_id,
            school_id: claims.school_id,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "schoolName is required"))]
    pub school_name: String,
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    #[validate(length(min = 1, message = "role is required"))]
    pub role: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl LoginResponse {
    pub fn granted(role: Role, user_id: Uuid, school_id: Uuid, token: String) -> Self {
        LoginResponse {
            success: true,
            message: "Login successful".to_string(),
            role: Some(role),
            user_id: Some(user_id),
            school_id: Some(school_id),
            token: Some(token),
        }
    }

    pub fn refused(failure: LoginFailure) -> Self {
        LoginResponse {
            success: false,
            message: failure.message().to_string(),
            role: None,
            user_id: None,
            school_id: None,
            token: None,
        }
    }
}

/// Reasons a login attempt is refused. Tenant and credential failures share
/// one user-facing message so a caller cannot probe which part was wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFailure {
    InvalidTenant,
    InvalidCredentials,
    UnsupportedRole,
}

impl LoginFailure {
    pub fn message(&self) -> &'static str {
        match self {
            LoginFailure::InvalidTenant | LoginFailure::InvalidCredentials => "Invalid credentials",
            LoginFailure::UnsupportedRole => "Unsupported role",
        }
    }
}
