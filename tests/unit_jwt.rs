use chrono::Utc;
use classtrack::config::jwt::JwtConfig;
use classtrack::modules::auth::model::{Claims, Principal, Role};
use classtrack::utils::jwt::{create_access_token, verify_token};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        expiry_seconds: 3600,
    }
}

#[test]
fn test_create_access_token_success() {
    let jwt_config = get_test_jwt_config();

    let token = create_access_token(
        "student@school.test",
        Role::Student,
        Uuid::new_v4(),
        Uuid::new_v4(),
        &jwt_config,
    )
    .unwrap();

    assert!(!token.is_empty());
}

#[test]
fn test_round_trip_preserves_principal_identity() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();
    let school_id = Uuid::new_v4();

    for role in [Role::Student, Role::Teacher, Role::Principal, Role::Manager] {
        let token =
            create_access_token("user@school.test", role, user_id, school_id, &jwt_config)
                .unwrap();
        let claims = verify_token(&token, &jwt_config).unwrap();

        assert_eq!(claims.sub, "user@school.test");
        assert_eq!(claims.role, role);
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.school_id, school_id);
        assert!(claims.exp > claims.iat);

        let principal = Principal::from(claims);
        assert_eq!(principal.role, role);
        assert_eq!(principal.user_id, user_id);
        assert_eq!(principal.school_id, school_id);
    }
}

#[test]
fn test_verify_token_invalid() {
    let jwt_config = get_test_jwt_config();

    assert!(verify_token("invalid.token.here", &jwt_config).is_err());
    assert!(verify_token("", &jwt_config).is_err());
}

#[test]
fn test_verify_token_wrong_secret() {
    let jwt_config = get_test_jwt_config();
    let token = create_access_token(
        "user@school.test",
        Role::Teacher,
        Uuid::new_v4(),
        Uuid::new_v4(),
        &jwt_config,
    )
    .unwrap();

    let wrong_jwt_config = JwtConfig {
        secret: "different_secret_key".to_string(),
        expiry_seconds: 3600,
    };

    assert!(verify_token(&token, &wrong_jwt_config).is_err());
}

#[test]
fn test_verify_token_expired() {
    let jwt_config = get_test_jwt_config();
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: "user@school.test".to_string(),
        role: Role::Student,
        user_id: Uuid::new_v4(),
        school_id: Uuid::new_v4(),
        iat: now - 7200,
        exp: now - 3600,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .unwrap();

    assert!(verify_token(&token, &jwt_config).is_err());
}

#[test]
fn test_tampered_payload_is_rejected() {
    let jwt_config = get_test_jwt_config();
    let token = create_access_token(
        "user@school.test",
        Role::Student,
        Uuid::new_v4(),
        Uuid::new_v4(),
        &jwt_config,
    )
    .unwrap();

    // Swap out the payload segment while keeping the original signature.
    let mut parts: Vec<&str> = token.split('.').collect();
    let other = create_access_token(
        "other@school.test",
        Role::Manager,
        Uuid::new_v4(),
        Uuid::new_v4(),
        &jwt_config,
    )
    .unwrap();
    let other_parts: Vec<&str> = other.split('.').collect();
    parts[1] = other_parts[1];
    let tampered = parts.join(".");

    assert!(verify_token(&tampered, &jwt_config).is_err());
}
