use classtrack::utils::password::{hash_password, verify_password};

#[test]
fn test_hash_password_produces_verifiable_hash() {
    let password = "correct-horse-battery";

    let hash = hash_password(password).unwrap();

    assert_ne!(hash, password);
    assert!(verify_password(password, &hash).unwrap());
}

#[test]
fn test_verify_password_rejects_wrong_password() {
    let hash = hash_password("right-password").unwrap();

    assert!(!verify_password("wrong-password", &hash).unwrap());
}

#[test]
fn test_hashes_are_salted() {
    let password = "same-password";

    let first = hash_password(password).unwrap();
    let second = hash_password(password).unwrap();

    assert_ne!(first, second);
    assert!(verify_password(password, &first).unwrap());
    assert!(verify_password(password, &second).unwrap());
}

#[test]
fn test_verify_password_errors_on_malformed_hash() {
    assert!(verify_password("anything", "not-a-bcrypt-hash").is_err());
}
