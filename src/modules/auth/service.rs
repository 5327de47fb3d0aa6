use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::verify_password;

use super::model::{LoginFailure, LoginRequest, LoginResponse, Role};

#[derive(Debug, sqlx::FromRow)]
struct SchoolRow {
    id: Uuid,
}

/// Credential record shape shared by the student and staff collections.
/// TEACHER, PRINCIPAL and MANAGER all resolve against the staff collection;
/// they differ only in the role claimed at login.
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    password: Option<String>,
    school_id: Option<Uuid>,
}

pub struct AuthService;

impl AuthService {
    /// Validates a login attempt and issues a token.
    ///
    /// The outer `Result` is a storage failure (propagates as 500). The inner
    /// `Err` is a refusal: role not supported, tenant unknown, principal
    /// unknown, password mismatch, or tenant mismatch. Tenant and credential
    /// refusals collapse to one caller-facing message so failed attempts
    /// cannot be used to enumerate schools or usernames.
    #[instrument(skip(db, dto, jwt_config), fields(school_name = %dto.school_name))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<Result<LoginResponse, LoginFailure>, AppError> {
        let Some(role) = Role::parse(&dto.role) else {
            return Ok(Err(LoginFailure::UnsupportedRole));
        };

        let school = sqlx::query_as::<_, SchoolRow>("SELECT id FROM schools WHERE school_name = $1")
            .bind(&dto.school_name)
            .fetch_optional(db)
            .await?;
        let Some(school) = school else {
            return Ok(Err(LoginFailure::InvalidTenant));
        };

        let query = match role {
            Role::Student => "SELECT id, email, password, school_id FROM students WHERE email = $1",
            Role::Teacher | Role::Principal | Role::Manager => {
                "SELECT id, email, password, school_id FROM teachers WHERE email = $1"
            }
        };
        let account = sqlx::query_as::<_, AccountRow>(query)
            .bind(&dto.username)
            .fetch_optional(db)
            .await?;

        let Some(account) = account else {
            return Ok(Err(LoginFailure::InvalidCredentials));
        };

        if !credentials_match(&account, &dto.password, school.id)? {
            return Ok(Err(LoginFailure::InvalidCredentials));
        }

        let token = create_access_token(&account.email, role, account.id, school.id, jwt_config)?;

        Ok(Ok(LoginResponse::granted(role, account.id, school.id, token)))
    }
}

/// A principal is accepted only if it has a stored password hash, the supplied
/// plaintext matches it, and the principal belongs to the resolved school.
fn credentials_match(
    account: &AccountRow,
    password: &str,
    school_id: Uuid,
) -> Result<bool, AppError> {
    let Some(stored_hash) = account.password.as_deref() else {
        return Ok(false);
    };
    if !verify_password(password, stored_hash)? {
        return Ok(false);
    }
    Ok(account.school_id == Some(school_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::password::hash_password;

    fn account(password: Option<String>, school_id: Option<Uuid>) -> AccountRow {
        AccountRow {
            id: Uuid::new_v4(),
            email: "jane@school.test".to_string(),
            password,
            school_id,
        }
    }

    #[test]
    fn accepts_matching_password_and_school() {
        let school_id = Uuid::new_v4();
        let acct = account(Some(hash_password("s3cret").unwrap()), Some(school_id));

        assert!(credentials_match(&acct, "s3cret", school_id).unwrap());
    }

    #[test]
    fn rejects_missing_password_hash() {
        let school_id = Uuid::new_v4();
        let acct = account(None, Some(school_id));

        assert!(!credentials_match(&acct, "anything", school_id).unwrap());
    }

    #[test]
    fn rejects_wrong_password() {
        let school_id = Uuid::new_v4();
        let acct = account(Some(hash_password("s3cret").unwrap()), Some(school_id));

        assert!(!credentials_match(&acct, "wrong", school_id).unwrap());
    }

    #[test]
    fn rejects_school_mismatch() {
        let acct = account(
            Some(hash_password("s3cret").unwrap()),
            Some(Uuid::new_v4()),
        );

        assert!(!credentials_match(&acct, "s3cret", Uuid::new_v4()).unwrap());
    }

    #[test]
    fn rejects_account_without_school() {
        let acct = account(Some(hash_password("s3cret").unwrap()), None);

        assert!(!credentials_match(&acct, "s3cret", Uuid::new_v4()).unwrap());
    }
}
