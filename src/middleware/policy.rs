//! Route-level access policy.
//!
//! A static ordered rule list maps route patterns to the roles allowed to
//! invoke them. The policy is evaluated per request after authentication and
//! is independent of it: an anonymous request on a protected route yields
//! 401, an authenticated one with the wrong role yields 403.
//!
//! The policy is route-level only. A STUDENT token is not checked against the
//! `student_id` path parameter it requests, so any student token can read any
//! student's progress. This reproduces the current system behavior and is
//! called out as an open question rather than silently changed.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::modules::auth::model::{Principal, Role};
use crate::state::AppState;
use crate::utils::errors::AppError;

const ANY_ROLE: &[Role] = &[Role::Student, Role::Teacher, Role::Principal, Role::Manager];

#[derive(Debug, Clone, Copy)]
pub enum Access {
    /// No principal required.
    Public,
    /// Authenticated principal whose role is in the set.
    AnyOf(&'static [Role]),
    /// Authenticated principal of any role.
    Authenticated,
}

#[derive(Debug, Clone, Copy)]
pub struct AccessRule {
    pub pattern: &'static str,
    pub access: Access,
}

/// Outcome of evaluating the policy for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyDecision {
    Allow,
    /// No principal attached but the route requires one.
    Unauthenticated,
    /// Principal attached but its role is not in the allowed set.
    WrongRole,
}

/// Static route-to-roles mapping. Constructed once at startup and shared
/// immutably through the application state; never mutated at runtime.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    rules: Vec<AccessRule>,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessPolicy {
    /// The rule list is ordered; the first matching pattern wins, so the
    /// public registration routes must precede the role-scoped `/**` rules
    /// that would otherwise cover them.
    pub fn new() -> Self {
        AccessPolicy {
            rules: vec![
                AccessRule {
                    pattern: "/api/auth/login",
                    access: Access::Public,
                },
                AccessRule {
                    pattern: "/api/teacher/register",
                    access: Access::Public,
                },
                AccessRule {
                    pattern: "/api/students/register",
                    access: Access::Public,
                },
                AccessRule {
                    pattern: "/api-docs/**",
                    access: Access::Public,
                },
                AccessRule {
                    pattern: "/swagger-ui",
                    access: Access::Public,
                },
                AccessRule {
                    pattern: "/swagger-ui/**",
                    access: Access::Public,
                },
                AccessRule {
                    pattern: "/scalar",
                    access: Access::Public,
                },
                AccessRule {
                    pattern: "/api/students/**",
                    access: Access::AnyOf(&[Role::Student]),
                },
                AccessRule {
                    pattern: "/api/teacher/**",
                    access: Access::AnyOf(&[Role::Teacher, Role::Principal, Role::Manager]),
                },
                AccessRule {
                    pattern: "/api/broadcast/**",
                    access: Access::AnyOf(&[Role::Principal, Role::Manager]),
                },
                AccessRule {
                    pattern: "/api/ai/**",
                    access: Access::AnyOf(ANY_ROLE),
                },
            ],
        }
    }

    pub fn evaluate(&self, path: &str, principal: Option<&Principal>) -> PolicyDecision {
        let access = self
            .rules
            .iter()
            .find(|rule| pattern_matches(rule.pattern, path))
            .map(|rule| rule.access)
            // No explicit rule: any authenticated principal is acceptable.
            .unwrap_or(Access::Authenticated);

        match access {
            Access::Public => PolicyDecision::Allow,
            Access::Authenticated => match principal {
                Some(_) => PolicyDecision::Allow,
                None => PolicyDecision::Unauthenticated,
            },
            Access::AnyOf(roles) => match principal {
                None => PolicyDecision::Unauthenticated,
                Some(p) if roles.contains(&p.role) => PolicyDecision::Allow,
                Some(_) => PolicyDecision::WrongRole,
            },
        }
    }
}

/// Ant-style matching: a trailing `/**` matches the prefix itself and any
/// path below it; everything else is an exact match.
fn pattern_matches(pattern: &str, path: &str) -> bool {
    match pattern.strip_suffix("/**") {
        Some(prefix) => {
            path == prefix || (path.starts_with(prefix) && path[prefix.len()..].starts_with('/'))
        }
        None => path == pattern,
    }
}

pub async fn enforce_policy(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let principal = req.extensions().get::<Principal>();

    match state.access_policy.evaluate(req.uri().path(), principal) {
        PolicyDecision::Allow => next.run(req).await,
        PolicyDecision::Unauthenticated => {
            AppError::unauthorized("Authentication required".to_string()).into_response()
        }
        PolicyDecision::WrongRole => {
            AppError::forbidden("Access denied for this role".to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn principal(role: Role) -> Principal {
        Principal {
            subject: "user@test.com".to_string(),
            role,
            user_id: Uuid::new_v4(),
            school_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn pattern_matching_covers_prefix_and_exact() {
        assert!(pattern_matches("/api/students/**", "/api/students"));
        assert!(pattern_matches("/api/students/**", "/api/students/abc/progress"));
        assert!(!pattern_matches("/api/students/**", "/api/studentsabc"));
        assert!(pattern_matches("/api/auth/login", "/api/auth/login"));
        assert!(!pattern_matches("/api/auth/login", "/api/auth/login/extra"));
    }

    #[test]
    fn login_and_docs_are_public() {
        let policy = AccessPolicy::new();
        assert_eq!(
            policy.evaluate("/api/auth/login", None),
            PolicyDecision::Allow
        );
        assert_eq!(
            policy.evaluate("/swagger-ui/index.html", None),
            PolicyDecision::Allow
        );
        assert_eq!(
            policy.evaluate("/api-docs/openapi.json", None),
            PolicyDecision::Allow
        );
    }

    #[test]
    fn registration_routes_stay_public_despite_role_scoping() {
        let policy = AccessPolicy::new();
        assert_eq!(
            policy.evaluate("/api/students/register", None),
            PolicyDecision::Allow
        );
        assert_eq!(
            policy.evaluate("/api/teacher/register", None),
            PolicyDecision::Allow
        );
    }

    #[test]
    fn student_routes_allow_only_students() {
        let policy = AccessPolicy::new();
        let path = "/api/students/11111111-2222-3333-4444-555555555555/progress";

        assert_eq!(policy.evaluate(path, None), PolicyDecision::Unauthenticated);
        assert_eq!(
            policy.evaluate(path, Some(&principal(Role::Student))),
            PolicyDecision::Allow
        );
        assert_eq!(
            policy.evaluate(path, Some(&principal(Role::Teacher))),
            PolicyDecision::WrongRole
        );
    }

    #[test]
    fn teacher_routes_allow_all_staff_roles() {
        let policy = AccessPolicy::new();
        let path = "/api/teacher/assignments";

        for role in [Role::Teacher, Role::Principal, Role::Manager] {
            assert_eq!(
                policy.evaluate(path, Some(&principal(role))),
                PolicyDecision::Allow
            );
        }
        assert_eq!(
            policy.evaluate(path, Some(&principal(Role::Student))),
            PolicyDecision::WrongRole
        );
    }

    #[test]
    fn broadcast_routes_exclude_teachers() {
        let policy = AccessPolicy::new();
        let path = "/api/broadcast/send";

        assert_eq!(
            policy.evaluate(path, Some(&principal(Role::Principal))),
            PolicyDecision::Allow
        );
        assert_eq!(
            policy.evaluate(path, Some(&principal(Role::Manager))),
            PolicyDecision::Allow
        );
        assert_eq!(
            policy.evaluate(path, Some(&principal(Role::Teacher))),
            PolicyDecision::WrongRole
        );
    }

    #[test]
    fn assistant_route_allows_every_role() {
        let policy = AccessPolicy::new();
        for role in [Role::Student, Role::Teacher, Role::Principal, Role::Manager] {
            assert_eq!(
                policy.evaluate("/api/ai/ask", Some(&principal(role))),
                PolicyDecision::Allow
            );
        }
        assert_eq!(
            policy.evaluate("/api/ai/ask", None),
            PolicyDecision::Unauthenticated
        );
    }

    #[test]
    fn unlisted_routes_require_some_authenticated_principal() {
        let policy = AccessPolicy::new();
        assert_eq!(
            policy.evaluate("/api/payments", None),
            PolicyDecision::Unauthenticated
        );
        assert_eq!(
            policy.evaluate("/api/payments", Some(&principal(Role::Manager))),
            PolicyDecision::Allow
        );
    }
}
