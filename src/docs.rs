use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse, Role};
use crate::modules::progress::model::{
    AssignmentSummary, PerformanceSummary, StudentProgressSnapshot, SubjectInfo, SubjectProgress,
    VideoInfo,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::progress::controller::get_progress,
        crate::modules::progress::controller::get_subjects,
        crate::modules::progress::controller::get_assignments,
        crate::modules::progress::controller::get_performance,
        crate::modules::progress::controller::get_videos,
    ),
    components(
        schemas(
            Role,
            LoginRequest,
            LoginResponse,
            ErrorResponse,
            StudentProgressSnapshot,
            SubjectProgress,
            SubjectInfo,
            AssignmentSummary,
            PerformanceSummary,
            VideoInfo,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "School-scoped login issuing bearer tokens"),
        (name = "Progress", description = "Student progress aggregation endpoints")
    ),
    info(
        title = "Classtrack API",
        version = "0.1.0",
        description = "Multi-tenant school records API: stateless JWT authentication with role-based route policies and cross-entity student progress aggregation.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
