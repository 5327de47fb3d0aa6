use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

use super::model::{
    AssignmentSummary, PerformanceSummary, StudentProgressSnapshot, SubjectInfo, VideoInfo,
};
use super::service::ProgressService;

#[utoipa::path(
    get,
    path = "/api/students/{student_id}/progress",
    params(
        ("student_id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Full progress snapshot; empty shape when the student does not exist", body = StudentProgressSnapshot),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - student role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Progress"
)]
#[instrument(skip(state))]
pub async fn get_progress(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<StudentProgressSnapshot>, AppError> {
    let snapshot = ProgressService::get_progress(&state.db, student_id).await?;
    Ok(Json(snapshot))
}

#[utoipa::path(
    get,
    path = "/api/students/{student_id}/subjects",
    params(
        ("student_id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Subject list", body = [SubjectInfo]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - student role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Progress"
)]
#[instrument(skip(state))]
pub async fn get_subjects(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Vec<SubjectInfo>>, AppError> {
    let subjects = ProgressService::get_subjects(&state.db, student_id).await?;
    Ok(Json(subjects))
}

#[utoipa::path(
    get,
    path = "/api/students/{student_id}/assignments",
    params(
        ("student_id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Flattened assignment summaries", body = [AssignmentSummary]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - student role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Progress"
)]
#[instrument(skip(state))]
pub async fn get_assignments(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Vec<AssignmentSummary>>, AppError> {
    let assignments = ProgressService::get_assignments(&state.db, student_id).await?;
    Ok(Json(assignments))
}

#[utoipa::path(
    get,
    path = "/api/students/{student_id}/performance",
    params(
        ("student_id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Flattened performance summaries", body = [PerformanceSummary]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - student role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Progress"
)]
#[instrument(skip(state))]
pub async fn get_performance(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Vec<PerformanceSummary>>, AppError> {
    let performance = ProgressService::get_performance(&state.db, student_id).await?;
    Ok(Json(performance))
}

#[utoipa::path(
    get,
    path = "/api/students/{student_id}/videos",
    params(
        ("student_id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Flattened video info", body = [VideoInfo]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - student role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Progress"
)]
#[instrument(skip(state))]
pub async fn get_videos(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Vec<VideoInfo>>, AppError> {
    let videos = ProgressService::get_videos(&state.db, student_id).await?;
    Ok(Json(videos))
}
