use crate::state::AppState;
use axum::{Router, routing::get};

use super::controller::{get_assignments, get_performance, get_progress, get_subjects, get_videos};

pub fn init_progress_router() -> Router<AppState> {
    Router::new()
        .route("/{student_id}/progress", get(get_progress))
        .route("/{student_id}/subjects", get(get_subjects))
        .route("/{student_id}/assignments", get(get_assignments))
        .route("/{student_id}/performance", get(get_performance))
        .route("/{student_id}/videos", get(get_videos))
}
