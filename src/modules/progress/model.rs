//! Progress view models and the row shapes they are computed from.
//!
//! Everything here is a transient, request-scoped value: snapshots are
//! recomputed on every request and never persisted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Per-subject slice of a student's progress.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectProgress {
    pub subject_id: Uuid,
    pub subject_name: String,
    pub class_name: String,
    pub total_assignments: i64,
    pub submitted_assignments: i64,
    pub pending_assignments: i64,
    pub assessments_count: i64,
    pub average_marks: f64,
    pub last_grade: Option<String>,
    pub videos_count: i64,
    pub video_titles: Vec<String>,
}

/// Whole-student aggregate. The scalar totals are sums of the per-subject
/// numbers in `subjects`; the two are always produced together.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentProgressSnapshot {
    pub student_id: Uuid,
    pub student_name: Option<String>,
    pub school_id: Option<Uuid>,
    pub class_name: Option<String>,
    pub total_assignments: i64,
    pub total_submitted: i64,
    pub total_pending: i64,
    pub assessments_taken: i64,
    pub subjects: Vec<SubjectProgress>,
}

impl StudentProgressSnapshot {
    /// Shape returned for an unknown student id: null name/class and an empty
    /// subject list, not an error. Login handles missing principals as a
    /// failure instead; the asymmetry is inherited behavior, kept on purpose.
    pub fn missing(student_id: Uuid) -> Self {
        StudentProgressSnapshot {
            student_id,
            student_name: None,
            school_id: None,
            class_name: None,
            total_assignments: 0,
            total_submitted: 0,
            total_pending: 0,
            assessments_taken: 0,
            subjects: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectInfo {
    pub subject_id: Uuid,
    pub subject_name: String,
    pub class_name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentSummary {
    pub assignment_id: i64,
    pub subject_id: Uuid,
    pub subject_name: String,
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub submitted: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    pub assessment_id: Option<i64>,
    pub subject_id: Option<Uuid>,
    pub subject_name: Option<String>,
    pub title: Option<String>,
    pub marks_obtained: Option<f64>,
    pub grade: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    pub video_id: i64,
    pub subject_id: Uuid,
    pub subject_name: String,
    pub title: String,
    pub url: Option<String>,
    pub video_type: Option<String>,
}

// Row shapes as read from the collaborator stores.

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StudentRow {
    pub id: Uuid,
    pub full_name: String,
    pub class_name: Option<String>,
    pub school_id: Option<Uuid>,
    pub curriculum_id: Option<Uuid>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SubjectRow {
    pub id: Uuid,
    pub subject_name: String,
    pub class_name: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AssignmentRow {
    pub id: i64,
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub submitted_on: Option<DateTime<Utc>>,
}

/// One performance record joined to its assessment and subject. Rows keep the
/// stored append order (ascending id); "last grade" depends on it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PerformanceRow {
    pub assessment_id: Option<i64>,
    pub subject_id: Option<Uuid>,
    pub subject_name: Option<String>,
    pub assessment_title: Option<String>,
    pub marks_obtained: Option<f64>,
    pub grade: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VideoRow {
    pub id: i64,
    pub title: String,
    pub url: Option<String>,
    pub video_type: Option<String>,
}
