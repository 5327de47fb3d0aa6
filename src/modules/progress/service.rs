use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{
    AssignmentRow, AssignmentSummary, PerformanceRow, PerformanceSummary, StudentProgressSnapshot,
    StudentRow, SubjectInfo, SubjectProgress, SubjectRow, VideoInfo, VideoRow,
};

pub struct ProgressService;

impl ProgressService {
    /// Builds the full progress snapshot for one student.
    ///
    /// An unknown student id yields an empty snapshot, not an error. For a
    /// known student, the subject set is resolved once and each subject's
    /// assignment, assessment, performance and video collaborators are read
    /// independently; the whole-student totals are folded incrementally from
    /// the per-subject numbers and finalized only after every subject is done.
    #[instrument(skip(db))]
    pub async fn get_progress(
        db: &PgPool,
        student_id: Uuid,
    ) -> Result<StudentProgressSnapshot, AppError> {
        let Some(student) = Self::fetch_student(db, student_id).await? else {
            return Ok(StudentProgressSnapshot::missing(student_id));
        };

        let subjects = Self::subjects_for(db, &student).await?;
        let performances = Self::fetch_performances(db, student_id).await?;

        let mut per_subject = Vec::with_capacity(subjects.len());
        for subject in &subjects {
            let assignments = Self::fetch_assignments(db, subject.id).await?;
            let assessments_count = Self::count_assessments(db, subject.id).await?;
            let videos = Self::fetch_videos(db, subject.id).await?;

            let subject_perf: Vec<&PerformanceRow> = performances
                .iter()
                .filter(|p| p.subject_id == Some(subject.id))
                .collect();

            per_subject.push(subject_progress(
                subject,
                &assignments,
                assessments_count,
                &subject_perf,
                &videos,
            ));
        }

        let totals = fold_totals(&per_subject);

        Ok(StudentProgressSnapshot {
            student_id: student.id,
            student_name: Some(student.full_name),
            school_id: student.school_id,
            class_name: student.class_name,
            total_assignments: totals.assignments,
            total_submitted: totals.submitted,
            total_pending: totals.pending,
            assessments_taken: totals.assessments,
            subjects: per_subject,
        })
    }

    /// Subject list only. Resolves the subject set exactly as the full
    /// snapshot does so the two views never disagree.
    #[instrument(skip(db))]
    pub async fn get_subjects(db: &PgPool, student_id: Uuid) -> Result<Vec<SubjectInfo>, AppError> {
        let Some(student) = Self::fetch_student(db, student_id).await? else {
            return Ok(Vec::new());
        };

        let subjects = Self::subjects_for(db, &student).await?;
        Ok(subjects
            .into_iter()
            .map(|s| SubjectInfo {
                subject_id: s.id,
                subject_name: s.subject_name,
                class_name: s.class_name,
            })
            .collect())
    }

    /// Flattened assignment summaries across the student's subjects.
    #[instrument(skip(db))]
    pub async fn get_assignments(
        db: &PgPool,
        student_id: Uuid,
    ) -> Result<Vec<AssignmentSummary>, AppError> {
        let Some(student) = Self::fetch_student(db, student_id).await? else {
            return Ok(Vec::new());
        };

        let subjects = Self::subjects_for(db, &student).await?;
        let mut result = Vec::new();
        for subject in &subjects {
            let assignments = Self::fetch_assignments(db, subject.id).await?;
            for a in assignments {
                result.push(AssignmentSummary {
                    assignment_id: a.id,
                    subject_id: subject.id,
                    subject_name: subject.subject_name.clone(),
                    title: a.title,
                    due_date: a.due_date,
                    submitted: a.submitted_on.is_some(),
                });
            }
        }
        Ok(result)
    }

    /// The student's full performance list, joined to assessment and subject.
    /// Unlike the snapshot this is not regrouped per subject.
    #[instrument(skip(db))]
    pub async fn get_performance(
        db: &PgPool,
        student_id: Uuid,
    ) -> Result<Vec<PerformanceSummary>, AppError> {
        if Self::fetch_student(db, student_id).await?.is_none() {
            return Ok(Vec::new());
        }

        let performances = Self::fetch_performances(db, student_id).await?;
        Ok(performances
            .into_iter()
            .map(|p| PerformanceSummary {
                assessment_id: p.assessment_id,
                subject_id: p.subject_id,
                subject_name: p.subject_name,
                title: p.assessment_title,
                marks_obtained: p.marks_obtained,
                grade: p.grade,
            })
            .collect())
    }

    /// Flattened video info across the student's subjects.
    #[instrument(skip(db))]
    pub async fn get_videos(db: &PgPool, student_id: Uuid) -> Result<Vec<VideoInfo>, AppError> {
        let Some(student) = Self::fetch_student(db, student_id).await? else {
            return Ok(Vec::new());
        };

        let subjects = Self::subjects_for(db, &student).await?;
        let mut result = Vec::new();
        for subject in &subjects {
            let videos = Self::fetch_videos(db, subject.id).await?;
            for v in videos {
                result.push(VideoInfo {
                    video_id: v.id,
                    subject_id: subject.id,
                    subject_name: subject.subject_name.clone(),
                    title: v.title,
                    url: v.url,
                    video_type: v.video_type,
                });
            }
        }
        Ok(result)
    }

    async fn fetch_student(db: &PgPool, student_id: Uuid) -> Result<Option<StudentRow>, AppError> {
        let student = sqlx::query_as::<_, StudentRow>(
            "SELECT id, full_name, class_name, school_id, curriculum_id
             FROM students WHERE id = $1",
        )
        .bind(student_id)
        .fetch_optional(db)
        .await?;

        Ok(student)
    }

    /// Subject resolution shared by every facet: filter by (class, curriculum)
    /// when the student has an assigned curriculum, by class alone otherwise.
    async fn subjects_for(db: &PgPool, student: &StudentRow) -> Result<Vec<SubjectRow>, AppError> {
        let subjects = match student.curriculum_id {
            Some(curriculum_id) => {
                sqlx::query_as::<_, SubjectRow>(
                    "SELECT id, subject_name, class_name FROM subjects
                     WHERE class_name = $1 AND curriculum_id = $2
                     ORDER BY id",
                )
                .bind(&student.class_name)
                .bind(curriculum_id)
                .fetch_all(db)
                .await?
            }
            None => {
                sqlx::query_as::<_, SubjectRow>(
                    "SELECT id, subject_name, class_name FROM subjects
                     WHERE class_name = $1
                     ORDER BY id",
                )
                .bind(&student.class_name)
                .fetch_all(db)
                .await?
            }
        };

        Ok(subjects)
    }

    async fn fetch_assignments(
        db: &PgPool,
        subject_id: Uuid,
    ) -> Result<Vec<AssignmentRow>, AppError> {
        let assignments = sqlx::query_as::<_, AssignmentRow>(
            "SELECT id, title, due_date, submitted_on FROM assignments
             WHERE subject_id = $1
             ORDER BY id",
        )
        .bind(subject_id)
        .fetch_all(db)
        .await?;

        Ok(assignments)
    }

    async fn count_assessments(db: &PgPool, subject_id: Uuid) -> Result<i64, AppError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM assessments WHERE subject_id = $1")
                .bind(subject_id)
                .fetch_one(db)
                .await?;

        Ok(count)
    }

    /// All performance rows for the student in stored append order; per-subject
    /// filtering happens in memory and preserves that order.
    async fn fetch_performances(
        db: &PgPool,
        student_id: Uuid,
    ) -> Result<Vec<PerformanceRow>, AppError> {
        let performances = sqlx::query_as::<_, PerformanceRow>(
            "SELECT p.assessment_id, a.subject_id, s.subject_name,
                    a.title AS assessment_title, p.marks_obtained, p.grade
             FROM performances p
             LEFT JOIN assessments a ON a.id = p.assessment_id
             LEFT JOIN subjects s ON s.id = a.subject_id
             WHERE p.student_id = $1
             ORDER BY p.id",
        )
        .bind(student_id)
        .fetch_all(db)
        .await?;

        Ok(performances)
    }

    async fn fetch_videos(db: &PgPool, subject_id: Uuid) -> Result<Vec<VideoRow>, AppError> {
        let videos = sqlx::query_as::<_, VideoRow>(
            "SELECT id, title, url, video_type FROM videos
             WHERE subject_id = $1
             ORDER BY id",
        )
        .bind(subject_id)
        .fetch_all(db)
        .await?;

        Ok(videos)
    }
}

/// Computes one subject's slice of the snapshot from its raw collaborator
/// rows. `performances` must already be filtered to this subject and keep the
/// retrieval order: "last grade" is the grade of the last element of that
/// sequence, not the chronologically latest record.
fn subject_progress(
    subject: &SubjectRow,
    assignments: &[AssignmentRow],
    assessments_count: i64,
    performances: &[&PerformanceRow],
    videos: &[VideoRow],
) -> SubjectProgress {
    let total = assignments.len() as i64;
    let submitted = assignments
        .iter()
        .filter(|a| a.submitted_on.is_some())
        .count() as i64;

    let average_marks = if performances.is_empty() {
        0.0
    } else {
        let sum: f64 = performances
            .iter()
            .map(|p| p.marks_obtained.unwrap_or(0.0))
            .sum();
        round_half_up_2(sum / performances.len() as f64)
    };
    let last_grade = performances.last().and_then(|p| p.grade.clone());

    SubjectProgress {
        subject_id: subject.id,
        subject_name: subject.subject_name.clone(),
        class_name: subject.class_name.clone(),
        total_assignments: total,
        submitted_assignments: submitted,
        pending_assignments: total - submitted,
        assessments_count,
        average_marks,
        last_grade,
        videos_count: videos.len() as i64,
        video_titles: videos.iter().map(|v| v.title.clone()).collect(),
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Totals {
    assignments: i64,
    submitted: i64,
    pending: i64,
    assessments: i64,
}

/// Scalar sums across the per-subject slices. The snapshot invariant
/// `total_assignments == Σ subjects[i].total_assignments` (and likewise for
/// submitted/pending) holds by construction.
fn fold_totals(subjects: &[SubjectProgress]) -> Totals {
    let mut totals = Totals::default();
    for s in subjects {
        totals.assignments += s.total_assignments;
        totals.submitted += s.submitted_assignments;
        totals.pending += s.pending_assignments;
        totals.assessments += s.assessments_count;
    }
    totals
}

/// Round-half-up to two decimal places. `f64::round` rounds halves away from
/// zero, which is half-up for the non-negative marks handled here.
///
/// This rounds the binary `f64` value, not its shortest decimal rendering.
/// A literal like 2.675 is stored as 2.67499…, so it rounds down to 2.67,
/// where decimal-arithmetic HALF_UP would give 2.68. Averages here come from
/// `f64` sums, so the binary value is the authoritative one.
fn round_half_up_2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
