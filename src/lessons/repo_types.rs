use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Stored lesson plan. Only `content` changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct LessonPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub grade: String,
    pub subject: String,
    pub exams: String, // comma-joined exam names
    pub topics: String,
    pub objectives: String,
    pub materials: String,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Input fields of a plan, fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLessonPlan {
    pub title: String,
    pub grade: String,
    pub subject: String,
    pub exams: String,
    pub topics: String,
    pub objectives: String,
    pub materials: String,
}
