use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{repo_types::LessonPlan, workflow::LessonRequest};
use crate::auth::dto::PublicUser;

/// Form body for `/create_lesson` and the anonymous preview.
/// `exam` may repeat, once per selected exam.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LessonForm {
    pub title: String,
    pub grade: String,
    pub subject: String,
    pub exam: Vec<String>,
    pub topics: String,
    pub objectives: String,
    pub materials: String,
}

impl From<LessonForm> for LessonRequest {
    fn from(f: LessonForm) -> Self {
        Self {
            title: f.title.trim().to_string(),
            grade: f.grade.trim().to_string(),
            subject: f.subject.trim().to_string(),
            exams: f
                .exam
                .into_iter()
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty())
                .collect(),
            topics: f.topics,
            objectives: f.objectives,
            materials: f.materials,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EditForm {
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FeedbackForm {
    pub feedback: String,
}

#[derive(Debug, Serialize)]
pub struct LessonSummary {
    pub id: Uuid,
    pub title: String,
    pub grade: String,
    pub subject: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<LessonPlan> for LessonSummary {
    fn from(p: LessonPlan) -> Self {
        Self {
            id: p.id,
            title: p.title,
            grade: p.grade,
            subject: p.subject,
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub user: PublicUser,
    pub lessons: Vec<LessonSummary>,
}

#[derive(Debug, Serialize)]
pub struct LessonView {
    pub lesson: LessonPlan,
}

#[derive(Debug, Serialize)]
pub struct EditView {
    pub form: &'static str,
    pub lesson: LessonPlan,
}

#[derive(Debug, Serialize)]
pub struct CreateView {
    pub form: &'static str,
    pub fields: &'static [&'static str],
    pub generator_enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct Landing {
    pub message: &'static str,
    pub login: &'static str,
    pub register: &'static str,
}

/// Result of an anonymous, unsaved generation.
#[derive(Debug, Serialize)]
pub struct Preview {
    pub content: String,
    pub fell_back: bool,
    pub notice: Option<&'static str>,
}
