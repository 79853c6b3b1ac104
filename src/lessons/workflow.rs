//! Lesson-plan creation: prompt, generate (or fall back), store, present.

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::{
    repo_types::{LessonPlan, NewLessonPlan},
    services::load_owned,
};
use crate::{
    error::AppError,
    generation::{fallback, prompt, TextGenerator},
    state::AppState,
};

pub const FALLBACK_NOTICE: &str = "The lesson generator is unavailable right now, so a \
     template lesson plan was created instead. You can edit it at any time.";

pub const REVISION_UNAVAILABLE_NOTICE: &str = "The lesson generator is unavailable right now, so \
     your lesson plan was left unchanged.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Submitted,
    Generating,
    Generated,
    FallenBack,
    Stored,
    Presented,
}

fn advance(stage: &mut Stage, next: Stage) {
    debug!(from = ?*stage, to = ?next, "workflow transition");
    *stage = next;
}

/// Fields submitted through the create form.
#[derive(Debug, Clone, Default)]
pub struct LessonRequest {
    pub title: String,
    pub grade: String,
    pub subject: String,
    pub exams: Vec<String>,
    pub topics: String,
    pub objectives: String,
    pub materials: String,
}

impl LessonRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.grade.trim().is_empty() || self.subject.trim().is_empty() {
            return Err(AppError::validation("Grade and subject are required"));
        }
        Ok(())
    }

    pub fn exam_text(&self) -> String {
        prompt::exam_text(&self.exams)
    }

    /// Blank titles become "{subject} - {grade}".
    pub fn new_plan(&self) -> NewLessonPlan {
        let title = if self.title.trim().is_empty() {
            format!("{} - {}", self.subject, self.grade)
        } else {
            self.title.clone()
        };
        NewLessonPlan {
            title,
            grade: self.grade.clone(),
            subject: self.subject.clone(),
            exams: self.exam_text(),
            topics: self.topics.clone(),
            objectives: self.objectives.clone(),
            materials: self.materials.clone(),
        }
    }
}

/// Generated (or fallback) text before it is stored.
#[derive(Debug)]
pub struct Draft {
    pub content: String,
    pub stage: Stage,
    pub notice: Option<&'static str>,
}

/// Build the prompt and ask the generator once; any failure falls back to
/// the offline template. Never fails.
pub async fn draft(generator: &dyn TextGenerator, req: &LessonRequest) -> Draft {
    let mut stage = Stage::Submitted;
    let prompt = prompt::build(
        &req.grade,
        &req.subject,
        &req.exams,
        &req.topics,
        &req.objectives,
        &req.materials,
    );

    advance(&mut stage, Stage::Generating);
    match generator.generate(&prompt).await {
        Ok(content) => {
            advance(&mut stage, Stage::Generated);
            Draft {
                content,
                stage,
                notice: None,
            }
        }
        Err(e) => {
            warn!(error = %e, "generation failed; using fallback lesson plan");
            advance(&mut stage, Stage::FallenBack);
            let content = fallback::generate_demo(
                &req.grade,
                &req.subject,
                &req.exam_text(),
                &req.topics,
                &req.objectives,
                &req.materials,
            );
            Draft {
                content,
                stage,
                notice: Some(FALLBACK_NOTICE),
            }
        }
    }
}

/// A stored plan waiting to be shown to its owner.
#[derive(Debug)]
pub struct Created {
    pub plan: LessonPlan,
    pub stage: Stage,
    pub notice: Option<&'static str>,
}

impl Created {
    pub fn present(mut self) -> (LessonPlan, Option<&'static str>) {
        advance(&mut self.stage, Stage::Presented);
        (self.plan, self.notice)
    }
}

/// Validate, draft and persist a new plan for `owner`.
///
/// A storage failure loses the drafted text; nothing is retried.
#[instrument(skip(state, req), fields(user_id = %owner))]
pub async fn create_lesson_plan(
    state: &AppState,
    owner: Uuid,
    req: &LessonRequest,
) -> Result<Created, AppError> {
    let mut stage = Stage::Idle;
    advance(&mut stage, Stage::Submitted);
    req.validate()?;

    let draft = draft(state.generator.as_ref(), req).await;
    let plan = state
        .plans
        .create(owner, &req.new_plan(), &draft.content)
        .await?;
    stage = draft.stage;
    advance(&mut stage, Stage::Stored);

    info!(lesson_id = %plan.id, fell_back = draft.notice.is_some(), "lesson plan created");
    Ok(Created {
        plan,
        stage,
        notice: draft.notice,
    })
}

#[derive(Debug)]
pub enum Revision {
    Revised(LessonPlan),
    Unchanged {
        plan: LessonPlan,
        notice: &'static str,
    },
}

/// Rewrite an owned plan according to feedback. If the generator fails the
/// plan keeps its current content.
#[instrument(skip(state, feedback), fields(user_id = %actor, lesson_id = %id))]
pub async fn revise(
    state: &AppState,
    actor: Uuid,
    id: Uuid,
    feedback: &str,
) -> Result<Revision, AppError> {
    let plan = load_owned(state.plans.as_ref(), actor, id).await?;
    let feedback = feedback.trim();
    if feedback.is_empty() {
        return Err(AppError::validation("Feedback cannot be empty"));
    }

    let prompt = prompt::build_revision(&plan.content, feedback);
    match state.generator.generate(&prompt).await {
        Ok(content) => {
            let plan = state.plans.update_content(id, &content).await?;
            info!("lesson plan revised from feedback");
            Ok(Revision::Revised(plan))
        }
        Err(e) => {
            warn!(error = %e, "revision failed; plan left unchanged");
            Ok(Revision::Unchanged {
                plan,
                notice: REVISION_UNAVAILABLE_NOTICE,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::generation::{prompt::SECTIONS, GenerationError};

    struct CannedGenerator(&'static str);

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            Err(GenerationError::ServiceError("boom".into()))
        }
    }

    fn biology() -> LessonRequest {
        LessonRequest {
            title: String::new(),
            grade: "Grade 10".into(),
            subject: "Biology".into(),
            exams: vec!["WAEC".into()],
            topics: "Cell structure".into(),
            objectives: "Identify organelles".into(),
            materials: "Microscope".into(),
        }
    }

    #[tokio::test]
    async fn disabled_generator_falls_back_and_stores() {
        let state = AppState::fake();
        let owner = Uuid::new_v4();

        let created = create_lesson_plan(&state, owner, &biology()).await.expect("create");
        assert_eq!(created.stage, Stage::Stored);
        assert_eq!(created.notice, Some(FALLBACK_NOTICE));

        let (plan, _) = created.present();
        assert!(!plan.content.is_empty());
        assert!(plan.content.contains("Biology"));
        for s in SECTIONS.iter() {
            assert!(plan.content.contains(s.title), "missing {}", s.title);
        }
        assert_eq!(plan.title, "Biology - Grade 10");
        assert_eq!(plan.exams, "WAEC");

        let stored = state.plans.get_by_id(plan.id).await.unwrap();
        assert_eq!(stored, plan);
    }

    #[tokio::test]
    async fn live_generator_output_is_stored_verbatim() {
        let state = AppState::fake().with_generator(Arc::new(CannedGenerator("generated plan")));
        let created = create_lesson_plan(&state, Uuid::new_v4(), &biology())
            .await
            .expect("create");
        assert!(created.notice.is_none());
        assert_eq!(created.plan.content, "generated plan");
    }

    #[tokio::test]
    async fn service_error_also_falls_back() {
        let d = draft(&FailingGenerator, &biology()).await;
        assert_eq!(d.stage, Stage::FallenBack);
        assert!(d.content.contains("Cell structure"));
    }

    #[tokio::test]
    async fn missing_grade_or_subject_stores_nothing() {
        let state = AppState::fake();
        let owner = Uuid::new_v4();
        let mut req = biology();
        req.subject = "  ".into();

        let err = create_lesson_plan(&state, owner, &req).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(state.plans.list_by_owner(owner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn explicit_title_and_exam_list_are_kept() {
        let mut req = biology();
        req.title = "Organelles day".into();
        req.exams = vec!["WAEC".into(), "NECO".into()];
        let fields = req.new_plan();
        assert_eq!(fields.title, "Organelles day");
        assert_eq!(fields.exams, "WAEC, NECO");
    }

    #[tokio::test]
    async fn revision_replaces_content() {
        let state = AppState::fake().with_generator(Arc::new(CannedGenerator("revised plan")));
        let owner = Uuid::new_v4();
        let plan = create_lesson_plan(&state, owner, &biology()).await.unwrap().plan;

        match revise(&state, owner, plan.id, "More group work").await.unwrap() {
            Revision::Revised(p) => assert_eq!(p.content, "revised plan"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn revision_without_service_leaves_plan_unchanged() {
        let state = AppState::fake();
        let owner = Uuid::new_v4();
        let plan = create_lesson_plan(&state, owner, &biology()).await.unwrap().plan;

        match revise(&state, owner, plan.id, "More group work").await.unwrap() {
            Revision::Unchanged { plan: p, notice } => {
                assert_eq!(p.content, plan.content);
                assert_eq!(notice, REVISION_UNAVAILABLE_NOTICE);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(state.plans.get_by_id(plan.id).await.unwrap(), plan);
    }

    #[tokio::test]
    async fn revision_by_other_user_is_denied() {
        let state = AppState::fake();
        let plan = create_lesson_plan(&state, Uuid::new_v4(), &biology())
            .await
            .unwrap()
            .plan;
        let err = revise(&state, Uuid::new_v4(), plan.id, "mine now").await.unwrap_err();
        assert!(matches!(err, AppError::AccessDenied));
    }
}
