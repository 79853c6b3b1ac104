use tracing::{info, warn};
use uuid::Uuid;

use super::{repo::LessonPlanRepo, repo_types::LessonPlan};
use crate::error::AppError;

/// Fetch a plan, refusing plans owned by someone other than `actor`.
pub async fn load_owned(
    plans: &dyn LessonPlanRepo,
    actor: Uuid,
    id: Uuid,
) -> Result<LessonPlan, AppError> {
    let plan = plans.get_by_id(id).await?;
    if plan.user_id != actor {
        warn!(user_id = %actor, lesson_id = %id, owner_id = %plan.user_id, "access denied");
        return Err(AppError::AccessDenied);
    }
    Ok(plan)
}

pub async fn update_owned(
    plans: &dyn LessonPlanRepo,
    actor: Uuid,
    id: Uuid,
    content: &str,
) -> Result<LessonPlan, AppError> {
    load_owned(plans, actor, id).await?;
    if content.trim().is_empty() {
        return Err(AppError::validation("Lesson plan content cannot be empty"));
    }
    let plan = plans.update_content(id, content).await?;
    info!(user_id = %actor, lesson_id = %id, "lesson plan updated");
    Ok(plan)
}

pub async fn delete_owned(
    plans: &dyn LessonPlanRepo,
    actor: Uuid,
    id: Uuid,
) -> Result<(), AppError> {
    load_owned(plans, actor, id).await?;
    plans.delete(id).await?;
    info!(user_id = %actor, lesson_id = %id, "lesson plan deleted");
    Ok(())
}
