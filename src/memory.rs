//! In-memory repositories backing `AppState::fake()` in tests.

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    auth::{repo::UserRepo, repo_types::User},
    error::AppError,
    lessons::{
        repo::LessonPlanRepo,
        repo_types::{LessonPlan, NewLessonPlan},
    },
};

#[derive(Default)]
pub struct MemoryUserRepo {
    users: RwLock<Vec<User>>,
}

#[async_trait]
impl UserRepo for MemoryUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.iter().find(|u| u.email == email).cloned())
    }

    async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == username) {
            return Err(AppError::DuplicateUsername);
        }
        if users.iter().any(|u| u.email == email) {
            return Err(AppError::DuplicateEmail);
        }
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(user.clone());
        Ok(user)
    }
}

/// Plans kept in insertion order; the index breaks timestamp ties.
#[derive(Default)]
pub struct MemoryLessonPlanRepo {
    plans: RwLock<Vec<LessonPlan>>,
}

#[async_trait]
impl LessonPlanRepo for MemoryLessonPlanRepo {
    async fn create(
        &self,
        owner_id: Uuid,
        fields: &NewLessonPlan,
        content: &str,
    ) -> Result<LessonPlan, AppError> {
        let plan = LessonPlan {
            id: Uuid::new_v4(),
            user_id: owner_id,
            title: fields.title.clone(),
            grade: fields.grade.clone(),
            subject: fields.subject.clone(),
            exams: fields.exams.clone(),
            topics: fields.topics.clone(),
            objectives: fields.objectives.clone(),
            materials: fields.materials.clone(),
            content: content.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        self.plans.write().await.push(plan.clone());
        Ok(plan)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<LessonPlan>, AppError> {
        let plans = self.plans.read().await;
        let mut owned: Vec<(usize, &LessonPlan)> = plans
            .iter()
            .enumerate()
            .filter(|(_, p)| p.user_id == owner_id)
            .collect();
        owned.sort_by(|(ia, a), (ib, b)| b.created_at.cmp(&a.created_at).then(ib.cmp(ia)));
        Ok(owned.into_iter().map(|(_, p)| p.clone()).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<LessonPlan, AppError> {
        self.plans
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn update_content(&self, id: Uuid, content: &str) -> Result<LessonPlan, AppError> {
        let mut plans = self.plans.write().await;
        let plan = plans
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(AppError::NotFound)?;
        plan.content = content.to_string();
        Ok(plan.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut plans = self.plans.write().await;
        let before = plans.len();
        plans.retain(|p| p.id != id);
        if plans.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str) -> NewLessonPlan {
        NewLessonPlan {
            title: title.into(),
            grade: "Grade 10".into(),
            subject: "Biology".into(),
            exams: "WAEC, NECO".into(),
            topics: "Cell structure".into(),
            objectives: "Identify organelles".into(),
            materials: "Microscope".into(),
        }
    }

    #[tokio::test]
    async fn create_then_get_roundtrips_fields() {
        let repo = MemoryLessonPlanRepo::default();
        let owner = Uuid::new_v4();
        let input = fields("Cells");
        let created = repo.create(owner, &input, "content").await.unwrap();
        let got = repo.get_by_id(created.id).await.unwrap();

        assert_eq!(got, created);
        assert_eq!(got.user_id, owner);
        assert_eq!(got.title, input.title);
        assert_eq!(got.grade, input.grade);
        assert_eq!(got.subject, input.subject);
        assert_eq!(got.exams, input.exams);
        assert_eq!(got.topics, input.topics);
        assert_eq!(got.objectives, input.objectives);
        assert_eq!(got.materials, input.materials);
        assert_eq!(got.content, "content");
    }

    #[tokio::test]
    async fn list_by_owner_is_newest_first_and_scoped() {
        let repo = MemoryLessonPlanRepo::default();
        let owner = Uuid::new_v4();
        let a = repo.create(owner, &fields("A"), "a").await.unwrap();
        repo.create(Uuid::new_v4(), &fields("other"), "x").await.unwrap();
        let b = repo.create(owner, &fields("B"), "b").await.unwrap();

        let ids: Vec<Uuid> = repo
            .list_by_owner(owner)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[tokio::test]
    async fn update_touches_content_only() {
        let repo = MemoryLessonPlanRepo::default();
        let created = repo.create(Uuid::new_v4(), &fields("A"), "old").await.unwrap();
        let updated = repo.update_content(created.id, "new").await.unwrap();
        assert_eq!(updated.content, "new");
        assert_eq!(
            LessonPlan {
                content: "old".into(),
                ..updated
            },
            created
        );
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let repo = MemoryLessonPlanRepo::default();
        let created = repo.create(Uuid::new_v4(), &fields("A"), "c").await.unwrap();
        repo.delete(created.id).await.unwrap();
        assert!(matches!(repo.get_by_id(created.id).await, Err(AppError::NotFound)));
        assert!(matches!(repo.delete(created.id).await, Err(AppError::NotFound)));
    }
}
