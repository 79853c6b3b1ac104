use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{LessonPlan, NewLessonPlan};
use crate::error::AppError;

/// CRUD over lesson plans. Knows nothing about the acting user; ownership
/// checks live in `lessons::services`.
#[async_trait]
pub trait LessonPlanRepo: Send + Sync {
    async fn create(
        &self,
        owner_id: Uuid,
        fields: &NewLessonPlan,
        content: &str,
    ) -> Result<LessonPlan, AppError>;
    /// Newest first.
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<LessonPlan>, AppError>;
    async fn get_by_id(&self, id: Uuid) -> Result<LessonPlan, AppError>;
    async fn update_content(&self, id: Uuid, content: &str) -> Result<LessonPlan, AppError>;
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct PgLessonPlanRepo {
    db: PgPool,
}

impl PgLessonPlanRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LessonPlanRepo for PgLessonPlanRepo {
    async fn create(
        &self,
        owner_id: Uuid,
        fields: &NewLessonPlan,
        content: &str,
    ) -> Result<LessonPlan, AppError> {
        let plan = sqlx::query_as::<_, LessonPlan>(
            r#"
            INSERT INTO lesson_plans
                (id, user_id, title, grade, subject, exams, topics, objectives, materials, content)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, user_id, title, grade, subject, exams, topics, objectives,
                      materials, content, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(&fields.title)
        .bind(&fields.grade)
        .bind(&fields.subject)
        .bind(&fields.exams)
        .bind(&fields.topics)
        .bind(&fields.objectives)
        .bind(&fields.materials)
        .bind(content)
        .fetch_one(&self.db)
        .await?;
        Ok(plan)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<LessonPlan>, AppError> {
        let rows = sqlx::query_as::<_, LessonPlan>(
            r#"
            SELECT id, user_id, title, grade, subject, exams, topics, objectives,
                   materials, content, created_at
            FROM lesson_plans
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<LessonPlan, AppError> {
        let plan = sqlx::query_as::<_, LessonPlan>(
            r#"
            SELECT id, user_id, title, grade, subject, exams, topics, objectives,
                   materials, content, created_at
            FROM lesson_plans
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.db)
        .await?;
        Ok(plan)
    }

    async fn update_content(&self, id: Uuid, content: &str) -> Result<LessonPlan, AppError> {
        let plan = sqlx::query_as::<_, LessonPlan>(
            r#"
            UPDATE lesson_plans
            SET content = $2
            WHERE id = $1
            RETURNING id, user_id, title, grade, subject, exams, topics, objectives,
                      materials, content, created_at
            "#,
        )
        .bind(id)
        .bind(content)
        .fetch_one(&self.db)
        .await?;
        Ok(plan)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let res = sqlx::query("DELETE FROM lesson_plans WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        if res.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo::{PgUserRepo, UserRepo};

    fn fields(title: &str) -> NewLessonPlan {
        NewLessonPlan {
            title: title.into(),
            grade: "Grade 10".into(),
            subject: "Biology".into(),
            exams: "WAEC".into(),
            topics: "Cell structure".into(),
            objectives: String::new(),
            materials: String::new(),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs DATABASE_URL pointing at a Postgres server"]
    async fn list_is_newest_first_and_delete_is_final(pool: PgPool) {
        let owner = PgUserRepo::new(pool.clone())
            .create("ada", "ada@school.org", "$argon2id$stub")
            .await
            .expect("owner");
        let repo = PgLessonPlanRepo::new(pool);

        let mut ids = Vec::new();
        for title in ["first", "second", "third"] {
            ids.push(repo.create(owner.id, &fields(title), "plan").await.unwrap().id);
        }

        let titles: Vec<_> = repo
            .list_by_owner(owner.id)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, ["third", "second", "first"]);

        repo.delete(ids[0]).await.unwrap();
        assert!(matches!(repo.get_by_id(ids[0]).await, Err(AppError::NotFound)));
        assert!(matches!(repo.delete(ids[0]).await, Err(AppError::NotFound)));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs DATABASE_URL pointing at a Postgres server"]
    async fn unknown_owner_is_not_found(pool: PgPool) {
        let repo = PgLessonPlanRepo::new(pool);
        let err = repo
            .create(Uuid::new_v4(), &fields("orphan"), "plan")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound), "got {err:?}");
    }
}
