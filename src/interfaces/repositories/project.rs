use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::project::{Project, ProjectDraft},
    errors::AppError,
    repositories::{sqlx_repo::SqlxRepo, store::{ResourceStore, SelectQuery}},
};

#[async_trait]
impl ResourceStore<Project> for SqlxRepo {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Project>, AppError> {
        self.select_rows::<Project>(query).await
    }

    async fn insert(&self, draft: &ProjectDraft) -> Result<Project, AppError> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (
                title, description, long_description, image_url, demo_url,
                github_url, technologies, featured, order_index
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(&draft.long_description)
        .bind(&draft.image_url)
        .bind(&draft.demo_url)
        .bind(&draft.github_url)
        .bind(&draft.technologies)
        .bind(draft.featured)
        .bind(draft.order_index)
        .fetch_one(&self.pool)
        .await?;

        Ok(project)
    }

    async fn update(&self, id: &Uuid, draft: &ProjectDraft) -> Result<Project, AppError> {
        sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects SET
                title = $1,
                description = $2,
                long_description = $3,
                image_url = $4,
                demo_url = $5,
                github_url = $6,
                technologies = $7,
                featured = $8,
                order_index = $9,
                updated_at = NOW()
            WHERE id = $10
            RETURNING *
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(&draft.long_description)
        .bind(&draft.image_url)
        .bind(&draft.demo_url)
        .bind(&draft.github_url)
        .bind(&draft.technologies)
        .bind(draft.featured)
        .bind(draft.order_index)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        self.delete_row("projects", id).await.map_err(|e| match e {
            AppError::NotFound(_) => AppError::NotFound("Project not found".into()),
            _ => e,
        })
    }
}
