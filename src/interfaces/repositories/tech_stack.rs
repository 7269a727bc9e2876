use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::tech_stack::{TechStackDraft, TechStackEntry},
    errors::AppError,
    repositories::{sqlx_repo::SqlxRepo, store::{ResourceStore, SelectQuery}},
};

#[async_trait]
impl ResourceStore<TechStackEntry> for SqlxRepo {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<TechStackEntry>, AppError> {
        self.select_rows::<TechStackEntry>(query).await
    }

    async fn insert(&self, draft: &TechStackDraft) -> Result<TechStackEntry, AppError> {
        let entry = sqlx::query_as::<_, TechStackEntry>(
            r#"
            INSERT INTO tech_stack (name, icon, category, order_index, visible)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.icon)
        .bind(&draft.category)
        .bind(draft.order_index)
        .bind(draft.visible)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn update(&self, id: &Uuid, draft: &TechStackDraft) -> Result<TechStackEntry, AppError> {
        sqlx::query_as::<_, TechStackEntry>(
            r#"
            UPDATE tech_stack SET
                name = $1,
                icon = $2,
                category = $3,
                order_index = $4,
                visible = $5
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.icon)
        .bind(&draft.category)
        .bind(draft.order_index)
        .bind(draft.visible)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Technology not found".into()))
    }

    async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        self.delete_row("tech_stack", id).await.map_err(|e| match e {
            AppError::NotFound(_) => AppError::NotFound("Technology not found".into()),
            _ => e,
        })
    }
}
