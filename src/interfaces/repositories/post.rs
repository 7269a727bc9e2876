use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::post::{Post, PostDraft},
    errors::AppError,
    repositories::{sqlx_repo::SqlxRepo, store::{ResourceStore, SelectQuery}},
};

const SLUG_CONSTRAINT: &str = "posts_slug_key";

fn map_slug_conflict(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some(SLUG_CONSTRAINT) {
            return AppError::Conflict("Slug already exists".into());
        }
    }
    AppError::from(e)
}

#[async_trait]
impl ResourceStore<Post> for SqlxRepo {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Post>, AppError> {
        self.select_rows::<Post>(query).await
    }

    async fn insert(&self, draft: &PostDraft) -> Result<Post, AppError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (
                title, slug, excerpt, content, cover_image, published,
                tags, reading_time, published_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.slug)
        .bind(&draft.excerpt)
        .bind(&draft.content)
        .bind(&draft.cover_image)
        .bind(draft.published)
        .bind(&draft.tags)
        .bind(draft.reading_time)
        .bind(draft.published_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_slug_conflict)?;

        Ok(post)
    }

    async fn update(&self, id: &Uuid, draft: &PostDraft) -> Result<Post, AppError> {
        sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts SET
                title = $1,
                slug = $2,
                excerpt = $3,
                content = $4,
                cover_image = $5,
                published = $6,
                tags = $7,
                reading_time = $8,
                published_at = $9,
                updated_at = NOW()
            WHERE id = $10
            RETURNING *
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.slug)
        .bind(&draft.excerpt)
        .bind(&draft.content)
        .bind(&draft.cover_image)
        .bind(draft.published)
        .bind(&draft.tags)
        .bind(draft.reading_time)
        .bind(draft.published_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_slug_conflict)?
        .ok_or_else(|| AppError::NotFound("Post not found".into()))
    }

    async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        self.delete_row("posts", id).await.map_err(|e| match e {
            AppError::NotFound(_) => AppError::NotFound("Post not found".into()),
            _ => e,
        })
    }
}
