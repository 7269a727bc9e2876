use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::{
        form_fields::{
            optional_text, optional_trimmed, parse_bool, parse_optional_i32, split_list, unknown_field,
            validate_required, validate_slug, validate_url,
        },
        resource::{OrderBy, Resource},
    },
    errors::AppError,
    utils::slugify::slugify,
};

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub cover_image: Option<String>,
    pub published: bool,
    pub tags: Vec<String>,
    pub reading_time: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

// ───── Draft ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct PostDraft {
    #[validate(custom(function = "validate_required"))]
    pub title: String,

    /// Blank until save, when it is derived from the title.
    #[validate(custom(function = "validate_slug"))]
    pub slug: String,

    pub excerpt: Option<String>,

    #[validate(custom(function = "validate_required"))]
    pub content: String,

    #[validate(custom(function = "validate_url"))]
    pub cover_image: Option<String>,

    pub published: bool,
    pub tags: Vec<String>,

    #[validate(range(min = 1, message = "Reading time must be at least one minute"))]
    pub reading_time: Option<i32>,

    pub published_at: Option<DateTime<Utc>>,
}

impl Resource for Post {
    type Draft = PostDraft;

    const TABLE: &'static str = "posts";
    const NOUN: &'static str = "post";
    const DISPLAY_ORDER: OrderBy = OrderBy::desc("created_at");

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn new_draft() -> PostDraft {
        PostDraft {
            tags: Vec::new(),
            published: false,
            ..PostDraft::default()
        }
    }

    fn to_draft(&self) -> PostDraft {
        PostDraft {
            title: self.title.clone(),
            slug: self.slug.clone(),
            excerpt: self.excerpt.clone(),
            content: self.content.clone(),
            cover_image: self.cover_image.clone(),
            published: self.published,
            tags: self.tags.clone(),
            reading_time: self.reading_time,
            published_at: self.published_at,
        }
    }

    fn unique_key(&self) -> Option<(&'static str, String)> {
        Some(("slug", self.slug.clone()))
    }

    fn set_field(draft: &mut PostDraft, field: &str, value: &str) -> Result<(), AppError> {
        match field {
            "title" => draft.title = value.to_string(),
            "slug" => draft.slug = value.trim().to_string(),
            "excerpt" => draft.excerpt = optional_text(value),
            "content" => draft.content = value.to_string(),
            "cover_image" => draft.cover_image = optional_trimmed(value),
            "published" => draft.published = parse_bool(field, value)?,
            "tags" => draft.tags = split_list(value),
            "reading_time" => draft.reading_time = parse_optional_i32(field, value)?,
            _ => return Err(unknown_field(field)),
        }
        Ok(())
    }

    /// Fills a blank slug from the title and stamps `published_at`.
    ///
    /// `published_at` is overwritten on every save of a published post, not
    /// only when it first becomes published.
    fn derive_fields(draft: &mut PostDraft, now: DateTime<Utc>) {
        if draft.slug.trim().is_empty() {
            draft.slug = slugify(&draft.title);
        }
        draft.published_at = draft.published.then_some(now);
    }

    fn from_draft(id: Uuid, draft: PostDraft, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Post {
            id,
            title: draft.title,
            slug: draft.slug,
            excerpt: draft.excerpt,
            content: draft.content,
            cover_image: draft.cover_image,
            published: draft.published,
            tags: draft.tags,
            reading_time: draft.reading_time,
            created_at,
            updated_at,
            published_at: draft.published_at,
        }
    }
}
