use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::{
        form_fields::{optional_text, optional_trimmed, parse_bool, parse_i32, split_list, unknown_field, validate_required, validate_url},
        resource::{OrderBy, Resource},
    },
    errors::AppError,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub long_description: Option<String>,
    pub image_url: Option<String>,
    pub demo_url: Option<String>,
    pub github_url: Option<String>,
    pub technologies: Vec<String>,
    pub featured: bool,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProjectDraft {
    #[validate(custom(function = "validate_required"))]
    pub title: String,

    #[validate(custom(function = "validate_required"))]
    pub description: String,

    pub long_description: Option<String>,

    #[validate(custom(function = "validate_url"))]
    pub image_url: Option<String>,

    #[validate(custom(function = "validate_url"))]
    pub demo_url: Option<String>,

    #[validate(custom(function = "validate_url"))]
    pub github_url: Option<String>,

    pub technologies: Vec<String>,
    pub featured: bool,
    pub order_index: i32,
}

impl Resource for Project {
    type Draft = ProjectDraft;

    const TABLE: &'static str = "projects";
    const NOUN: &'static str = "project";
    const DISPLAY_ORDER: OrderBy = OrderBy::asc("order_index");

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn new_draft() -> ProjectDraft {
        ProjectDraft {
            technologies: Vec::new(),
            featured: false,
            order_index: 0,
            ..ProjectDraft::default()
        }
    }

    fn to_draft(&self) -> ProjectDraft {
        ProjectDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            long_description: self.long_description.clone(),
            image_url: self.image_url.clone(),
            demo_url: self.demo_url.clone(),
            github_url: self.github_url.clone(),
            technologies: self.technologies.clone(),
            featured: self.featured,
            order_index: self.order_index,
        }
    }

    fn set_field(draft: &mut ProjectDraft, field: &str, value: &str) -> Result<(), AppError> {
        match field {
            "title" => draft.title = value.to_string(),
            "description" => draft.description = value.to_string(),
            "long_description" => draft.long_description = optional_text(value),
            "image_url" => draft.image_url = optional_trimmed(value),
            "demo_url" => draft.demo_url = optional_trimmed(value),
            "github_url" => draft.github_url = optional_trimmed(value),
            "technologies" => draft.technologies = split_list(value),
            "featured" => draft.featured = parse_bool(field, value)?,
            "order_index" => draft.order_index = parse_i32(field, value)?,
            _ => return Err(unknown_field(field)),
        }
        Ok(())
    }

    fn from_draft(id: Uuid, draft: ProjectDraft, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Project {
            id,
            title: draft.title,
            description: draft.description,
            long_description: draft.long_description,
            image_url: draft.image_url,
            demo_url: draft.demo_url,
            github_url: draft.github_url,
            technologies: draft.technologies,
            featured: draft.featured,
            order_index: draft.order_index,
            created_at,
            updated_at,
        }
    }
}
