use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::{
        form_fields::{optional_trimmed, parse_bool, parse_i32, unknown_field, validate_required},
        resource::{OrderBy, Resource},
    },
    errors::AppError,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TechStackEntry {
    pub id: Uuid,
    pub name: String,
    /// Key into the front-end icon set.
    pub icon: String,
    pub category: Option<String>,
    pub order_index: i32,
    pub visible: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TechStackDraft {
    #[validate(custom(function = "validate_required"))]
    pub name: String,

    #[validate(custom(function = "validate_required"))]
    pub icon: String,

    pub category: Option<String>,
    pub order_index: i32,
    pub visible: bool,
}

impl Resource for TechStackEntry {
    type Draft = TechStackDraft;

    const TABLE: &'static str = "tech_stack";
    const NOUN: &'static str = "technology";
    const DISPLAY_ORDER: OrderBy = OrderBy::asc("order_index");

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn new_draft() -> TechStackDraft {
        TechStackDraft {
            name: String::new(),
            icon: String::new(),
            category: None,
            order_index: 0,
            visible: true,
        }
    }

    fn to_draft(&self) -> TechStackDraft {
        TechStackDraft {
            name: self.name.clone(),
            icon: self.icon.clone(),
            category: self.category.clone(),
            order_index: self.order_index,
            visible: self.visible,
        }
    }

    fn set_field(draft: &mut TechStackDraft, field: &str, value: &str) -> Result<(), AppError> {
        match field {
            "name" => draft.name = value.to_string(),
            "icon" => draft.icon = value.trim().to_string(),
            "category" => draft.category = optional_trimmed(value),
            "order_index" => draft.order_index = parse_i32(field, value)?,
            "visible" => draft.visible = parse_bool(field, value)?,
            _ => return Err(unknown_field(field)),
        }
        Ok(())
    }

    fn from_draft(id: Uuid, draft: TechStackDraft, created_at: DateTime<Utc>, _updated_at: DateTime<Utc>) -> Self {
        TechStackEntry {
            id,
            name: draft.name,
            icon: draft.icon,
            category: draft.category,
            order_index: draft.order_index,
            visible: draft.visible,
            created_at,
        }
    }
}
