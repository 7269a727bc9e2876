use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    entities::resource::{OrderBy, Resource},
    errors::AppError,
};

#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Bool(bool),
}

impl FilterValue {
    pub fn to_json(&self) -> Value {
        match self {
            FilterValue::Bool(v) => Value::from(*v),
        }
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

/// `column = value` equality filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: &'static str,
    pub value: FilterValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    pub order_by: OrderBy,
    pub filter: Option<Filter>,
}

impl SelectQuery {
    pub fn ordered(order_by: OrderBy) -> Self {
        SelectQuery { order_by, filter: None }
    }

    pub fn filter_eq(mut self, column: &'static str, value: impl Into<FilterValue>) -> Self {
        self.filter = Some(Filter { column, value: value.into() });
        self
    }
}

/// Per-table CRUD contract of the remote table store.
///
/// The store assigns ids and timestamps; callers never send them.
#[async_trait]
pub trait ResourceStore<R: Resource>: Send + Sync {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<R>, AppError>;
    async fn insert(&self, draft: &R::Draft) -> Result<R, AppError>;
    async fn update(&self, id: &Uuid, draft: &R::Draft) -> Result<R, AppError>;
    async fn delete(&self, id: &Uuid) -> Result<(), AppError>;
}
