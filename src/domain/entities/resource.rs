use std::fmt::Debug;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ascending,
    Descending,
}

/// Display ordering of a table: a single column and a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderBy {
    pub column: &'static str,
    pub direction: Direction,
}

impl OrderBy {
    pub const fn asc(column: &'static str) -> Self {
        OrderBy { column, direction: Direction::Ascending }
    }

    pub const fn desc(column: &'static str) -> Self {
        OrderBy { column, direction: Direction::Descending }
    }
}

/// Descriptor for a portfolio resource managed from the admin dashboard.
///
/// The generic resource manager only ever talks to a resource through this
/// trait: which table it lives in, how it is ordered for display, what a
/// fresh draft looks like, how form input lands in a draft, and which fields
/// are derived right before the draft is persisted.
pub trait Resource: Debug + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Draft: Debug + Clone + Serialize + Validate + Send + Sync + 'static;

    const TABLE: &'static str;

    /// Used in the delete confirmation prompt.
    const NOUN: &'static str;

    const DISPLAY_ORDER: OrderBy;

    fn id(&self) -> Uuid;

    fn created_at(&self) -> DateTime<Utc>;

    /// Default skeleton for the "new" action.
    fn new_draft() -> Self::Draft;

    /// Copies a persisted row into an editable draft.
    fn to_draft(&self) -> Self::Draft;

    /// Parses one form value into the draft. On error the draft is left as it was.
    fn set_field(draft: &mut Self::Draft, field: &str, value: &str) -> Result<(), AppError>;

    /// Column that must be unique across the table, with this row's value.
    fn unique_key(&self) -> Option<(&'static str, String)> {
        None
    }

    /// Save-time derivation hook, applied to the payload before validation.
    fn derive_fields(_draft: &mut Self::Draft, _now: DateTime<Utc>) {}

    /// Builds a row for stores that assign ids and timestamps in process.
    fn from_draft(id: Uuid, draft: Self::Draft, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self;
}

/// The draft under edit. Whether a save inserts or updates is decided by the
/// variant, never by inspecting the fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DraftState<D> {
    New { fields: D },
    Editing { id: Uuid, fields: D },
}

impl<D> DraftState<D> {
    pub fn fields(&self) -> &D {
        match self {
            DraftState::New { fields } | DraftState::Editing { fields, .. } => fields,
        }
    }

    pub fn fields_mut(&mut self) -> &mut D {
        match self {
            DraftState::New { fields } | DraftState::Editing { fields, .. } => fields,
        }
    }

    pub fn id(&self) -> Option<Uuid> {
        match self {
            DraftState::New { .. } => None,
            DraftState::Editing { id, .. } => Some(*id),
        }
    }
}
