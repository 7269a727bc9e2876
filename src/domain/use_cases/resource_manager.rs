use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::resource::{DraftState, Resource},
    errors::AppError,
    repositories::store::{ResourceStore, SelectQuery},
};

/// Caller-supplied answer to the delete prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Declined
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteOutcome {
    Deleted,
    Declined,
}

/// Serializable snapshot of a manager, as rendered by the admin panel.
#[derive(Debug, Serialize)]
#[serde(bound = "")]
pub struct ManagerView<'a, R: Resource> {
    pub items: &'a [R],
    pub editing: bool,
    pub draft: Option<&'a DraftState<R::Draft>>,
    pub can_save: bool,
    pub error: Option<&'a str>,
}

/// Create/edit/delete workflow for one resource table.
///
/// `items` is only ever replaced by a fresh `list()`; mutations never patch
/// it in place. Store failures are kept in `error` until dismissed, and never
/// discard the draft.
pub struct ResourceManager<R: Resource> {
    store: Arc<dyn ResourceStore<R>>,
    items: Vec<R>,
    draft: Option<DraftState<R::Draft>>,
    error: Option<String>,
    loaded: bool,
}

impl<R: Resource> ResourceManager<R> {
    pub fn new(store: Arc<dyn ResourceStore<R>>) -> Self {
        ResourceManager {
            store,
            items: Vec::new(),
            draft: None,
            error: None,
            loaded: false,
        }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&DraftState<R::Draft>> {
        self.draft.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Fetches the whole table in display order, replacing `items`.
    #[instrument(skip(self), fields(table = R::TABLE))]
    pub async fn list(&mut self) -> Result<&[R], AppError> {
        let query = SelectQuery::ordered(R::DISPLAY_ORDER);

        match self.store.select(&query).await {
            Ok(rows) => {
                debug!(count = rows.len(), "Fetched rows");
                self.items = rows;
                self.loaded = true;
                Ok(&self.items)
            }
            Err(e) => {
                self.record(&e);
                Err(e)
            }
        }
    }

    /// Lists on first display only.
    pub async fn ensure_loaded(&mut self) -> Result<(), AppError> {
        if !self.loaded {
            self.list().await?;
        }
        Ok(())
    }

    pub fn begin_create(&mut self) {
        self.draft = Some(DraftState::New { fields: R::new_draft() });
    }

    pub fn begin_edit(&mut self, item: &R) {
        self.draft = Some(DraftState::Editing {
            id: item.id(),
            fields: item.to_draft(),
        });
    }

    /// Starts editing the listed item with the given id.
    pub fn begin_edit_by_id(&mut self, id: &Uuid) -> Result<(), AppError> {
        let item = self
            .items
            .iter()
            .find(|item| item.id() == *id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("No {} with id {}", R::NOUN, id)))?;

        self.begin_edit(&item);
        Ok(())
    }

    pub fn update_draft_field(&mut self, field: &str, value: &str) -> Result<(), AppError> {
        let draft = self
            .draft
            .as_mut()
            .ok_or_else(|| AppError::InvalidInput(format!("No {} is being edited", R::NOUN)))?;

        R::set_field(draft.fields_mut(), field, value)
    }

    /// Draft fields with the save-time derivations applied.
    fn prepared_payload(&self) -> Option<R::Draft> {
        self.draft.as_ref().map(|state| {
            let mut payload = state.fields().clone();
            R::derive_fields(&mut payload, Utc::now());
            payload
        })
    }

    /// Whether submitting right now would pass validation.
    pub fn can_save(&self) -> bool {
        self.prepared_payload()
            .map(|payload| payload.validate().is_ok())
            .unwrap_or(false)
    }

    /// Persists the draft: insert for a new draft, update for an edited one.
    ///
    /// Derivations run on a copy, so a failed save leaves the draft exactly as
    /// the user left it.
    #[instrument(skip(self), fields(table = R::TABLE))]
    pub async fn save(&mut self) -> Result<R, AppError> {
        let state = self
            .draft
            .as_ref()
            .ok_or_else(|| AppError::InvalidInput(format!("No {} is being edited", R::NOUN)))?;

        let mut payload = state.fields().clone();
        R::derive_fields(&mut payload, Utc::now());
        payload.validate()?;

        let result = match state {
            DraftState::New { .. } => self.store.insert(&payload).await,
            DraftState::Editing { id, .. } => self.store.update(id, &payload).await,
        };

        match result {
            Ok(row) => {
                info!(id = %row.id(), "Saved {}", R::NOUN);
                self.draft = None;
                if let Err(e) = self.list().await {
                    warn!("Saved {} but refreshing the list failed: {}", R::NOUN, e);
                }
                Ok(row)
            }
            Err(e) => {
                self.record(&e);
                Err(e)
            }
        }
    }

    pub fn delete_prompt(&self) -> String {
        format!("Are you sure you want to delete this {}?", R::NOUN)
    }

    /// Deletes a row once the caller has answered the prompt affirmatively.
    #[instrument(skip(self), fields(table = R::TABLE))]
    pub async fn delete(&mut self, id: &Uuid, confirmation: Confirmation) -> Result<DeleteOutcome, AppError> {
        if confirmation == Confirmation::Declined {
            debug!("Delete declined");
            return Ok(DeleteOutcome::Declined);
        }

        if let Err(e) = self.store.delete(id).await {
            self.record(&e);
            return Err(e);
        }

        info!("Deleted {}", R::NOUN);
        if let Err(e) = self.list().await {
            warn!("Deleted {} but refreshing the list failed: {}", R::NOUN, e);
        }
        Ok(DeleteOutcome::Deleted)
    }

    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn view(&self) -> ManagerView<'_, R> {
        ManagerView {
            items: &self.items,
            editing: self.is_editing(),
            draft: self.draft.as_ref(),
            can_save: self.can_save(),
            error: self.error.as_deref(),
        }
    }

    fn record(&mut self, error: &AppError) {
        warn!(table = R::TABLE, "Store operation failed: {}", error);
        self.error = Some(error.to_string());
    }
}
