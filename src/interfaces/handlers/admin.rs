use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{instrument, warn};

use crate::{
    errors::AppError,
    use_cases::{
        dashboard::{Dashboard, DashboardResource, Tab},
        extractors::AdminClaims,
        resource_manager::{Confirmation, DeleteOutcome},
    },
    utils::valid_uuid::valid_uuid,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct SelectTabRequest {
    pub tab: Tab,
}

/// One form field edit. `value` is the raw form input; JSON scalars are
/// accepted and read as their textual form.
#[derive(Debug, Deserialize)]
pub struct DraftFieldUpdate {
    pub field: String,
    #[serde(default)]
    pub value: Value,
}

impl DraftFieldUpdate {
    fn form_value(&self) -> Result<String, AppError> {
        match &self.value {
            Value::String(s) => Ok(s.clone()),
            Value::Null => Ok(String::new()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Array(values) => Ok(values
                .iter()
                .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
                .collect::<Vec<_>>()
                .join(",")),
            Value::Object(_) => Err(AppError::field(&self.field, "Expected a text value")),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

fn session(state: &AppState, claims: &AdminClaims) -> Arc<Mutex<Dashboard>> {
    state.sessions.dashboard(claims.subject(), &state.stores)
}

#[instrument(skip(claims, state))]
pub async fn dashboard(
    claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let session = session(&state, &claims);
    let mut dashboard = session.lock().await;

    let active = dashboard.active_tab();
    if let Err(e) = dashboard.select(active).await {
        warn!("Loading {} failed: {}", active.as_str(), e);
    }

    Ok(HttpResponse::Ok().json(dashboard.view()))
}

#[instrument(skip(claims, state, body))]
pub async fn select_tab(
    claims: AdminClaims,
    state: web::Data<AppState>,
    body: web::Json<SelectTabRequest>,
) -> Result<impl Responder, AppError> {
    let session = session(&state, &claims);
    let mut dashboard = session.lock().await;

    // A failed first load is kept on the manager and shown in the panel.
    if let Err(e) = dashboard.select(body.tab).await {
        warn!("Loading {} failed: {}", body.tab.as_str(), e);
    }

    Ok(HttpResponse::Ok().json(dashboard.view()))
}

#[instrument(skip(claims, state), fields(table = R::TABLE))]
pub async fn list<R: DashboardResource>(
    claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let session = session(&state, &claims);
    let mut dashboard = session.lock().await;
    let manager = dashboard.manager_mut::<R>();

    manager.list().await?;
    Ok(HttpResponse::Ok().json(manager.view()))
}

#[instrument(skip(claims, state), fields(table = R::TABLE))]
pub async fn begin_create<R: DashboardResource>(
    claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let session = session(&state, &claims);
    let mut dashboard = session.lock().await;
    let manager = dashboard.manager_mut::<R>();

    manager.begin_create();
    Ok(HttpResponse::Ok().json(manager.view()))
}

#[instrument(skip(claims, state), fields(table = R::TABLE))]
pub async fn begin_edit<R: DashboardResource>(
    claims: AdminClaims,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&path)?;

    let session = session(&state, &claims);
    let mut dashboard = session.lock().await;
    let manager = dashboard.manager_mut::<R>();

    manager.ensure_loaded().await?;
    manager.begin_edit_by_id(&id)?;
    Ok(HttpResponse::Ok().json(manager.view()))
}

#[instrument(skip(claims, state, body), fields(table = R::TABLE, field = %body.field))]
pub async fn update_draft_field<R: DashboardResource>(
    claims: AdminClaims,
    state: web::Data<AppState>,
    body: web::Json<DraftFieldUpdate>,
) -> Result<impl Responder, AppError> {
    let value = body.form_value()?;

    let session = session(&state, &claims);
    let mut dashboard = session.lock().await;
    let manager = dashboard.manager_mut::<R>();

    manager.update_draft_field(&body.field, &value)?;
    Ok(HttpResponse::Ok().json(manager.view()))
}

#[instrument(skip(claims, state), fields(table = R::TABLE))]
pub async fn save<R: DashboardResource>(
    claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let session = session(&state, &claims);
    let mut dashboard = session.lock().await;
    let manager = dashboard.manager_mut::<R>();

    let saved = manager.save().await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "saved": saved,
        "state": manager.view(),
    })))
}

#[instrument(skip(claims, state), fields(table = R::TABLE))]
pub async fn cancel_edit<R: DashboardResource>(
    claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let session = session(&state, &claims);
    let mut dashboard = session.lock().await;
    let manager = dashboard.manager_mut::<R>();

    manager.cancel_edit();
    Ok(HttpResponse::Ok().json(manager.view()))
}

#[instrument(skip(claims, state), fields(table = R::TABLE))]
pub async fn dismiss_error<R: DashboardResource>(
    claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let session = session(&state, &claims);
    let mut dashboard = session.lock().await;
    let manager = dashboard.manager_mut::<R>();

    manager.dismiss_error();
    Ok(HttpResponse::Ok().json(manager.view()))
}

/// `DELETE /{id}?confirm=true` deletes; any other answer is a no-op that
/// still returns the prompt the caller should have shown.
#[instrument(skip(claims, state, query), fields(table = R::TABLE))]
pub async fn delete<R: DashboardResource>(
    claims: AdminClaims,
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<DeleteQuery>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&path)?;

    let session = session(&state, &claims);
    let mut dashboard = session.lock().await;
    let manager = dashboard.manager_mut::<R>();

    let outcome = manager.delete(&id, Confirmation::from(query.confirm)).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "deleted": outcome == DeleteOutcome::Deleted,
        "outcome": outcome,
        "prompt": manager.delete_prompt(),
        "state": manager.view(),
    })))
}
