use actix_web::{web, HttpResponse, Responder};
use tracing::{error, instrument};

use crate::{
    entities::{project::Project, resource::{OrderBy, Resource}},
    errors::AppError,
    repositories::store::SelectQuery,
    AppState,
};

const PUBLISHED_ORDER: OrderBy = OrderBy::desc("published_at");

/// Store failures surface as a bare 500 with the store's message.
fn store_failure(e: AppError) -> AppError {
    error!("Public read failed: {}", e);
    match e {
        AppError::InternalError(_) => e,
        other => AppError::InternalError(other.to_string()),
    }
}

#[instrument(skip(state))]
pub async fn published_posts(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let query = SelectQuery::ordered(PUBLISHED_ORDER).filter_eq("published", true);

    let posts = state.stores.posts
        .select(&query)
        .await
        .map_err(store_failure)?;

    Ok(HttpResponse::Ok().json(posts))
}

#[instrument(skip(state))]
pub async fn projects(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let query = SelectQuery::ordered(Project::DISPLAY_ORDER);

    let projects = state.stores.projects
        .select(&query)
        .await
        .map_err(store_failure)?;

    Ok(HttpResponse::Ok().json(projects))
}
