use actix_web::{post, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::token::LoginRequest, errors::AuthError, AppState};

#[instrument(skip(state, credentials))]
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    credentials: web::Json<LoginRequest>,
) -> Result<impl Responder, AuthError> {
    let response = state.auth_handler.login(&credentials)?;
    Ok(HttpResponse::Ok().json(response))
}
