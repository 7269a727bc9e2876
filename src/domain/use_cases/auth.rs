use tracing::{info, warn};
use validator::Validate;
use zeroize::Zeroizing;

use crate::{
    auth::{jwt::JwtService, password::verify_password},
    entities::token::{AuthResponse, LoginRequest},
    errors::AuthError,
    settings::AppConfig,
};

/// Single-account admin login against the configured credentials.
pub struct AuthHandler {
    pub token_service: JwtService,
    admin_email: String,
    admin_password_hash: Zeroizing<String>,
}

impl AuthHandler {
    pub fn new(config: &AppConfig, token_service: JwtService) -> Self {
        AuthHandler {
            token_service,
            admin_email: config.admin_email.trim().to_lowercase(),
            admin_password_hash: Zeroizing::new(config.admin_password_hash.clone()),
        }
    }

    pub fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, AuthError> {
        credentials.validate()?;

        let email = credentials.email.trim().to_lowercase();
        if email != self.admin_email {
            warn!("Login attempt for unknown account");
            return Err(AuthError::WrongCredentials);
        }

        if !verify_password(&credentials.password, &self.admin_password_hash)? {
            warn!("Wrong password for admin account");
            return Err(AuthError::WrongCredentials);
        }

        let token = self.token_service.create_admin_jwt(&email)?;
        info!("Admin logged in");

        Ok(AuthResponse::new(token, self.token_service.access_expiration_secs()))
    }
}
