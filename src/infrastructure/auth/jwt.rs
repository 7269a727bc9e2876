use jsonwebtoken::{encode, Header, decode, Validation, TokenData, Algorithm};
use chrono::{Utc, Duration};

use crate::entities::token::Claims;
use crate::settings::{AppConfig, JwtKeys};
use crate::errors::AuthError;

const JWT_ALGORITHM: Algorithm = Algorithm::HS512;

#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    access_expiration: Duration,
}

impl JwtService {
    pub fn new(config: &AppConfig) -> Self {
        JwtService {
            keys: JwtKeys::from(config),
            access_expiration: Duration::minutes(config.jwt_expiration_minutes),
        }
    }

    pub fn access_expiration_secs(&self) -> i64 {
        self.access_expiration.num_seconds()
    }

    /// Issues an access token for the configured admin account.
    pub fn create_admin_jwt(&self, subject: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = (now + self.access_expiration).timestamp() as usize;

        let claims = Claims {
            sub: subject.to_string(),
            admin: true,
            exp,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.keys.encoding)
            .map_err(|_| AuthError::TokenCreation)
    }

    pub fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;
        validation.leeway = 0;

        decode::<Claims>(
            token,
            &self.keys.decoding,
            &validation
        )
        .map_err(AuthError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{AppEnvironment, StoreBackend};

    fn config(minutes: i64) -> AppConfig {
        AppConfig {
            env: AppEnvironment::Testing,
            name: "test".into(),
            port: 0,
            host: "127.0.0.1".into(),
            worker_count: 1,
            store_backend: StoreBackend::Memory,
            database_url: String::new(),
            cors_allowed_origins: vec!["*".into()],
            jwt_secret: "test_jwt_secret_that_is_long_enough_for_hs512_1234567890".into(),
            jwt_expiration_minutes: minutes,
            admin_email: "admin@example.com".into(),
            admin_password_hash: String::new(),
        }
    }

    #[test]
    fn issued_token_round_trips_with_admin_claim() {
        let service = JwtService::new(&config(5));
        let token = service.create_admin_jwt("admin@example.com").unwrap();

        let claims = service.decode_jwt(&token).unwrap().claims;
        assert_eq!(claims.sub, "admin@example.com");
        assert!(claims.admin);
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = JwtService::new(&config(-5));
        let token = service.create_admin_jwt("admin@example.com").unwrap();

        assert!(matches!(service.decode_jwt(&token), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() {
        let service = JwtService::new(&config(5));
        let mut other_config = config(5);
        other_config.jwt_secret = "another_secret_that_is_also_long_enough_0987654321".into();
        let token = JwtService::new(&other_config).create_admin_jwt("x@example.com").unwrap();

        assert!(matches!(service.decode_jwt(&token), Err(AuthError::InvalidToken)));
    }
}
