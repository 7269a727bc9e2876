mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod shared_repos;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, db, utils};

use auth::jwt::JwtService;
use shared_repos::SharedStores;
use use_cases::{auth::AuthHandler, dashboard::AdminSessions};

pub struct AppState {
    pub stores: SharedStores,
    pub auth_handler: AuthHandler,
    pub sessions: AdminSessions,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, stores: SharedStores) -> Self {
        let jwt_service = JwtService::new(config);
        let auth_handler = AuthHandler::new(config, jwt_service);

        AppState {
            stores,
            auth_handler,
            sessions: AdminSessions::new(),
        }
    }
}
