pub mod auth;
pub mod dashboard;
pub mod extractors;
pub mod resource_manager;
