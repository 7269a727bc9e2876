use std::sync::Arc;

use crate::{
    entities::{post::Post, project::Project, tech_stack::TechStackEntry},
    repositories::{memory::MemoryStore, sqlx_repo::SqlxRepo, store::ResourceStore},
    settings::StoreBackend,
};

/// Table handles shared by every admin session and the public routes.
#[derive(Clone)]
pub struct SharedStores {
    pub backend: StoreBackend,
    pub projects: Arc<dyn ResourceStore<Project>>,
    pub posts: Arc<dyn ResourceStore<Post>>,
    pub tech_stack: Arc<dyn ResourceStore<TechStackEntry>>,
    sql: Option<Arc<SqlxRepo>>,
}

impl SharedStores {
    pub fn new(pool: sqlx::PgPool) -> Self {
        let repo = Arc::new(SqlxRepo::new(pool));

        SharedStores {
            backend: StoreBackend::Postgres,
            projects: repo.clone(),
            posts: repo.clone(),
            tech_stack: repo.clone(),
            sql: Some(repo),
        }
    }

    pub fn in_memory() -> Self {
        SharedStores {
            backend: StoreBackend::Memory,
            projects: Arc::new(MemoryStore::<Project>::new()),
            posts: Arc::new(MemoryStore::<Post>::new()),
            tech_stack: Arc::new(MemoryStore::<TechStackEntry>::new()),
            sql: None,
        }
    }

    /// Reachability of the backing database, as reported by the health check.
    pub async fn status(&self) -> &'static str {
        match &self.sql {
            Some(repo) => match repo.check_connection().await {
                Ok(()) => "OK",
                Err(e) => {
                    tracing::warn!("Database health check failed: {}", e);
                    "Unavailable"
                }
            },
            None => "Not configured",
        }
    }
}
