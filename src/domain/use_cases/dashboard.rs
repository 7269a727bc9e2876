use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::{
    entities::{post::Post, project::Project, resource::Resource, tech_stack::TechStackEntry},
    errors::AppError,
    shared_repos::SharedStores,
    use_cases::resource_manager::{ManagerView, ResourceManager},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tab {
    #[default]
    Projects,
    Posts,
    TechStack,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Projects, Tab::Posts, Tab::TechStack];

    /// Path segment under `/admin`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Projects => "projects",
            Tab::Posts => "posts",
            Tab::TechStack => "tech-stack",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Projects => "Projects",
            Tab::Posts => "Posts",
            Tab::TechStack => "Tech Stack",
        }
    }
}

/// Ties a resource type to its dashboard tab and manager slot.
pub trait DashboardResource: Resource {
    const TAB: Tab;

    fn manager(dashboard: &Dashboard) -> &ResourceManager<Self>;
    fn manager_mut(dashboard: &mut Dashboard) -> &mut ResourceManager<Self>;
}

impl DashboardResource for Project {
    const TAB: Tab = Tab::Projects;

    fn manager(dashboard: &Dashboard) -> &ResourceManager<Self> {
        &dashboard.projects
    }

    fn manager_mut(dashboard: &mut Dashboard) -> &mut ResourceManager<Self> {
        &mut dashboard.projects
    }
}

impl DashboardResource for Post {
    const TAB: Tab = Tab::Posts;

    fn manager(dashboard: &Dashboard) -> &ResourceManager<Self> {
        &dashboard.posts
    }

    fn manager_mut(dashboard: &mut Dashboard) -> &mut ResourceManager<Self> {
        &mut dashboard.posts
    }
}

impl DashboardResource for TechStackEntry {
    const TAB: Tab = Tab::TechStack;

    fn manager(dashboard: &Dashboard) -> &ResourceManager<Self> {
        &dashboard.tech_stack
    }

    fn manager_mut(dashboard: &mut Dashboard) -> &mut ResourceManager<Self> {
        &mut dashboard.tech_stack
    }
}

#[derive(Debug, Serialize)]
pub struct TabEntry {
    pub id: Tab,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Panel<'a> {
    Projects(ManagerView<'a, Project>),
    Posts(ManagerView<'a, Post>),
    TechStack(ManagerView<'a, TechStackEntry>),
}

#[derive(Debug, Serialize)]
pub struct DashboardView<'a> {
    pub active_tab: Tab,
    pub tabs: Vec<TabEntry>,
    pub panel: Panel<'a>,
}

/// Admin tab container. Hidden managers stay mounted and keep their items
/// and drafts; only the active one is rendered.
pub struct Dashboard {
    active: Tab,
    projects: ResourceManager<Project>,
    posts: ResourceManager<Post>,
    tech_stack: ResourceManager<TechStackEntry>,
}

impl Dashboard {
    pub fn new(stores: &SharedStores) -> Self {
        Dashboard {
            active: Tab::default(),
            projects: ResourceManager::new(stores.projects.clone()),
            posts: ResourceManager::new(stores.posts.clone()),
            tech_stack: ResourceManager::new(stores.tech_stack.clone()),
        }
    }

    pub fn active_tab(&self) -> Tab {
        self.active
    }

    /// Switches tabs and loads the newly shown manager on first display.
    pub async fn select(&mut self, tab: Tab) -> Result<(), AppError> {
        self.active = tab;
        match tab {
            Tab::Projects => self.projects.ensure_loaded().await,
            Tab::Posts => self.posts.ensure_loaded().await,
            Tab::TechStack => self.tech_stack.ensure_loaded().await,
        }
    }

    pub fn manager<R: DashboardResource>(&self) -> &ResourceManager<R> {
        R::manager(self)
    }

    pub fn manager_mut<R: DashboardResource>(&mut self) -> &mut ResourceManager<R> {
        R::manager_mut(self)
    }

    pub fn view(&self) -> DashboardView<'_> {
        let panel = match self.active {
            Tab::Projects => Panel::Projects(self.projects.view()),
            Tab::Posts => Panel::Posts(self.posts.view()),
            Tab::TechStack => Panel::TechStack(self.tech_stack.view()),
        };

        DashboardView {
            active_tab: self.active,
            tabs: Tab::ALL
                .iter()
                .map(|tab| TabEntry { id: *tab, label: tab.label() })
                .collect(),
            panel,
        }
    }
}

/// One dashboard per authenticated admin, kept for the life of the process.
#[derive(Default)]
pub struct AdminSessions {
    sessions: DashMap<String, Arc<Mutex<Dashboard>>>,
}

impl AdminSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dashboard(&self, subject: &str, stores: &SharedStores) -> Arc<Mutex<Dashboard>> {
        self.sessions
            .entry(subject.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(Dashboard::new(stores))))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
