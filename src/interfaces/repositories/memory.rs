use std::{
    cmp::Ordering,
    sync::atomic::{AtomicU64, Ordering as AtomicOrdering},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    entities::resource::{Direction, Resource},
    errors::AppError,
    repositories::store::{ResourceStore, SelectQuery},
};

/// In-process table used for local development and the HTTP test suite.
///
/// Rows keep their insertion sequence, which is the tie-break among rows
/// with equal sort keys. Writes are serialized so the unique-key check and
/// the write it guards cannot interleave.
pub struct MemoryStore<R: Resource> {
    rows: DashMap<Uuid, (u64, R)>,
    sequence: AtomicU64,
    writes: Mutex<()>,
}

impl<R: Resource> Default for MemoryStore<R> {
    fn default() -> Self {
        MemoryStore {
            rows: DashMap::new(),
            sequence: AtomicU64::new(0),
            writes: Mutex::new(()),
        }
    }
}

impl<R: Resource> MemoryStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, AtomicOrdering::Relaxed)
    }

    /// Same outcome as a unique constraint: another row already holds the key.
    fn check_unique(&self, row: &R) -> Result<(), AppError> {
        let Some((column, value)) = row.unique_key() else {
            return Ok(());
        };

        let taken = self.rows.iter().any(|entry| {
            let other = &entry.value().1;
            other.id() != row.id()
                && other.unique_key().is_some_and(|(_, other_value)| other_value == value)
        });

        if taken {
            return Err(AppError::Conflict(format!("{} already exists", capitalize(column))));
        }
        Ok(())
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn column_value<R: Resource>(row: &R, column: &str) -> Result<Value, AppError> {
    let value = serde_json::to_value(row)
        .map_err(|e| AppError::InternalError(format!("Failed to encode {} row: {}", R::TABLE, e)))?;
    Ok(value.get(column).cloned().unwrap_or(Value::Null))
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => {
            match (x.parse::<DateTime<Utc>>(), y.parse::<DateTime<Utc>>()) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                _ => x.cmp(y),
            }
        }
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl<R: Resource> ResourceStore<R> for MemoryStore<R> {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<R>, AppError> {
        let mut rows: Vec<(u64, R)> = self
            .rows
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by_key(|(sequence, _)| *sequence);

        let mut keyed = Vec::with_capacity(rows.len());
        for (_, row) in rows {
            if let Some(filter) = &query.filter {
                if column_value(&row, filter.column)? != filter.value.to_json() {
                    continue;
                }
            }
            let key = column_value(&row, query.order_by.column)?;
            keyed.push((key, row));
        }

        // Stable sort; nulls go last in either direction.
        keyed.sort_by(|(a, _), (b, _)| match (a.is_null(), b.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ordering = compare_values(a, b);
                match query.order_by.direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            }
        });

        Ok(keyed.into_iter().map(|(_, row)| row).collect())
    }

    async fn insert(&self, draft: &R::Draft) -> Result<R, AppError> {
        let _guard = self.writes.lock().await;

        let id = Uuid::new_v4();
        let now = Utc::now();
        let row = R::from_draft(id, draft.clone(), now, now);
        self.check_unique(&row)?;

        self.rows.insert(id, (self.next_sequence(), row.clone()));
        Ok(row)
    }

    async fn update(&self, id: &Uuid, draft: &R::Draft) -> Result<R, AppError> {
        let _guard = self.writes.lock().await;

        let created_at = self
            .rows
            .get(id)
            .map(|entry| entry.1.created_at())
            .ok_or_else(|| AppError::NotFound(format!("No {} with id {}", R::NOUN, id)))?;

        let row = R::from_draft(*id, draft.clone(), created_at, Utc::now());
        self.check_unique(&row)?;

        if let Some(mut entry) = self.rows.get_mut(id) {
            entry.1 = row.clone();
        }
        Ok(row)
    }

    async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        self.rows
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("No {} with id {}", R::NOUN, id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        post::Post,
        project::Project,
        resource::OrderBy,
        tech_stack::TechStackEntry,
    };

    async fn seed_projects(store: &MemoryStore<Project>, order: &[i32]) {
        for (i, order_index) in order.iter().enumerate() {
            let mut draft = Project::new_draft();
            draft.title = format!("Project {i}");
            draft.description = "desc".into();
            draft.order_index = *order_index;
            store.insert(&draft).await.unwrap();
        }
    }

    #[tokio::test]
    async fn select_orders_by_order_index_ascending() {
        let store = MemoryStore::<Project>::new();
        seed_projects(&store, &[3, 1, 2]).await;

        let rows = store.select(&SelectQuery::ordered(Project::DISPLAY_ORDER)).await.unwrap();
        let order: Vec<i32> = rows.iter().map(|p| p.order_index).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn equal_order_index_keeps_insertion_order() {
        let store = MemoryStore::<TechStackEntry>::new();
        for name in ["Rust", "Go", "Zig"] {
            let mut draft = TechStackEntry::new_draft();
            draft.name = name.into();
            draft.icon = name.to_lowercase();
            store.insert(&draft).await.unwrap();
        }

        let rows = store
            .select(&SelectQuery::ordered(TechStackEntry::DISPLAY_ORDER))
            .await
            .unwrap();
        let names: Vec<&str> = rows.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Rust", "Go", "Zig"]);
    }

    #[tokio::test]
    async fn filter_keeps_matching_rows_only() {
        let store = MemoryStore::<Post>::new();
        for (title, published) in [("Draft", false), ("Live", true)] {
            let mut draft = Post::new_draft();
            draft.title = title.into();
            draft.slug = title.to_lowercase();
            draft.content = "body".into();
            draft.published = published;
            store.insert(&draft).await.unwrap();
        }

        let query = SelectQuery::ordered(OrderBy::desc("published_at")).filter_eq("published", true);
        let rows = store.select(&query).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Live");
    }

    #[tokio::test]
    async fn update_keeps_created_at_and_id() {
        let store = MemoryStore::<Project>::new();
        seed_projects(&store, &[0]).await;
        let original = store.select(&SelectQuery::ordered(Project::DISPLAY_ORDER)).await.unwrap().remove(0);

        let mut draft = original.to_draft();
        draft.title = "Renamed".into();
        let updated = store.update(&original.id, &draft).await.unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.title, "Renamed");
    }

    fn post_draft(title: &str, slug: &str) -> crate::entities::post::PostDraft {
        let mut draft = Post::new_draft();
        draft.title = title.into();
        draft.slug = slug.into();
        draft.content = "body".into();
        draft
    }

    #[tokio::test]
    async fn duplicate_slug_insert_is_a_conflict() {
        let store = MemoryStore::<Post>::new();
        store.insert(&post_draft("First", "same")).await.unwrap();

        let err = store.insert(&post_draft("Second", "same")).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(ref msg) if msg == "Slug already exists"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn update_onto_another_rows_slug_is_a_conflict() {
        let store = MemoryStore::<Post>::new();
        store.insert(&post_draft("First", "first")).await.unwrap();
        let second = store.insert(&post_draft("Second", "second")).await.unwrap();

        let err = store.update(&second.id, &post_draft("Second", "first")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let rows = store.select(&SelectQuery::ordered(Post::DISPLAY_ORDER)).await.unwrap();
        assert!(rows.iter().any(|p| p.id == second.id && p.slug == "second"));
    }

    #[tokio::test]
    async fn update_keeping_own_slug_is_allowed() {
        let store = MemoryStore::<Post>::new();
        let post = store.insert(&post_draft("First", "first")).await.unwrap();

        let updated = store.update(&post.id, &post_draft("Renamed", "first")).await.unwrap();
        assert_eq!(updated.title, "Renamed");
    }

    #[tokio::test]
    async fn missing_rows_are_not_found() {
        let store = MemoryStore::<Project>::new();
        let id = Uuid::new_v4();

        assert!(matches!(store.delete(&id).await, Err(AppError::NotFound(_))));
        assert!(matches!(store.update(&id, &Project::new_draft()).await, Err(AppError::NotFound(_))));
    }
}
