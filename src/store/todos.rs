use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::StoreError;

/// A single todo item. The id is assigned by the store on creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: Option<u64>,
    pub title: String,
}

impl Todo {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            title: title.into(),
        }
    }
}

/// Pluggable storage for todos
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Append a todo and assign it the next identifier atomically
    async fn add(&self, title: String) -> Result<Todo, StoreError>;

    /// All todos in insertion order
    async fn list(&self) -> Result<Vec<Todo>, StoreError>;

    async fn count(&self) -> Result<usize, StoreError>;
}

/// Process-wide in-memory todo list.
///
/// Id assignment and append happen under one write lock, so concurrent
/// `add` calls never observe the same count.
#[derive(Debug, Default)]
pub struct InMemoryTodoStore {
    todos: RwLock<Vec<Todo>>,
}

impl InMemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoStore {
    async fn add(&self, title: String) -> Result<Todo, StoreError> {
        let mut todos = self.todos.write().await;
        let id = u64::try_from(todos.len())
            .ok()
            .and_then(|count| count.checked_add(1))
            .ok_or(StoreError::IdOverflow("todos"))?;

        let todo = Todo::new(id, title);
        todos.push(todo.clone());

        tracing::debug!("Stored todo {} ({} total)", id, todos.len());
        Ok(todo)
    }

    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        Ok(self.todos.read().await.clone())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.todos.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_add_assigns_sequential_ids() {
        let store = InMemoryTodoStore::new();
        let first = store.add("buy milk".into()).await.unwrap();
        let second = store.add("walk dog".into()).await.unwrap();

        assert_eq!(first, Todo::new(1, "buy milk"));
        assert_eq!(second.id, Some(2));
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = InMemoryTodoStore::new();
        assert!(store.list().await.unwrap().is_empty());

        for title in ["one", "two", "three"] {
            store.add(title.into()).await.unwrap();
        }

        let titles: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["one", "two", "three"]);
        assert_eq!(store.count().await.unwrap(), 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_never_duplicate_ids() {
        let store = Arc::new(InMemoryTodoStore::new());
        let tasks: Vec<_> = (0..64)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.add(format!("todo {}", i)).await })
            })
            .collect();

        let mut ids = HashSet::new();
        for task in tasks {
            let todo = task.await.unwrap().unwrap();
            assert!(ids.insert(todo.id.unwrap()));
        }

        assert_eq!(ids, (1..=64).collect::<HashSet<u64>>());
    }
}
