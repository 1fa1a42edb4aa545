use async_trait::async_trait;

use super::todo::{CreateTodo, Todo, TodoPatch};

/// Failures a store operation can surface. Absent items are not errors;
/// they come back as `None`/`false` from the operations below.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("title is required")]
    TitleRequired,
    #[error("failed to encode todo collection")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write todo collection")]
    Write(#[from] std::io::Error),
}

/// The store owning the persisted collection. Every operation loads the
/// full collection, mutates it in memory, and (for write verbs) persists
/// the full document back.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    /// List items, optionally filtered by a raw `completed` query value.
    /// Never fails: an unreadable store reads as empty.
    async fn list(&self, completed: Option<String>) -> Vec<Todo>;
    async fn get(&self, id: u64) -> Option<Todo>;
    async fn create(&self, input: CreateTodo) -> Result<Todo, StoreError>;
    async fn update(&self, id: u64, patch: TodoPatch) -> Result<Option<Todo>, StoreError>;
    async fn delete(&self, id: u64) -> Result<bool, StoreError>;
}
