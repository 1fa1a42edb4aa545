use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    repository::{StoreError, TodoRepository},
    todo::{CreateTodo, Todo, TodoPatch},
};

/// Flat-file store: the whole collection lives in one JSON array on disk and
/// every operation is a load of the full document, an in-memory mutation,
/// and a rewrite of the full document. The mutex serializes that cycle
/// within this process; nothing guards against other processes sharing the
/// file.
#[derive(Clone)]
pub struct FileTodoRepository {
    path: Arc<PathBuf>,
    write_lock: Arc<Mutex<()>>,
}

impl FileTodoRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The degrade-to-empty read: a missing, unreadable, or non-JSON file is
    /// an empty collection, never an error.
    async fn load_or_empty(&self) -> Vec<Todo> {
        match tokio::fs::read(self.path.as_ref()).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }

    async fn persist(&self, todos: &[Todo]) -> Result<(), StoreError> {
        let body = serde_json::to_vec_pretty(todos)?;
        tokio::fs::write(self.path.as_ref(), body).await?;
        Ok(())
    }
}

/// Ids are recomputed from the current contents on every insert, not kept in
/// a durable counter, so deleting the highest item frees its id for reuse.
fn next_id(todos: &[Todo]) -> u64 {
    todos.iter().map(|t| t.id).max().map_or(1, |max| max + 1)
}

#[async_trait]
impl TodoRepository for FileTodoRepository {
    async fn list(&self, completed: Option<String>) -> Vec<Todo> {
        let todos = self.load_or_empty().await;
        match completed {
            Some(filter) => todos.into_iter().filter(|t| t.completed_matches(&filter)).collect(),
            None => todos,
        }
    }

    async fn get(&self, id: u64) -> Option<Todo> {
        self.load_or_empty().await.into_iter().find(|t| t.id == id)
    }

    async fn create(&self, input: CreateTodo) -> Result<Todo, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut todos = self.load_or_empty().await;
        let todo = Todo {
            id: next_id(&todos),
            title: input.title,
            completed: input.completed,
        };
        todos.push(todo.clone());
        self.persist(&todos).await?;
        Ok(todo)
    }

    async fn update(&self, id: u64, patch: TodoPatch) -> Result<Option<Todo>, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut todos = self.load_or_empty().await;
        let Some(todo) = todos.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        todo.apply(patch);
        let updated = todo.clone();
        self.persist(&todos).await?;
        Ok(Some(updated))
    }

    async fn delete(&self, id: u64) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut todos = self.load_or_empty().await;
        let Some(pos) = todos.iter().position(|t| t.id == id) else {
            return Ok(false);
        };
        todos.remove(pos);
        self.persist(&todos).await?;
        Ok(true)
    }
}
