use crate::domain::repository::{StoreError, TodoRepository};
use crate::domain::todo::{CreateTodo, Todo, TodoPatch};
use async_trait::async_trait;

#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn list(&self, completed: Option<String>) -> Vec<Todo>;
    async fn get(&self, id: u64) -> Option<Todo>;
    async fn create(&self, input: CreateTodo) -> Result<Todo, StoreError>;
    async fn update(&self, id: u64, patch: TodoPatch) -> Result<Option<Todo>, StoreError>;
    async fn delete(&self, id: u64) -> Result<bool, StoreError>;
}

#[derive(Clone)]
pub struct TodoServiceImpl<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }
}

#[async_trait]
impl<R: TodoRepository> TodoService for TodoServiceImpl<R> {
    async fn list(&self, completed: Option<String>) -> Vec<Todo> { self.repo.list(completed).await }
    async fn get(&self, id: u64) -> Option<Todo> { self.repo.get(id).await }

    async fn create(&self, input: CreateTodo) -> Result<Todo, StoreError> {
        if input.title.is_empty() {
            return Err(StoreError::TitleRequired);
        }
        self.repo.create(input).await
    }

    async fn update(&self, id: u64, patch: TodoPatch) -> Result<Option<Todo>, StoreError> { self.repo.update(id, patch).await }
    async fn delete(&self, id: u64) -> Result<bool, StoreError> { self.repo.delete(id).await }
}
