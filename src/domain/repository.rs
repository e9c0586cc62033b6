use async_trait::async_trait;
use super::todo::{Todo, TodoFields, TodoId, TodoTitle};

/// A fault in the backing store. "Not found" is never reported through this type.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Table access for todos. Each call is a single statement in the store's own transaction.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn init(&self) -> Result<(), StoreError>;
    async fn list(&self) -> Result<Vec<Todo>, StoreError>;
    async fn get(&self, id: TodoId) -> Result<Option<Todo>, StoreError>;
    /// Inserts an open todo and returns it with the id the store assigned.
    async fn insert(&self, title: TodoTitle) -> Result<Todo, StoreError>;
    /// Overwrites title and completion flag. `false` when no row has this id.
    async fn update(&self, id: TodoId, fields: TodoFields) -> Result<bool, StoreError>;
    /// `false` when no row has this id.
    async fn delete(&self, id: TodoId) -> Result<bool, StoreError>;
    /// Inserts `rows` only if the table is empty; returns how many were written.
    async fn seed_if_empty(&self, rows: &[TodoFields]) -> Result<usize, StoreError>;
}
