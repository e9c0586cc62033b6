use crate::domain::{
    repository::{StoreError, TodoRepository},
    todo::{TitleError, TodoFields, TodoTitle},
};

/// Placeholder rows written to a fresh database.
pub fn sample_todos() -> Result<Vec<TodoFields>, TitleError> {
    Ok(vec![
        TodoFields { title: TodoTitle::parse("Learn Rust")?, is_completed: false },
        TodoFields { title: TodoTitle::parse("Set up SQLite")?, is_completed: false },
        TodoFields { title: TodoTitle::parse("Try the API with curl")?, is_completed: true },
    ])
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("invalid sample row: {0}")]
    Sample(#[from] TitleError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub async fn seed<R: TodoRepository>(repo: &R) -> Result<usize, SeedError> {
    let rows = sample_todos()?;
    let inserted = repo.seed_if_empty(&rows).await?;
    if inserted > 0 {
        tracing::info!(inserted, "seeded empty todos table");
    } else {
        tracing::debug!("todos table already populated, skipping seed");
    }
    Ok(inserted)
}
