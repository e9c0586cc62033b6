use serde::{Deserialize, Serialize};

use super::types::ValidationErrors;
use crate::domain::todo::{Todo, TodoFields, TodoTitle};

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default, alias = "Title")]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    #[serde(default, alias = "Title")]
    pub title: Option<String>,
    #[serde(default, alias = "IsCompleted")]
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: i64,
    pub title: String,
    pub is_completed: bool,
}

impl From<Todo> for TodoResponse {
    fn from(t: Todo) -> Self {
        Self { id: t.id.0, title: t.title, is_completed: t.is_completed }
    }
}

impl CreateTodoRequest {
    pub fn validate(self) -> Result<TodoTitle, ValidationErrors> {
        validate_title(self.title)
    }
}

impl UpdateTodoRequest {
    pub fn validate(self) -> Result<TodoFields, ValidationErrors> {
        let title = validate_title(self.title)?;
        Ok(TodoFields { title, is_completed: self.is_completed })
    }
}

fn validate_title(title: Option<String>) -> Result<TodoTitle, ValidationErrors> {
    TodoTitle::parse(title.unwrap_or_default()).map_err(|e| ValidationErrors::single("title", e.to_string()))
}
