use std::{path::Path, str::FromStr};

use async_trait::async_trait;
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow}, Pool, Row, Sqlite};

use crate::domain::{
    repository::{StoreError, TodoRepository},
    todo::{Todo, TodoFields, TodoId, TodoTitle},
};

#[derive(Clone)]
pub struct SqliteTodoRepository {
    pool: Pool<Sqlite>,
}

impl SqliteTodoRepository {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = if is_in_memory(database_url) {
            // Every connection to :memory: opens a fresh database, so keep exactly one alive.
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            ensure_parent_dir(database_url).map_err(sqlx::Error::Io)?;
            SqlitePoolOptions::new()
                .max_connections(max_connections)
                .connect_with(options)
                .await?
        };
        Ok(Self { pool })
    }

    /// Waits for checked-out connections to return, then closes the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn init(&self) -> Result<(), StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL CHECK (length(title) BETWEEN 1 AND 100),
                is_completed INTEGER NOT NULL DEFAULT 0
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let rows = sqlx::query("SELECT id, title, is_completed FROM todos ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_todo).collect()
    }

    async fn get(&self, id: TodoId) -> Result<Option<Todo>, StoreError> {
        let row = sqlx::query("SELECT id, title, is_completed FROM todos WHERE id = ?1")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_todo).transpose()
    }

    async fn insert(&self, title: TodoTitle) -> Result<Todo, StoreError> {
        let result = sqlx::query("INSERT INTO todos (title, is_completed) VALUES (?1, 0)")
            .bind(title.as_str())
            .execute(&self.pool)
            .await?;
        Ok(Todo { id: TodoId(result.last_insert_rowid()), title: title.into_inner(), is_completed: false })
    }

    async fn update(&self, id: TodoId, fields: TodoFields) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE todos SET title = ?2, is_completed = ?3 WHERE id = ?1")
            .bind(id.0)
            .bind(fields.title.as_str())
            .bind(fields.is_completed)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: TodoId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?1")
            .bind(id.0)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn seed_if_empty(&self, rows: &[TodoFields]) -> Result<usize, StoreError> {
        let mut tx = self.pool.begin().await?;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM todos")
            .fetch_one(&mut *tx)
            .await?;
        if count > 0 {
            return Ok(0);
        }
        for row in rows {
            sqlx::query("INSERT INTO todos (title, is_completed) VALUES (?1, ?2)")
                .bind(row.title.as_str())
                .bind(row.is_completed)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(rows.len())
    }
}

fn row_to_todo(row: &SqliteRow) -> Result<Todo, StoreError> {
    Ok(Todo {
        id: TodoId(row.try_get("id")?),
        title: row.try_get("title")?,
        is_completed: row.try_get("is_completed")?,
    })
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

fn ensure_parent_dir(database_url: &str) -> std::io::Result<()> {
    let Some(rest) = database_url.strip_prefix("sqlite://").or_else(|| database_url.strip_prefix("sqlite:")) else {
        return Ok(());
    };
    let path = rest.split('?').next().unwrap_or_default();
    // Absolute Windows paths arrive as /C:/...
    let path = if cfg!(windows) && path.len() >= 3 && path.as_bytes()[0] == b'/' && path.as_bytes()[2] == b':' {
        &path[1..]
    } else {
        path
    };
    match Path::new(path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
