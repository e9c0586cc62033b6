//! CRUD HTTP service for todos backed by SQLite.

pub mod config;
pub mod domain;
pub mod http;
pub mod infrastructure;
