pub mod seed;
pub mod sqlite_repo;
