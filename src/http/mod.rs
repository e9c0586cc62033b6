pub mod dto;
pub mod extractors;
pub mod routes;
pub mod routing;
pub mod types;
