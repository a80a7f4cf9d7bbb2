pub mod config;
pub mod db;
pub mod domain;
pub mod forms;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

/// Role claim required for catalog write operations.
pub const ADMIN_ROLE: &str = "admin";
