//! PostgreSQL persistence for chefai: connection pool, embedded migrations,
//! row models, and query functions for posts, post metadata, and tags.

pub mod config;
pub mod models;
pub mod pool;
pub mod queries;
