//! Query functions, one module per table group.
//!
//! Writes take a `&mut PgConnection` so callers can group them in a
//! transaction; reads take the pool.

pub mod post_meta;
pub mod posts;
pub mod tags;
