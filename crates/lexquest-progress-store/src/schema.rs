//! Progress store database schema.

use sqlx::migrate::Migrator;

/// Embedded migrations creating the progress fact tables.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");
