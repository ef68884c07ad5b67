//! LexQuest — PostgreSQL progress store.
//!
//! Facts are written with `INSERT ... ON CONFLICT ... DO UPDATE`, so
//! concurrent writers for the same key never duplicate a row; the last write
//! wins on the stored values.

pub mod pg_progress_store;
pub mod schema;

pub use pg_progress_store::PgProgressStore;
