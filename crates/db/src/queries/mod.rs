// crates/db/src/queries/mod.rs
// CRUD operations for the liftlog SQLite database.

mod entries;
mod exercises;
mod groups;
pub(crate) mod row_types;
mod source;

pub use entries::EntryFilter;

/// Current time as unix seconds, for `created_at` / `updated_at`.
pub(crate) fn now_ts() -> i64 {
    chrono::Utc::now().timestamp()
}
