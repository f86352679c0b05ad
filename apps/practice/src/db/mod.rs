//! Local SQLite storage backing the persistence surface.

pub mod error;
pub mod schema;
pub mod storage;

pub use error::DbError;
pub use storage::SqliteStorage;
