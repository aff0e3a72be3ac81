pub mod fixtures;
pub mod memory;
pub mod postgres;

pub use bookmarks_core::error::{Result, StorageError};
pub use bookmarks_core::Repository;
pub use memory::InMemoryRepository;
pub use postgres::PostgresRepository;
