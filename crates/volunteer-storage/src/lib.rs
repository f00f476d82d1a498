//! Volunteer Storage Layer
//!
//! Local key-value persistence for client state. The session token and the
//! cached user record live here between launches.

mod database;
mod error;
mod migrations;
mod store;

pub use database::Database;
pub use error::StorageError;
pub use store::{KeyValueStore, MemoryStore};

pub type Result<T> = std::result::Result<T, StorageError>;
