//! Database layer for notekeep

mod blob_store;
mod connection;
mod migrations;

pub use blob_store::{BlobStore, MemoryBlobStore, SqliteBlobStore};
pub use connection::Database;
