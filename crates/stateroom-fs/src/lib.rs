//! Filesystem backend for stateroom workspace state storage.
//!
//! Stores each workspace as up to two files in a flat base directory:
//! - `<workspace>.state`: The opaque state payload (presence defines existence)
//! - `<workspace>.lock`: Advisory lock metadata as JSON (presence means locked)
//!
//! There is no caching or buffering; every operation is a direct filesystem
//! call, making the directory itself the source of truth and the concurrency
//! primitive.

pub mod config;
pub mod error;
pub mod store;

pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use store::WorkspaceStore;
