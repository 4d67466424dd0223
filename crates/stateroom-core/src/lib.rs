//! stateroom-core: Domain models for workspace state storage.
//!
//! This crate provides:
//! - `StatePayload`: Opaque state bytes paired with a digest computed at read time
//! - `LockInfo`: Advisory lock metadata persisted as the lock file's content
//! - Workspace naming rules and the reserved storage-layout suffixes

pub mod error;
pub mod lock;
pub mod payload;
pub mod workspace;

pub use error::{CoreError, Result};
pub use lock::LockInfo;
pub use payload::StatePayload;
pub use workspace::{validate_name, LOCK_SUFFIX, STATE_SUFFIX};
