//! State payload model.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;

/// A workspace's state bytes paired with a digest over exactly those bytes.
///
/// The digest is computed in the constructor and never persisted, so it can
/// not drift from the content it describes. Callers use it to detect
/// mid-transfer corruption or staleness; it is not an authentication
/// mechanism.
#[derive(Clone, Serialize, PartialEq, Eq)]
pub struct StatePayload {
    /// The serialized state. Opaque to the store.
    pub data: Vec<u8>,
    /// SHA-256 digest of `data`.
    pub checksum: [u8; 32],
}

impl StatePayload {
    /// Wrap state bytes, computing their digest.
    #[must_use]
    pub fn new(data: Vec<u8>) -> Self {
        let checksum = Sha256::digest(&data).into();
        Self { data, checksum }
    }

    /// Lowercase hex rendering of the checksum.
    #[must_use]
    pub fn checksum_hex(&self) -> String {
        self.checksum.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Number of state bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload holds zero bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// State bytes can be large and are opaque anyway; show size and digest only.
impl fmt::Debug for StatePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatePayload")
            .field("len", &self.data.len())
            .field("checksum", &self.checksum_hex())
            .finish()
    }
}
