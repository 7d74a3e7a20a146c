//! Checksums of rendered schema documents

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// SHA256 checksum of rendered artifact text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checksum(String);

impl Checksum {
    /// Compute checksum from raw bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = Sha256::digest(data);
        Self(format!("{:x}", hash))
    }

    /// Compute checksum of rendered text
    pub fn of_text(content: &str) -> Self {
        Self::from_bytes(content.as_bytes())
    }

    /// Get the hex string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 hex digits, for log lines and confirmations
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(12)]
    }

    /// Verify that content matches this checksum
    pub fn verify(&self, content: &str) -> bool {
        *self == Self::of_text(content)
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
