//! SHA-256 content checksums
//!
//! One canonical rendering (`sha256:<hex>`) so reports can state whether a
//! rewrite actually changed a file.

use sha2::{Digest, Sha256};
use std::fmt;

/// Prefix for all checksums produced by this module
const PREFIX: &str = "sha256:";

/// Checksum of a piece of text content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Checksum(String);

impl Checksum {
    /// Compute the checksum of string content.
    pub fn of(content: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        Self(format!("{}{:x}", PREFIX, hasher.finalize()))
    }

    /// The canonical `sha256:<hex>` form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
