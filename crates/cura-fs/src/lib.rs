//! Filesystem layer for comment-embedded OpenSCAD configuration
//!
//! Provides normalized file identities, atomic replacement with `.old`
//! backups, content checksums and a format-agnostic config store.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use checksum::Checksum;
pub use config::ConfigStore;
pub use error::{Error, Result};
pub use io::{Renamer, StdRenamer};
pub use path::NormalizedPath;
