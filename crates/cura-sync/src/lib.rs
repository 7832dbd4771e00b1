//! Reading and rewriting slicer settings embedded in OpenSCAD files.
//!
//! The read path ([`read_document`], [`read_file`]) turns a file into the
//! settings of every object its `/*cura-export ... */` blocks name.
//!
//! The write path ([`Synchronizer`]) takes the objects the host currently
//! has loaded ([`LiveObjects`]) and rewrites each file so its export blocks
//! describe them:
//! - blocks whose objects are all still loaded are regenerated from the
//!   live settings, one block per group;
//! - blocks naming anything no longer loaded are neutralized (`/* cura-`),
//!   never deleted;
//! - every other byte of the file is copied unchanged.

pub mod config;
pub mod error;
pub mod live;
pub mod logging;
pub mod read;
pub mod report;
pub mod syncer;

pub use config::SyncConfig;
pub use error::{Error, Result};
pub use live::{GroupId, LiveObjectEntry, LiveObjects, NON_PRINTING_MESH_KEYS};
pub use read::{Diagnostic, ExportSection, ReadDocument, read_document, read_file};
pub use report::{BlockAction, BlockRecord, FileOutcome, FileReport, SyncReport, UnmatchedEntry};
pub use syncer::Synchronizer;
