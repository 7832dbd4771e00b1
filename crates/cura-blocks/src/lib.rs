//! Directive block scanning and writing for OpenSCAD files.
//!
//! Directive blocks are C-style comments whose opener is immediately followed
//! by `cura-` and a tag:
//!
//! ```text
//! /*cura-export
//!   'gear();' AS gear SETTINGS infill_sparse_density = 40
//! */
//! ```
//!
//! [`scan`] splits a file into a literal prefix followed by blocks, each
//! carrying the literal text after it. Nothing is normalized: concatenating
//! the fragments gives back the input byte for byte, and
//! [`ScannedDocument::render`] only changes the blocks it is told to change.
//!
//! Only `export` blocks carry directives. `profile` blocks and any other tag
//! are kept opaque.

pub mod error;
pub mod scanner;
pub mod writer;

pub use error::{Error, Result};
pub use scanner::{Block, BlockTag, CLOSER, Fragment, OPENER, ScannedDocument, scan};
pub use writer::{Rewrite, export_block, neutralize};
