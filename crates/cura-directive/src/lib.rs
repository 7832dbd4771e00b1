//! Directive language embedded in OpenSCAD comment blocks
//!
//! A directive names the meshes an OpenSCAD file produces and the slicer
//! settings that apply to each of them:
//!
//! ```text
//! 'gear();' AS gear SETTINGS infill_sparse_density = 40, wall_line_count = 3
//! FILE "bracket.stl" SETTINGS support_enable = True
//! ```
//!
//! [`parse`] turns such text into a [`ParsedDocument`] (object to settings,
//! in source order); [`serialize_object`] renders one object back into text
//! the parser accepts.

pub mod document;
pub mod error;
pub mod lexer;
pub mod object;
pub mod parser;
pub mod serializer;
pub mod settings;
pub mod token;

pub use document::ParsedDocument;
pub use error::{Error, LexError, Result};
pub use lexer::Lexer;
pub use object::{ObjectKind, ObjectReference};
pub use parser::{Parser, parse};
pub use serializer::{serialize_object, serialize_objects};
pub use settings::{SettingValue, SettingsMap};
pub use token::{Token, TokenKind};
