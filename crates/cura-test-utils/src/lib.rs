//! Shared test utilities for the cura-scad workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`project`]: [`project::TestProject`], a temporary directory of `.scad`
//!   files with assertion helpers
//! - [`rename`]: [`cura_fs::Renamer`] implementations that fail or record
//!   the final commit step

pub mod project;
pub mod rename;
