//! Producing replacement text for directive blocks.

use crate::error::Result;
use crate::scanner::{Block, OPENER, ScannedDocument};
use cura_directive::{ObjectReference, SettingsMap, serialize_objects};

/// What to do with one block when rendering a [`ScannedDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    /// Copy the block unchanged.
    Keep,
    /// Write this text in place of the block. An empty string removes it.
    Replace(String),
    /// Make the block inert; see [`neutralize`].
    Neutralize,
}

/// Render a complete export block for the given objects.
///
/// ```
/// use cura_blocks::writer::export_block;
/// use cura_directive::{ObjectReference, SettingsMap};
///
/// let object = ObjectReference::inline("cube(10);");
/// let block = export_block([(&object, &SettingsMap::new())]).unwrap();
/// assert_eq!(block, "/*cura-export\n  'cube(10);'\n*/");
/// ```
pub fn export_block<'o>(
    objects: impl IntoIterator<Item = (&'o ObjectReference, &'o SettingsMap)>,
) -> Result<String> {
    let body = serialize_objects(objects)?;
    Ok(format!("{OPENER}export\n{body}\n*/"))
}

/// Make a block unrecognizable to the scanner by inserting a space after
/// `/*`. All other bytes are kept.
///
/// ```
/// use cura_blocks::writer::neutralize;
///
/// assert_eq!(neutralize("/*cura-export 'a'*/"), "/* cura-export 'a'*/");
/// ```
pub fn neutralize(raw: &str) -> String {
    match raw.strip_prefix("/*") {
        Some(rest) => format!("/* {rest}"),
        None => raw.to_string(),
    }
}

impl ScannedDocument<'_> {
    /// Rebuild the text, asking `rewrite` what to do with each block.
    ///
    /// The prefix and every trailing literal are copied unchanged.
    pub fn render<F>(&self, mut rewrite: F) -> String
    where
        F: FnMut(usize, &Block<'_>) -> Rewrite,
    {
        let mut out = String::with_capacity(self.source().len());
        out.push_str(self.prefix());

        for (index, block) in self.blocks().iter().enumerate() {
            match rewrite(index, block) {
                Rewrite::Keep => out.push_str(block.raw),
                Rewrite::Replace(text) => out.push_str(&text),
                Rewrite::Neutralize => out.push_str(&neutralize(block.raw)),
            }
            out.push_str(block.trailing);
        }

        out
    }
}
