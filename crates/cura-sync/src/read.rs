//! Read path: a file's export blocks as parsed documents

use crate::Result;
use cura_blocks::{Block, scan};
use cura_directive::{LexError, ParsedDocument, Parser};
use cura_fs::NormalizedPath;
use std::fmt;

/// Something worth telling the user about a file that did not stop it from
/// being read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A character inside an export block that no token starts with. It was
    /// skipped.
    IllegalCharacter { character: char, offset: usize },
    /// An export block that does not parse. It is kept verbatim.
    MalformedBlock {
        offset: usize,
        error: cura_directive::Error,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalCharacter { character, offset } => {
                write!(f, "Illegal character {character:?} at byte {offset}")
            }
            Self::MalformedBlock { offset, error } => {
                write!(f, "Export block at byte {offset} ignored: {error}")
            }
        }
    }
}

/// One successfully parsed export block: one group of objects.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSection {
    pub document: ParsedDocument,
    /// The block exactly as written.
    pub raw: String,
    /// Everything after the block up to the next parsed export block,
    /// including any blocks that were not parsed.
    pub trailing: String,
}

/// A file as the host sees it on load.
///
/// `prefix` followed by each section's `raw` and `trailing` text is the
/// original file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReadDocument {
    pub prefix: String,
    pub sections: Vec<ExportSection>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ReadDocument {
    /// All objects of all sections in one document.
    ///
    /// Fails with a duplicate key when two sections name the same object.
    pub fn merged(&self) -> Result<ParsedDocument> {
        let mut merged = ParsedDocument::new();
        for section in &self.sections {
            merged.merge(section.document.clone())?;
        }
        Ok(merged)
    }

    /// Rebuild the text this document was read from.
    pub fn to_text(&self) -> String {
        let mut out = self.prefix.clone();
        for section in &self.sections {
            out.push_str(&section.raw);
            out.push_str(&section.trailing);
        }
        out
    }
}

/// Outcome of parsing one export block's body.
pub(crate) struct BlockParse {
    pub document: std::result::Result<ParsedDocument, cura_directive::Error>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse an export block, turning lex and parse errors into diagnostics
/// with offsets into the whole file.
pub(crate) fn parse_export(block: &Block<'_>) -> BlockParse {
    let body = block.body().unwrap_or_default();
    let base = block.body_offset();

    let mut parser = Parser::new(body);
    let document = parser.parse_directive_list();

    let mut diagnostics: Vec<Diagnostic> = parser
        .into_lex_errors()
        .into_iter()
        .map(|LexError { character, offset }| Diagnostic::IllegalCharacter {
            character,
            offset: base + offset,
        })
        .collect();
    for diagnostic in &diagnostics {
        tracing::warn!("{diagnostic}");
    }

    if let Err(error) = &document {
        let diagnostic = Diagnostic::MalformedBlock {
            offset: block.span.start,
            error: error.clone(),
        };
        tracing::warn!("{diagnostic}");
        diagnostics.push(diagnostic);
    }

    BlockParse {
        document,
        diagnostics,
    }
}

/// Read directive text from a file's content.
///
/// # Example
/// ```
/// use cura_sync::read_document;
///
/// let doc = read_document("cube(1);\n/*cura-export 'cube(1);' AS c SETTINGS x = 1*/\n");
/// assert_eq!(doc.prefix, "cube(1);\n");
/// assert_eq!(doc.sections.len(), 1);
/// assert_eq!(doc.sections[0].trailing, "\n");
/// ```
pub fn read_document(text: &str) -> ReadDocument {
    let scanned = scan(text);
    let mut read = ReadDocument {
        prefix: scanned.prefix().to_string(),
        ..ReadDocument::default()
    };

    for block in scanned.blocks() {
        let parsed = if block.is_export() {
            let parse = parse_export(block);
            read.diagnostics.extend(parse.diagnostics);
            parse.document.ok()
        } else {
            None
        };

        match parsed {
            Some(document) => read.sections.push(ExportSection {
                document,
                raw: block.raw.to_string(),
                trailing: block.trailing.to_string(),
            }),
            None => {
                let literal = match read.sections.last_mut() {
                    Some(section) => &mut section.trailing,
                    None => &mut read.prefix,
                };
                literal.push_str(block.raw);
                literal.push_str(block.trailing);
            }
        }
    }

    read
}

/// Read directive text from a file on disk.
pub fn read_file(path: &NormalizedPath) -> Result<ReadDocument> {
    let text = cura_fs::io::read_text(path)?;
    let read = read_document(&text);
    tracing::debug!(
        path = %path,
        sections = read.sections.len(),
        diagnostics = read.diagnostics.len(),
        "Read directive blocks"
    );
    Ok(read)
}
