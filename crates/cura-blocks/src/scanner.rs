//! Block scanning for directive comments.
//!
//! Splits file text into directive blocks and the literal text around them:
//! ```text
//! prefix /*cura-TAG content*/ trailing /*cura-TAG content*/ trailing
//! ```

use std::ops::Range;

/// Opening delimiter of a directive block.
pub const OPENER: &str = "/*cura-";

/// Closing delimiter of a directive block.
pub const CLOSER: &str = "*/";

const EXPORT_TAG: &str = "export";
const PROFILE_TAG: &str = "profile";

/// What a directive block holds, decided by the text right after the opener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTag {
    /// Object and settings directives.
    Export,
    /// Reserved; kept opaque.
    Profile,
    /// Any other tag; kept opaque.
    Unrecognized,
}

impl BlockTag {
    fn classify(content: &str) -> Self {
        if content.starts_with(EXPORT_TAG) {
            Self::Export
        } else if content.starts_with(PROFILE_TAG) {
            Self::Profile
        } else {
            Self::Unrecognized
        }
    }
}

/// One directive block and the literal text that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    pub tag: BlockTag,
    /// Byte range of the block in the scanned text, delimiters included.
    pub span: Range<usize>,
    /// The block exactly as written, delimiters included.
    pub raw: &'a str,
    /// Text between the opener and the closer.
    pub content: &'a str,
    /// Literal text up to the next block or the end of the file.
    pub trailing: &'a str,
}

impl<'a> Block<'a> {
    /// The directive text of an export block, without its tag.
    ///
    /// Returns `None` for profile and unrecognized blocks.
    pub fn body(&self) -> Option<&'a str> {
        match self.tag {
            BlockTag::Export => Some(&self.content[EXPORT_TAG.len()..]),
            BlockTag::Profile | BlockTag::Unrecognized => None,
        }
    }

    /// Byte offset of [`Block::body`] in the scanned text.
    pub fn body_offset(&self) -> usize {
        self.span.start + OPENER.len() + EXPORT_TAG.len()
    }

    pub fn is_export(&self) -> bool {
        self.tag == BlockTag::Export
    }
}

/// A piece of scanned text, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment<'a> {
    Literal(&'a str),
    Block(&'a Block<'a>),
}

impl<'a> Fragment<'a> {
    /// The exact text of this fragment.
    pub fn text(&self) -> &'a str {
        match self {
            Fragment::Literal(text) => text,
            Fragment::Block(block) => block.raw,
        }
    }
}

/// A file split into a literal prefix and directive blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedDocument<'a> {
    source: &'a str,
    prefix: &'a str,
    blocks: Vec<Block<'a>>,
}

impl<'a> ScannedDocument<'a> {
    /// The text that was scanned.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Text before the first block; the whole text when there are no blocks.
    pub fn prefix(&self) -> &'a str {
        self.prefix
    }

    pub fn blocks(&self) -> &[Block<'a>] {
        &self.blocks
    }

    pub fn export_blocks(&self) -> impl Iterator<Item = &Block<'a>> {
        self.blocks.iter().filter(|block| block.is_export())
    }

    /// All fragments in file order: the prefix (always, possibly empty),
    /// then each block followed by its trailing literal.
    pub fn fragments(&self) -> impl Iterator<Item = Fragment<'_>> {
        std::iter::once(Fragment::Literal(self.prefix)).chain(
            self.blocks
                .iter()
                .flat_map(|block| [Fragment::Block(block), Fragment::Literal(block.trailing)]),
        )
    }
}

/// Scan `source` for directive blocks.
///
/// A block runs from an opener to the first closer after it. An opener
/// without a closer does not start a block; it and everything after it stay
/// literal.
///
/// # Example
/// ```
/// use cura_blocks::scanner::{scan, BlockTag};
///
/// let doc = scan("cube(1);\n/*cura-export 'cube(1);'*/\n");
/// assert_eq!(doc.prefix(), "cube(1);\n");
/// assert_eq!(doc.blocks()[0].tag, BlockTag::Export);
/// assert_eq!(doc.blocks()[0].body(), Some(" 'cube(1);'"));
/// assert_eq!(doc.blocks()[0].trailing, "\n");
/// ```
pub fn scan(source: &str) -> ScannedDocument<'_> {
    let spans = block_spans(source);

    let prefix_end = spans.first().map_or(source.len(), |span| span.start);
    let blocks = spans
        .iter()
        .enumerate()
        .map(|(i, span)| {
            let trailing_end = spans.get(i + 1).map_or(source.len(), |next| next.start);
            let content = &source[span.start + OPENER.len()..span.end - CLOSER.len()];
            let tag = BlockTag::classify(content);
            tracing::debug!(?tag, offset = span.start, "Found directive block");

            Block {
                tag,
                span: span.clone(),
                raw: &source[span.clone()],
                content,
                trailing: &source[span.end..trailing_end],
            }
        })
        .collect();

    ScannedDocument {
        source,
        prefix: &source[..prefix_end],
        blocks,
    }
}

fn block_spans(source: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut search_from = 0;

    while let Some(found) = source[search_from..].find(OPENER) {
        let start = search_from + found;
        let content_start = start + OPENER.len();
        let Some(close) = source[content_start..].find(CLOSER) else {
            break;
        };
        let end = content_start + close + CLOSER.len();
        spans.push(start..end);
        search_from = end;
    }

    spans
}
