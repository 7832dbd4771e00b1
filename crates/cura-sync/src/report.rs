//! What a synchronization run did

use crate::Error;
use crate::live::GroupId;
use crate::read::Diagnostic;
use cura_directive::ObjectReference;
use cura_fs::{Checksum, NormalizedPath};

/// What happened to one directive block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockAction {
    /// Replaced by one regenerated block per listed group.
    Regenerated { groups: Vec<GroupId> },
    /// Removed: every group it held was already regenerated earlier in the
    /// file.
    Absorbed,
    /// Names an object that is no longer loaded; made inert.
    Neutralized,
    /// Export block that does not parse; copied verbatim.
    Malformed,
    /// Holds objects of a group that spans several files; copied verbatim.
    Conflicted { group: GroupId },
    /// Profile or unrecognized block; copied verbatim.
    Opaque,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRecord {
    /// Byte offset of the block in the original file.
    pub offset: usize,
    pub action: BlockAction,
}

#[derive(Debug)]
pub enum FileOutcome {
    /// The new content equals the old; nothing was written.
    Unchanged,
    Rewritten,
    /// Dry run: what would have been written, as a unified diff.
    DryRun { diff: String },
    /// The file could not be read or committed. Its content is unchanged.
    Failed(Error),
}

#[derive(Debug)]
pub struct FileReport {
    pub path: NormalizedPath,
    pub outcome: FileOutcome,
    pub blocks: Vec<BlockRecord>,
    pub diagnostics: Vec<Diagnostic>,
    pub checksum_before: Option<Checksum>,
    pub checksum_after: Option<Checksum>,
}

impl FileReport {
    pub(crate) fn failed(path: NormalizedPath, error: Error) -> Self {
        Self {
            path,
            outcome: FileOutcome::Failed(error),
            blocks: Vec::new(),
            diagnostics: Vec::new(),
            checksum_before: None,
            checksum_after: None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, FileOutcome::Failed(_))
    }

    /// Blocks that received `action`, by offset.
    pub fn blocks_with(&self, action: &BlockAction) -> Vec<usize> {
        self.blocks
            .iter()
            .filter(|record| &record.action == action)
            .map(|record| record.offset)
            .collect()
    }
}

/// A live object that no export block in its file named.
#[derive(Debug, Clone, PartialEq)]
pub struct UnmatchedEntry {
    pub file: NormalizedPath,
    pub group: GroupId,
    pub object: ObjectReference,
}

/// Result of [`crate::Synchronizer::sync`].
#[derive(Debug, Default)]
pub struct SyncReport {
    pub files: Vec<FileReport>,
    /// [`Error::MultiFileGroup`] for every group that was skipped.
    pub group_failures: Vec<Error>,
    pub unmatched: Vec<UnmatchedEntry>,
}

impl SyncReport {
    /// True when no file failed and no group was skipped.
    pub fn is_success(&self) -> bool {
        self.group_failures.is_empty() && !self.files.iter().any(FileReport::is_failed)
    }

    pub fn file(&self, path: &NormalizedPath) -> Option<&FileReport> {
        self.files.iter().find(|report| &report.path == path)
    }

    pub fn failed_files(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|report| report.is_failed())
    }
}
