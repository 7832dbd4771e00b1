//! Write path: reconciling files with the loaded objects
//!
//! For every file that has loaded objects:
//! 1. scan the file and parse each export block;
//! 2. a block whose objects are all loaded from this file is *live* and is
//!    replaced by one regenerated block per group it touches; each group is
//!    written once per file, so a later block holding only already-written
//!    groups is removed;
//! 3. a block naming anything not loaded is *stale* and is neutralized;
//! 4. blocks that fail to parse, blocks holding a group that spans several
//!    files, and non-export blocks are copied verbatim;
//! 5. the result is committed through a temp file, keeping a backup.

use crate::Result;
use crate::config::SyncConfig;
use crate::error::Error;
use crate::live::{GroupId, LiveObjectEntry, LiveObjects};
use crate::read::parse_export;
use crate::report::{BlockAction, BlockRecord, FileOutcome, FileReport, SyncReport, UnmatchedEntry};
use cura_blocks::{Rewrite, export_block, scan};
use cura_directive::{ObjectReference, ParsedDocument};
use cura_fs::{Checksum, NormalizedPath, Renamer, StdRenamer};
use indexmap::{IndexMap, IndexSet};
use similar::TextDiff;
use std::collections::{HashMap, HashSet};

/// Rewrites files so their export blocks match the loaded objects.
pub struct Synchronizer {
    config: SyncConfig,
    renamer: Box<dyn Renamer>,
}

impl Synchronizer {
    pub fn new(config: SyncConfig) -> Self {
        Self {
            config,
            renamer: Box::new(StdRenamer),
        }
    }

    /// Use `renamer` for the final step of every commit.
    pub fn with_renamer(mut self, renamer: impl Renamer + 'static) -> Self {
        self.renamer = Box::new(renamer);
        self
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Synchronize every file that `live` has objects from.
    ///
    /// Never fails as a whole: a group spanning several files is skipped and
    /// reported, and a file that cannot be read or written is reported while
    /// the other files proceed.
    pub fn sync<L: LiveObjects + ?Sized>(&self, live: &L) -> SyncReport {
        let mut entries = Vec::new();
        live.visit(&mut |entry| entries.push(entry));

        let mut files: IndexMap<&NormalizedPath, Vec<&LiveObjectEntry>> = IndexMap::new();
        let mut group_files: IndexMap<&GroupId, IndexSet<&NormalizedPath>> = IndexMap::new();
        for entry in &entries {
            files.entry(&entry.file).or_default().push(entry);
            group_files.entry(&entry.group).or_default().insert(&entry.file);
        }

        let mut report = SyncReport::default();
        let mut conflicted = HashSet::new();
        for (group, paths) in group_files.iter().filter(|(_, paths)| paths.len() > 1) {
            let error = Error::MultiFileGroup {
                group: group.to_string(),
                files: paths.iter().map(|path| path.to_string()).collect(),
            };
            tracing::warn!("Skipping group: {error}");
            report.group_failures.push(error);
            conflicted.insert(*group);
        }

        for (path, file_entries) in files {
            let file_report =
                match self.sync_file(path, &file_entries, &conflicted, &mut report.unmatched) {
                    Ok(file_report) => file_report,
                    Err(error) => {
                        tracing::warn!(path = %path, "Failed to synchronize: {error}");
                        FileReport::failed(path.clone(), error)
                    }
                };
            report.files.push(file_report);
        }

        report
    }

    fn sync_file(
        &self,
        path: &NormalizedPath,
        entries: &[&LiveObjectEntry],
        conflicted: &HashSet<&GroupId>,
        unmatched: &mut Vec<UnmatchedEntry>,
    ) -> Result<FileReport> {
        let text = cura_fs::io::read_text(path)?;
        let live = FileObjects::new(path, entries, conflicted);

        let scanned = scan(&text);
        let mut emitted = HashSet::new();
        let mut rewrites = Vec::with_capacity(scanned.blocks().len());
        let mut blocks = Vec::with_capacity(scanned.blocks().len());
        let mut diagnostics = Vec::new();

        for block in scanned.blocks() {
            let (rewrite, action) = if block.is_export() {
                let parse = parse_export(block);
                diagnostics.extend(parse.diagnostics);
                match parse.document {
                    Ok(document) => live.reconcile(&document, &mut emitted)?,
                    Err(_) => (Rewrite::Keep, BlockAction::Malformed),
                }
            } else {
                (Rewrite::Keep, BlockAction::Opaque)
            };

            tracing::debug!(path = %path, offset = block.span.start, ?action, "Reconciled block");
            rewrites.push(rewrite);
            blocks.push(BlockRecord {
                offset: block.span.start,
                action,
            });
        }

        let new_text = scanned.render(|index, _| {
            std::mem::replace(&mut rewrites[index], Rewrite::Keep)
        });

        for (group, members) in &live.groups {
            if emitted.contains(group) {
                continue;
            }
            for entry in members {
                tracing::warn!(path = %path, object = %entry.object, "No export block for object");
                unmatched.push(UnmatchedEntry {
                    file: entry.file.clone(),
                    group: entry.group.clone(),
                    object: entry.object.clone(),
                });
            }
        }

        let checksum_before = Checksum::of(&text);
        let checksum_after = Checksum::of(&new_text);
        let outcome = if checksum_before == checksum_after {
            FileOutcome::Unchanged
        } else if self.config.dry_run {
            FileOutcome::DryRun {
                diff: unified_diff(path, &text, &new_text),
            }
        } else {
            self.commit(path, &new_text)
        };

        Ok(FileReport {
            path: path.clone(),
            outcome,
            blocks,
            diagnostics,
            checksum_before: Some(checksum_before),
            checksum_after: Some(checksum_after),
        })
    }

    fn commit(&self, path: &NormalizedPath, content: &str) -> FileOutcome {
        match cura_fs::io::replace_with_backup(
            path,
            content,
            self.config.backup_extension(),
            self.renamer.as_ref(),
        ) {
            Ok(()) => {
                tracing::info!(path = %path, "Rewrote directive blocks");
                FileOutcome::Rewritten
            }
            Err(error) => {
                tracing::warn!(path = %path, "Commit failed, file left unchanged: {error}");
                FileOutcome::Failed(error.into())
            }
        }
    }
}

/// The loaded objects of one file, indexed for block matching.
struct FileObjects<'e> {
    by_object: HashMap<&'e ObjectReference, &'e LiveObjectEntry>,
    /// Groups that can be written, with their members in traversal order.
    groups: IndexMap<&'e GroupId, Vec<&'e LiveObjectEntry>>,
    conflicted: &'e HashSet<&'e GroupId>,
}

impl<'e> FileObjects<'e> {
    fn new(
        path: &NormalizedPath,
        entries: &[&'e LiveObjectEntry],
        conflicted: &'e HashSet<&'e GroupId>,
    ) -> Self {
        let mut by_object = HashMap::new();
        let mut groups: IndexMap<&GroupId, Vec<&LiveObjectEntry>> = IndexMap::new();

        for &entry in entries {
            if by_object.contains_key(&entry.object) {
                tracing::warn!(path = %path, object = %entry.object, "Object loaded twice, using the first");
                continue;
            }
            by_object.insert(&entry.object, entry);
            if !conflicted.contains(&entry.group) {
                groups.entry(&entry.group).or_default().push(entry);
            }
        }

        Self {
            by_object,
            groups,
            conflicted,
        }
    }

    /// Decide what to do with one parsed export block.
    fn reconcile(
        &self,
        document: &ParsedDocument,
        emitted: &mut HashSet<&'e GroupId>,
    ) -> Result<(Rewrite, BlockAction)> {
        let matched: Option<Vec<&'e LiveObjectEntry>> = document
            .objects()
            .map(|object| self.by_object.get(object).copied())
            .collect();
        let Some(matched) = matched else {
            return Ok((Rewrite::Neutralize, BlockAction::Neutralized));
        };

        if let Some(entry) = matched
            .iter()
            .find(|entry| self.conflicted.contains(&entry.group))
        {
            return Ok((
                Rewrite::Keep,
                BlockAction::Conflicted {
                    group: entry.group.clone(),
                },
            ));
        }

        let mut touched: Vec<&'e GroupId> = Vec::new();
        for &entry in &matched {
            if !touched.contains(&&entry.group) {
                touched.push(&entry.group);
            }
        }
        let fresh: Vec<&'e GroupId> = touched
            .into_iter()
            .filter(|group| emitted.insert(*group))
            .collect();

        if fresh.is_empty() {
            return Ok((Rewrite::Replace(String::new()), BlockAction::Absorbed));
        }

        let regenerated = fresh
            .iter()
            .map(|group| {
                let members = self.groups.get(*group).map(Vec::as_slice).unwrap_or_default();
                export_block(members.iter().map(|entry| (&entry.object, &entry.settings)))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok((
            Rewrite::Replace(regenerated.join("\n")),
            BlockAction::Regenerated {
                groups: fresh.into_iter().cloned().collect(),
            },
        ))
    }
}

fn unified_diff(path: &NormalizedPath, old: &str, new: &str) -> String {
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(3)
        .header(path.as_str(), path.as_str())
        .to_string()
}
