//! Removal of several entries with a combined report.

use std::path::PathBuf;

use dirtally_core::{Deleter, FileTree, NodeId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// An error that occurred while removing one entry of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationError {
    /// The path that caused the error.
    pub path: PathBuf,
    /// A human-readable error message.
    pub message: String,
}

impl OperationError {
    /// Create a new operation error.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for OperationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// Outcome of [`remove_many`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionSummary {
    /// Entries removed from disk and from the tree.
    pub deleted: usize,
    /// Entries that could not be removed.
    pub failed: usize,
    /// Entries already gone because an ancestor was removed earlier.
    pub skipped: usize,
    /// Disk usage released by the removed entries.
    pub bytes_freed: u64,
    /// One error per failed entry.
    pub errors: Vec<OperationError>,
}

impl DeletionSummary {
    /// Check if every entry was removed.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// User-facing one-line description.
    pub fn message(&self) -> String {
        let freed = humansize::format_size(self.bytes_freed, humansize::BINARY);
        if self.is_success() {
            format!("Deleted {} items, freed {}", self.deleted, freed)
        } else {
            format!(
                "Deleted {}, failed {} (freed {})",
                self.deleted, self.failed, freed
            )
        }
    }
}

/// Remove each target from its parent directory.
///
/// A failure does not stop the batch; it is recorded and the next target is
/// processed. Roots cannot be removed this way since they have no parent.
pub fn remove_many<D>(tree: &mut FileTree, targets: &[NodeId], deleter: &D) -> DeletionSummary
where
    D: Deleter + ?Sized,
{
    let mut summary = DeletionSummary::default();

    for &target in targets {
        let Some(node) = tree.get(target) else {
            debug!(node = %target, "Skipping entry removed earlier in the batch");
            summary.skipped += 1;
            continue;
        };
        let label = tree
            .path(target)
            .unwrap_or_else(|_| PathBuf::from(node.name.as_str()));

        let Some(parent) = node.parent() else {
            summary.failed += 1;
            summary
                .errors
                .push(OperationError::new(label, "Cannot remove a scan root"));
            continue;
        };

        match tree.remove_file(parent, target, deleter) {
            Ok(removed) => {
                summary.deleted += 1;
                summary.bytes_freed += u64::try_from(removed.stats.usage).unwrap_or(0);
            }
            Err(e) => {
                summary.failed += 1;
                summary.errors.push(OperationError::new(label, e.to_string()));
            }
        }
    }

    info!(
        deleted = summary.deleted,
        failed = summary.failed,
        skipped = summary.skipped,
        bytes_freed = summary.bytes_freed,
        "Batch removal finished"
    );
    summary
}
