//! Incremental subtree removal.

use std::path::PathBuf;

use compact_str::CompactString;
use tracing::{info, warn};

use crate::delete::Deleter;
use crate::error::{Result, TreeError};
use crate::node::{NodeId, NodeKind, NodeStats};
use crate::tree::FileTree;

/// Description of a subtree removed from the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedEntry {
    /// Id the removed node had. It is no longer valid.
    pub id: NodeId,
    /// Name of the removed node.
    pub name: CompactString,
    /// Absolute path that was deleted.
    pub path: PathBuf,
    /// Kind of the removed node.
    pub kind: NodeKind,
    /// Measurements subtracted from every ancestor.
    pub stats: NodeStats,
}

impl FileTree {
    /// Delete `target` from disk and from `dir`, keeping ancestors consistent.
    ///
    /// `target` must be a direct child of `dir`. The deleter runs before any
    /// in-memory change; if it fails the tree is left exactly as it was and
    /// the underlying error is returned as the source of
    /// [`TreeError::Deletion`]. On success `dir` and each of its ancestors up
    /// to the root lose the target's size, usage and item count, and every
    /// id in the removed subtree becomes invalid.
    pub fn remove_file<D>(
        &mut self,
        dir: NodeId,
        target: NodeId,
        deleter: &D,
    ) -> Result<RemovedEntry>
    where
        D: Deleter + ?Sized,
    {
        let parent = self.node(dir)?;
        if !parent.is_dir() {
            return Err(TreeError::NotADirectory { id: dir });
        }
        let is_child = parent.children.contains(target)
            && self.get(target).is_some_and(|n| n.parent == Some(dir));
        if !is_child {
            return Err(TreeError::NotAChild {
                parent: dir,
                child: target,
            });
        }

        let path = self.path(target)?;
        let node = self.node(target)?;
        let (name, kind, stats) = (node.name.clone(), node.kind, node.stats());

        if let Err(source) = deleter.remove_all(&path) {
            warn!(path = %path.display(), error = %source, "Deletion failed, tree left unchanged");
            return Err(TreeError::deletion(path, source));
        }

        self.node_mut(dir)?.children.remove(target);

        let mut current = Some(dir);
        while let Some(id) = current {
            let node = self.node_mut(id)?;
            node.size = node.size.saturating_sub(stats.size);
            node.usage = node.usage.saturating_sub(stats.usage);
            node.item_count = node.item_count.saturating_sub(stats.item_count);
            current = node.parent;
        }

        let doomed: Vec<NodeId> = std::iter::once(target)
            .chain(self.descendants(target))
            .collect();
        for id in doomed {
            self.free(id);
        }

        info!(
            path = %path.display(),
            size = stats.size,
            usage = stats.usage,
            items = stats.item_count,
            "Removed entry"
        );

        Ok(RemovedEntry {
            id: target,
            name,
            path,
            kind,
            stats,
        })
    }

    /// Remove the child of `dir` named `name`.
    ///
    /// An unknown name is not an error: nothing is deleted and `None` is
    /// returned.
    pub fn remove_child_by_name<D>(
        &mut self,
        dir: NodeId,
        name: &str,
        deleter: &D,
    ) -> Result<Option<RemovedEntry>>
    where
        D: Deleter + ?Sized,
    {
        let Some(index) = self.find_child_by_name(dir, name)? else {
            return Ok(None);
        };
        let Some(target) = self.node(dir)?.children.get(index) else {
            return Ok(None);
        };
        self.remove_file(dir, target, deleter).map(Some)
    }
}
