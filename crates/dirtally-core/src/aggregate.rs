//! Bottom-up recomputation of directory statistics.

use tracing::debug;

use crate::error::Result;
use crate::node::{NodeId, NodeStats};
use crate::tree::FileTree;

impl FileTree {
    /// Recompute size, usage and item count for `id` and every descendant.
    ///
    /// Leaves keep their measurements. Each directory becomes its own
    /// overhead plus the sum over its children, with every child finished
    /// before its parent is summed. Sums saturate at the numeric bounds. Runs
    /// in O(nodes in the subtree) with an explicit stack.
    pub fn update_stats(&mut self, id: NodeId) -> Result<()> {
        if self.node(id)?.is_file() {
            return Ok(());
        }

        let overhead = self.config.dir_overhead;
        let mut stack = vec![(id, false)];
        let mut directories = 0usize;

        while let Some((current, expanded)) = stack.pop() {
            let node = self.node(current)?;
            if !expanded {
                stack.push((current, true));
                stack.extend(
                    node.children
                        .iter()
                        .filter(|&child| self.get(child).is_some_and(|c| c.is_dir()))
                        .map(|child| (child, false)),
                );
                continue;
            }

            let mut totals = NodeStats {
                size: overhead,
                usage: overhead,
                item_count: 1,
            };
            for child in &node.children {
                let child = self.node(child)?;
                totals.size = totals.size.saturating_add(child.size);
                totals.usage = totals.usage.saturating_add(child.usage);
                totals.item_count = totals.item_count.saturating_add(child.item_count);
            }

            let node = self.node_mut(current)?;
            node.size = totals.size;
            node.usage = totals.usage;
            node.item_count = totals.item_count;
            directories += 1;
        }

        let totals = self.stats(id)?;
        debug!(
            node = %id,
            directories,
            size = totals.size,
            usage = totals.usage,
            items = totals.item_count,
            "Aggregated directory statistics"
        );
        Ok(())
    }

    /// Recompute statistics under every root.
    pub fn update_all_stats(&mut self) -> Result<()> {
        let roots = self.roots().to_vec();
        for root in roots {
            self.update_stats(root)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::TreeConfig;
    use crate::node::FileNode;

    use super::*;

    #[test]
    fn test_leaf_passthrough() {
        let mut tree = FileTree::new();
        let file = tree.add_root_file("a.bin", "/tmp", 123, 4096).unwrap();

        tree.update_stats(file).unwrap();

        let stats = tree.stats(file).unwrap();
        assert_eq!(stats.size, 123);
        assert_eq!(stats.usage, 4096);
        assert_eq!(stats.item_count, 1);
    }

    #[test]
    fn test_leaf_with_zero_items_stays_zero() {
        let mut tree = FileTree::new();
        let root = tree.add_root("r", "/").unwrap();
        let raw = tree.insert(FileNode::new_file("raw", 7, 7).with_item_count(0));
        tree.link(root, raw).unwrap();

        tree.update_stats(root).unwrap();

        assert_eq!(tree.stats(raw).unwrap().item_count, 0);
        assert_eq!(tree.stats(root).unwrap().item_count, 1);
    }

    #[test]
    fn test_empty_directory_is_overhead_only() {
        let mut tree = FileTree::with_config(TreeConfig {
            dir_overhead: 512,
            ..TreeConfig::default()
        });
        let root = tree.add_root("empty", "/").unwrap();

        tree.update_stats(root).unwrap();

        assert_eq!(
            tree.stats(root).unwrap(),
            NodeStats {
                size: 512,
                usage: 512,
                item_count: 1
            }
        );
    }

    #[test]
    fn test_huge_sizes_saturate() {
        let mut tree = FileTree::new();
        let root = tree.add_root("r", "/").unwrap();
        tree.add_file(root, "sparse.img", i64::MAX - 10, 0).unwrap();
        tree.add_file(root, "more", 100, 0).unwrap();

        tree.update_stats(root).unwrap();

        let stats = tree.stats(root).unwrap();
        assert_eq!(stats.size, i64::MAX);
        assert_eq!(stats.usage, 4096);
        assert_eq!(stats.item_count, 3);
    }

    #[test]
    fn test_recompute_overwrites_stale_values() {
        let mut tree = FileTree::new();
        let root = tree.add_root("r", "/").unwrap();
        tree.add_file(root, "f", 10, 20).unwrap();

        tree.update_stats(root).unwrap();
        let first = tree.stats(root).unwrap();
        tree.update_stats(root).unwrap();

        assert_eq!(tree.stats(root).unwrap(), first);
        assert_eq!(first.size, 4096 + 10);
        assert_eq!(first.usage, 4096 + 20);
    }
}
