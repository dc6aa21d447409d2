//! Structural statistics for a [`PrefixTrie`].
//!
//! Useful for sizing a trie ahead of time and for checking that removals
//! actually give memory back.

use crate::trie::PrefixTrie;

pub trait TreeStatsTrait {
    fn get_tree_stats(&self) -> TreeStats;
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TreeStats {
    /// Live nodes, the root included.
    pub num_nodes: usize,
    /// Nodes carrying a registered prefix.
    pub num_prefixes: usize,
    /// Nodes without children. In a pruned trie every one of them carries a prefix.
    pub num_leaves: usize,
    /// Nodes with both children present.
    pub num_branches: usize,
    /// Depth in bits of the deepest node.
    pub max_depth: usize,
    /// Arena slots released by pruning and not yet re-used.
    pub free_slots: usize,
}

impl TreeStatsTrait for PrefixTrie {
    fn get_tree_stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            free_slots: self.nodes.free_slots(),
            ..Default::default()
        };

        let mut stack = vec![(self.root, 0usize)];
        while let Some((idx, depth)) = stack.pop() {
            let node = &self.nodes[idx];
            stats.num_nodes += 1;
            stats.max_depth = stats.max_depth.max(depth);
            if node.matched {
                stats.num_prefixes += 1;
            }
            if node.is_leaf() {
                stats.num_leaves += 1;
            }
            if node.children.iter().all(Option::is_some) {
                stats.num_branches += 1;
            }
            stack.extend(node.children.iter().flatten().map(|c| (*c, depth + 1)));
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use crate::stats::{TreeStats, TreeStatsTrait};
    use crate::trie::PrefixTrie;

    #[test]
    fn test_empty_trie() {
        let trie = PrefixTrie::new();
        assert_eq!(
            trie.get_tree_stats(),
            TreeStats {
                num_nodes: 1,
                num_leaves: 1,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_two_subnets() {
        let mut trie = PrefixTrie::new();
        trie.add_subnet("192.168.0.0/24").unwrap();
        trie.add_subnet("192.168.1.0/24").unwrap();

        let stats = trie.get_tree_stats();
        // Shared path down to the /23, then one extra node for each /24.
        assert_eq!(stats.num_nodes, 1 + 119 + 2);
        assert_eq!(stats.num_prefixes, 2);
        assert_eq!(stats.num_leaves, 2);
        assert_eq!(stats.num_branches, 1);
        assert_eq!(stats.max_depth, 120);
        assert_eq!(stats.num_nodes, trie.node_count());

        trie.remove_subnet("192.168.1.0/24").unwrap();
        let stats = trie.get_tree_stats();
        assert_eq!(stats.num_nodes, 1 + 120);
        assert_eq!(stats.num_branches, 0);
        assert_eq!(stats.free_slots, 0);
    }

    #[test]
    fn test_free_slots_after_pruning() {
        let mut trie = PrefixTrie::new();
        trie.add_subnet("10.0.0.0/8").unwrap();
        trie.add_subnet("11.0.0.0/8").unwrap();
        trie.remove_subnet("10.0.0.0/8").unwrap();

        let stats = trie.get_tree_stats();
        assert_eq!(stats.num_prefixes, 1);
        assert!(stats.free_slots > 0);
        assert_eq!(stats.num_nodes, trie.node_count());
    }
}
