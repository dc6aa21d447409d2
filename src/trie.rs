//! Binary prefix trie over 128-bit keys.
//!
//! Every node stands for one bit position along the path from the root. A registered prefix of
//! `length` bits flags the node reached after walking `length` bits of its key; lookups walk an
//! address bit by bit and succeed on the first flagged node they pass.

use crate::error::{Error, Result};
use crate::key::{parse_subnet, Key};
use crate::utils::arena::{Arena, NodeIndex};

/// Longest prefix the trie accepts. Lengths of 127 and 128 are rejected.
pub const MAX_PREFIX_LEN: usize = 126;

/// Number of bit steps a lookup walks before giving up.
pub const MATCH_DEPTH: usize = MAX_PREFIX_LEN + 1;

#[derive(Clone, Debug, Default)]
pub(crate) struct TrieNode {
    pub(crate) children: [Option<NodeIndex>; 2],
    pub(crate) matched: bool,
}

impl TrieNode {
    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children[0].is_none() && self.children[1].is_none()
    }

    /// A node that neither terminates a prefix nor leads to one has no reason to exist.
    #[inline]
    fn is_dead(&self) -> bool {
        !self.matched && self.is_leaf()
    }
}

/// A set of subnets, queried by address.
///
/// Overlapping subnets are independent entries: registering `192.168.1.0/24` and
/// `192.168.1.128/25` and later removing the /24 leaves the /25 in place.
///
/// ```rust
/// use std::net::Ipv4Addr;
/// use subnet_trie::PrefixTrie;
///
/// let mut trie = PrefixTrie::new();
/// trie.add_subnet("192.168.1.123/24").unwrap();
///
/// assert!(trie.matches_addr(Ipv4Addr::new(192, 168, 1, 55)));
/// assert!(!trie.matches_addr(Ipv4Addr::new(192, 168, 2, 1)));
///
/// trie.remove_subnet("192.168.1.0/24").unwrap();
/// assert!(!trie.matches_addr(Ipv4Addr::new(192, 168, 1, 55)));
/// ```
#[derive(Clone, Debug)]
pub struct PrefixTrie {
    pub(crate) nodes: Arena<TrieNode>,
    pub(crate) root: NodeIndex,
    num_prefixes: usize,
}

impl Default for PrefixTrie {
    fn default() -> Self {
        Self::new()
    }
}

fn check_length(length: usize) -> Result<()> {
    if length > MAX_PREFIX_LEN {
        return Err(Error::InvalidLength(length));
    }
    Ok(())
}

impl PrefixTrie {
    pub fn new() -> Self {
        Self::with_capacity(1)
    }

    /// Creates an empty trie with room for `nodes` nodes (the root included) before the arena
    /// has to grow.
    pub fn with_capacity(nodes: usize) -> Self {
        let mut arena = Arena::with_capacity(nodes.max(1));
        let root = arena.add(TrieNode::default());
        Self {
            nodes: arena,
            root,
            num_prefixes: 0,
        }
    }

    /// Registers the first `length` bits of `prefix`.
    ///
    /// Adding a prefix that is already present is a no-op.
    pub fn add(&mut self, prefix: &Key, length: usize) -> Result<()> {
        if let Err(e) = check_length(length) {
            tracing::debug!(%prefix, length, "rejected prefix add");
            return Err(e);
        }

        let mut current = self.root;
        for pos in 0..length {
            let bit = prefix.bit(pos);
            current = match self.nodes[current].children[bit] {
                Some(next) => next,
                None => {
                    let next = self.nodes.add(TrieNode::default());
                    self.nodes[current].children[bit] = Some(next);
                    next
                }
            };
        }

        let node = &mut self.nodes[current];
        if !node.matched {
            node.matched = true;
            self.num_prefixes += 1;
        }
        tracing::trace!(%prefix, length, nodes = self.nodes.size(), "added prefix");
        Ok(())
    }

    /// Returns true if any registered prefix covers `addr`.
    ///
    /// The walk stops at the first flagged node, so a short prefix answers for every longer one
    /// registered beneath it. The root itself is never consulted.
    pub fn matches(&self, addr: &Key) -> bool {
        let mut current = self.root;
        for pos in 0..MATCH_DEPTH {
            let Some(next) = self.nodes[current].children[addr.bit(pos)] else {
                return false;
            };
            if self.nodes[next].matched {
                return true;
            }
            current = next;
        }
        false
    }

    pub fn matches_addr<A: Into<Key>>(&self, addr: A) -> bool {
        self.matches(&addr.into())
    }

    /// Returns true if exactly this prefix was registered. Unlike [`PrefixTrie::matches`], a
    /// covering shorter prefix does not count.
    pub fn contains(&self, prefix: &Key, length: usize) -> Result<bool> {
        check_length(length)?;
        Ok(self
            .seek(prefix, length)
            .is_some_and(|node| self.nodes[node].matched))
    }

    fn seek(&self, prefix: &Key, length: usize) -> Option<NodeIndex> {
        let mut current = self.root;
        for pos in 0..length {
            current = self.nodes[current].children[prefix.bit(pos)]?;
        }
        Some(current)
    }

    /// Unregisters a prefix previously passed to [`PrefixTrie::add`] with the same key and length.
    ///
    /// Fails with [`Error::NotContained`] without touching the trie when the prefix is not
    /// registered. On success, every node along the path left with no flag and no children is
    /// released, from the deepest upwards. The root always stays.
    pub fn remove(&mut self, prefix: &Key, length: usize) -> Result<()> {
        if let Err(e) = check_length(length) {
            tracing::debug!(%prefix, length, "rejected prefix remove");
            return Err(e);
        }

        // (parent, slot) pairs for every step taken, so pruning can walk back up.
        let mut path: Vec<(NodeIndex, usize)> = Vec::with_capacity(length);
        let mut current = self.root;
        for pos in 0..length {
            let bit = prefix.bit(pos);
            let Some(next) = self.nodes[current].children[bit] else {
                tracing::debug!(%prefix, length, depth = pos, "remove of absent prefix");
                return Err(Error::NotContained);
            };
            path.push((current, bit));
            current = next;
        }

        let target = &mut self.nodes[current];
        if !target.matched {
            tracing::debug!(%prefix, length, "remove of unflagged prefix");
            return Err(Error::NotContained);
        }
        target.matched = false;
        self.num_prefixes -= 1;

        let mut pruned = 0usize;
        while let Some((parent, bit)) = path.pop() {
            if !self.nodes[current].is_dead() {
                break;
            }
            self.nodes[parent].children[bit] = None;
            self.nodes.free(current);
            pruned += 1;
            current = parent;
        }
        tracing::trace!(%prefix, length, pruned, "removed prefix");
        Ok(())
    }

    pub fn add_subnet(&mut self, subnet: &str) -> Result<()> {
        let (key, length) = parse_subnet(subnet)?;
        self.add(&key, length)
    }

    pub fn remove_subnet(&mut self, subnet: &str) -> Result<()> {
        let (key, length) = parse_subnet(subnet)?;
        self.remove(&key, length)
    }

    pub fn contains_subnet(&self, subnet: &str) -> Result<bool> {
        let (key, length) = parse_subnet(subnet)?;
        self.contains(&key, length)
    }

    /// Number of registered prefixes.
    pub fn len(&self) -> usize {
        self.num_prefixes
    }

    pub fn is_empty(&self) -> bool {
        self.num_prefixes == 0
    }

    /// Number of live nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.size()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = self.nodes.add(TrieNode::default());
        self.num_prefixes = 0;
    }
}
