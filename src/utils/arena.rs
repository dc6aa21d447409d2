use std::ops::{Index, IndexMut};

// A u32 rather than a usize: a trie holding a few hundred thousand subnets is nowhere near 2^32
// nodes, and it halves the size of a node's two child slots.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NodeIndex(pub u32);

/// A place to store (owned) values that can be accessed by an index, with holes being re-used.
/// Maintains a separate free list, so that nodes released by pruning are handed back out to the
/// next insert instead of growing the backing vector.
#[derive(Clone, Debug)]
pub struct Arena<V> {
    values: Vec<Option<V>>,
    free_list: Vec<u32>,
    size: usize,
}

impl<V> Arena<V> {
    pub fn new() -> Self {
        Self {
            values: vec![],
            free_list: Vec::with_capacity(16),
            size: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            free_list: Default::default(),
            size: 0,
        }
    }

    pub fn add(&mut self, value: V) -> NodeIndex {
        let id = match self.free_list.pop() {
            None => {
                let id = NodeIndex(self.values.len() as u32);
                self.values.push(Some(value));
                id
            }
            Some(idx) => {
                self.values[idx as usize] = Some(value);
                NodeIndex(idx)
            }
        };
        self.size += 1;
        id
    }

    /// Releases the slot at `id`, returning what was stored there. Freeing an already free slot
    /// returns None and leaves the free list untouched.
    pub fn free(&mut self, id: NodeIndex) -> Option<V> {
        let idx = id.0 as usize;
        let value = self.values.get_mut(idx)?.take()?;
        if idx == self.values.len() - 1 {
            self.values.pop();
        } else {
            self.free_list.push(id.0);
        }
        self.size -= 1;
        Some(value)
    }

    pub fn get(&self, id: NodeIndex) -> Option<&V> {
        self.values.get(id.0 as usize)?.as_ref()
    }

    pub fn get_mut(&mut self, id: NodeIndex) -> Option<&mut V> {
        self.values.get_mut(id.0 as usize)?.as_mut()
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.free_list.clear();
        self.size = 0;
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of holes waiting to be re-used.
    pub fn free_slots(&self) -> usize {
        self.free_list.len()
    }
}

impl<V> Index<NodeIndex> for Arena<V> {
    type Output = V;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        match self.get(index) {
            Some(v) => v,
            None => panic!("dangling arena index {}", index.0),
        }
    }
}

impl<V> IndexMut<NodeIndex> for Arena<V> {
    fn index_mut(&mut self, index: NodeIndex) -> &mut Self::Output {
        match self.get_mut(index) {
            Some(v) => v,
            None => panic!("dangling arena index {}", index.0),
        }
    }
}

impl<V> Default for Arena<V> {
    fn default() -> Self {
        Self::new()
    }
}
