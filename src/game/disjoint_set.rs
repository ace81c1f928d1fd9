use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
struct Node<K> {
    value: K,
    parent: Option<usize>,
    size: usize,
}

/// Weighted union-find with full path compression over an arbitrary key type.
///
/// Nodes live in an arena; `index` maps each key to its slot. Keys are only
/// ever added, never removed.
#[derive(Debug, Clone)]
pub struct DisjointSetForest<K> {
    nodes: Vec<Node<K>>,
    index: HashMap<K, usize>,
}

impl<K: Clone + Eq + Hash> DisjointSetForest<K> {
    pub fn new() -> Self {
        DisjointSetForest {
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Ensure `key` exists. A new key starts as a singleton root.
    pub fn create(&mut self, key: K) {
        self.slot(key);
    }

    /// Merge the partitions containing `a` and `b`, creating either if needed.
    ///
    /// The root of the larger partition becomes the root of the merged one; on
    /// equal sizes the root of `a` wins. Returns false if they were already
    /// in the same partition.
    pub fn union(&mut self, a: K, b: K) -> bool {
        let a = self.slot(a);
        let b = self.slot(b);
        let mut big = self.compress(a);
        let mut small = self.compress(b);
        if big == small {
            return false;
        }
        if self.nodes[big].size < self.nodes[small].size {
            std::mem::swap(&mut big, &mut small);
        }
        self.nodes[small].parent = Some(big);
        self.nodes[big].size += self.nodes[small].size;
        true
    }

    /// Union where either side may be an empty slot.
    ///
    /// With one key missing this only creates the other; with both missing it
    /// does nothing.
    pub fn union_optional(&mut self, a: Option<K>, b: Option<K>) {
        match (a, b) {
            (Some(a), Some(b)) => {
                self.union(a, b);
            }
            (Some(key), None) | (None, Some(key)) => self.create(key),
            (None, None) => {}
        }
    }

    /// Representative of the partition containing `key`, or `None` if the key
    /// was never created. Every node on the walk is re-parented to the root.
    pub fn find(&mut self, key: &K) -> Option<K> {
        let slot = *self.index.get(key)?;
        let root = self.compress(slot);
        Some(self.nodes[root].value.clone())
    }

    /// Same answer as [`find`](Self::find) without touching parent pointers.
    pub fn root_of(&self, key: &K) -> Option<&K> {
        let mut slot = *self.index.get(key)?;
        while let Some(parent) = self.nodes[slot].parent {
            slot = parent;
        }
        Some(&self.nodes[slot].value)
    }

    /// True when both keys exist and share a representative.
    pub fn connected(&self, a: &K, b: &K) -> bool {
        match (self.root_of(a), self.root_of(b)) {
            (Some(ra), Some(rb)) => ra == rb,
            _ => false,
        }
    }

    /// Number of keys in the partition containing `key`.
    pub fn set_size(&self, key: &K) -> Option<usize> {
        let root = self.root_of(key)?;
        let slot = self.index[root];
        Some(self.nodes[slot].size)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn slot(&mut self, key: K) -> usize {
        if let Some(&slot) = self.index.get(&key) {
            return slot;
        }
        let slot = self.nodes.len();
        self.nodes.push(Node {
            value: key.clone(),
            parent: None,
            size: 1,
        });
        self.index.insert(key, slot);
        slot
    }

    fn compress(&mut self, slot: usize) -> usize {
        let mut root = slot;
        while let Some(parent) = self.nodes[root].parent {
            root = parent;
        }

        let mut current = slot;
        while let Some(parent) = self.nodes[current].parent {
            self.nodes[current].parent = Some(root);
            current = parent;
        }
        root
    }

    #[cfg(test)]
    fn parent_of(&self, key: &K) -> Option<usize> {
        self.nodes[self.index[key]].parent
    }

    /// Parent hops from `key` to its root.
    #[cfg(test)]
    pub(crate) fn depth(&self, key: &K) -> Option<usize> {
        let mut slot = *self.index.get(key)?;
        let mut hops = 0;
        while let Some(parent) = self.nodes[slot].parent {
            slot = parent;
            hops += 1;
        }
        Some(hops)
    }
}

impl<K: Clone + Eq + Hash> Default for DisjointSetForest<K> {
    fn default() -> Self {
        Self::new()
    }
}
