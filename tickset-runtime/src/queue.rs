//! Binary min-heap keyed by due time.
//!
//! Equal keys pop in insertion order. Payloads can be overwritten in place,
//! which is how the task set tombstones cancelled entries without touching
//! the heap layout.

struct Entry<K, V> {
    key: K,
    seq: u64,
    value: V,
}

impl<K: Ord, V> Entry<K, V> {
    fn precedes(&self, other: &Self) -> bool {
        (&self.key, self.seq) < (&other.key, other.seq)
    }
}

/// Min-heap mapping an ordered key to an opaque payload
pub struct PriorityQueue<K, V> {
    heap: Vec<Entry<K, V>>,
    next_seq: u64,
}

impl<K: Ord + Copy, V> Default for PriorityQueue<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Copy, V> PriorityQueue<K, V> {
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Insert a payload under `key`. Duplicate keys and payloads are allowed.
    pub fn insert(&mut self, key: K, value: V) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.heap.push(Entry { key, seq, value });
        self.sift_up(self.heap.len() - 1);
    }

    /// Smallest key currently stored
    pub fn peek_min_key(&self) -> Option<K> {
        self.heap.first().map(|entry| entry.key)
    }

    /// Remove and return the entry with the smallest key
    pub fn remove_min(&mut self) -> Option<(K, V)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let entry = self.heap.pop()?;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((entry.key, entry.value))
    }

    /// Overwrite the payload of the first entry matching `matches`, keeping its
    /// key and heap position. Linear scan. Returns the previous payload.
    pub fn replace_where<F>(&mut self, mut matches: F, value: V) -> Option<V>
    where
        F: FnMut(&V) -> bool,
    {
        let entry = self.heap.iter_mut().find(|entry| matches(&entry.value))?;
        Some(std::mem::replace(&mut entry.value, value))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Iterate over `(key, payload)` pairs in heap order, which is not sorted
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> + '_ {
        self.heap.iter().map(|entry| (entry.key, &entry.value))
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if !self.heap[idx].precedes(&self.heap[parent]) {
                break;
            }
            self.heap.swap(idx, parent);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * idx + 1;
            let right = left + 1;
            let mut smallest = idx;

            if left < len && self.heap[left].precedes(&self.heap[smallest]) {
                smallest = left;
            }
            if right < len && self.heap[right].precedes(&self.heap[smallest]) {
                smallest = right;
            }
            if smallest == idx {
                break;
            }
            self.heap.swap(idx, smallest);
            idx = smallest;
        }
    }
}
