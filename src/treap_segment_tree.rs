use crate::error::{Error, Result};
use crate::treap::{Count, Treap};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

struct Node<K> {
    l: usize,
    r: usize,
    treap: Treap<K>,
    children: Option<(Box<Node<K>>, Box<Node<K>>)>,
}

impl<K: Ord + Clone> Node<K> {
    fn with_shape(l: usize, r: usize) -> Self {
        let children = if l < r {
            let h = (l + r) / 2;
            Some((
                Box::new(Self::with_shape(l, h)),
                Box::new(Self::with_shape(h + 1, r)),
            ))
        } else {
            None
        };
        Self {
            l,
            r,
            treap: Treap::new(),
            children,
        }
    }

    /// Returns the key that was at `i` before, as seen by the leaf.
    fn update<R: Rng>(&mut self, i: usize, key: K, rng: &mut R) -> Option<K> {
        let previous = match &mut self.children {
            Some((left, right)) => {
                if i <= left.r {
                    left.update(i, key.clone(), rng)
                } else {
                    right.update(i, key.clone(), rng)
                }
            }
            None => self.treap.find_first().cloned(),
        };
        if let Some(previous) = &previous {
            self.treap.delete(previous);
        }
        self.treap.insert(key, rng);
        previous
    }

    fn query(&mut self, l: usize, r: usize, threshold: &K) -> Count {
        if r < self.l || self.r < l {
            return 0;
        }
        if l <= self.l && self.r <= r {
            return self.treap.erase_not_greater(threshold);
        }
        match &mut self.children {
            Some((left, right)) => left.query(l, r, threshold) + right.query(l, r, threshold),
            None => 0,
        }
    }
}

/// Interval tree whose every node keeps a [`Treap`] of the keys currently assigned to the
/// positions below it.
///
/// Queries are destructive: a query clears the matching keys from the treaps of the nodes
/// its range decomposes into, so a key is counted at most once per node. Keys are not
/// removed from the ancestors or descendants of those nodes.
pub struct TreapSegmentTree<K, R = SmallRng> {
    len: usize,
    root: Node<K>,
    rng: R,
}

impl<K: Ord + Clone> TreapSegmentTree<K, SmallRng> {
    /// Priorities come from an entropy-seeded generator.
    pub fn new(len: usize) -> Result<Self> {
        Self::with_rng(len, SmallRng::from_entropy())
    }

    pub fn with_seed(len: usize, seed: u64) -> Result<Self> {
        Self::with_rng(len, SmallRng::seed_from_u64(seed))
    }
}

impl<K: Ord + Clone, R: Rng> TreapSegmentTree<K, R> {
    /// Builds every node with an empty treap.
    ///
    /// O(n)
    pub fn with_rng(len: usize, rng: R) -> Result<Self> {
        if len == 0 {
            return Err(Error::EmptyUniverse);
        }
        log::trace!("treap segment tree over {} positions", len);
        Ok(Self {
            len,
            root: Node::with_shape(0, len - 1),
            rng,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Assigns `key` to position `i`, replacing whatever the leaf still held. Returns the
    /// replaced key.
    ///
    /// A key already cleared at the leaf is not removed from the ancestors, so a wider
    /// query can still count it there.
    ///
    /// Expected O(log² n)
    pub fn update(&mut self, i: usize, key: K) -> Result<Option<K>> {
        if self.len <= i {
            return Err(Error::IndexOutOfRange {
                index: i,
                len: self.len,
            });
        }
        Ok(self.root.update(i, key, &mut self.rng))
    }

    /// Clears the keys `<= threshold` from the nodes covering `[l, r]` and returns how many
    /// live units were cleared.
    ///
    /// Expected O(log² n)
    pub fn query(&mut self, l: usize, r: usize, threshold: &K) -> Result<Count> {
        if r < l || self.len <= r {
            return Err(Error::InvalidRange { l, r, len: self.len });
        }
        Ok(self.root.query(l, r, threshold))
    }
}
