//! Multiset treap with order statistics and O(1) lazy clearing of whole subtrees.
//!
//! Every distinct key lives in one node carrying its multiplicity. Multiplicities are
//! decremented in place, so a node may stay in the tree with a count of zero; only the
//! totals seen by order statistics reflect what is live. Clearing marks a subtree and
//! defers the actual work to the next walk that passes through it.

use rand::Rng;
use std::cmp::Ordering;

/// Signed multiplicity. Deleting a key that was already cleared may take it below zero.
pub type Count = i64;

type Link<K> = Option<Box<Node<K>>>;

#[derive(Clone, Debug)]
struct Node<K> {
    key: K,
    count: Count,
    total: Count,
    priority: u64,
    erase: bool,
    left: Link<K>,
    right: Link<K>,
}

impl<K> Node<K> {
    fn new(key: K, count: Count, priority: u64) -> Self {
        Self {
            key,
            count,
            total: count,
            priority,
            erase: false,
            left: None,
            right: None,
        }
    }

    /// A subtree waiting to be cleared holds nothing.
    #[inline]
    fn total(link: &Link<K>) -> Count {
        match link {
            Some(node) if !node.erase => node.total,
            _ => 0,
        }
    }

    #[inline]
    fn mark_erased(link: &mut Link<K>) {
        if let Some(node) = link {
            node.erase = true;
        }
    }

    /// Materializes a pending clear on this node and hands it down to the children.
    fn push_down(&mut self) {
        if self.erase {
            Self::mark_erased(&mut self.left);
            Self::mark_erased(&mut self.right);
            self.erase = false;
            self.count = 0;
            self.total = 0;
        }
    }

    #[inline]
    fn recalc(&mut self) {
        self.total = self.count + Self::total(&self.left) + Self::total(&self.right);
    }
}

#[derive(Clone, Debug)]
pub struct Treap<K> {
    root: Link<K>,
}

impl<K> Default for Treap<K> {
    fn default() -> Self {
        Self { root: None }
    }
}

impl<K: Ord> Treap<K> {
    #[inline]
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Live units in the treap (sum of multiplicities).
    ///
    /// O(1)
    #[inline]
    pub fn len(&self) -> Count {
        Node::total(&self.root)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds one unit of `key`. A new node draws its priority from `rng`.
    ///
    /// Expected O(log n)
    pub fn insert<R: Rng>(&mut self, key: K, rng: &mut R) {
        if !Self::add_to_key(&mut self.root, &key, 1) {
            let node = Box::new(Node::new(key, 1, rng.gen()));
            self.root = Self::insert_node(self.root.take(), node);
        }
    }

    /// Removes one unit of `key`, leaving its node in place. Returns whether the key has a
    /// node at all.
    ///
    /// Expected O(log n)
    pub fn delete(&mut self, key: &K) -> bool {
        Self::add_to_key(&mut self.root, key, -1)
    }

    /// Clears every key `<= key` and returns how many live units that removed.
    ///
    /// Expected O(log n); the cleared part is only marked.
    pub fn erase_not_greater(&mut self, key: &K) -> Count {
        let (mut left, right) = Self::split(self.root.take(), key, true);
        let erased = Node::total(&left);
        Node::mark_erased(&mut left);
        self.root = Self::merge(left, right);
        erased
    }

    /// O(1)
    pub fn clear(&mut self) {
        Node::mark_erased(&mut self.root);
    }

    /// The key holding the `k`-th live unit in key order, counted from 1.
    ///
    /// Expected O(log n)
    pub fn find_by_order(&mut self, k: Count) -> Option<&K> {
        if k < 1 {
            return None;
        }

        let mut k = k;
        let mut link = self.root.as_deref_mut();
        while let Some(node) = link {
            node.push_down();
            let left = Node::total(&node.left);
            if k <= left {
                link = node.left.as_deref_mut();
                continue;
            }
            k -= left;
            if k <= node.count {
                return Some(&node.key);
            }
            k -= node.count;
            link = node.right.as_deref_mut();
        }
        None
    }

    /// Smallest live key.
    #[inline]
    pub fn find_first(&mut self) -> Option<&K> {
        self.find_by_order(1)
    }

    /// Live multiplicity of `key`.
    ///
    /// Expected O(log n)
    pub fn multiplicity(&self, key: &K) -> Count {
        let mut link = self.root.as_deref();
        while let Some(node) = link {
            if node.erase {
                return 0;
            }
            link = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return node.count,
            };
        }
        0
    }

    /// Keys with a positive live multiplicity, in order.
    ///
    /// O(n)
    pub fn entries(&self) -> Vec<(&K, Count)> {
        fn walk<'a, K>(link: &'a Link<K>, out: &mut Vec<(&'a K, Count)>) {
            if let Some(node) = link {
                if node.erase {
                    return;
                }
                walk(&node.left, out);
                if 0 < node.count {
                    out.push((&node.key, node.count));
                }
                walk(&node.right, out);
            }
        }

        let mut out = Vec::new();
        walk(&self.root, &mut out);
        out
    }

    /// Moves every key `>= key` into a new treap; keys `< key` stay.
    ///
    /// Expected O(log n)
    pub fn split_off(&mut self, key: &K) -> Self {
        let (left, right) = Self::split(self.root.take(), key, false);
        self.root = left;
        Self { root: right }
    }

    /// Joins `other` after `self`. Every key of `self` has to be `<=` every key of `other`;
    /// this is not checked.
    ///
    /// Expected O(log n)
    pub fn append(&mut self, other: Self) {
        self.root = Self::merge(self.root.take(), other.root);
    }

    fn add_to_key(link: &mut Link<K>, key: &K, delta: Count) -> bool {
        match link {
            None => false,
            Some(node) => {
                node.push_down();
                let found = match key.cmp(&node.key) {
                    Ordering::Less => Self::add_to_key(&mut node.left, key, delta),
                    Ordering::Greater => Self::add_to_key(&mut node.right, key, delta),
                    Ordering::Equal => {
                        node.count += delta;
                        true
                    }
                };
                node.recalc();
                found
            }
        }
    }

    /// Left part gets keys `< key`, or `<= key` when `inclusive`.
    fn split(link: Link<K>, key: &K, inclusive: bool) -> (Link<K>, Link<K>) {
        match link {
            None => (None, None),
            Some(mut node) => {
                node.push_down();
                let goes_left = match node.key.cmp(key) {
                    Ordering::Less => true,
                    Ordering::Equal => inclusive,
                    Ordering::Greater => false,
                };
                if goes_left {
                    let (l, r) = Self::split(node.right.take(), key, inclusive);
                    node.right = l;
                    node.recalc();
                    (Some(node), r)
                } else {
                    let (l, r) = Self::split(node.left.take(), key, inclusive);
                    node.left = r;
                    node.recalc();
                    (l, Some(node))
                }
            }
        }
    }

    fn merge(x: Link<K>, y: Link<K>) -> Link<K> {
        match (x, y) {
            (Some(mut x), Some(mut y)) => {
                x.push_down();
                y.push_down();
                if x.priority > y.priority {
                    x.right = Self::merge(x.right.take(), Some(y));
                    x.recalc();
                    Some(x)
                } else {
                    y.left = Self::merge(Some(x), y.left.take());
                    y.recalc();
                    Some(y)
                }
            }
            (Some(mut node), None) | (None, Some(mut node)) => {
                node.push_down();
                Some(node)
            }
            (None, None) => None,
        }
    }

    fn insert_node(link: Link<K>, mut new: Box<Node<K>>) -> Link<K> {
        match link {
            None => Some(new),
            Some(mut node) => {
                node.push_down();
                if new.priority > node.priority {
                    let (l, r) = Self::split(Some(node), &new.key, false);
                    new.left = l;
                    new.right = r;
                    new.recalc();
                    Some(new)
                } else {
                    if new.key < node.key {
                        node.left = Self::insert_node(node.left.take(), new);
                    } else {
                        node.right = Self::insert_node(node.right.take(), new);
                    }
                    node.recalc();
                    Some(node)
                }
            }
        }
    }
}
