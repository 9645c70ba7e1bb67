//! Read-only walks from the root that use the cached aggregates to find a single leaf.

use crate::error::{Error, Result};
use crate::groups::{BoolCount, Monoid, NumMax};
use crate::segment_tree::{Node, SegmentTree};
use num::ToPrimitive;

/// Which child an order-statistic walk counts first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Left then right: the `k`-th mark from the start.
    Forward,
    /// Right then left: the `k`-th mark from the end.
    Backward,
}

impl<G> SegmentTree<G>
where
    G: Monoid,
    G::Elem: num::PrimInt,
{
    /// Index of the leaf holding the `k`-th mark, `k` counted from 1 in `direction`. A
    /// leaf's mark count is its value.
    ///
    /// O(log n)
    pub fn kth(&self, k: G::Elem, direction: Direction) -> Result<usize> {
        let total = *self.total();
        if k < num::one() || total < k {
            return Err(Error::RankOutOfRange {
                k: k.to_i128().unwrap_or(i128::MAX),
                total: total.to_i128().unwrap_or(i128::MAX),
            });
        }

        let mut k = k;
        let mut node = &self.root;
        while let Some((left, right)) = &node.children {
            let (near, far): (&Node<G::Elem>, &Node<G::Elem>) = match direction {
                Direction::Forward => (&**left, &**right),
                Direction::Backward => (&**right, &**left),
            };
            if near.value < k {
                k = k - near.value;
                node = far;
            } else {
                node = near;
            }
        }
        Ok(node.l)
    }
}

impl<G: Monoid> SegmentTree<G> {
    /// First index `>= i` whose leaf satisfies `pred`, or `None`.
    ///
    /// `pred` has to be monotone over the aggregates: it holds for a node's aggregate exactly
    /// when some leaf below it satisfies it. Subtrees failing it are never entered.
    ///
    /// O(log n)
    pub fn first_from<P>(&self, i: usize, pred: P) -> Option<usize>
    where
        P: Fn(&G::Elem) -> bool,
    {
        first_from(&self.root, i, &pred)
    }
}

fn first_from<T, P>(node: &Node<T>, i: usize, pred: &P) -> Option<usize>
where
    P: Fn(&T) -> bool,
{
    if node.r < i || !pred(&node.value) {
        return None;
    }
    match &node.children {
        Some((left, right)) => first_from(left, i, pred).or_else(|| first_from(right, i, pred)),
        None => Some(node.l),
    }
}

impl<T: num::Bounded + PartialOrd + Clone> SegmentTree<NumMax<T>> {
    /// First index whose value is at least `x`.
    ///
    /// O(log n)
    #[inline]
    pub fn first_at_least(&self, x: &T) -> Option<usize> {
        self.first_at_least_from(0, x)
    }

    /// First index `>= i` whose value is at least `x`.
    ///
    /// O(log n)
    pub fn first_at_least_from(&self, i: usize, x: &T) -> Option<usize> {
        self.first_from(i, |max| max >= x)
    }
}

impl SegmentTree<BoolCount> {
    /// Toggles the mark at `i`. Returns the number of marks left. A leaf holding any
    /// non-zero count is treated as marked and becomes 0.
    ///
    /// O(log n)
    pub fn flip(&mut self, i: usize) -> Result<u32> {
        self.modify(i, |&x| if x == 0 { 1 } else { 0 })
            .map(|&total| total)
    }
}
