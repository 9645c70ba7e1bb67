use crate::error::{Error, Result};
use crate::groups::{Group, Monoid};

/// One node of the tree, covering the inclusive index range `[l, r]`.
///
/// Internal nodes own exactly two children splitting the range at `(l + r) / 2`; leaves
/// (`l == r`) own none.
#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    pub(crate) l: usize,
    pub(crate) r: usize,
    pub(crate) value: T,
    pub(crate) children: Option<(Box<Node<T>>, Box<Node<T>>)>,
}

impl<T: Clone> Node<T> {
    fn with_shape(l: usize, r: usize, id: &T) -> Self {
        let children = if l < r {
            let h = (l + r) / 2;
            Some((
                Box::new(Self::with_shape(l, h, id)),
                Box::new(Self::with_shape(h + 1, r, id)),
            ))
        } else {
            None
        };
        Self {
            l,
            r,
            value: id.clone(),
            children,
        }
    }

    #[inline]
    fn contained(&self, l: usize, r: usize) -> bool {
        l <= self.l && self.r <= r
    }

    #[inline]
    fn disjoint(&self, l: usize, r: usize) -> bool {
        r < self.l || self.r < l
    }

    /// Leaves receive values in index order, so the iterator is consumed left to right.
    fn build<G, I>(&mut self, group: &G, values: &mut I) -> &T
    where
        G: Monoid<Elem = T>,
        I: Iterator<Item = T>,
    {
        match &mut self.children {
            Some((left, right)) => {
                let lhs = left.build(group, values).clone();
                let rhs = right.build(group, values).clone();
                self.value = group.add(lhs, rhs);
            }
            None => self.value = values.next().unwrap_or_else(|| group.id()),
        }
        &self.value
    }

    fn modify<G, F>(&mut self, group: &G, i: usize, f: F) -> &T
    where
        G: Monoid<Elem = T>,
        F: FnOnce(&T) -> T,
    {
        if self.disjoint(i, i) {
            return &self.value;
        }
        match &mut self.children {
            Some((left, right)) => {
                if i <= left.r {
                    left.modify(group, i, f);
                } else {
                    right.modify(group, i, f);
                }
                self.value = group.add(left.value.clone(), right.value.clone());
            }
            None => self.value = f(&self.value),
        }
        &self.value
    }

    fn query<G: Monoid<Elem = T>>(&self, group: &G, l: usize, r: usize) -> T {
        if self.disjoint(l, r) {
            return group.id();
        }
        if self.contained(l, r) {
            return self.value.clone();
        }
        match &self.children {
            Some((left, right)) => group.add(left.query(group, l, r), right.query(group, l, r)),
            None => self.value.clone(),
        }
    }

    fn get(&self, i: usize) -> &T {
        let mut node = self;
        while let Some((left, right)) = &node.children {
            node = if i <= left.r { &**left } else { &**right };
        }
        &node.value
    }
}

/// Recursive interval tree over the fixed universe `[0, len)`, caching at every node the
/// combination of its leaves under the monoid `G`.
///
/// All ranges taken by this type are inclusive on both ends.
#[derive(Clone, Debug)]
pub struct SegmentTree<G: Monoid> {
    group: G,
    len: usize,
    pub(crate) root: Node<G::Elem>,
}

impl<G: Monoid> SegmentTree<G> {
    /// Builds the full shape with every leaf set to the identity.
    ///
    /// O(n)
    pub fn new(group: G, len: usize) -> Result<Self> {
        if len == 0 {
            return Err(Error::EmptyUniverse);
        }
        log::trace!("segment tree over {} positions", len);
        let root = Node::with_shape(0, len - 1, &group.id());
        Ok(Self { group, len, root })
    }

    /// Shorthand for [`new`](Self::new) followed by [`build`](Self::build) with exactly
    /// `values.len()` positions.
    pub fn from_values(group: G, values: Vec<G::Elem>) -> Result<Self> {
        let mut tree = Self::new(group, values.len())?;
        tree.build(values)?;
        Ok(tree)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn group(&self) -> &G {
        &self.group
    }

    /// Combination of all leaves.
    ///
    /// O(1)
    #[inline]
    pub fn total(&self) -> &G::Elem {
        &self.root.value
    }

    /// Assigns the leaves from `iter` in index order and recomputes every node. Positions
    /// the iterator does not reach are reset to the identity. With more values than
    /// leaves the tree is left untouched.
    ///
    /// O(n)
    pub fn build<Iter: IntoIterator<Item = G::Elem>>(&mut self, iter: Iter) -> Result<&G::Elem> {
        let values: Vec<G::Elem> = iter.into_iter().collect();
        if self.len < values.len() {
            return Err(Error::TooManyValues {
                expected: self.len,
                got: values.len(),
            });
        }
        self.root.build(&self.group, &mut values.into_iter());
        Ok(&self.root.value)
    }

    /// Replaces leaf `i` with `f(old)` and recombines its ancestors. Returns the new total.
    ///
    /// O(log n)
    pub fn modify<F>(&mut self, i: usize, f: F) -> Result<&G::Elem>
    where
        F: FnOnce(&G::Elem) -> G::Elem,
    {
        self.check_index(i)?;
        Ok(self.root.modify(&self.group, i, f))
    }

    /// O(log n)
    pub fn update(&mut self, i: usize, x: G::Elem) -> Result<&G::Elem> {
        self.modify(i, move |_| x)
    }

    /// Combination of the leaves in `[l, r]`.
    ///
    /// O(log n)
    pub fn query(&self, l: usize, r: usize) -> Result<G::Elem> {
        if r < l || self.len <= r {
            return Err(Error::InvalidRange { l, r, len: self.len });
        }
        Ok(self.root.query(&self.group, l, r))
    }

    /// O(log n)
    pub fn get(&self, i: usize) -> Result<&G::Elem> {
        self.check_index(i)?;
        Ok(self.root.get(i))
    }

    pub(crate) fn check_index(&self, i: usize) -> Result<()> {
        if i < self.len {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index: i,
                len: self.len,
            })
        }
    }
}

impl<G: Group> SegmentTree<G> {
    /// Adds `dx` to leaf `i`. Returns the new total.
    ///
    /// O(log n)
    pub fn add_at(&mut self, i: usize, dx: G::Elem) -> Result<&G::Elem> {
        self.check_index(i)?;
        let Self { group, root, .. } = self;
        Ok(root.modify(&*group, i, |x| group.add(x.clone(), dx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::{Identity, Magma, NumAdditiveGroups, NumMax};
    use crate::matrix::ModMatrixProduct;
    use crate::max_segment::{MaxSegment, MaxSegments};
    use crate::tiny_set::{TinySet, TinySetUnion};
    use rand::prelude::*;

    #[test]
    fn sum_scenario() {
        let mut st =
            SegmentTree::from_values(NumAdditiveGroups::<i64>::new(), vec![3, 1, 4, 1, 5]).unwrap();
        assert_eq!(*st.total(), 14);
        assert_eq!(st.query(1, 3), Ok(6));
        assert_eq!(*st.update(2, 9).unwrap(), 19);
        assert_eq!(st.query(1, 3), Ok(11));
        assert_eq!(st.get(2), Ok(&9));
    }

    #[test]
    fn matches_linear_rescan() {
        let mut rng = SmallRng::seed_from_u64(0xA11CE);
        for &n in &[1usize, 2, 3, 7, 64, 101] {
            let g = NumAdditiveGroups::<i64>::new();
            let mut a: Vec<i64> = (0..n).map(|_| rng.gen_range(-50..50)).collect();
            let mut st = SegmentTree::from_values(g, a.clone()).unwrap();

            for _ in 0..200 {
                let i = rng.gen_range(0..n);
                let x = rng.gen_range(-50..50);
                a[i] = x;
                st.update(i, x).unwrap();

                let l = rng.gen_range(0..n);
                let r = rng.gen_range(l..n);
                assert_eq!(st.query(l, r).unwrap(), a[l..=r].iter().sum::<i64>());
            }
        }
    }

    #[test]
    fn max_tree_matches_linear_rescan() {
        let mut rng = SmallRng::seed_from_u64(7);
        let n = 37;
        let mut a: Vec<u32> = (0..n).map(|_| rng.gen_range(0..1000)).collect();
        let mut st = SegmentTree::from_values(NumMax::new(), a.clone()).unwrap();
        for _ in 0..300 {
            let i = rng.gen_range(0..n);
            a[i] = rng.gen_range(0..1000);
            st.update(i, a[i]).unwrap();
            let l = rng.gen_range(0..n);
            let r = rng.gen_range(l..n);
            assert_eq!(st.query(l, r).unwrap(), *a[l..=r].iter().max().unwrap());
        }
    }

    #[test]
    fn order_of_non_commutative_elements_is_kept() {
        let g = ModMatrixProduct::<2>::new(1_000_003).unwrap();
        let ms: Vec<_> = (0..9u64)
            .map(|i| g.matrix([[i + 1, i], [2 * i, 3 + i]]))
            .collect();
        let st = SegmentTree::from_values(g, ms.clone()).unwrap();
        for l in 0..ms.len() {
            for r in l..ms.len() {
                let expected = ms[l..=r].iter().fold(g.id(), |acc, &m| g.add(acc, m));
                assert_eq!(st.query(l, r).unwrap(), expected);
            }
        }
    }

    #[test]
    fn max_segment_after_updates() {
        let values = [5i64, -4, 4, 3, -5];
        let mut st = SegmentTree::from_values(
            MaxSegments::new(),
            values.iter().map(|&x| MaxSegment::new(x)).collect(),
        )
        .unwrap();
        assert_eq!(st.total().best(), 8);
        assert_eq!(st.update(4, MaxSegment::new(3)).unwrap().best(), 11);
        assert_eq!(st.update(3, MaxSegment::new(-1)).unwrap().best(), 7);
        assert_eq!(st.update(1, MaxSegment::new(-5)).unwrap().best(), 6);
        assert_eq!(st.update(0, MaxSegment::new(-100)).unwrap().best(), 6);
    }

    #[test]
    fn distinct_values_on_range() {
        let values = [1u32, 2, 3, 1, 2];
        let st = SegmentTree::from_values(
            TinySetUnion,
            values.iter().map(|&v| TinySet::singleton(v).unwrap()).collect(),
        )
        .unwrap();
        assert_eq!(st.query(0, 4).unwrap().len(), 3);
        assert_eq!(st.query(3, 4).unwrap().len(), 2);
        assert_eq!(st.query(2, 2).unwrap().len(), 1);
    }

    #[test]
    fn build_resets_unreached_leaves() {
        let mut st = SegmentTree::new(NumAdditiveGroups::<i32>::new(), 4).unwrap();
        st.build(vec![1, 2, 3, 4]).unwrap();
        assert_eq!(*st.build(vec![10]).unwrap(), 10);
        assert_eq!(st.get(3), Ok(&0));
        assert_eq!(
            st.build(vec![1, 2, 3, 4, 5, 6]),
            Err(Error::TooManyValues {
                expected: 4,
                got: 6
            })
        );
    }

    #[test]
    fn surplus_values_leave_tree_unchanged() {
        let mut st = SegmentTree::from_values(NumAdditiveGroups::<i64>::new(), vec![1, 1]).unwrap();
        assert_eq!(
            st.build(vec![7, 7, 7]),
            Err(Error::TooManyValues {
                expected: 2,
                got: 3
            })
        );
        assert_eq!(*st.total(), 2);
        assert_eq!(st.get(0), Ok(&1));
        assert_eq!(st.get(1), Ok(&1));
    }

    #[test]
    fn point_add_on_group() {
        let mut st = SegmentTree::new(NumAdditiveGroups::<i64>::new(), 3).unwrap();
        st.add_at(1, 5).unwrap();
        st.add_at(1, -2).unwrap();
        assert_eq!(st.get(1), Ok(&3));
        assert_eq!(*st.total(), 3);
    }

    #[test]
    fn preconditions_are_checked() {
        assert_eq!(
            SegmentTree::new(NumAdditiveGroups::<i64>::new(), 0).unwrap_err(),
            Error::EmptyUniverse
        );
        let mut st = SegmentTree::new(NumAdditiveGroups::<i64>::new(), 3).unwrap();
        assert_eq!(
            st.update(3, 1).unwrap_err(),
            Error::IndexOutOfRange { index: 3, len: 3 }
        );
        assert_eq!(
            st.query(2, 1).unwrap_err(),
            Error::InvalidRange { l: 2, r: 1, len: 3 }
        );
        assert_eq!(
            st.query(0, 3).unwrap_err(),
            Error::InvalidRange { l: 0, r: 3, len: 3 }
        );
    }
}
