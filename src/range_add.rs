use crate::error::{Error, Result};
use crate::groups::AbelianGroup;
use crate::segment_tree::SegmentTree;
use std::fmt;

/// Range add, point read.
///
/// Stores the difference array of the values in a sum tree with one spare slot past the
/// end: adding `d` to `[l, r]` adds `d` at `l` and `-d` at `r + 1`, and a value is the
/// prefix sum up to its index.
#[derive(Clone)]
pub struct RangeAddTree<G: AbelianGroup> {
    diffs: SegmentTree<G>,
}

impl<G> fmt::Debug for RangeAddTree<G>
where
    G: AbelianGroup,
    SegmentTree<G>: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeAddTree")
            .field("len", &self.len())
            .field("diffs", &self.diffs)
            .finish()
    }
}

impl<G: AbelianGroup> RangeAddTree<G> {
    /// All values start at the identity.
    pub fn new(group: G, len: usize) -> Result<Self> {
        if len == 0 {
            return Err(Error::EmptyUniverse);
        }
        Ok(Self {
            diffs: SegmentTree::new(group, len + 1)?,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.diffs.len() - 1
    }

    /// Adds `delta` to every value in `[l, r]`.
    ///
    /// O(log n)
    pub fn add(&mut self, l: usize, r: usize, delta: G::Elem) -> Result<()> {
        if r < l || self.len() <= r {
            return Err(Error::InvalidRange {
                l,
                r,
                len: self.len(),
            });
        }
        let undo = self.diffs.group().inv(delta.clone());
        self.diffs.add_at(l, delta)?;
        self.diffs.add_at(r + 1, undo)?;
        Ok(())
    }

    /// O(log n)
    pub fn get(&self, i: usize) -> Result<G::Elem> {
        if self.len() <= i {
            return Err(Error::IndexOutOfRange {
                index: i,
                len: self.len(),
            });
        }
        self.diffs.query(0, i)
    }
}
