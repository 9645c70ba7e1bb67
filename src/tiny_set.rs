use crate::error::{Error, Result};
use crate::groups::{Associativity, Commutativity, Identity, Magma};

/// A set of small non-negative integers (`0..64`) stored as a bitmask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TinySet(u64);

impl TinySet {
    pub const EMPTY: Self = Self(0);
    pub const CAPACITY: u32 = u64::BITS;

    pub fn singleton(value: u32) -> Result<Self> {
        if value < Self::CAPACITY {
            Ok(Self(1 << value))
        } else {
            Err(Error::SetValueTooLarge { value })
        }
    }

    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Number of distinct values.
    #[inline]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn contains(self, value: u32) -> bool {
        value < Self::CAPACITY && self.0 >> value & 1 == 1
    }

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TinySetUnion;

impl Magma for TinySetUnion {
    type Elem = TinySet;

    #[inline]
    fn add(&self, lhs: TinySet, rhs: TinySet) -> TinySet {
        lhs.union(rhs)
    }
}
impl Identity for TinySetUnion {
    #[inline]
    fn id(&self) -> TinySet {
        TinySet::EMPTY
    }
}
impl Associativity for TinySetUnion {}
impl Commutativity for TinySetUnion {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_counts_distinct_values() {
        let g = TinySetUnion;
        let s = [3, 7, 3, 40, 7]
            .iter()
            .map(|&v| TinySet::singleton(v).unwrap())
            .fold(g.id(), |acc, x| g.add(acc, x));
        assert_eq!(s.len(), 3);
        assert!(s.contains(40));
        assert!(!s.contains(4));
    }

    #[test]
    fn rejects_values_past_capacity() {
        assert!(TinySet::singleton(63).is_ok());
        assert_eq!(
            TinySet::singleton(64),
            Err(Error::SetValueTooLarge { value: 64 })
        );
    }
}
