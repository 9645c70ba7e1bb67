use crate::groups::{Associativity, Identity, Magma};
use std::cmp::max;

/// Summary of a range for the maximum-subarray problem. Every field except `sum` allows
/// the empty subarray, so none of them is ever negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MaxSegment<T> {
    pub prefix: T,
    pub suffix: T,
    pub best: T,
    pub sum: T,
}

impl<T: num::Num + Ord + Copy> MaxSegment<T> {
    /// Summary of a single element.
    pub fn new(x: T) -> Self {
        let clamped = max(x, T::zero());
        Self {
            prefix: clamped,
            suffix: clamped,
            best: clamped,
            sum: x,
        }
    }

    /// Summary of the empty range.
    pub fn empty() -> Self {
        Self {
            prefix: T::zero(),
            suffix: T::zero(),
            best: T::zero(),
            sum: T::zero(),
        }
    }

    #[inline]
    pub fn best(&self) -> T {
        self.best
    }
}

impl<T: num::Num + Ord + Copy> From<T> for MaxSegment<T> {
    fn from(x: T) -> Self {
        Self::new(x)
    }
}

/// Kadane-style merge of adjacent ranges. Associative but not commutative.
#[derive(Clone, Copy, Debug)]
pub struct MaxSegments<T>(std::marker::PhantomData<T>);

impl<T> Default for MaxSegments<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MaxSegments<T> {
    pub const fn new() -> Self {
        Self(std::marker::PhantomData)
    }
}

impl<T: num::Num + Ord + Copy> Magma for MaxSegments<T> {
    type Elem = MaxSegment<T>;

    fn add(&self, lhs: MaxSegment<T>, rhs: MaxSegment<T>) -> MaxSegment<T> {
        MaxSegment {
            prefix: max(lhs.prefix, lhs.sum + rhs.prefix),
            suffix: max(rhs.suffix, rhs.sum + lhs.suffix),
            best: max(max(lhs.best, rhs.best), lhs.suffix + rhs.prefix),
            sum: lhs.sum + rhs.sum,
        }
    }
}
impl<T: num::Num + Ord + Copy> Identity for MaxSegments<T> {
    #[inline]
    fn id(&self) -> MaxSegment<T> {
        MaxSegment::empty()
    }
}
impl<T: num::Num + Ord + Copy> Associativity for MaxSegments<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold(xs: &[i64]) -> MaxSegment<i64> {
        let g = MaxSegments::new();
        xs.iter()
            .map(|&x| MaxSegment::new(x))
            .fold(g.id(), |acc, x| g.add(acc, x))
    }

    fn brute_best(xs: &[i64]) -> i64 {
        let mut best = 0;
        for i in 0..xs.len() {
            let mut s = 0;
            for &x in &xs[i..] {
                s += x;
                best = best.max(s);
            }
        }
        best
    }

    #[test]
    fn identity_is_neutral_on_both_sides() {
        let g = MaxSegments::<i64>::new();
        for &x in &[-3, 0, 5] {
            let e = MaxSegment::new(x);
            assert_eq!(g.add(g.id(), e), e);
            assert_eq!(g.add(e, g.id()), e);
        }
    }

    #[test]
    fn matches_brute_force() {
        let cases: [&[i64]; 4] = [
            &[5, -4, 4, 3, -5],
            &[-1, -2, -3],
            &[2, -1, 2, -1, 2],
            &[-5, 10, -20, 7, 8, -1],
        ];
        for xs in cases.iter() {
            let s = fold(xs);
            assert_eq!(s.best(), brute_best(xs), "{:?}", xs);
            assert_eq!(s.sum, xs.iter().sum::<i64>());
        }
    }

    #[test]
    fn grouping_does_not_matter() {
        let g = MaxSegments::<i64>::new();
        let (a, b, c) = (MaxSegment::new(3), MaxSegment::new(-7), MaxSegment::new(4));
        assert_eq!(g.add(g.add(a, b), c), g.add(a, g.add(b, c)));
    }
}
