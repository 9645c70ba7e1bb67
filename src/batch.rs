//! Text front end for the exercises: whitespace separated integers in, one answer per
//! line out, in request order.

use crate::error::Error;
use crate::exercises;
use crate::groups::{BoolCount, NumAdditiveGroups, NumMax};
use crate::matrix::ModMatrixProduct;
use crate::max_segment::{MaxSegment, MaxSegments};
use crate::range_add::RangeAddTree;
use crate::segment_tree::SegmentTree;
use crate::tiny_set::{TinySet, TinySetUnion};
use crate::treap_segment_tree::TreapSegmentTree;
use crate::Direction;
use std::fmt::Display;
use std::io::{self, Write};
use std::num::ParseIntError;
use std::str::{FromStr, SplitAsciiWhitespace};

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("cannot parse `{token}` as an integer")]
    Parse {
        token: String,
        #[source]
        source: ParseIntError,
    },
    #[error("unknown operation {0}")]
    UnknownOperation(u32),
    #[error("expected 0 or 1, got {0}")]
    NotABit(u32),
    #[error(transparent)]
    Tree(#[from] Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// The whole input, consumed one token at a time.
pub struct Tokens<'a> {
    iter: SplitAsciiWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            iter: input.split_ascii_whitespace(),
        }
    }

    pub fn value<T: FromStr<Err = ParseIntError>>(&mut self) -> Result<T, BatchError> {
        let token = self.iter.next().ok_or(BatchError::UnexpectedEof)?;
        token.parse().map_err(|source| BatchError::Parse {
            token: token.to_owned(),
            source,
        })
    }

    pub fn values<T: FromStr<Err = ParseIntError>>(
        &mut self,
        n: usize,
    ) -> Result<Vec<T>, BatchError> {
        (0..n).map(|_| self.value()).collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Exercise {
    /// Point assignment, sum on `[l, r)`.
    Sum,
    /// Maximum subarray sum after every assignment.
    MaxSegment,
    /// Bit flips, index of the k-th one (k from 0).
    KthOne,
    /// Assignment, first index with a value at least x.
    FirstAtLeast,
    /// Assignment, first index from l with a value at least x.
    FirstAtLeastFrom,
    /// Earlier greater elements of a permutation.
    Inversions,
    /// Permutation from its earlier-greater counts.
    RestorePermutation,
    /// Segments lying inside each segment.
    NestedSegments,
    /// Segments partially overlapping each segment.
    IntersectingSegments,
    /// Add on `[l, r)`, point read.
    RangeAdd,
    /// Distinct values on a 1-based range, values below 64.
    Distinct,
    /// Products of 2x2 matrices modulo r on a 1-based range.
    Cryptography,
    /// Building strengths; an earthquake on `[l, r)` destroys those at most p.
    Earthquakes,
}

/// Answers every request of `exercise` in `input`. `seed` fixes treap priorities.
pub fn run<W: Write>(
    exercise: Exercise,
    input: &str,
    seed: Option<u64>,
    out: &mut W,
) -> Result<(), BatchError> {
    let mut tokens = Tokens::new(input);
    log::debug!("running {:?}", exercise);
    match exercise {
        Exercise::Sum => sum(&mut tokens, out),
        Exercise::MaxSegment => max_segment(&mut tokens, out),
        Exercise::KthOne => kth_one(&mut tokens, out),
        Exercise::FirstAtLeast => first_at_least(&mut tokens, false, out),
        Exercise::FirstAtLeastFrom => first_at_least(&mut tokens, true, out),
        Exercise::Inversions => inversions(&mut tokens, out),
        Exercise::RestorePermutation => restore_permutation(&mut tokens, out),
        Exercise::NestedSegments => segments(&mut tokens, false, out),
        Exercise::IntersectingSegments => segments(&mut tokens, true, out),
        Exercise::RangeAdd => range_add(&mut tokens, out),
        Exercise::Distinct => distinct(&mut tokens, out),
        Exercise::Cryptography => cryptography(&mut tokens, out),
        Exercise::Earthquakes => earthquakes(&mut tokens, seed, out),
    }
}

/// `[l, r)` as the inclusive `[l, r - 1]`.
fn half_open(l: usize, r: usize, len: usize) -> Result<(usize, usize), Error> {
    if r <= l {
        return Err(Error::InvalidRange { l, r, len });
    }
    Ok((l, r - 1))
}

fn one_based(i: usize, len: usize) -> Result<usize, Error> {
    if i == 0 || len < i {
        return Err(Error::IndexOutOfRange { index: i, len });
    }
    Ok(i - 1)
}

fn write_line<W: Write, T: Display>(out: &mut W, items: &[T]) -> io::Result<()> {
    for (i, x) in items.iter().enumerate() {
        if i > 0 {
            write!(out, " ")?;
        }
        write!(out, "{}", x)?;
    }
    writeln!(out)
}

fn sum<W: Write>(tokens: &mut Tokens<'_>, out: &mut W) -> Result<(), BatchError> {
    let n: usize = tokens.value()?;
    let m: usize = tokens.value()?;
    log::debug!("n = {}, m = {}", n, m);
    let mut tree = SegmentTree::from_values(NumAdditiveGroups::<i64>::new(), tokens.values(n)?)?;
    for _ in 0..m {
        match tokens.value::<u32>()? {
            1 => {
                let i: usize = tokens.value()?;
                let v: i64 = tokens.value()?;
                tree.update(i, v)?;
            }
            2 => {
                let (l, r) = half_open(tokens.value()?, tokens.value()?, n)?;
                writeln!(out, "{}", tree.query(l, r)?)?;
            }
            op => return Err(BatchError::UnknownOperation(op)),
        }
    }
    Ok(())
}

fn max_segment<W: Write>(tokens: &mut Tokens<'_>, out: &mut W) -> Result<(), BatchError> {
    let n: usize = tokens.value()?;
    let m: usize = tokens.value()?;
    log::debug!("n = {}, m = {}", n, m);
    let values: Vec<i64> = tokens.values(n)?;
    let mut tree = SegmentTree::from_values(
        MaxSegments::new(),
        values.into_iter().map(MaxSegment::new).collect(),
    )?;
    writeln!(out, "{}", tree.total().best())?;
    for _ in 0..m {
        let i: usize = tokens.value()?;
        let v: i64 = tokens.value()?;
        writeln!(out, "{}", tree.update(i, MaxSegment::new(v))?.best())?;
    }
    Ok(())
}

fn kth_one<W: Write>(tokens: &mut Tokens<'_>, out: &mut W) -> Result<(), BatchError> {
    let n: usize = tokens.value()?;
    let m: usize = tokens.value()?;
    log::debug!("n = {}, m = {}", n, m);
    let bits: Vec<u32> = tokens.values(n)?;
    if let Some(&bit) = bits.iter().find(|&&b| b > 1) {
        return Err(BatchError::NotABit(bit));
    }
    let mut tree = SegmentTree::from_values(BoolCount, bits)?;
    for _ in 0..m {
        match tokens.value::<u32>()? {
            1 => {
                tree.flip(tokens.value()?)?;
            }
            2 => {
                let k: u32 = tokens.value()?;
                let i = tree.kth(k.saturating_add(1), Direction::Forward)?;
                writeln!(out, "{}", i)?;
            }
            op => return Err(BatchError::UnknownOperation(op)),
        }
    }
    Ok(())
}

fn first_at_least<W: Write>(
    tokens: &mut Tokens<'_>,
    with_start: bool,
    out: &mut W,
) -> Result<(), BatchError> {
    let n: usize = tokens.value()?;
    let m: usize = tokens.value()?;
    log::debug!("n = {}, m = {}", n, m);
    let mut tree = SegmentTree::from_values(NumMax::<i64>::new(), tokens.values(n)?)?;
    for _ in 0..m {
        match tokens.value::<u32>()? {
            1 => {
                let i: usize = tokens.value()?;
                let v: i64 = tokens.value()?;
                tree.update(i, v)?;
            }
            2 => {
                let x: i64 = tokens.value()?;
                let start: usize = if with_start { tokens.value()? } else { 0 };
                match tree.first_at_least_from(start, &x) {
                    Some(i) => writeln!(out, "{}", i)?,
                    None => writeln!(out, "-1")?,
                }
            }
            op => return Err(BatchError::UnknownOperation(op)),
        }
    }
    Ok(())
}

fn inversions<W: Write>(tokens: &mut Tokens<'_>, out: &mut W) -> Result<(), BatchError> {
    let n: usize = tokens.value()?;
    let permutation = tokens
        .values(n)?
        .into_iter()
        .map(|v| one_based(v, n))
        .collect::<Result<Vec<_>, _>>()?;
    write_line(out, &exercises::earlier_greater_counts(&permutation)?)?;
    Ok(())
}

fn restore_permutation<W: Write>(tokens: &mut Tokens<'_>, out: &mut W) -> Result<(), BatchError> {
    let n: usize = tokens.value()?;
    let counts: Vec<u32> = tokens.values(n)?;
    let permutation: Vec<usize> = exercises::restore_permutation(&counts)?
        .into_iter()
        .map(|v| v + 1)
        .collect();
    write_line(out, &permutation)?;
    Ok(())
}

fn segments<W: Write>(
    tokens: &mut Tokens<'_>,
    intersecting: bool,
    out: &mut W,
) -> Result<(), BatchError> {
    let n: usize = tokens.value()?;
    let endpoints = tokens
        .values(2 * n)?
        .into_iter()
        .map(|k| one_based(k, n))
        .collect::<Result<Vec<_>, _>>()?;
    let counts = if intersecting {
        exercises::intersecting_segment_counts(&endpoints)?
    } else {
        exercises::nested_segment_counts(&endpoints)?
    };
    write_line(out, &counts)?;
    Ok(())
}

fn range_add<W: Write>(tokens: &mut Tokens<'_>, out: &mut W) -> Result<(), BatchError> {
    let n: usize = tokens.value()?;
    let m: usize = tokens.value()?;
    log::debug!("n = {}, m = {}", n, m);
    let mut tree = RangeAddTree::new(NumAdditiveGroups::<i64>::new(), n)?;
    for _ in 0..m {
        match tokens.value::<u32>()? {
            1 => {
                let (l, r) = half_open(tokens.value()?, tokens.value()?, n)?;
                let v: i64 = tokens.value()?;
                tree.add(l, r, v)?;
            }
            2 => {
                writeln!(out, "{}", tree.get(tokens.value()?)?)?;
            }
            op => return Err(BatchError::UnknownOperation(op)),
        }
    }
    Ok(())
}

fn distinct<W: Write>(tokens: &mut Tokens<'_>, out: &mut W) -> Result<(), BatchError> {
    let n: usize = tokens.value()?;
    let m: usize = tokens.value()?;
    log::debug!("n = {}, m = {}", n, m);
    let values = tokens
        .values(n)?
        .into_iter()
        .map(TinySet::singleton)
        .collect::<Result<Vec<_>, _>>()?;
    let mut tree = SegmentTree::from_values(TinySetUnion, values)?;
    for _ in 0..m {
        match tokens.value::<u32>()? {
            1 => {
                let l = one_based(tokens.value()?, n)?;
                let r = one_based(tokens.value()?, n)?;
                writeln!(out, "{}", tree.query(l, r)?.len())?;
            }
            2 => {
                let i = one_based(tokens.value()?, n)?;
                tree.update(i, TinySet::singleton(tokens.value()?)?)?;
            }
            op => return Err(BatchError::UnknownOperation(op)),
        }
    }
    Ok(())
}

fn cryptography<W: Write>(tokens: &mut Tokens<'_>, out: &mut W) -> Result<(), BatchError> {
    let modulus: u64 = tokens.value()?;
    let n: usize = tokens.value()?;
    let m: usize = tokens.value()?;
    log::debug!("r = {}, n = {}, m = {}", modulus, n, m);
    let group = ModMatrixProduct::<2>::new(modulus)?;
    let mut matrices = Vec::with_capacity(n);
    for _ in 0..n {
        let e: Vec<u64> = tokens.values(4)?;
        matrices.push(group.matrix([[e[0], e[1]], [e[2], e[3]]]));
    }
    let tree = SegmentTree::from_values(group, matrices)?;
    for _ in 0..m {
        let l = one_based(tokens.value()?, n)?;
        let r = one_based(tokens.value()?, n)?;
        let product = tree.query(l, r)?;
        for row in product.rows() {
            write_line(out, row)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn earthquakes<W: Write>(
    tokens: &mut Tokens<'_>,
    seed: Option<u64>,
    out: &mut W,
) -> Result<(), BatchError> {
    let n: usize = tokens.value()?;
    let m: usize = tokens.value()?;
    log::debug!("n = {}, m = {}, seed = {:?}", n, m, seed);
    let mut tree = match seed {
        Some(seed) => TreapSegmentTree::<u64>::with_seed(n, seed)?,
        None => TreapSegmentTree::<u64>::new(n)?,
    };
    for _ in 0..m {
        match tokens.value::<u32>()? {
            1 => {
                let i: usize = tokens.value()?;
                let h: u64 = tokens.value()?;
                tree.update(i, h)?;
            }
            2 => {
                let (l, r) = half_open(tokens.value()?, tokens.value()?, n)?;
                let p: u64 = tokens.value()?;
                writeln!(out, "{}", tree.query(l, r, &p)?)?;
            }
            op => return Err(BatchError::UnknownOperation(op)),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(exercise: Exercise, input: &str) -> String {
        let mut out = Vec::new();
        run(exercise, input, Some(7), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn sum_requests() {
        let input = "5 4\n3 1 4 1 5\n2 0 3\n1 2 9\n2 1 4\n2 4 5\n";
        assert_eq!(answer(Exercise::Sum, input), "8\n11\n5\n");
    }

    #[test]
    fn max_segment_requests() {
        let input = "5 2\n5 -4 4 3 -5\n4 3\n3 -1\n";
        assert_eq!(answer(Exercise::MaxSegment, input), "8\n11\n7\n");
    }

    #[test]
    fn kth_one_requests() {
        let input = "5 3\n1 1 0 1 0\n2 0\n2 2\n1 2\n";
        assert_eq!(answer(Exercise::KthOne, input), "0\n3\n");
        let input = "5 4\n1 1 0 1 0\n2 0\n2 2\n1 2\n2 3\n";
        assert_eq!(answer(Exercise::KthOne, input), "0\n3\n3\n");
    }

    #[test]
    fn first_at_least_requests() {
        let input = "5 5\n1 3 2 4 6\n2 2\n2 5\n1 2 5\n2 5\n2 7\n";
        assert_eq!(answer(Exercise::FirstAtLeast, input), "1\n4\n2\n-1\n");
        let input = "5 5\n1 3 2 4 3\n2 3 0\n2 3 2\n2 5 0\n1 2 7\n2 5 0\n";
        assert_eq!(answer(Exercise::FirstAtLeastFrom, input), "1\n3\n-1\n2\n");
    }

    #[test]
    fn permutation_requests() {
        assert_eq!(answer(Exercise::Inversions, "5\n4 1 5 2 3\n"), "0 1 0 2 2\n");
        assert_eq!(
            answer(Exercise::RestorePermutation, "5\n0 1 0 2 2\n"),
            "4 1 5 2 3\n"
        );
    }

    #[test]
    fn segment_requests() {
        assert_eq!(answer(Exercise::NestedSegments, "3\n1 2 2 3 3 1\n"), "2 0 0\n");
        assert_eq!(
            answer(Exercise::IntersectingSegments, "3\n1 2 1 3 2 3\n"),
            "1 2 1\n"
        );
    }

    #[test]
    fn range_add_requests() {
        let input = "5 5\n1 0 3 3\n1 1 5 4\n2 0\n2 4\n2 1\n";
        assert_eq!(answer(Exercise::RangeAdd, input), "3\n4\n7\n");
    }

    #[test]
    fn distinct_requests() {
        let input = "5 4\n1 2 3 1 2\n1 1 5\n2 3 1\n1 1 5\n1 4 4\n";
        assert_eq!(answer(Exercise::Distinct, input), "3\n2\n1\n");
    }

    #[test]
    fn cryptography_requests() {
        let input = "10 3 3\n0 1\n1 1\n\n0 1\n1 1\n\n1 2\n0 1\n\n1 2\n1 3\n3 3\n";
        assert_eq!(
            answer(Exercise::Cryptography, input),
            "1 1\n1 2\n\n1 3\n1 4\n\n1 2\n0 1\n\n"
        );
    }

    #[test]
    fn earthquake_requests() {
        let input = "5 5\n1 0 3\n1 2 5\n1 4 1\n2 0 5 4\n2 0 5 5\n";
        assert_eq!(answer(Exercise::Earthquakes, input), "2\n1\n");
    }

    #[test]
    fn malformed_input_is_reported() {
        let mut out = Vec::new();
        assert!(matches!(
            run(Exercise::Sum, "3 1\n1 2", None, &mut out),
            Err(BatchError::UnexpectedEof)
        ));
        assert!(matches!(
            run(Exercise::Sum, "1 1\n5\n3 0 1\n", None, &mut out),
            Err(BatchError::UnknownOperation(3))
        ));
        assert!(matches!(
            run(Exercise::Sum, "1 1\nx\n", None, &mut out),
            Err(BatchError::Parse { .. })
        ));
        assert!(matches!(
            run(Exercise::KthOne, "2 0\n1 2\n", None, &mut out),
            Err(BatchError::NotABit(2))
        ));
        assert!(matches!(
            run(Exercise::Sum, "2 1\n1 2\n2 1 1\n", None, &mut out),
            Err(BatchError::Tree(Error::InvalidRange { l: 1, r: 1, len: 2 }))
        ));
    }
}
