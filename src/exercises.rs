//! Offline problems answered with a marks tree. All values and labels are 0-based.

use crate::descent::Direction;
use crate::error::{Error, Result};
use crate::groups::BoolCount;
use crate::segment_tree::SegmentTree;

/// For every position of a permutation of `0..n`, how many earlier elements are greater.
pub fn earlier_greater_counts(permutation: &[usize]) -> Result<Vec<u32>> {
    let n = permutation.len();
    let mut seen = SegmentTree::new(BoolCount, n)?;
    let mut counts = Vec::with_capacity(n);
    for &v in permutation {
        // `v` itself is not marked yet, so it does not count.
        counts.push(seen.query(v, n - 1)?);
        seen.update(v, 1)?;
    }
    Ok(counts)
}

/// Inverse of [`earlier_greater_counts`]: rebuilds the permutation of `0..n` from the
/// number of earlier greater elements at each position.
pub fn restore_permutation(counts: &[u32]) -> Result<Vec<usize>> {
    let n = counts.len();
    let mut free = SegmentTree::from_values(BoolCount, vec![1; n])?;
    let mut permutation = vec![0; n];
    for (i, &count) in counts.iter().enumerate().rev() {
        // Among the values still free, the one at `i` has exactly `count` greater ones.
        let v = free.kth(count + 1, Direction::Backward)?;
        free.update(v, 0)?;
        permutation[i] = v;
    }
    Ok(permutation)
}

/// `endpoints` lists `2m` labels in `0..m`, each exactly twice: the positions where the
/// segment with that label opens and closes.
fn check_labels(endpoints: &[usize]) -> Result<usize> {
    let m = endpoints.len() / 2;
    match endpoints.iter().find(|&&k| m <= k) {
        Some(&k) => Err(Error::IndexOutOfRange { index: k, len: m }),
        None => Ok(m),
    }
}

/// For every segment, how many other segments lie strictly inside it.
pub fn nested_segment_counts(endpoints: &[usize]) -> Result<Vec<u32>> {
    let m = check_labels(endpoints)?;
    let mut closed = SegmentTree::new(BoolCount, endpoints.len())?;
    let mut opened_at = vec![None; m];
    let mut counts = vec![0; m];
    for (i, &k) in endpoints.iter().enumerate() {
        match opened_at[k] {
            None => opened_at[k] = Some(i),
            Some(j) => {
                // Marks sit on the opening positions of segments already closed.
                counts[k] = closed.query(j, i)?;
                closed.update(j, 1)?;
            }
        }
    }
    Ok(counts)
}

/// For every segment, how many segments overlap it without one containing the other.
pub fn intersecting_segment_counts(endpoints: &[usize]) -> Result<Vec<u32>> {
    let m = check_labels(endpoints)?;
    let mut open = SegmentTree::new(BoolCount, endpoints.len())?;
    let mut counts = vec![0; m];

    // Forward pass counts segments sticking out to the right, backward pass to the left.
    let reversed: Vec<usize> = endpoints.iter().rev().cloned().collect();
    for sequence in [endpoints, &reversed[..]].iter() {
        let mut opened_at = vec![None; m];
        for (i, &k) in sequence.iter().enumerate() {
            match opened_at[k] {
                None => {
                    opened_at[k] = Some(i);
                    open.update(i, 1)?;
                }
                Some(j) => {
                    counts[k] += open.query(j + 1, i)?;
                    open.update(j, 0)?;
                }
            }
        }
    }
    Ok(counts)
}
