pub mod groups;

pub mod batch;
mod descent;
mod error;
pub mod exercises;
mod matrix;
mod max_segment;
mod range_add;
mod segment_tree;
mod tiny_set;
mod treap;
mod treap_segment_tree;

pub use descent::Direction;
pub use error::{Error, Result};
pub use matrix::{Matrix, Matrix2, ModMatrixProduct};
pub use max_segment::{MaxSegment, MaxSegments};
pub use range_add::RangeAddTree;
pub use segment_tree::SegmentTree;
pub use tiny_set::{TinySet, TinySetUnion};
pub use treap::{Count, Treap};
pub use treap_segment_tree::TreapSegmentTree;
