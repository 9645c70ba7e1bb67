use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("range [{l}, {r}] is invalid for length {len}")]
    InvalidRange { l: usize, r: usize, len: usize },
    #[error("rank {k} is out of range, total is {total}")]
    RankOutOfRange { k: i128, total: i128 },
    #[error("a tree needs at least one position")]
    EmptyUniverse,
    #[error("expected at most {expected} values, got {got}")]
    TooManyValues { expected: usize, got: usize },
    #[error("modulus must be positive")]
    ZeroModulus,
    #[error("value {value} does not fit into a tiny set")]
    SetValueTooLarge { value: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
