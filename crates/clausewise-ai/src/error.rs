use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EvalError {
    #[error("need at least {needed} rows, got {got}")]
    TooFewRows { needed: usize, got: usize },
    #[error("row {row} has {got} dimensions, expected {expected}")]
    Ragged { row: usize, expected: usize, got: usize },
}
