use thiserror::Error;

use crate::puzzle::Move;

/// Rejections raised while turning caller input into a board or strategy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("board is empty")]
    Empty,
    #[error("invalid tile {0:?}: expected a non-negative integer")]
    NotANumber(String),
    #[error("board has {0} tiles, which is not a perfect square")]
    NotSquare(usize),
    #[error("board side {0} is outside the supported range 2..=16")]
    UnsupportedSize(usize),
    #[error("tile {value} is out of range for a board of {len} tiles")]
    OutOfRange { value: usize, len: usize },
    #[error("tile {0} appears more than once")]
    Duplicate(usize),
    #[error("unknown algorithm {0:?}: expected one of dfs, bfs, ida, ast")]
    UnknownStrategy(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("move {} is not legal with the blank at index {blank_index}", .code.code())]
    Illegal { code: Move, blank_index: usize },
}

/// Ways a search can end without producing statistics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("no solution: the goal is unreachable from this board")]
    NoSolution,
    #[error("node budget of {limit} expansions exhausted before reaching the goal")]
    NodeBudgetExceeded { limit: u64 },
    #[error(transparent)]
    IllegalMove(#[from] MoveError),
}
