//! Sliding-tile puzzle solver.
//!
//! A [`Board`] is parsed from a row-major tile list, then handed to one of
//! the four [`Strategy`] variants, which returns [`RunStats`] describing the
//! path found and the effort spent.
//!
//! ```
//! use slider_search::{Board, Strategy};
//!
//! let board: Board = "1,2,5,3,4,0,6,7,8".parse().unwrap();
//! let stats = Strategy::AStar.run(&board).unwrap();
//! assert_eq!(stats.labels(), ["Up", "Left", "Left"]);
//! ```

pub mod error;
pub mod puzzle;
pub mod search;
pub mod stats;

pub use error::{InputError, MoveError, SearchError};
pub use puzzle::{Board, Move};
pub use search::{SearchConfig, Strategy};
pub use stats::{Report, RunStats};
