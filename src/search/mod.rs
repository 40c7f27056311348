//! The four search strategies over [`Board`] states.
//!
//! Every strategy pops states from its own frontier, tests them against the
//! goal, and expands them through [`Board::actions`] / [`Board::result`].
//! None of them keeps a closed set: only the immediate reversal of the last
//! move is pruned, exactly as the move generator does.

mod astar;
mod breadth;
mod deepening;

use std::fmt;
use std::str::FromStr;

use crate::error::{InputError, SearchError};
use crate::puzzle::Board;
use crate::stats::RunStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Depth-first search with iterative deepening on path length.
    Dfs,
    Bfs,
    /// Iterative-deepening A*, cutting off on depth plus heuristic.
    Ida,
    AStar,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [Strategy::Dfs, Strategy::Bfs, Strategy::Ida, Strategy::AStar];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Dfs => "dfs",
            Strategy::Bfs => "bfs",
            Strategy::Ida => "ida",
            Strategy::AStar => "ast",
        }
    }

    /// Whether the returned path is guaranteed to be a shortest one.
    pub fn is_optimal(&self) -> bool {
        !matches!(self, Strategy::Dfs)
    }

    /// Solves `root` without a node budget.
    pub fn run(&self, root: &Board) -> Result<RunStats, SearchError> {
        self.run_with(root, &SearchConfig::default())
    }

    pub fn run_with(&self, root: &Board, config: &SearchConfig) -> Result<RunStats, SearchError> {
        if !root.is_solvable() {
            tracing::warn!(strategy = self.name(), "board fails the parity test, goal is unreachable");
            return Err(SearchError::NoSolution);
        }

        let mut budget = Budget::new(config.max_nodes);
        let stats = match self {
            Strategy::Dfs => deepening::dfs(root, &mut budget),
            Strategy::Bfs => breadth::bfs(root, &mut budget),
            Strategy::Ida => deepening::ida(root, &mut budget),
            Strategy::AStar => astar::astar(root, &mut budget),
        }?;

        tracing::info!(
            strategy = self.name(),
            cost = stats.cost_of_path,
            nodes_expanded = stats.nodes_expanded,
            max_fringe_size = stats.max_fringe_size,
            "goal reached"
        );
        Ok(stats)
    }
}

impl FromStr for Strategy {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dfs" => Ok(Strategy::Dfs),
            "bfs" => Ok(Strategy::Bfs),
            "ida" => Ok(Strategy::Ida),
            "ast" | "astar" => Ok(Strategy::AStar),
            _ => Err(InputError::UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Caller-side limits on a search run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchConfig {
    /// Maximum number of expansions over the whole run, counting every
    /// deepening round. `None` searches until the goal is found.
    pub max_nodes: Option<u64>,
}

impl SearchConfig {
    pub fn with_max_nodes(max_nodes: u64) -> Self {
        Self {
            max_nodes: Some(max_nodes),
        }
    }
}

/// Running count of expansions against an optional ceiling.
pub(crate) struct Budget {
    limit: Option<u64>,
    spent: u64,
}

impl Budget {
    fn new(limit: Option<u64>) -> Self {
        Self { limit, spent: 0 }
    }

    /// Accounts for one expansion, failing once the ceiling is passed.
    pub(crate) fn charge(&mut self) -> Result<(), SearchError> {
        self.spent += 1;
        match self.limit {
            Some(limit) if self.spent > limit => Err(SearchError::NodeBudgetExceeded { limit }),
            _ => Ok(()),
        }
    }
}
