use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::puzzle::{Board, Move};

/// Counters accumulated by one search run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Moves from the root to the goal; serialized as blank-direction labels.
    pub path_to_goal: Vec<Move>,
    pub cost_of_path: usize,
    /// Non-terminal pops.
    pub nodes_expanded: u64,
    /// Frontier size left behind when the goal was popped.
    pub fringe_size: usize,
    pub max_fringe_size: usize,
    pub search_depth: usize,
    pub max_search_depth: usize,
}

impl RunStats {
    pub(crate) fn observe_fringe(&mut self, len: usize) {
        self.max_fringe_size = self.max_fringe_size.max(len);
    }

    pub(crate) fn observe_depth(&mut self, depth: usize) {
        self.max_search_depth = self.max_search_depth.max(depth);
    }

    /// Closes the run on `goal`, with `remaining` states still on the frontier.
    pub(crate) fn finish(mut self, goal: &Board, remaining: usize) -> Self {
        self.path_to_goal = goal.path().to_vec();
        self.cost_of_path = goal.depth();
        self.fringe_size = remaining;
        self.search_depth = goal.depth();
        self
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.path_to_goal.iter().map(Move::label).collect()
    }
}

/// Search statistics plus the figures the driver samples around the run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    #[serde(flatten)]
    pub stats: RunStats,
    /// Wall-clock seconds.
    pub running_time: f64,
    /// Peak resident set size in megabytes, when the platform exposes it.
    pub max_ram_usage: Option<f64>,
}

impl Report {
    pub fn new(stats: RunStats, running_time: Duration, max_ram_usage: Option<f64>) -> Self {
        Self {
            stats,
            running_time: running_time.as_secs_f64(),
            max_ram_usage,
        }
    }
}

impl fmt::Display for Report {
    /// One `key: value` line per field, in the fixed reporting order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self
            .stats
            .labels()
            .iter()
            .map(|l| format!("'{l}'"))
            .collect::<Vec<_>>()
            .join(", ");

        writeln!(f, "path_to_goal: [{path}]")?;
        writeln!(f, "cost_of_path: {}", self.stats.cost_of_path)?;
        writeln!(f, "nodes_expanded: {}", self.stats.nodes_expanded)?;
        writeln!(f, "fringe_size: {}", self.stats.fringe_size)?;
        writeln!(f, "max_fringe_size: {}", self.stats.max_fringe_size)?;
        writeln!(f, "search_depth: {}", self.stats.search_depth)?;
        writeln!(f, "max_search_depth: {}", self.stats.max_search_depth)?;
        writeln!(f, "running_time: {:.8}", self.running_time)?;
        match self.max_ram_usage {
            Some(mb) => writeln!(f, "max_ram_usage: {mb:.8}"),
            None => writeln!(f, "max_ram_usage: unavailable"),
        }
    }
}
