//! Depth-limited search and the two iterative-deepening drivers built on it.

use super::Budget;
use crate::error::SearchError;
use crate::puzzle::Board;
use crate::stats::RunStats;

/// Outcome of a single depth-limited round.
#[derive(Debug)]
enum Round {
    Found(RunStats),
    /// Some state was not expanded because its cost reached the limit;
    /// `min_rejected` is the smallest such cost.
    Cutoff { min_rejected: usize },
    /// The stack emptied without cutting anything off.
    Exhausted,
}

/// Explores states whose `cost` is below `limit`, depth first, with an
/// explicit stack.
fn depth_limited_search<F>(
    root: &Board,
    limit: usize,
    cost: &F,
    budget: &mut Budget,
) -> Result<Round, SearchError>
where
    F: Fn(&Board) -> usize,
{
    let mut stats = RunStats::default();
    let mut stack = vec![root.clone()];
    let mut min_rejected: Option<usize> = None;

    while let Some(state) = stack.pop() {
        stats.observe_fringe(stack.len() + 1);

        if state.is_goal() {
            return Ok(Round::Found(stats.finish(&state, stack.len())));
        }

        budget.charge()?;
        stats.nodes_expanded += 1;

        let f = cost(&state);
        if f < limit {
            // reversed so the canonical first action is popped first
            for movement in state.actions().into_iter().rev() {
                stack.push(state.result(movement)?);
                stats.observe_depth(state.depth() + 1);
            }
        } else {
            min_rejected = Some(min_rejected.map_or(f, |m| m.min(f)));
        }
    }

    Ok(match min_rejected {
        Some(min_rejected) => Round::Cutoff { min_rejected },
        None => Round::Exhausted,
    })
}

/// Repeats depth-limited rounds from limit 1, raising the limit to one past
/// the cheapest rejected cost after each cutoff. With `cost = depth` this is
/// a plain +1 step; with `depth + heuristic` it skips limits that could not
/// admit any new state.
///
/// The statistics returned are those of the final round.
fn iterative_deepening<F>(root: &Board, cost: F, budget: &mut Budget) -> Result<RunStats, SearchError>
where
    F: Fn(&Board) -> usize,
{
    let mut limit = 1;
    let mut rounds = 1u32;
    loop {
        match depth_limited_search(root, limit, &cost, budget)? {
            Round::Found(stats) => {
                tracing::debug!(rounds, limit, "deepening finished");
                return Ok(stats);
            }
            Round::Cutoff { min_rejected } => {
                tracing::debug!(round = rounds, limit, next = min_rejected + 1, "cutoff");
                limit = min_rejected + 1;
                rounds += 1;
            }
            Round::Exhausted => return Err(SearchError::NoSolution),
        }
    }
}

pub(crate) fn dfs(root: &Board, budget: &mut Budget) -> Result<RunStats, SearchError> {
    iterative_deepening(root, Board::depth, budget)
}

pub(crate) fn ida(root: &Board, budget: &mut Budget) -> Result<RunStats, SearchError> {
    iterative_deepening(root, |b: &Board| b.depth() + b.heuristic(), budget)
}
