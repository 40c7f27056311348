use std::collections::VecDeque;

use super::Budget;
use crate::error::SearchError;
use crate::puzzle::Board;
use crate::stats::RunStats;

/// Breadth-first search over a FIFO queue. Shortest in move count, at the
/// price of a frontier that grows exponentially with depth.
pub(crate) fn bfs(root: &Board, budget: &mut Budget) -> Result<RunStats, SearchError> {
    let mut stats = RunStats::default();
    let mut queue = VecDeque::from([root.clone()]);

    while let Some(state) = queue.pop_front() {
        stats.observe_fringe(queue.len() + 1);

        if state.is_goal() {
            return Ok(stats.finish(&state, queue.len()));
        }

        budget.charge()?;
        stats.nodes_expanded += 1;

        for movement in state.actions() {
            queue.push_back(state.result(movement)?);
            stats.observe_depth(state.depth() + 1);
        }
    }

    Err(SearchError::NoSolution)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_move_from_goal() {
        let root: Board = "1,0,2,3,4,5,6,7,8".parse().unwrap();
        let stats = bfs(&root, &mut Budget::new(None)).unwrap();
        assert_eq!(stats.labels(), ["Left"]);
        assert_eq!(stats.cost_of_path, 1);
        // root plus, among its three children, the one ahead of the goal
        assert_eq!(stats.nodes_expanded, 2);
        assert_eq!(stats.max_search_depth, 2);
    }

    #[test]
    fn counts_fringe_at_solution_time() {
        let root: Board = "3,1,2,0,4,5,6,7,8".parse().unwrap();
        let stats = bfs(&root, &mut Budget::new(None)).unwrap();
        assert_eq!(stats.labels(), ["Up"]);
        // blank at the left edge: children Up, Down, Right; Up is popped first
        assert_eq!(stats.nodes_expanded, 1);
        assert_eq!(stats.fringe_size, 2);
        assert_eq!(stats.max_fringe_size, 3);
    }
}
