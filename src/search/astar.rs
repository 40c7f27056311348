use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::Budget;
use crate::error::SearchError;
use crate::puzzle::Board;
use crate::stats::RunStats;

/// Frontier ordering key: lower `f_cost` first, then shallower `depth`, then
/// older `sequence`. Boards themselves never take part in the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierKey {
    f_cost: usize,
    depth: usize,
    sequence: u64,
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_cost
            .cmp(&other.f_cost)
            .then(self.depth.cmp(&other.depth))
            .then(self.sequence.cmp(&other.sequence))
    }
}

/// `BinaryHeap` is a max-heap, so the key is wrapped in `Reverse`.
struct FrontierEntry {
    key: Reverse<FrontierKey>,
    board: Board,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Min-priority frontier keyed on `depth + heuristic`.
struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    next_sequence: u64,
}

impl Frontier {
    fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }

    fn push(&mut self, board: Board) {
        let key = FrontierKey {
            f_cost: board.depth() + board.heuristic(),
            depth: board.depth(),
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.heap.push(FrontierEntry {
            key: Reverse(key),
            board,
        });
    }

    fn pop(&mut self) -> Option<Board> {
        self.heap.pop().map(|entry| entry.board)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

pub(crate) fn astar(root: &Board, budget: &mut Budget) -> Result<RunStats, SearchError> {
    let mut stats = RunStats::default();
    let mut frontier = Frontier::new();
    frontier.push(root.clone());

    while let Some(state) = frontier.pop() {
        stats.observe_fringe(frontier.len() + 1);

        if state.is_goal() {
            return Ok(stats.finish(&state, frontier.len()));
        }

        budget.charge()?;
        stats.nodes_expanded += 1;

        for movement in state.actions() {
            frontier.push(state.result(movement)?);
            stats.observe_depth(state.depth() + 1);
        }
    }

    Err(SearchError::NoSolution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Move;

    #[test]
    fn lower_f_cost_wins() {
        let a = FrontierKey {
            f_cost: 1,
            depth: 5,
            sequence: 10,
        };
        let b = FrontierKey {
            f_cost: 2,
            depth: 0,
            sequence: 0,
        };
        assert!(a < b);
    }

    #[test]
    fn ties_break_on_depth_then_sequence() {
        let shallow = FrontierKey {
            f_cost: 4,
            depth: 1,
            sequence: 9,
        };
        let deep = FrontierKey {
            f_cost: 4,
            depth: 3,
            sequence: 0,
        };
        assert!(shallow < deep);

        let older = FrontierKey { sequence: 2, ..deep };
        assert!(older < FrontierKey { sequence: 3, ..deep });
    }

    #[test]
    fn frontier_pops_in_insertion_order_on_equal_keys() {
        let root = Board::solved(3).unwrap();
        let right = root.result(Move::Left).unwrap();
        let down = root.result(Move::Up).unwrap();
        // both sit one move out with f = 1 + 1
        let mut frontier = Frontier::new();
        frontier.push(right.clone());
        frontier.push(down.clone());
        assert_eq!(frontier.pop(), Some(right));
        assert_eq!(frontier.pop(), Some(down));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn finds_shortest_path() {
        let root: Board = "1,2,5,3,4,0,6,7,8".parse().unwrap();
        let stats = astar(&root, &mut Budget::new(None)).unwrap();
        assert_eq!(stats.labels(), ["Up", "Left", "Left"]);
        assert_eq!(stats.cost_of_path, 3);
        assert_eq!(stats.nodes_expanded, 3);
    }
}
