use rand::{seq::SliceRandom, Rng};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{InputError, MoveError};

/// Smallest and largest board side accepted at the input boundary.
pub const MIN_SIZE: usize = 2;
pub const MAX_SIZE: usize = 16;

/// A move code, named after the direction the neighbouring *tile* slides
/// into the blank.
///
/// The blank travels the other way, which is what [`Move::label`] (and
/// `Display`) report: `Move::Up` lifts the tile below the blank, so the
/// blank goes "Down".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Canonical generation order. Depth-first exploration order depends on it.
    pub const ALL: [Move; 4] = [Move::Down, Move::Up, Move::Right, Move::Left];

    pub fn code(&self) -> char {
        match self {
            Move::Up => 'U',
            Move::Down => 'D',
            Move::Left => 'L',
            Move::Right => 'R',
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    /// Direction the blank travels when this move is applied.
    pub fn label(&self) -> &'static str {
        match self {
            Move::Up => "Down",
            Move::Down => "Up",
            Move::Left => "Right",
            Move::Right => "Left",
        }
    }

    /// Linear offset from the blank to the tile that slides.
    pub fn as_offset(&self, size: usize) -> isize {
        let size = size as isize;
        match self {
            Move::Up => size,
            Move::Down => -size,
            Move::Left => 1,
            Move::Right => -1,
        }
    }

    fn applies(&self, row: usize, col: usize, size: usize) -> bool {
        match self {
            Move::Down => row != 0,
            Move::Up => row != size - 1,
            Move::Right => col != 0,
            Move::Left => col != size - 1,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Move {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// One configuration of the puzzle plus the moves that led to it.
///
/// Tiles are stored row-major; `0` is the blank. The goal is the identity
/// arrangement `0, 1, .., N-1`. Boards are never mutated once built:
/// [`Board::result`] returns a new board and leaves `self` untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    tiles: Vec<u8>,
    blank: usize,
    incoming: Option<Move>,
    path: Vec<Move>,
}

impl Board {
    /// Builds a root board from a row-major permutation of `0..N`.
    pub fn new(tiles: Vec<usize>) -> Result<Self, InputError> {
        if tiles.is_empty() {
            return Err(InputError::Empty);
        }
        let len = tiles.len();
        let size = (1..=len).find(|s| s * s >= len).unwrap_or(len);
        if size * size != len {
            return Err(InputError::NotSquare(len));
        }
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(InputError::UnsupportedSize(size));
        }

        let mut seen = vec![false; len];
        for &value in &tiles {
            if value >= len {
                return Err(InputError::OutOfRange { value, len });
            }
            if seen[value] {
                return Err(InputError::Duplicate(value));
            }
            seen[value] = true;
        }

        // A duplicate-free sequence of N values below N always contains 0.
        let blank = tiles.iter().position(|&v| v == 0).unwrap_or_default();
        Ok(Self {
            size,
            tiles: tiles.into_iter().map(|v| v as u8).collect(),
            blank,
            incoming: None,
            path: Vec::new(),
        })
    }

    /// The goal board of the given side.
    pub fn solved(size: usize) -> Result<Self, InputError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(InputError::UnsupportedSize(size));
        }
        Self::new((0..size * size).collect())
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    pub fn blank_index(&self) -> usize {
        self.blank
    }

    pub fn incoming_move(&self) -> Option<Move> {
        self.incoming
    }

    pub fn path(&self) -> &[Move] {
        &self.path
    }

    /// Number of moves from the root, i.e. the length of [`Board::path`].
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Legal moves in canonical order, minus the one that would undo the
    /// move that produced this board.
    pub fn actions(&self) -> Vec<Move> {
        let (row, col) = (self.blank / self.size, self.blank % self.size);
        let undo = self.incoming.map(|m| m.opposite());

        Move::ALL
            .into_iter()
            .filter(|m| m.applies(row, col, self.size))
            .filter(|m| Some(*m) != undo)
            .collect()
    }

    /// The board reached by applying `movement`.
    pub fn result(&self, movement: Move) -> Result<Self, MoveError> {
        let (row, col) = (self.blank / self.size, self.blank % self.size);
        if !movement.applies(row, col, self.size) {
            return Err(MoveError::Illegal {
                code: movement,
                blank_index: self.blank,
            });
        }

        let target = (self.blank as isize + movement.as_offset(self.size)) as usize;
        let mut tiles = self.tiles.clone();
        tiles.swap(self.blank, target);

        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(movement);

        Ok(Self {
            size: self.size,
            tiles,
            blank: target,
            incoming: Some(movement),
            path,
        })
    }

    pub fn is_goal(&self) -> bool {
        self.tiles
            .iter()
            .enumerate()
            .all(|(i, &tile)| tile as usize == i)
    }

    /// Sum of Manhattan distances of every numbered tile to its goal cell.
    ///
    /// The blank is skipped: counting it would let a single move lower the
    /// estimate by two and the estimate would stop being admissible.
    pub fn heuristic(&self) -> usize {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(_, &tile)| tile != 0)
            .map(|(pos, &tile)| {
                let tile = tile as usize;
                (pos / self.size).abs_diff(tile / self.size)
                    + (pos % self.size).abs_diff(tile % self.size)
            })
            .sum()
    }

    /// Whether the goal is reachable, by permutation parity.
    ///
    /// Odd sides: the inversion count must be even. Even sides: a vertical
    /// move flips the inversion parity and the blank row together, so
    /// inversions plus the blank row must be even (the goal has zero of both).
    pub fn is_solvable(&self) -> bool {
        let inversions = count_inversions(&self.tiles);

        if self.size % 2 == 1 {
            inversions % 2 == 0
        } else {
            (inversions + self.blank / self.size) % 2 == 0
        }
    }

    /// Applies `shuffles` random generator moves. The returned board keeps
    /// the scramble in its path; call [`Board::into_root`] before searching.
    pub fn scramble<R: Rng + ?Sized>(&self, shuffles: usize, rng: &mut R) -> Self {
        let mut board = self.clone();
        for _ in 0..shuffles {
            let Some(&movement) = board.actions().choose(rng) else {
                break;
            };
            // Generated moves always apply.
            if let Ok(next) = board.result(movement) {
                board = next;
            }
        }
        board
    }

    /// Drops the history so the board can seed a fresh search.
    pub fn into_root(self) -> Self {
        Self {
            incoming: None,
            path: Vec::new(),
            ..self
        }
    }
}

fn count_inversions(tiles: &[u8]) -> usize {
    tiles
        .iter()
        .enumerate()
        .filter(|&(_, &val)| val != 0)
        .map(|(i, &val)| {
            tiles[i + 1..]
                .iter()
                .filter(|&&next| next != 0 && next < val)
                .count()
        })
        .sum()
}

impl FromStr for Board {
    type Err = InputError;

    /// Parses a comma-separated, row-major tile list such as `1,2,5,3,4,0,6,7,8`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(InputError::Empty);
        }
        let tiles = s
            .split(',')
            .map(|t| {
                let t = t.trim();
                t.parse::<usize>()
                    .map_err(|_| InputError::NotANumber(t.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(tiles)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(self.size) {
            for &val in row {
                write!(f, "{:2} ", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn parses_and_locates_blank() {
        let b = board("1,2,5,3,4,0,6,7,8");
        assert_eq!(b.size(), 3);
        assert_eq!(b.blank_index(), 5);
        assert_eq!(b.tiles()[b.blank_index()], 0);
        assert_eq!(b.incoming_move(), None);
        assert!(b.path().is_empty());
    }

    #[test]
    fn rejects_malformed_boards() {
        assert_eq!("".parse::<Board>(), Err(InputError::Empty));
        assert_eq!(
            "0,1,x,3".parse::<Board>(),
            Err(InputError::NotANumber("x".into()))
        );
        assert_eq!("0,1,2".parse::<Board>(), Err(InputError::NotSquare(3)));
        assert_eq!("0".parse::<Board>(), Err(InputError::UnsupportedSize(1)));
        assert_eq!(
            "0,1,2,4".parse::<Board>(),
            Err(InputError::OutOfRange { value: 4, len: 4 })
        );
        assert_eq!("0,1,1,2".parse::<Board>(), Err(InputError::Duplicate(1)));
    }

    #[test]
    fn corner_blank_has_two_actions_in_canonical_order() {
        let b = Board::solved(3).unwrap();
        assert_eq!(b.actions(), vec![Move::Up, Move::Left]);

        let centre = board("1,2,3,4,0,5,6,7,8");
        assert_eq!(
            centre.actions(),
            vec![Move::Down, Move::Up, Move::Right, Move::Left]
        );
        let labels: Vec<_> = centre.actions().iter().map(Move::label).collect();
        assert_eq!(labels, ["Up", "Down", "Left", "Right"]);
    }

    #[test]
    fn actions_never_undo_the_incoming_move() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut b = Board::solved(4).unwrap();
        for _ in 0..200 {
            let actions = b.actions();
            let (row, col) = (b.blank_index() / 4, b.blank_index() % 4);
            if let Some(incoming) = b.incoming_move() {
                assert!(!actions.contains(&incoming.opposite()));
            }
            for m in &actions {
                assert!(m.applies(row, col, 4));
            }
            let m = *actions.choose(&mut rng).unwrap();
            b = b.result(m).unwrap();
        }
    }

    #[test]
    fn result_swaps_blank_and_records_path() {
        let root = Board::solved(3).unwrap();
        let next = root.result(Move::Up).unwrap();
        assert_eq!(next.tiles(), &[3, 1, 2, 0, 4, 5, 6, 7, 8]);
        assert_eq!(next.blank_index(), 3);
        assert_eq!(next.incoming_move(), Some(Move::Up));
        assert_eq!(next.path(), &[Move::Up]);
        // the parent is untouched
        assert!(root.is_goal());
        assert_eq!(root.depth(), 0);
    }

    #[test]
    fn move_and_its_opposite_round_trip() {
        let root = board("1,2,5,3,4,0,6,7,8");
        for m in root.actions() {
            let there = root.result(m).unwrap();
            let back = there.result(m.opposite()).unwrap();
            assert_eq!(back.tiles(), root.tiles());
            assert_eq!(back.blank_index(), root.blank_index());
            assert_eq!(back.path(), &[m, m.opposite()]);
        }
    }

    #[test]
    fn illegal_move_is_an_error() {
        let root = Board::solved(3).unwrap();
        assert_eq!(
            root.result(Move::Down),
            Err(MoveError::Illegal {
                code: Move::Down,
                blank_index: 0
            })
        );
        assert!(root.result(Move::Right).is_err());
    }

    #[test]
    fn heuristic_values() {
        assert_eq!(Board::solved(3).unwrap().heuristic(), 0);
        assert_eq!(board("1,0,2,3,4,5,6,7,8").heuristic(), 1);
        // 8 sits two rows and two columns from home
        assert_eq!(board("8,1,2,3,4,5,6,7,0").heuristic(), 4);
    }

    #[test]
    fn solvability_parity() {
        assert!(Board::solved(3).unwrap().is_solvable());
        assert!(!board("0,2,1,3,4,5,6,7,8").is_solvable());
        assert!(Board::solved(4).unwrap().is_solvable());
        assert!(!board("0,2,1,3,4,5,6,7,8,9,10,11,12,13,14,15").is_solvable());

        let mut rng = StdRng::seed_from_u64(11);
        for size in 2..=5 {
            let b = Board::solved(size).unwrap().scramble(40, &mut rng);
            assert!(b.is_solvable(), "scrambled {size}x{size} must be solvable");
        }
    }

    #[test]
    fn scramble_keeps_path_until_rerooted() {
        let mut rng = StdRng::seed_from_u64(3);
        let b = Board::solved(3).unwrap().scramble(5, &mut rng);
        assert_eq!(b.depth(), 5);
        let root = b.clone().into_root();
        assert_eq!(root.depth(), 0);
        assert_eq!(root.incoming_move(), None);
        assert_eq!(root.tiles(), b.tiles());
    }

    #[test]
    fn display_renders_rows() {
        let b = Board::solved(2).unwrap();
        assert_eq!(b.to_string(), " 0  1 \n 2  3 \n");
    }
}
