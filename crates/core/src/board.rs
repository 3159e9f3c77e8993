//! Board module - manages the tile grid
//!
//! The board is an NxN grid of tile values where `0` is an empty cell and every
//! other value is a power of two. Uses a flat row-major vector sized once at
//! construction.
//! Coordinates: (row, col) where row 0 is the top edge and col 0 the left edge.

use arrayvec::ArrayVec;

use crate::error::{EngineError, Result};
use crate::types::{
    Pos, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MAX_CELLS, MAX_TILE, MIN_BOARD_SIZE, WIN_TILE,
};

/// The game board - `size` x `size` cells using flat vector storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: u8,
    /// Flat array of cells, row-major order (row * size + col)
    cells: Vec<u32>,
}

impl Board {
    /// Create a new empty board
    pub fn new(size: u8) -> Result<Self> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(EngineError::InvalidArgument(format!(
                "board size {size} outside {MIN_BOARD_SIZE}..={MAX_BOARD_SIZE}"
            )));
        }
        Ok(Self {
            size,
            cells: vec![0; size as usize * size as usize],
        })
    }

    /// Build a board from rows (top to bottom).
    ///
    /// Every row must have the same length as the row count, and every value must
    /// be 0 or a power of two between 2 and `MAX_TILE`.
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self> {
        let size = u8::try_from(rows.len())
            .map_err(|_| EngineError::InvalidArgument(format!("{} rows", rows.len())))?;
        let mut board = Self::new(size)?;
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != size as usize {
                return Err(EngineError::InvalidArgument(format!(
                    "row {r} has {} cells, expected {size}",
                    row.len()
                )));
            }
            for (c, &value) in row.iter().enumerate() {
                if !is_tile_value(value) {
                    return Err(EngineError::InvalidArgument(format!(
                        "cell ({r}, {c}) holds {value}, not a tile value"
                    )));
                }
                board.cells[r * size as usize + c] = value;
            }
        }
        Ok(board)
    }

    /// Build a board from a fixed-size array of rows.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_core::Board;
    ///
    /// let board = Board::from_array([[2, 0], [0, 4]]).unwrap();
    /// assert_eq!(board.tile_count(), 2);
    /// ```
    pub fn from_array<const N: usize>(rows: [[u32; N]; N]) -> Result<Self> {
        Self::from_rows(&rows)
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: Pos) -> Option<usize> {
        if pos.row >= self.size || pos.col >= self.size {
            return None;
        }
        Some(pos.row as usize * self.size as usize + pos.col as usize)
    }

    /// Value at an in-bounds position (engine hot path)
    #[inline(always)]
    pub(crate) fn value_at(&self, pos: Pos) -> u32 {
        self.cells[pos.row as usize * self.size as usize + pos.col as usize]
    }

    /// Side length of the board
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Get cell at position
    /// Returns None if out of bounds
    pub fn get(&self, pos: Pos) -> Option<u32> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Set cell at position
    /// Returns false if out of bounds
    pub fn set(&mut self, pos: Pos, value: u32) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    pub fn is_empty_at(&self, pos: Pos) -> bool {
        self.get(pos) == Some(0)
    }

    /// Empty cells in row-major order, collected without allocating
    pub fn empty_cells(&self) -> ArrayVec<Pos, MAX_CELLS> {
        let mut out = ArrayVec::new();
        for (idx, &value) in self.cells.iter().enumerate() {
            if value == 0 {
                out.push(self.pos_of(idx));
            }
        }
        out
    }

    pub fn has_empty_cell(&self) -> bool {
        self.cells.iter().any(|&v| v == 0)
    }

    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }

    /// True when some cell equals its right or down neighbour and the pair can
    /// still merge
    pub fn has_adjacent_pair(&self) -> bool {
        let n = self.size as usize;
        for r in 0..n {
            for c in 0..n {
                let v = self.cells[r * n + c];
                if v == 0 || v >= MAX_TILE {
                    continue;
                }
                if c + 1 < n && self.cells[r * n + c + 1] == v {
                    return true;
                }
                if r + 1 < n && self.cells[(r + 1) * n + c] == v {
                    return true;
                }
            }
        }
        false
    }

    /// True when at least one direction would change the board
    pub fn can_move(&self) -> bool {
        self.has_empty_cell() || self.has_adjacent_pair()
    }

    pub fn max_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    pub fn has_winning_tile(&self) -> bool {
        self.cells.iter().any(|&v| v >= WIN_TILE)
    }

    /// Owned copy of the rows (top to bottom)
    pub fn rows(&self) -> Vec<Vec<u32>> {
        self.cells
            .chunks(self.size as usize)
            .map(|row| row.to_vec())
            .collect()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    fn pos_of(&self, idx: usize) -> Pos {
        let n = self.size as usize;
        Pos::new((idx / n) as u8, (idx % n) as u8)
    }
}

impl Default for Board {
    /// Empty classic 4x4 board
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            cells: vec![0; DEFAULT_BOARD_SIZE as usize * DEFAULT_BOARD_SIZE as usize],
        }
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(self.size as usize) {
            for (i, v) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                if *v == 0 {
                    write!(f, "{:>5}", ".")?;
                } else {
                    write!(f, "{v:>5}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// 0 (empty) or a power of two in `2..=MAX_TILE`
pub fn is_tile_value(value: u32) -> bool {
    value == 0 || (value >= 2 && value <= MAX_TILE && value.is_power_of_two())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_is_empty() {
        let board = Board::new(4).unwrap();
        assert_eq!(board.size(), 4);
        assert_eq!(board.tile_count(), 0);
        assert_eq!(board.empty_cells().len(), 16);
        assert!(board.can_move());
    }

    #[test]
    fn rejects_sizes_out_of_range() {
        assert!(Board::new(1).is_err());
        assert!(Board::new(17).is_err());
        assert!(Board::new(2).is_ok());
        assert!(Board::new(16).is_ok());
    }

    #[test]
    fn from_rows_validates_values_and_shape() {
        assert!(Board::from_array([[2, 0], [0, 4]]).is_ok());
        assert!(Board::from_array([[3, 0], [0, 4]]).is_err());
        assert!(Board::from_array([[1, 0], [0, 4]]).is_err());
        assert!(Board::from_rows(&[vec![2u32, 0, 0], vec![0u32, 4, 0]]).is_err());
        assert!(Board::from_array([[MAX_TILE, 0], [0, 4]]).is_ok());
        assert!(Board::from_array([[1 << 31, 1 << 31], [0, 0]]).is_err());
    }

    #[test]
    fn get_and_set_respect_bounds() {
        let mut board = Board::new(4).unwrap();
        assert!(board.set(Pos::new(3, 3), 8));
        assert_eq!(board.get(Pos::new(3, 3)), Some(8));
        assert!(!board.set(Pos::new(4, 0), 8));
        assert_eq!(board.get(Pos::new(0, 4)), None);
    }

    #[test]
    fn adjacent_pair_detection_checks_right_and_down() {
        let horizontal = Board::from_array([[2, 2], [4, 8]]).unwrap();
        assert!(horizontal.has_adjacent_pair());

        let vertical = Board::from_array([[2, 4], [2, 8]]).unwrap();
        assert!(vertical.has_adjacent_pair());

        let stuck = Board::from_array([[2, 4], [4, 2]]).unwrap();
        assert!(!stuck.has_adjacent_pair());
        assert!(!stuck.can_move());

        let capped = Board::from_array([[MAX_TILE, MAX_TILE], [2, 4]]).unwrap();
        assert!(!capped.has_adjacent_pair());
        assert!(!capped.can_move());
    }

    #[test]
    fn empty_cells_are_row_major() {
        let board = Board::from_array([[2, 0], [0, 4]]).unwrap();
        let empties = board.empty_cells();
        assert_eq!(empties.as_slice(), &[Pos::new(0, 1), Pos::new(1, 0)]);
    }

    #[test]
    fn rows_returns_an_independent_copy() {
        let mut board = Board::from_array([[2, 0], [0, 4]]).unwrap();
        let rows = board.rows();
        board.set(Pos::new(0, 0), 16);
        assert_eq!(rows, vec![vec![2, 0], vec![0, 4]]);
    }
}
