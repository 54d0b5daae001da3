use serde::{Deserialize, Serialize};

use crate::player::PlayerNumber;

/// Number of rows and columns on the board.
pub const GRID_SIZE: usize = 9;

/// Edge length of one nonet.
pub const NONET_SIZE: usize = 3;

/// An occupied cell: who placed it and the value it holds (1..=9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub player: PlayerNumber,
    pub value: u8,
}

/// Which unit a winning placement completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WinKind {
    Row,
    Column,
    Nonet,
}

/// Details of a winning placement, passed to the board's win handler.
/// `cells` lists the nine coordinates of the completed unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinReport {
    pub player: PlayerNumber,
    pub kind: WinKind,
    pub cells: Vec<(u8, u8)>,
}

type WinHandler = Box<dyn FnMut(&WinReport) + Send>;

/// One anti-sudoku game. Placements obey standard sudoku uniqueness, but the
/// game is won by *completing* a row, column or nonet. A cell additionally
/// refuses the value most recently removed from it, so a removal cannot be
/// undone in place.
pub struct Board {
    grid: [[Option<Cell>; GRID_SIZE]; GRID_SIZE],
    last_removed: [[Option<u8>; GRID_SIZE]; GRID_SIZE],
    current: PlayerNumber,
    on_win: Option<WinHandler>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            grid: [[None; GRID_SIZE]; GRID_SIZE],
            last_removed: [[None; GRID_SIZE]; GRID_SIZE],
            current: PlayerNumber::One,
            on_win: None,
        }
    }

    /// Install the handler invoked once per winning placement.
    pub fn set_win_handler(&mut self, handler: impl FnMut(&WinReport) + Send + 'static) {
        self.on_win = Some(Box::new(handler));
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> PlayerNumber {
        self.current
    }

    /// The occupant of a cell, or `None` if the cell is empty or the
    /// coordinates are off the grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.grid.get(row)?.get(col).copied().flatten()
    }

    /// Validation-only form of [`Board::place_number`]: reports whether the
    /// placement would be legal without mutating anything.
    pub fn can_place(&self, num: u8, row: usize, col: usize) -> bool {
        self.placement_allowed(num, row, col)
    }

    /// Validate and insert a number for the current player. Returns whether
    /// the move was legal; an illegal move changes nothing.
    pub fn place_number(&mut self, num: u8, row: usize, col: usize, advance_turn: bool) -> bool {
        if !self.placement_allowed(num, row, col) {
            return false;
        }

        self.grid[row][col] = Some(Cell {
            player: self.current,
            value: num,
        });

        // Win is evaluated before the turn advances so the report names the
        // player who made the placement.
        self.check_win(row, col);

        if advance_turn {
            self.current = self.current.other();
        }
        true
    }

    /// Validate and remove a number owned by the current player. The removed
    /// value is remembered so it cannot be placed straight back into the same
    /// cell.
    pub fn remove_number(&mut self, row: usize, col: usize, advance_turn: bool) -> bool {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return false;
        }
        let Some(cell) = self.grid[row][col] else {
            return false;
        };
        if cell.player != self.current {
            return false;
        }

        self.last_removed[row][col] = Some(cell.value);
        self.grid[row][col] = None;

        if advance_turn {
            self.current = self.current.other();
        }
        true
    }

    /// Slide a number to another cell in the same row, column or nonet.
    /// Runs as remove-then-place; if the placement half fails the source cell
    /// and its last-removed entry are restored exactly, leaving the board
    /// identical to before the call.
    pub fn move_number(
        &mut self,
        src_row: usize,
        src_col: usize,
        dst_row: usize,
        dst_col: usize,
        advance_turn: bool,
    ) -> bool {
        if src_row == dst_row && src_col == dst_col {
            return false;
        }
        let same_row = src_row == dst_row;
        let same_col = src_col == dst_col;
        let same_nonet = nonet_origin(src_row, src_col) == nonet_origin(dst_row, dst_col);
        if !same_row && !same_col && !same_nonet {
            return false;
        }

        let Some(cell) = self.cell(src_row, src_col) else {
            return false;
        };
        let prior_removed = self.last_removed[src_row][src_col];

        if !self.remove_number(src_row, src_col, false) {
            return false;
        }
        if self.place_number(cell.value, dst_row, dst_col, advance_turn) {
            return true;
        }

        // Placement refused: put the source back exactly as it was.
        self.grid[src_row][src_col] = Some(cell);
        self.last_removed[src_row][src_col] = prior_removed;
        false
    }

    fn placement_allowed(&self, num: u8, row: usize, col: usize) -> bool {
        if !(1..=9).contains(&num) {
            return false;
        }
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return false;
        }
        if self.grid[row][col].is_some() {
            return false;
        }
        // The undo lock: a just-removed value cannot return to the same cell.
        if self.last_removed[row][col] == Some(num) {
            return false;
        }

        for i in 0..GRID_SIZE {
            if self.grid[row][i].is_some_and(|c| c.value == num) {
                return false;
            }
            if self.grid[i][col].is_some_and(|c| c.value == num) {
                return false;
            }
        }

        let (nr, nc) = nonet_origin(row, col);
        for i in 0..NONET_SIZE {
            for j in 0..NONET_SIZE {
                if self.grid[nr + i][nc + j].is_some_and(|c| c.value == num) {
                    return false;
                }
            }
        }
        true
    }

    /// Completion check for the units touched by a placement. Fires the win
    /// handler at most once even when several units complete together; a row
    /// takes priority over a column, a column over a nonet.
    fn check_win(&mut self, row: usize, col: usize) {
        let row_done = (0..GRID_SIZE).all(|c| self.grid[row][c].is_some());
        let col_done = (0..GRID_SIZE).all(|r| self.grid[r][col].is_some());
        let (nr, nc) = nonet_origin(row, col);
        let nonet_done = (0..NONET_SIZE)
            .all(|i| (0..NONET_SIZE).all(|j| self.grid[nr + i][nc + j].is_some()));

        let (kind, cells) = if row_done {
            let cells = (0..GRID_SIZE).map(|c| (row as u8, c as u8)).collect();
            (WinKind::Row, cells)
        } else if col_done {
            let cells = (0..GRID_SIZE).map(|r| (r as u8, col as u8)).collect();
            (WinKind::Column, cells)
        } else if nonet_done {
            let mut cells = Vec::with_capacity(GRID_SIZE);
            for i in 0..NONET_SIZE {
                for j in 0..NONET_SIZE {
                    cells.push(((nr + i) as u8, (nc + j) as u8));
                }
            }
            (WinKind::Nonet, cells)
        } else {
            return;
        };

        if let Some(handler) = self.on_win.as_mut() {
            let report = WinReport {
                player: self.current,
                kind,
                cells,
            };
            handler(&report);
        }
    }
}

/// Top-left coordinate of the nonet containing `(row, col)`.
fn nonet_origin(row: usize, col: usize) -> (usize, usize) {
    (row / NONET_SIZE * NONET_SIZE, col / NONET_SIZE * NONET_SIZE)
}
