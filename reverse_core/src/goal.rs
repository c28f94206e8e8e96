use std::fmt;

use crate::bit::{FILE_A, FILE_H, RANK_1, RANK_8};
use crate::board::Board;
use crate::piece::Piece;
use crate::square::Square;

/// Number of cells in the goal description, plus one side marker.
const GOAL_LINE_LEN: usize = 65;

/// A target position together with the side to move once it is reached.
///
/// `board.player` always holds the discs of `side`, so a live position
/// whose mover is `side` matches by direct mask comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Goal {
    pub board: Board,
    pub side: Piece,
}

impl Goal {
    /// Parses a goal from its 65-character description.
    ///
    /// The first 64 characters give the cells in row-major order
    /// (A1..H8); the final character names the side to move. Embedded
    /// whitespace is ignored. Cell symbols outside the side alphabet
    /// are empty cells; an unrecognized side marker or a wrong length
    /// is an error.
    ///
    /// # Arguments
    ///
    /// * `line` - The goal description.
    ///
    /// # Returns
    ///
    /// The parsed `Goal`, or a `ParseGoalError` describing the reject.
    pub fn from_line(line: &str) -> Result<Goal, ParseGoalError> {
        let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
        if symbols.len() != GOAL_LINE_LEN {
            return Err(ParseGoalError::InvalidLength(symbols.len()));
        }

        let side_symbol = symbols[GOAL_LINE_LEN - 1];
        let side = match Piece::from_symbol(side_symbol) {
            Some(side) => side,
            None => return Err(ParseGoalError::InvalidSide(side_symbol)),
        };

        let mut player: u64 = 0;
        let mut opponent: u64 = 0;
        for (i, &c) in symbols[..64].iter().enumerate() {
            match Piece::from_symbol(c) {
                Some(owner) if owner == side => player |= Square::from_usize_unchecked(i).bitboard(),
                Some(_) => opponent |= Square::from_usize_unchecked(i).bitboard(),
                None => {}
            }
        }

        Ok(Goal {
            board: Board::from_bitboards(player, opponent),
            side,
        })
    }

    /// Returns the mask of cells occupied (by either side) in the goal.
    #[inline]
    pub fn mask(&self) -> u64 {
        self.board.player | self.board.opponent
    }
}

/// The two masks that restrict the search frontier, derived once per goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalMasks {
    /// Cells occupied in the goal; moves outside it are never tried.
    pub goal: u64,
    /// Goal cells boxed in by goal-external empty cells on every
    /// approach axis. A disc there can never be flipped during the
    /// restricted search, so landing one of the wrong colour is futile.
    pub corner: u64,
}

impl GoalMasks {
    /// Derives the goal and corner masks for a goal.
    ///
    /// A goal cell is a corner in this sense when, for one choice of
    /// outward direction per axis, all four chosen neighbours are empty
    /// cells the goal leaves empty (or lie off the board): no flip line
    /// through the cell can ever be completed. All 16 direction-choice
    /// combinations are tried.
    pub fn new(goal: &Goal) -> GoalMasks {
        let goal_mask = goal.mask();
        let outside = !goal_mask;

        // Cells whose neighbour toward +d / -d is goal-external empty
        // or off the board, one mask per outward direction.
        let open_p1 = ((outside & !FILE_A) >> 1) | FILE_H;
        let open_m1 = ((outside & !FILE_H) << 1) | FILE_A;
        let open_p8 = ((outside & !RANK_1) >> 8) | RANK_8;
        let open_m8 = ((outside & !RANK_8) << 8) | RANK_1;
        let open_p7 = ((outside & !FILE_H & !RANK_1) >> 7) | FILE_A | RANK_8;
        let open_m7 = ((outside & !FILE_A & !RANK_8) << 7) | FILE_H | RANK_1;
        let open_p9 = ((outside & !FILE_A & !RANK_1) >> 9) | FILE_H | RANK_8;
        let open_m9 = ((outside & !FILE_H & !RANK_8) << 9) | FILE_A | RANK_1;

        let mut corner: u64 = 0;
        for open_1 in [open_p1, open_m1] {
            for open_8 in [open_p8, open_m8] {
                for open_7 in [open_p7, open_m7] {
                    for open_9 in [open_p9, open_m9] {
                        corner |= open_1 & open_8 & open_7 & open_9;
                    }
                }
            }
        }
        corner &= goal_mask;

        GoalMasks {
            goal: goal_mask,
            corner,
        }
    }
}

/// Reject reasons for a goal description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseGoalError {
    /// The description does not have 64 cells plus a side marker.
    InvalidLength(usize),
    /// The trailing side marker is not in the side alphabet.
    InvalidSide(char),
}

impl fmt::Display for ParseGoalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseGoalError::InvalidLength(len) => write!(
                f,
                "invalid board description: expected {GOAL_LINE_LEN} symbols, got {len}"
            ),
            ParseGoalError::InvalidSide(c) => {
                write!(f, "invalid side to move: {c:?}")
            }
        }
    }
}

impl std::error::Error for ParseGoalError {}
