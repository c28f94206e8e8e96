//! Depth-first reconstruction of move sequences that reach a goal position.
//!
//! The search starts from the standard opening position and only ever
//! plays into cells the goal occupies, pruning any subtree in which a
//! disc has become permanently fixed to the wrong side. Every path that
//! produces exactly the goal board with the goal's side to move is
//! handed to the solution sink.

use arrayvec::ArrayVec;

use crate::bitboard::BitboardIterator;
use crate::board::Board;
use crate::flip;
use crate::goal::{Goal, GoalMasks};
use crate::piece::Piece;
use crate::square::Square;
use crate::stability;

/// Maximum search depth: 64 cells minus the 4 starting discs.
pub const MAX_PLY: usize = 60;

/// Options controlling a solve run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolverOptions {
    /// Abort the run once this many nodes have been visited.
    pub max_nodes: Option<u64>,
}

/// Counters aggregated over one solve run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolveReport {
    /// Number of goal-matching transcripts emitted.
    pub n_solutions: u64,
    /// Number of nodes visited, the root included.
    pub n_nodes: u64,
    /// True when the run stopped at the node cap instead of exhausting
    /// the restricted tree.
    pub aborted: bool,
}

/// Backtracking searcher for one goal.
///
/// Solutions are reported through the sink callback while the search is
/// running; the recursion itself performs no I/O.
pub struct Solver<'a, F: FnMut(&[Square])> {
    goal: &'a Goal,
    masks: GoalMasks,
    path: ArrayVec<Square, MAX_PLY>,
    n_nodes: u64,
    n_solutions: u64,
    max_nodes: Option<u64>,
    aborted: bool,
    on_solution: F,
}

impl<'a, F: FnMut(&[Square])> Solver<'a, F> {
    /// Creates a solver for `goal`.
    ///
    /// # Arguments
    ///
    /// * `goal` - The target position and side to move; borrowed for
    ///   the lifetime of the solver, never copied per node.
    /// * `options` - Run limits.
    /// * `on_solution` - Sink receiving each transcript, earliest move
    ///   first. The empty slice is a valid transcript (the start
    ///   position already matches).
    pub fn new(goal: &'a Goal, options: &SolverOptions, on_solution: F) -> Solver<'a, F> {
        Solver {
            goal,
            masks: GoalMasks::new(goal),
            path: ArrayVec::new(),
            n_nodes: 0,
            n_solutions: 0,
            max_nodes: options.max_nodes,
            aborted: false,
            on_solution,
        }
    }

    /// Runs the search to exhaustion (or the node cap) and reports the
    /// counters.
    pub fn run(&mut self) -> SolveReport {
        let start = Board::new();
        self.descend(&start, Piece::Black);
        SolveReport {
            n_solutions: self.n_solutions,
            n_nodes: self.n_nodes,
            aborted: self.aborted,
        }
    }

    fn descend(&mut self, board: &Board, mover: Piece) {
        if self.aborted {
            return;
        }
        self.n_nodes += 1;
        if self.max_nodes.is_some_and(|cap| self.n_nodes > cap) {
            self.aborted = true;
            return;
        }

        if mover == self.goal.side && *board == self.goal.board {
            (self.on_solution)(&self.path);
            self.n_solutions += 1;
            return;
        }

        // Goal ownership masks relative to the current mover.
        let (goal_mover, goal_other) = if mover == self.goal.side {
            (self.goal.board.player, self.goal.board.opponent)
        } else {
            (self.goal.board.opponent, self.goal.board.player)
        };

        // A disc fixed to the wrong side can never match the goal.
        let stable = stability::goal_stable_discs(board, self.masks.goal);
        if stable & board.player & goal_other != 0 || stable & board.opponent & goal_mover != 0 {
            return;
        }

        let legal = board.get_moves() & self.masks.goal & !(self.masks.corner & goal_other);
        for sq in BitboardIterator::new(legal) {
            // The flip record outlives the recursive call; the child
            // frame owns its own board copy, so backtracking restores
            // this frame's position without an explicit undo.
            let flipped = flip::flip(sq, board.player, board.opponent);
            let next = board.make_move_with_flipped(flipped, sq);
            self.path.push(sq);
            self.descend(&next, mover.opposite());
            self.path.pop();
        }
    }
}
