use crate::bitboard::BitboardIterator;
use crate::board::Board;
use crate::flip;

/// Performs a perft (performance test) on the given board to a specified depth.
///
/// Counts leaf positions of the unrestricted game tree, passing when
/// the side to move has no legal move. Used to validate the move engine
/// against the published node counts; the goal-restricted solver never
/// calls this.
///
/// # Arguments
///
/// * `board` - A reference to the current game board.
/// * `depth` - The depth to which the perft function should search.
///
/// # Returns
///
/// The number of nodes (positions) reached at the given depth.
pub fn perft(board: &Board, depth: u32) -> u64 {
    let mut nodes = 0;
    let moves = board.get_moves();

    if moves != 0 {
        for sq in BitboardIterator::new(moves) {
            let flipped = flip::flip(sq, board.player, board.opponent);
            let next = board.make_move_with_flipped(flipped, sq);
            if depth <= 1 {
                nodes += 1;
            } else {
                nodes += perft(&next, depth - 1);
            }
        }
    } else {
        let next = board.switch_players();
        if next.has_legal_moves() {
            nodes += perft(&next, depth);
        } else {
            nodes += 1;
        }
    }
    nodes
}
