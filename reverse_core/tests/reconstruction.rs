use reverse_core::bitboard::BitboardIterator;
use reverse_core::board::Board;
use reverse_core::goal::Goal;
use reverse_core::piece::Piece;
use reverse_core::solver::{Solver, SolverOptions};
use reverse_core::square::Square;

/// Plays `plies` moves from the start, always choosing the lowest-index
/// legal move, and returns the line together with the final board.
fn play_greedy_line(plies: usize) -> (Vec<Square>, Board) {
    let mut board = Board::new();
    let mut line = Vec::new();
    for _ in 0..plies {
        let sq = BitboardIterator::new(board.get_moves())
            .next()
            .expect("greedy line ran out of moves");
        line.push(sq);
        board = board.make_move(sq);
    }
    (line, board)
}

fn goal_line_for(board: &Board, side: Piece) -> String {
    format!(
        "{}{}",
        board.to_string_as_board(side).replace('\n', ""),
        side.to_char()
    )
}

fn solve_collect(goal: &Goal) -> (Vec<Vec<Square>>, reverse_core::solver::SolveReport) {
    let mut transcripts: Vec<Vec<Square>> = Vec::new();
    let mut solver = Solver::new(goal, &SolverOptions::default(), |path| {
        transcripts.push(path.to_vec());
    });
    let report = solver.run();
    (transcripts, report)
}

#[test]
fn finds_a_known_six_move_line() {
    let (line, target) = play_greedy_line(6);
    // Six plies from the start: black moved 3 times, white 3 times,
    // black to move again.
    let goal = Goal::from_line(&goal_line_for(&target, Piece::Black)).unwrap();

    let (transcripts, report) = solve_collect(&goal);

    assert!(report.n_solutions >= 1);
    assert_eq!(report.n_solutions as usize, transcripts.len());
    assert!(transcripts.contains(&line), "the played line was not reconstructed");

    // Every transcript places exactly the goal's disc surplus and
    // replays to the goal board, move by legal move.
    let n_moves = (goal.mask().count_ones() - 4) as usize;
    for transcript in &transcripts {
        assert_eq!(transcript.len(), n_moves);
        let mut board = Board::new();
        for &sq in transcript {
            assert!(board.is_legal_move(sq), "illegal move {sq} in transcript");
            board = board.make_move(sq);
        }
        assert_eq!(board, goal.board);
    }
}

#[test]
fn transcripts_are_unique() {
    let (_, target) = play_greedy_line(4);
    let goal = Goal::from_line(&goal_line_for(&target, Piece::Black)).unwrap();

    let (transcripts, _) = solve_collect(&goal);
    let mut rendered: Vec<String> = transcripts
        .iter()
        .map(|t| t.iter().map(|sq| sq.to_string()).collect())
        .collect();
    rendered.sort();
    let n_emitted = rendered.len();
    rendered.dedup();
    assert_eq!(rendered.len(), n_emitted);
}

#[test]
fn search_leaves_no_residue_between_runs() {
    let (_, target) = play_greedy_line(4);
    let goal = Goal::from_line(&goal_line_for(&target, Piece::Black)).unwrap();

    let (first_t, first_r) = solve_collect(&goal);
    let (second_t, second_r) = solve_collect(&goal);
    assert_eq!(first_t, second_t);
    assert_eq!(first_r, second_r);
}

#[test]
fn wrong_side_to_move_means_no_match() {
    // The same 6-ply board, but claiming white moves next: the board
    // can be reached only with black to move, so nothing matches.
    let (_, target) = play_greedy_line(6);
    let goal = Goal::from_line(&goal_line_for(&target.switch_players(), Piece::White)).unwrap();
    assert_eq!(goal.board.player, target.switch_players().player);

    let (transcripts, report) = solve_collect(&goal);
    assert!(transcripts.is_empty());
    assert_eq!(report.n_solutions, 0);
}
