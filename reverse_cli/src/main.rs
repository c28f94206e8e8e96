//! Command line front end for the path reconstructor.
//!
//! Reads a target board, echoes it, then streams every reconstructed
//! transcript to stdout followed by a summary line. Prompts, the board
//! echo and the mirrored summary go to stderr so stdout stays
//! machine-readable.

use std::error::Error;
use std::io::{self, BufRead};
use std::process;
use std::time::Instant;

use clap::Parser;
use colored::Colorize;

use reverse_core::goal::Goal;
use reverse_core::piece::Piece;
use reverse_core::solver::{Solver, SolverOptions};
use reverse_core::square::Square;

#[derive(Parser, Debug)]
#[command(
    name = "reverse-othello",
    about = "Reconstructs every legal move sequence that reaches a target board"
)]
struct Cli {
    /// Target board: 64 cell symbols in row-major order (a1..h8)
    /// followed by the side to move. Read from stdin when omitted.
    /// Empty cells are usually '-', so hyphen-leading values are fine.
    #[arg(long, allow_hyphen_values = true)]
    board: Option<String>,

    /// Abort the search after visiting this many nodes.
    #[arg(long)]
    max_nodes: Option<u64>,
}

fn main() {
    let args = Cli::parse();
    if let Err(err) = run(&args) {
        eprintln!("{} {err}", "[ERROR]".bright_red());
        process::exit(1);
    }
}

fn run(args: &Cli) -> Result<(), Box<dyn Error>> {
    let line = match &args.board {
        Some(line) => line.clone(),
        None => read_goal_line()?,
    };
    let goal = Goal::from_line(&line)?;
    print_goal(&goal);

    let options = SolverOptions {
        max_nodes: args.max_nodes,
    };
    let start = Instant::now();
    let mut solver = Solver::new(&goal, &options, |path| {
        let mut transcript = String::with_capacity(path.len() * 2);
        for sq in path {
            transcript.push_str(&sq.to_string());
        }
        println!("{transcript}");
    });
    let report = solver.run();
    let elapsed = start.elapsed();

    let summary = format!(
        "found {} solutions in {} ms {} nodes",
        report.n_solutions,
        elapsed.as_millis(),
        report.n_nodes
    );
    println!("{summary}");
    eprintln!("{summary}");
    if report.aborted {
        eprintln!(
            "{}",
            "node limit reached, the listing is incomplete".bright_red()
        );
    }
    Ok(())
}

fn read_goal_line() -> Result<String, Box<dyn Error>> {
    eprintln!("please input the board (X: black O: white)");
    eprintln!("example: ------------------O--X---OOOXXX--OOOXXX---OOXX-----OX----------- X");
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

/// Prints a colored rendering of the goal board to stderr.
fn print_goal(goal: &Goal) {
    let (n_black, n_white) = match goal.side {
        Piece::Black => (goal.board.get_player_count(), goal.board.get_opponent_count()),
        _ => (goal.board.get_opponent_count(), goal.board.get_player_count()),
    };

    eprintln!("      a   b   c   d   e   f   g   h");
    eprintln!("    ┌───┬───┬───┬───┬───┬───┬───┬───┐");
    for y in 0..8 {
        let mut row = format!("  {} │", y + 1);
        for x in 0..8 {
            let sq = Square::from_usize_unchecked(y * 8 + x);
            let symbol = match goal.board.get_piece_at(sq, goal.side) {
                Piece::Black => " X ".bright_green().to_string(),
                Piece::White => " O ".bright_yellow().to_string(),
                Piece::Empty => "   ".to_string(),
            };
            row.push_str(&symbol);
            row.push('│');
        }
        match y {
            2 => {
                let to_move = match goal.side {
                    Piece::Black => "Black to move (X)".bright_green(),
                    Piece::White => "White to move (O)".bright_yellow(),
                    Piece::Empty => unreachable!(),
                };
                row.push_str(&format!("   {to_move}"));
            }
            3 => row.push_str(&format!("   Black: {}", format!("{n_black:2}").bright_green())),
            4 => row.push_str(&format!("   White: {}", format!("{n_white:2}").bright_yellow())),
            _ => {}
        }
        eprintln!("{row}");
        if y < 7 {
            eprintln!("    ├───┼───┼───┼───┼───┼───┼───┼───┤");
        }
    }
    eprintln!("    └───┴───┴───┴───┴───┴───┴───┴───┘");
}
