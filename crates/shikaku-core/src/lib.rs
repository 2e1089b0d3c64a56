//! Shikaku puzzle engine.
//!
//! Shikaku partitions a rectangular board (possibly with void cells) into
//! axis-aligned rectangles, one per clue, each with area equal to its clue's
//! number. The engine enumerates candidate rectangles per clue, filters them
//! by constraint propagation, searches the rest with assumptions and
//! backtracking, and returns every solution in a canonical textual form.
//!
//! Parsing, rendering, and any command-line surface live in collaborator
//! crates; the host-facing operation here is [`Solver::solve`].

pub mod board;
pub mod candidates;
pub mod canonical;
pub mod generator;
pub mod solver;

pub use board::{Board, BoardError, Coord, Rect, Size};
pub use candidates::{candidates_for_clue, initial_candidates, CandidateMap};
pub use canonical::{canonical_form, memo_key, VOID_TOKEN};
pub use generator::{GeneratedPuzzle, Generator, GeneratorConfig};
pub use solver::{SolutionSet, Solver};

#[cfg(test)]
pub(crate) mod test_util {
    use crate::board::{Board, Coord, Size};

    /// Build a board from rows of whitespace-separated tokens: `-` void,
    /// `0` active empty, a positive integer a clue.
    pub fn board(rows: &[&str]) -> Board {
        let height = rows.len();
        let width = rows[0].split_whitespace().count();
        let mut active = vec![true; height * width];
        let mut clues = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, token) in row.split_whitespace().enumerate() {
                match token {
                    "-" => active[y * width + x] = false,
                    "0" => {}
                    n => clues.push((
                        Coord::new(y, x),
                        n.parse().expect("test boards use integer tokens"),
                    )),
                }
            }
        }
        Board::with_mask(Size::new(height, width), &clues, active)
            .expect("test boards are well-formed")
    }
}
