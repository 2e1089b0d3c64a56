//! Solver facade.
//!
//! `solve` enumerates every valid partition of the board and returns the set
//! of canonical strings. All working state (the rectangle-ID counter and the
//! memoization cache) is scoped to a single call.

mod propagate;
mod search;

use std::collections::{BTreeSet, HashMap};

use log::debug;

use crate::board::Board;
use crate::candidates::initial_candidates;

/// The canonical strings of every valid partition. Empty means unsolvable.
pub type SolutionSet = BTreeSet<String>;

/// Monotonic rectangle-ID source. IDs only distinguish rectangles; the
/// canonicalizer relabels them before anything becomes user-visible.
pub(crate) struct IdCounter {
    next: u32,
}

impl IdCounter {
    pub(crate) fn new() -> Self {
        Self { next: 1 }
    }

    pub(crate) fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Claim a block of `n` IDs, returning the first.
    pub(crate) fn reserve(&mut self, n: u32) -> u32 {
        let base = self.next;
        self.next += n;
        base
    }
}

/// Per-invocation search state.
pub(crate) struct SolveContext {
    pub(crate) ids: IdCounter,
    pub(crate) memo: HashMap<String, SolutionSet>,
}

impl SolveContext {
    pub(crate) fn new() -> Self {
        Self { ids: IdCounter::new(), memo: HashMap::new() }
    }
}

/// Unit struct solver; all state is per-call.
pub struct Solver;

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    pub fn new() -> Self {
        Self
    }

    /// Enumerate all solutions of `board` as canonical strings.
    ///
    /// Returns the empty set when the puzzle is unsolvable, including when
    /// the clue values do not sum to the active cell count.
    pub fn solve(&self, board: &Board) -> SolutionSet {
        if board.clue_sum() != board.active_count() as u64 {
            debug!(
                "clue sum {} does not match active cell count {}",
                board.clue_sum(),
                board.active_count()
            );
            return SolutionSet::new();
        }
        let mut working = board.clone();
        working.clear_assignment();
        let remaining = initial_candidates(&working);
        let mut ctx = SolveContext::new();
        search::search(working, remaining, &mut ctx, 0)
    }

    /// Number of distinct solutions.
    pub fn count_solutions(&self, board: &Board) -> usize {
        self.solve(board).len()
    }

    pub fn has_unique_solution(&self, board: &Board) -> bool {
        self.count_solutions(board) == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Coord, Rect, Size};
    use crate::candidates::candidates_for_clue;
    use crate::canonical::{canonical_form, VOID_TOKEN};
    use crate::test_util::board;

    /// Check every solved-output invariant: token shape, rectangle geometry,
    /// one matching clue per rectangle, disjointness, and coverage.
    fn assert_valid_solution(b: &Board, solution: &str) {
        assert_eq!(solution.len(), 2 * b.height() * b.width());
        let mut cells_by_label: HashMap<String, Vec<Coord>> = HashMap::new();
        for y in 0..b.height() {
            for x in 0..b.width() {
                let c = Coord::new(y, x);
                let token = &solution[2 * (y * b.width() + x)..][..2];
                if b.is_active(c) {
                    assert_ne!(token, VOID_TOKEN, "active cell {} has a void token", c);
                    cells_by_label.entry(token.to_string()).or_default().push(c);
                } else {
                    assert_eq!(token, VOID_TOKEN, "void cell {} has label {}", c, token);
                }
            }
        }
        let mut covered = 0;
        for (label, cells) in &cells_by_label {
            let min_y = cells.iter().map(|c| c.y).min().unwrap();
            let max_y = cells.iter().map(|c| c.y).max().unwrap();
            let min_x = cells.iter().map(|c| c.x).min().unwrap();
            let max_x = cells.iter().map(|c| c.x).max().unwrap();
            let rect = Rect::new(
                Coord::new(min_y, min_x),
                Size::new(max_y - min_y + 1, max_x - min_x + 1),
            );
            assert_eq!(
                cells.len(),
                rect.area(),
                "label {} does not fill its bounding rectangle",
                label
            );
            let clues: Vec<u32> = rect.cells().filter_map(|c| b.clue_at(c)).collect();
            assert_eq!(clues.len(), 1, "label {} contains {} clues", label, clues.len());
            assert_eq!(
                clues[0] as usize,
                rect.area(),
                "label {} has the wrong area",
                label
            );
            covered += cells.len();
        }
        assert_eq!(covered, b.active_count());
    }

    /// Independent enumerator: try every combination of candidates, one per
    /// clue, keeping only disjoint covers.
    fn brute_force(b: &Board) -> SolutionSet {
        fn recurse(
            b: &Board,
            lists: &[(Coord, Vec<Rect>)],
            at: usize,
            out: &mut SolutionSet,
        ) {
            if at == lists.len() {
                if b.is_fully_assigned() {
                    out.insert(canonical_form(b));
                }
                return;
            }
            for rect in &lists[at].1 {
                if b.is_rect_free(rect) {
                    let mut next = b.clone();
                    next.place_rectangle(rect, at as u32 + 1);
                    recurse(&next, lists, at + 1, out);
                }
            }
        }
        let lists: Vec<(Coord, Vec<Rect>)> = b
            .clues()
            .iter()
            .map(|(&c, &v)| (c, candidates_for_clue(b, c, v)))
            .collect();
        let mut out = SolutionSet::new();
        recurse(b, &lists, 0, &mut out);
        out
    }

    #[test]
    fn test_one_by_one_board() {
        let b = board(&["1"]);
        let solutions = Solver::new().solve(&b);
        assert_eq!(solutions, std::iter::once("00".to_string()).collect());
    }

    #[test]
    fn test_two_by_two_single_clue() {
        let b = board(&["4 0", "0 0"]);
        let solutions = Solver::new().solve(&b);
        assert_eq!(solutions, std::iter::once("00000000".to_string()).collect());
    }

    #[test]
    fn test_three_by_three_two_clues() {
        // both partitions are valid: the 3 may run across the top with the 6
        // below it, or down the left with the 6 beside it
        let b = board(&["3 0 0", "0 0 0", "0 0 6"]);
        let solutions = Solver::new().solve(&b);
        let expected: SolutionSet = ["000101000101000101", "000000010101010101"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(solutions, expected);
        for s in &solutions {
            assert_valid_solution(&b, s);
        }
    }

    #[test]
    fn test_four_quadrants_unique() {
        let b = board(&["4 0 0 4", "0 0 0 0", "0 0 0 0", "4 0 0 4"]);
        let solutions = Solver::new().solve(&b);
        assert_eq!(solutions.len(), 1);
        assert_eq!(
            solutions.iter().next().map(String::as_str),
            Some("00000101000001010202030302020303")
        );
        assert!(Solver::new().has_unique_solution(&b));
    }

    #[test]
    fn test_five_by_five_solves_and_matches_brute_force() {
        let b = board(&[
            "0 4 0 0 0",
            "0 0 0 6 0",
            "0 0 6 0 0",
            "6 0 0 0 3",
            "0 0 0 0 0",
        ]);
        let solutions = Solver::new().solve(&b);
        assert!(!solutions.is_empty());
        for s in &solutions {
            assert_valid_solution(&b, s);
        }
        assert_eq!(solutions, brute_force(&b));
    }

    #[test]
    fn test_boxed_in_clue_is_unsolvable() {
        // clue values sum to the active count, but every 8-cell rectangle
        // through the corner 8 contains one of the other clues
        let b = board(&[
            "0 0 4 0 0",
            "0 0 0 0 0",
            "3 0 0 0 6",
            "0 0 0 0 0",
            "0 0 4 0 8",
        ]);
        let solutions = Solver::new().solve(&b);
        assert_eq!(solutions, brute_force(&b));
        assert!(solutions.is_empty());
    }

    #[test]
    fn test_full_board_single_clue() {
        let b = board(&["0 0 0", "0 9 0", "0 0 0"]);
        let solutions = Solver::new().solve(&b);
        assert_eq!(solutions, std::iter::once("0".repeat(18)).collect());
    }

    #[test]
    fn test_void_mask_filters_candidates() {
        let b = board(&["2 0 -", "- - -", "- - -"]);
        let solutions = Solver::new().solve(&b);
        let expected: SolutionSet = std::iter::once(format!("0000{}", VOID_TOKEN.repeat(7))).collect();
        assert_eq!(solutions, expected);
    }

    #[test]
    fn test_all_void_board_solves_to_void_string() {
        let b = Board::with_mask(Size::new(2, 2), &[], vec![false; 4]).unwrap();
        let solutions = Solver::new().solve(&b);
        assert_eq!(solutions, std::iter::once(VOID_TOKEN.repeat(4)).collect());
    }

    #[test]
    fn test_clue_sum_mismatch_is_unsolvable() {
        let b = board(&["3 0", "0 0"]);
        assert!(Solver::new().solve(&b).is_empty());
    }

    #[test]
    fn test_oversized_clue_is_unsolvable() {
        // no 7-cell rectangle fits inside a 3x3 board
        let b = board(&["7 0 0", "0 0 2", "0 0 0"]);
        assert_eq!(Solver::new().solve(&b), brute_force(&b));
        assert!(Solver::new().solve(&b).is_empty());
    }

    #[test]
    fn test_multi_solution_count_matches_brute_force() {
        // the 4 may run across the top or down the left, with the 12 filling
        // the rest either way; the search must find exactly the partitions
        // the naive enumerator finds
        let b = board(&["4 0 0 0", "0 0 0 0", "0 0 0 0", "0 0 0 12"]);
        let solutions = Solver::new().solve(&b);
        let reference = brute_force(&b);
        assert_eq!(solutions, reference);
        assert_eq!(solutions.len(), 2);
        for s in &solutions {
            assert_valid_solution(&b, s);
        }
    }

    #[test]
    fn test_center_clues_force_the_quadrants() {
        // each center clue keeps exactly one 2x2 that avoids the other three
        let b = board(&["0 0 0 0", "0 4 4 0", "0 4 4 0", "0 0 0 0"]);
        let solutions = Solver::new().solve(&b);
        assert_eq!(solutions.len(), 1);
        for s in &solutions {
            assert_valid_solution(&b, s);
        }
    }

    #[test]
    fn test_center_clues_with_void_corners_is_unsolvable() {
        // voiding the corners breaks the area precondition: 16 clue cells
        // cannot cover 12 active ones
        let mut mask = vec![true; 16];
        for i in [0, 3, 12, 15] {
            mask[i] = false;
        }
        let clues = [
            (Coord::new(1, 1), 4),
            (Coord::new(1, 2), 4),
            (Coord::new(2, 1), 4),
            (Coord::new(2, 2), 4),
        ];
        let b = Board::with_mask(Size::new(4, 4), &clues, mask).unwrap();
        assert!(Solver::new().solve(&b).is_empty());
    }

    #[test]
    fn test_solve_is_idempotent() {
        let b = board(&["0 0 0 0", "0 4 4 0", "0 4 4 0", "0 0 0 0"]);
        let solver = Solver::new();
        let first = solver.solve(&b);
        let second = solver.solve(&b);
        assert_eq!(first, second);
    }

    #[test]
    fn test_clue_insertion_order_is_irrelevant() {
        let clues = [
            (Coord::new(0, 0), 4),
            (Coord::new(0, 3), 4),
            (Coord::new(3, 0), 4),
            (Coord::new(3, 3), 4),
        ];
        let mut reversed = clues;
        reversed.reverse();
        let a = Board::new(Size::new(4, 4), &clues).unwrap();
        let b = Board::new(Size::new(4, 4), &reversed).unwrap();
        assert_eq!(Solver::new().solve(&a), Solver::new().solve(&b));
    }

    #[test]
    fn test_solve_does_not_mutate_the_input() {
        let b = board(&["2 0", "0 2"]);
        let before = b.clone();
        let _ = Solver::new().solve(&b);
        assert_eq!(b, before);
    }
}
