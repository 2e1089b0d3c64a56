//! Candidate enumeration: every geometrically admissible rectangle per clue.
//!
//! A candidate for clue `c` with value `A` lies within bounds, covers only
//! active cells, contains `c`, contains no other clue, and has area `A`.

use std::collections::BTreeMap;

use crate::board::{Board, Coord, Rect, Size};

/// Per-clue candidate lists, keyed by clue coordinate.
pub type CandidateMap = BTreeMap<Coord, Vec<Rect>>;

/// Unordered divisor pairs `(p, q)` of `n` with `p <= q`.
fn divisor_pairs(n: u32) -> Vec<(u32, u32)> {
    let mut pairs = Vec::new();
    let mut p: u32 = 1;
    while u64::from(p) * u64::from(p) <= u64::from(n) {
        if n % p == 0 {
            pairs.push((p, n / p));
        }
        p += 1;
    }
    pairs
}

/// All admissible rectangles for a single clue, sorted by
/// `(start.y, start.x, height, width)`.
pub fn candidates_for_clue(board: &Board, clue: Coord, area: u32) -> Vec<Rect> {
    let mut out = Vec::new();
    for (p, q) in divisor_pairs(area) {
        let mut shapes = vec![(p as usize, q as usize)];
        if p != q {
            // the 90-degree rotation; squares would only repeat themselves
            shapes.push((q as usize, p as usize));
        }
        for (height, width) in shapes {
            for dy in 0..height {
                for dx in 0..width {
                    if dy > clue.y || dx > clue.x {
                        continue;
                    }
                    let start = Coord::new(clue.y - dy, clue.x - dx);
                    let rect = Rect::new(start, Size::new(height, width));
                    if !board.is_rect_active(&rect) {
                        continue;
                    }
                    if covers_other_clue(board, &rect, clue) {
                        continue;
                    }
                    out.push(rect);
                }
            }
        }
    }
    out.sort();
    out
}

/// Candidate lists for every clue on the board.
pub fn initial_candidates(board: &Board) -> CandidateMap {
    board
        .clues()
        .iter()
        .map(|(&clue, &area)| (clue, candidates_for_clue(board, clue, area)))
        .collect()
}

fn covers_other_clue(board: &Board, rect: &Rect, clue: Coord) -> bool {
    board
        .clues()
        .keys()
        .any(|&other| other != clue && rect.contains(other))
}
