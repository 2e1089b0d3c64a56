//! Recursive all-solutions search.
//!
//! Each call propagates to a fixed point, then either canonicalizes a solved
//! board, replays a memoized result, or branches on one clue's candidates.
//! Branches operate on deep copies; assumptions never leak back out.

use log::{debug, trace};

use crate::board::{Board, Coord};
use crate::candidates::CandidateMap;
use crate::canonical::{canonical_form, memo_key, LABEL_WRAP};

use super::propagate::propagate;
use super::{SolutionSet, SolveContext};

pub(crate) fn search(
    mut board: Board,
    mut remaining: CandidateMap,
    ctx: &mut SolveContext,
    depth: usize,
) -> SolutionSet {
    if propagate(&mut board, &mut remaining, &mut ctx.ids).is_err() {
        trace!("depth {}: infeasible", depth);
        return SolutionSet::new();
    }
    if remaining.is_empty() {
        let solution = canonical_form(&board);
        trace!("depth {}: solution {}", depth, solution);
        return std::iter::once(solution).collect();
    }

    let key = memo_key(&board);
    if let Some(cached) = ctx.memo.get(&key) {
        debug!("depth {}: cache hit, {} cached completions", depth, cached.len());
        let cached = cached.clone();
        return replay_cached(&board, &cached, ctx);
    }

    let clue = select_branch_clue(&board, &remaining);
    let assumptions = remaining.get(&clue).cloned().unwrap_or_default();
    debug!(
        "depth {}: branching on clue {} across {} candidates",
        depth,
        clue,
        assumptions.len()
    );
    let mut solutions = SolutionSet::new();
    for rect in assumptions {
        let mut assumed = remaining.clone();
        assumed.insert(clue, vec![rect]);
        solutions.extend(search(board.clone(), assumed, ctx, depth + 1));
    }

    // an empty set is a cached failure
    ctx.memo.insert(key, solutions.clone());
    solutions
}

/// Minimum remaining values, ties broken by the larger clue (all candidates
/// of a clue share its area), then by the lexicographically smaller
/// coordinate. Iteration is in coordinate order, so keeping the first
/// strict winner settles the final tie.
fn select_branch_clue(board: &Board, remaining: &CandidateMap) -> Coord {
    let mut best: Option<(usize, u32, Coord)> = None;
    for (&clue, candidates) in remaining {
        let value = board.clue_at(clue).unwrap_or(0);
        let better = match best {
            None => true,
            Some((count, area, _)) => {
                candidates.len() < count || (candidates.len() == count && value > area)
            }
        };
        if better {
            best = Some((candidates.len(), value, clue));
        }
    }
    best.map(|(_, _, clue)| clue)
        .expect("branching requires a non-empty remaining map")
}

/// Rebuild solutions for the current board from cached canonical strings:
/// only the unassigned cells take the cached labels (under a fresh ID range
/// so they cannot collide with already placed rectangles), then the merged
/// board is canonicalized as usual.
fn replay_cached(board: &Board, cached: &SolutionSet, ctx: &mut SolveContext) -> SolutionSet {
    let width = board.width();
    let mut out = SolutionSet::new();
    for solution in cached {
        let base = ctx.ids.reserve(LABEL_WRAP);
        let mut merged = board.clone();
        let bytes = solution.as_bytes();
        for cell in board.unassigned_active() {
            let at = 2 * (cell.y * width + cell.x);
            let label = u32::from(bytes[at] - b'0') * 10 + u32::from(bytes[at + 1] - b'0');
            merged.set_assignment(cell, base + label);
        }
        out.insert(canonical_form(&merged));
    }
    out
}
