//! Fixed-point candidate propagation.
//!
//! Two rules alternate until a full pass leaves the remaining-candidate map
//! unchanged: rectangle-unique placement (a clue down to one viable candidate
//! gets it placed) and cell-forced reasoning (a cell claimable by exactly one
//! clue narrows that clue's list, or forces a placement outright).
//!
//! Infeasibility is reported as a value and never patched over here; only the
//! search layer is allowed to form alternatives.

use std::collections::BTreeMap;

use log::{debug, trace};

use crate::board::{Board, Coord, Rect};
use crate::candidates::CandidateMap;

use super::IdCounter;

/// The current state admits no completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Infeasible;

/// Run both rules to a fixed point. On success the board is either fully
/// solved (`remaining` is empty) or stuck and in need of an assumption.
pub(crate) fn propagate(
    board: &mut Board,
    remaining: &mut CandidateMap,
    ids: &mut IdCounter,
) -> Result<(), Infeasible> {
    let mut passes = 0usize;
    loop {
        let before = signature(remaining);
        rectangle_unique_pass(board, remaining, ids)?;
        cell_forced_pass(board, remaining, ids)?;
        passes += 1;
        if remaining.is_empty() || signature(remaining) == before {
            break;
        }
    }
    debug!("propagation reached a fixed point after {} passes", passes);
    Ok(())
}

/// Candidate counts per clue. Candidates are only ever removed, so comparing
/// counts across a pass detects the fixed point.
fn signature(remaining: &CandidateMap) -> Vec<(Coord, usize)> {
    remaining.iter().map(|(&c, v)| (c, v.len())).collect()
}

/// Rule R1: drop candidates that overlap placed rectangles; a clue left with
/// none is infeasible, a clue left with one gets it placed.
fn rectangle_unique_pass(
    board: &mut Board,
    remaining: &mut CandidateMap,
    ids: &mut IdCounter,
) -> Result<(), Infeasible> {
    let clues: Vec<Coord> = remaining.keys().copied().collect();
    for clue in clues {
        // a placement earlier in this pass may have satisfied the clue
        let Some(candidates) = remaining.get(&clue) else { continue };
        let viable: Vec<Rect> = candidates
            .iter()
            .filter(|rect| board.is_rect_free(rect))
            .copied()
            .collect();
        match viable.len() {
            0 => {
                debug!("clue {} has no viable rectangle left", clue);
                return Err(Infeasible);
            }
            1 => place(board, remaining, ids, clue, viable[0]),
            _ => {
                remaining.insert(clue, viable);
            }
        }
    }
    Ok(())
}

/// Rule R2: every unassigned cell must be claimable. A cell claimable by a
/// single clue either forces that clue's placement or narrows its candidates
/// to the ones covering the cell.
fn cell_forced_pass(
    board: &mut Board,
    remaining: &mut CandidateMap,
    ids: &mut IdCounter,
) -> Result<(), Infeasible> {
    let unassigned: Vec<Coord> = board.unassigned_active().collect();
    let mut usage: BTreeMap<Coord, BTreeMap<Coord, Vec<Rect>>> =
        unassigned.iter().map(|&c| (c, BTreeMap::new())).collect();
    for (&clue, candidates) in remaining.iter() {
        for rect in candidates {
            for cell in rect.cells() {
                if let Some(by_clue) = usage.get_mut(&cell) {
                    by_clue.entry(clue).or_default().push(*rect);
                }
            }
        }
    }

    for cell in unassigned {
        if board.assignment_at(cell) != 0 {
            continue; // claimed by a placement earlier in this pass
        }
        let Some(by_clue) = usage.get(&cell) else { continue };
        if by_clue.is_empty() {
            debug!("cell {} cannot be claimed by any clue", cell);
            return Err(Infeasible);
        }
        if by_clue.len() > 1 {
            continue;
        }
        let Some((&clue, covering)) = by_clue.iter().next() else { continue };
        let Some(current) = remaining.get_mut(&clue) else {
            // the clue was satisfied earlier in this pass; if its rectangle
            // missed this cell, the next pass reports the orphan
            continue;
        };
        if let [only] = covering.as_slice() {
            if !current.contains(only) {
                continue; // narrowed away earlier in this pass
            }
            let only = *only;
            if board.is_rect_free(&only) {
                place(board, remaining, ids, clue, only);
            } else {
                debug!("forced rectangle {} for clue {} is blocked", only, clue);
                return Err(Infeasible);
            }
        } else {
            // the clue must cover this cell; intersect with the covering set
            current.retain(|rect| covering.contains(rect));
            if current.is_empty() {
                debug!("clue {} has no candidate left covering {}", clue, cell);
                return Err(Infeasible);
            }
        }
    }
    Ok(())
}

fn place(board: &mut Board, remaining: &mut CandidateMap, ids: &mut IdCounter, clue: Coord, rect: Rect) {
    let id = ids.next_id();
    trace!("placing {} for clue {} as rectangle {}", rect, clue, id);
    board.place_rectangle(&rect, id);
    remaining.remove(&clue);
}
