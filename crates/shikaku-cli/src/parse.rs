//! Text-format puzzle parser.
//!
//! Line 1 is `W H`; the following `H` lines each hold `W` whitespace-separated
//! tokens. A token is `-` (void), `0` (empty active cell), or a positive
//! integer (clue). Short rows are padded with void cells, long rows truncated.

use std::io::BufRead;

use anyhow::{bail, Context, Result};
use shikaku_core::{Board, Coord, Size};

pub fn parse_board<R: BufRead>(reader: R) -> Result<Board> {
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(line) => line.context("failed to read the header line")?,
        None => bail!("missing `W H` header line"),
    };
    let mut fields = header.split_whitespace();
    let width: usize = match fields.next() {
        Some(w) => w.parse().with_context(|| format!("bad width {:?}", w))?,
        None => bail!("missing `W H` header line"),
    };
    let height: usize = match fields.next() {
        Some(h) => h.parse().with_context(|| format!("bad height {:?}", h))?,
        None => bail!("header names a width but no height"),
    };
    if fields.next().is_some() {
        bail!("unexpected extra tokens in the `W H` header");
    }

    let mut active = vec![true; height.saturating_mul(width)];
    let mut clues = Vec::new();
    for row in 0..height {
        let line = match lines.next() {
            Some(line) => line.with_context(|| format!("failed to read row {}", row + 1))?,
            None => bail!("expected {} rows, found only {}", height, row),
        };
        let tokens: Vec<&str> = line.split_whitespace().take(width).collect();
        for (col, token) in tokens.iter().enumerate() {
            if *token == "-" {
                active[row * width + col] = false;
                continue;
            }
            let value: u32 = token.parse().with_context(|| {
                format!("bad token {:?} at row {}, column {}", token, row + 1, col + 1)
            })?;
            if value > 0 {
                clues.push((Coord::new(row, col), value));
            }
        }
        // absent trailing tokens denote void cells
        for col in tokens.len()..width {
            active[row * width + col] = false;
        }
    }

    Ok(Board::with_mask(Size::new(height, width), &clues, active)?)
}
