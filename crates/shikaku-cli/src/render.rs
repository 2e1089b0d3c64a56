//! Solution renderers.
//!
//! The text mode prints each solution as a coordinate-framed grid of
//! 2-character labels. The boxed mode draws rectangle outlines instead, with
//! walls wherever two neighboring cells belong to different rectangles.

use std::io::{self, Write};

use crossterm::style::{Color, Stylize};
use shikaku_core::{Board, Coord, SolutionSet, VOID_TOKEN};

/// Options shared by both output modes.
pub struct RenderOptions {
    pub color: bool,
    pub all: bool,
    pub keep_numbers: bool,
}

/// Label color cycle for `--color` output.
const PALETTE: [Color; 14] = [
    Color::DarkRed,
    Color::Red,
    Color::DarkGreen,
    Color::Green,
    Color::DarkYellow,
    Color::Yellow,
    Color::DarkBlue,
    Color::Blue,
    Color::DarkMagenta,
    Color::Magenta,
    Color::DarkCyan,
    Color::Cyan,
    Color::DarkGrey,
    Color::White,
];

pub fn print_text(
    out: &mut impl Write,
    board: &Board,
    solutions: &SolutionSet,
    opts: &RenderOptions,
) -> io::Result<()> {
    print_count(out, solutions)?;
    for solution in targets(solutions, opts.all) {
        text_grid(out, board, solution, opts)?;
    }
    Ok(())
}

pub fn print_boxed(
    out: &mut impl Write,
    board: &Board,
    solutions: &SolutionSet,
    opts: &RenderOptions,
) -> io::Result<()> {
    print_count(out, solutions)?;
    for solution in targets(solutions, opts.all) {
        boxed_grid(out, board, solution, opts)?;
    }
    Ok(())
}

fn print_count(out: &mut impl Write, solutions: &SolutionSet) -> io::Result<()> {
    if solutions.is_empty() {
        writeln!(out, "0 solutions (unsolvable grid)")
    } else {
        writeln!(out, "{} solutions", solutions.len())
    }
}

/// The lexicographically smallest solution, or all of them.
fn targets(solutions: &SolutionSet, all: bool) -> impl Iterator<Item = &String> {
    solutions.iter().take(if all { solutions.len() } else { 1 })
}

fn token_at<'a>(solution: &'a str, board: &Board, y: usize, x: usize) -> &'a str {
    &solution[2 * (y * board.width() + x)..][..2]
}

/// Token at a possibly out-of-range position; `None` outside the board, so
/// the outer frame always reads as a wall.
fn token_outside<'a>(solution: &'a str, board: &Board, y: isize, x: isize) -> Option<&'a str> {
    if 0 <= y && (y as usize) < board.height() && 0 <= x && (x as usize) < board.width() {
        Some(token_at(solution, board, y as usize, x as usize))
    } else {
        None
    }
}

fn label_color(token: &str) -> Color {
    PALETTE[token.parse::<usize>().unwrap_or(0) % PALETTE.len()]
}

fn text_grid(
    out: &mut impl Write,
    board: &Board,
    solution: &str,
    opts: &RenderOptions,
) -> io::Result<()> {
    write!(out, "\n   ")?;
    for x in 0..board.width() {
        write!(out, " {:02} ", x)?;
    }
    writeln!(out)?;
    for y in 0..board.height() {
        write!(out, "{:02} ", y)?;
        for x in 0..board.width() {
            let cell = Coord::new(y, x);
            let token = token_at(solution, board, y, x);
            if !board.is_active(cell) {
                write!(out, " {} ", VOID_TOKEN)?;
            } else if let (true, Some(number)) = (opts.keep_numbers, board.clue_at(cell)) {
                write!(out, " {:02} ", number)?;
            } else if opts.color {
                write!(out, " {} ", token.with(label_color(token)))?;
            } else {
                write!(out, " {} ", token)?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

fn boxed_grid(
    out: &mut impl Write,
    board: &Board,
    solution: &str,
    opts: &RenderOptions,
) -> io::Result<()> {
    let height = board.height() as isize;
    let width = board.width() as isize;
    let h_wall = |y: isize, x: isize| {
        token_outside(solution, board, y - 1, x) != token_outside(solution, board, y, x)
    };
    let v_wall = |y: isize, x: isize| {
        token_outside(solution, board, y, x - 1) != token_outside(solution, board, y, x)
    };

    writeln!(out)?;
    for y in 0..=height {
        let mut border = String::new();
        for x in 0..=width {
            let corner = h_wall(y, x - 1)
                || h_wall(y, x)
                || v_wall(y - 1, x)
                || v_wall(y, x);
            border.push(if corner { '+' } else { ' ' });
            if x < width {
                border.push_str(if h_wall(y, x) { "----" } else { "    " });
            }
        }
        writeln!(out, "{}", border.trim_end())?;
        if y == height {
            break;
        }
        let mut row = String::new();
        for x in 0..=width {
            row.push(if v_wall(y, x) { '|' } else { ' ' });
            if x < width {
                let cell = Coord::new(y as usize, x as usize);
                let content = if !board.is_active(cell) {
                    format!(" {} ", VOID_TOKEN)
                } else if let (true, Some(number)) = (opts.keep_numbers, board.clue_at(cell)) {
                    format!(" {:02} ", number)
                } else {
                    let tok = token_at(solution, board, y as usize, x as usize);
                    if opts.color {
                        format!(" {} ", tok.with(label_color(tok)))
                    } else {
                        format!(" {} ", tok)
                    }
                };
                row.push_str(&content);
            }
        }
        writeln!(out, "{}", row.trim_end())?;
    }
    Ok(())
}
