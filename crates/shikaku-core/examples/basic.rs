//! Basic example of using the Shikaku engine

use shikaku_core::{Board, Coord, Generator, GeneratorConfig, Size, Solver};

fn main() {
    // Generate a puzzle
    println!("Generating a 6x6 puzzle...\n");
    let mut generator = Generator::with_config(GeneratorConfig::new(Size::new(6, 6)));
    let puzzle = generator.generate();

    println!("Generated puzzle:");
    println!("{}", puzzle.board);

    // Solve it
    let solver = Solver::new();
    let solutions = solver.solve(&puzzle.board);
    println!("Found {} solution(s)", solutions.len());
    println!(
        "Planted partition rediscovered: {}\n",
        solutions.contains(&puzzle.planted)
    );

    // Solve a hand-built board
    println!("--- Solving a hand-built 3x3 board ---\n");
    let board = Board::new(
        Size::new(3, 3),
        &[(Coord::new(0, 0), 3), (Coord::new(2, 2), 6)],
    )
    .expect("the board is well-formed");
    println!("{}", board);
    for solution in solver.solve(&board) {
        println!("{}", solution);
    }
}
