//! Random puzzle generator.
//!
//! Works backwards from a solution: carve an optional void mask, partition
//! the active region into random rectangles, then seed one clue per
//! rectangle. The planted partition's canonical string is returned with the
//! board so callers can check the solver finds it.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Coord, Rect, Size};
use crate::canonical::canonical_form;

/// Configuration for puzzle generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Board dimensions.
    pub size: Size,
    /// Chance for each cell to be carved out as void.
    pub void_probability: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new(Size::new(5, 5))
    }
}

impl GeneratorConfig {
    /// Fully active board of the given size.
    pub fn new(size: Size) -> Self {
        Self { size, void_probability: 0.0 }
    }

    /// Board of the given size with randomly voided cells.
    pub fn with_voids(size: Size, void_probability: f64) -> Self {
        Self { size, void_probability }
    }
}

/// A generated board together with the canonical string of the partition it
/// was built from. The solver must always rediscover `planted`.
#[derive(Debug, Clone)]
pub struct GeneratedPuzzle {
    pub board: Board,
    pub planted: String,
}

/// Shikaku puzzle generator.
pub struct Generator {
    config: GeneratorConfig,
    rng: SimpleRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Create a new generator with the default configuration.
    pub fn new() -> Self {
        Self { config: GeneratorConfig::default(), rng: SimpleRng::new() }
    }

    /// Create a generator with a custom configuration.
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config, rng: SimpleRng::new() }
    }

    /// Create a generator with a specific seed for reproducibility.
    pub fn with_seed(seed: u64) -> Self {
        Self { config: GeneratorConfig::default(), rng: SimpleRng::with_seed(seed) }
    }

    /// Create a seeded generator with a custom configuration.
    pub fn with_config_and_seed(config: GeneratorConfig, seed: u64) -> Self {
        Self { config, rng: SimpleRng::with_seed(seed) }
    }

    /// Generate a puzzle with the current configuration.
    pub fn generate(&mut self) -> GeneratedPuzzle {
        let Size { height, width } = self.config.size;
        let mut active = vec![true; height * width];
        if self.config.void_probability > 0.0 {
            for cell in active.iter_mut() {
                if self.rng.next_f64() < self.config.void_probability {
                    *cell = false;
                }
            }
        }

        let rects = self.partition(height, width, &active);

        let mut clues = Vec::with_capacity(rects.len());
        for rect in &rects {
            let cells: Vec<Coord> = rect.cells().collect();
            let at = cells[self.rng.next_usize(cells.len())];
            clues.push((at, rect.area() as u32));
        }

        let board = Board::with_mask(self.config.size, &clues, active)
            .expect("generated boards satisfy the construction contract");
        let mut planted_board = board.clone();
        for (id, rect) in rects.iter().enumerate() {
            planted_board.place_rectangle(rect, id as u32 + 1);
        }
        GeneratedPuzzle { board, planted: canonical_form(&planted_board) }
    }

    /// Greedy random partition: at the first uncovered active cell in
    /// row-major order, grow a rectangle of random width (bounded by the free
    /// run to the right) and random height (bounded by the rows below that
    /// stay fully free at that width). A 1x1 always fits, so this terminates
    /// with a complete partition.
    fn partition(&mut self, height: usize, width: usize, active: &[bool]) -> Vec<Rect> {
        let mut taken = vec![false; height * width];
        let mut rects = Vec::new();
        for y in 0..height {
            for x in 0..width {
                if !active[y * width + x] || taken[y * width + x] {
                    continue;
                }
                let mut max_w = 0;
                while x + max_w < width
                    && active[y * width + x + max_w]
                    && !taken[y * width + x + max_w]
                {
                    max_w += 1;
                }
                let w = 1 + self.rng.next_usize(max_w);
                let mut max_h = 1;
                'rows: while y + max_h < height {
                    for dx in 0..w {
                        let i = (y + max_h) * width + x + dx;
                        if !active[i] || taken[i] {
                            break 'rows;
                        }
                    }
                    max_h += 1;
                }
                let h = 1 + self.rng.next_usize(max_h);
                let rect = Rect::new(Coord::new(y, x), Size::new(h, w));
                for cell in rect.cells() {
                    taken[cell.y * width + cell.x] = true;
                }
                rects.push(rect);
            }
        }
        rects
    }
}

/// Small self-contained PRNG (PCG output function over an LCG state) so the
/// core does not need a full randomness stack.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new() -> Self {
        let mut seed_bytes = [0u8; 8];
        getrandom::getrandom(&mut seed_bytes).unwrap_or_else(|_| {
            static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);
            let counter = COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            seed_bytes = counter.to_le_bytes();
        });
        Self::with_seed(u64::from_le_bytes(seed_bytes))
    }

    fn with_seed(seed: u64) -> Self {
        Self { state: seed.wrapping_add(1) }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let xorshifted = (((self.state >> 18) ^ self.state) >> 27) as u32;
        let rot = (self.state >> 59) as u32;
        u64::from(xorshifted.rotate_right(rot))
    }

    /// Uniform value in `0..bound`; `bound` must be positive.
    fn next_usize(&mut self, bound: usize) -> usize {
        (self.next_u64() as usize) % bound
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}
