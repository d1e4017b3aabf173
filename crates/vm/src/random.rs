//! Direction sources for the `?` instruction.

use befunge_common::{Direction, ALL_DIRECTIONS};
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplies the direction taken by `?`.
pub trait DirectionSource {
    fn next_direction(&mut self) -> Direction;
}

impl<T: DirectionSource + ?Sized> DirectionSource for &mut T {
    fn next_direction(&mut self) -> Direction {
        (**self).next_direction()
    }
}

/// Uniform choice over [`ALL_DIRECTIONS`].
pub struct UniformDirection;

impl Distribution<Direction> for UniformDirection {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Direction {
        ALL_DIRECTIONS[rng.gen_range(0..ALL_DIRECTIONS.len())]
    }
}

/// Uniformly random directions.
pub struct RandomDirections {
    rng: StdRng,
}

impl RandomDirections {
    /// Seeded from operating system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomDirections {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectionSource for RandomDirections {
    fn next_direction(&mut self) -> Direction {
        UniformDirection.sample(&mut self.rng)
    }
}

/// Cycles through a fixed list of directions.
#[derive(Debug, Clone)]
pub struct FixedDirections {
    sequence: Vec<Direction>,
    next: usize,
}

impl FixedDirections {
    /// An empty list always yields [`Direction::Right`].
    pub fn new(sequence: Vec<Direction>) -> Self {
        Self {
            sequence,
            next: 0,
        }
    }
}

impl DirectionSource for FixedDirections {
    fn next_direction(&mut self) -> Direction {
        if self.sequence.is_empty() {
            return Direction::Right;
        }
        let dir = self.sequence[self.next % self.sequence.len()];
        self.next += 1;
        dir
    }
}
