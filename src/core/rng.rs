//! Hazard randomness.
//!
//! Hazard placement goes through the [`HazardSource`] trait. Live play uses
//! [`GameRng`], a seeded ChaCha8 stream; tests use [`FixedHazards`] to script
//! exact layouts.
//!
//! ```
//! use diamond_climb::core::{GameRng, HazardSource};
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.hazard_column(0, 5), b.hazard_column(0, 5));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Supplies the hazard column for each row of a new layout.
///
/// Implementations must return a value in `0..columns`; out-of-range values
/// are folded back into range by the layout builder.
pub trait HazardSource {
    /// Hazard column for `row` on a board `columns` wide.
    fn hazard_column(&mut self, row: usize, columns: usize) -> usize;
}

impl<H: HazardSource + ?Sized> HazardSource for &mut H {
    fn hazard_column(&mut self, row: usize, columns: usize) -> usize {
        (**self).hazard_column(row, columns)
    }
}

/// Deterministic RNG backed by ChaCha8.
///
/// The same seed yields the same sequence of layouts, which makes a session
/// replayable from its seed and stream position.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create an RNG from a known seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the thread-local entropy source.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl HazardSource for GameRng {
    fn hazard_column(&mut self, _row: usize, columns: usize) -> usize {
        self.gen_range_usize(0..columns.max(1))
    }
}

/// Serializable RNG checkpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Seed the stream was created from
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Replays a fixed list of hazard columns, wrapping around when exhausted.
#[derive(Clone, Debug, Default)]
pub struct FixedHazards {
    columns: Vec<usize>,
    cursor: usize,
}

impl FixedHazards {
    #[must_use]
    pub fn new(columns: Vec<usize>) -> Self {
        Self {
            columns,
            cursor: 0,
        }
    }

    /// Every row's hazard in the same column.
    #[must_use]
    pub fn repeat(column: usize) -> Self {
        Self::new(vec![column])
    }
}

impl HazardSource for FixedHazards {
    fn hazard_column(&mut self, _row: usize, _columns: usize) -> usize {
        if self.columns.is_empty() {
            return 0;
        }
        let column = self.columns[self.cursor % self.columns.len()];
        self.cursor += 1;
        column
    }
}
