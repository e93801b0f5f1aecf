//! Injected randomness for quest selection.
//!
//! Selection takes `&mut dyn RandomSource` so production can use an
//! OS-seeded generator while tests drive the same code with a fixed seed
//! and reproduce every pick.

use rand::Rng;

/// A source of uniform index picks.
pub trait RandomSource {
  /// Uniformly pick an index in `0..len`. `len` must be non-zero.
  fn pick_index(&mut self, len: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
  fn pick_index(&mut self, len: usize) -> usize {
    self.random_range(0..len)
  }
}
