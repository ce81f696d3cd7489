//! Uniform sampling with replacement.

use crate::error::{GaError, Result};
use rand::Rng;

/// Endless iterator of elements drawn uniformly, with replacement, from a
/// slice.
///
/// Each call to `next` makes one independent draw from the borrowed
/// generator; nothing is materialized ahead of time. The iterator never
/// returns `None`, so bound it with [`Iterator::take`].
///
/// ```
/// use u_evolve::ga::Sampler;
/// use u_evolve::random::create_rng;
///
/// let items = [1, 2, 3];
/// let mut rng = create_rng(42);
/// let drawn: Vec<_> = Sampler::new(&items, &mut rng).unwrap().take(10).collect();
/// assert_eq!(drawn.len(), 10);
/// assert!(drawn.iter().all(|x| items.contains(x)));
/// ```
#[derive(Debug)]
pub struct Sampler<'a, 'r, T, R> {
    items: &'a [T],
    rng: &'r mut R,
}

impl<'a, 'r, T, R: Rng> Sampler<'a, 'r, T, R> {
    /// Creates a sampler over `items`.
    ///
    /// Returns [`GaError::EmptyPopulation`] when `items` is empty.
    pub fn new(items: &'a [T], rng: &'r mut R) -> Result<Self> {
        if items.is_empty() {
            return Err(GaError::EmptyPopulation);
        }
        Ok(Self { items, rng })
    }

    /// Draws one element.
    pub fn draw(&mut self) -> &'a T {
        let idx = self.rng.random_range(0..self.items.len());
        &self.items[idx]
    }
}

impl<'a, 'r, T, R: Rng> Iterator for Sampler<'a, 'r, T, R> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        Some(self.draw())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
