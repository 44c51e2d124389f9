//! Random coordinate source for a batch run.

use rand::Rng;
use sunwatch_client::Coordinate;

/// Draws `count` points uniformly over the globe's latitude/longitude ranges.
pub(crate) fn random_coordinates<R: Rng>(count: usize, rng: &mut R) -> Vec<Coordinate> {
    (0..count)
        .map(|_| {
            Coordinate::new(
                rng.random_range(-90.0..=90.0),
                rng.random_range(-180.0..=180.0),
            )
        })
        .collect()
}
