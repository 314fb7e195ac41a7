#![doc = include_str!("../readme.md")]

mod hypervolume;
mod least;
mod partition;

pub use hypervolume::{contributions, exclusive, hypervolume, inclusive};
pub use least::bottom_k;
pub use partition::{lattice, sorted, Partition};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
	#[error("coordinate {axis} of point {index} is not finite")]
	NonFinite { index: usize, axis: usize },

	#[error("point {index} has {found} coordinates, expected {expected}")]
	DimensionMismatch {
		index: usize,
		expected: usize,
		found: usize,
	},

	#[error("front is empty")]
	EmptyFront,

	#[error("cannot select {0} least contributors")]
	InvalidCount(usize),
}

/// `a` weakly dominates `b` in the first `dims` coordinates.
pub fn covers(a: &[f64], b: &[f64], dims: usize) -> bool {
	a[..dims].iter().zip(&b[..dims]).all(|(a, b)| a >= b)
}

/// Checks that every point has `dimension` finite coordinates.
pub fn check<P: AsRef<[f64]>>(points: &[P], dimension: usize) -> Result<(), Error> {
	for (index, point) in points.iter().enumerate() {
		let point = point.as_ref();
		if point.len() != dimension {
			return Err(Error::DimensionMismatch {
				index,
				expected: dimension,
				found: point.len(),
			});
		}
		if let Some(axis) = point.iter().position(|value| !value.is_finite()) {
			return Err(Error::NonFinite { index, axis });
		}
	}
	Ok(())
}
