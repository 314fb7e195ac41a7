use crate::{check, covers, Error};

/// Volume of the box between the origin and `point`.
pub fn inclusive(point: &[f64]) -> f64 {
	point.iter().map(|value| value.max(0.0)).product()
}

/// Volume dominated by `front`.
pub fn hypervolume<P: AsRef<[f64]>>(front: &[P]) -> Result<f64, Error> {
	let Some(dims) = dimension(front) else {
		return Ok(0.0);
	};
	check(front, dims)?;
	Ok(volume(clamped(front), dims))
}

/// Volume dominated by `front[index]` and by no other point of `front`.
///
/// Panics if `index` is out of bounds.
pub fn exclusive<P: AsRef<[f64]>>(front: &[P], index: usize) -> Result<f64, Error> {
	let Some(dims) = dimension(front) else {
		return Err(Error::EmptyFront);
	};
	check(front, dims)?;
	let mut points = clamped(front);
	let point = points.swap_remove(index);
	Ok(contribution(&point, &points, dims))
}

/// Exclusive contribution of every point of `front`.
pub fn contributions<P: AsRef<[f64]>>(front: &[P]) -> Result<Vec<f64>, Error> {
	let Some(dims) = dimension(front) else {
		return Ok(Vec::new());
	};
	check(front, dims)?;
	let points = clamped(front);
	let result = (0..points.len())
		.map(|index| {
			let others = points
				.iter()
				.enumerate()
				.filter(|&(other, _)| other != index)
				.map(|(_, point)| point.clone())
				.collect::<Vec<_>>();
			contribution(&points[index], &others, dims)
		})
		.collect();
	Ok(result)
}

fn dimension<P: AsRef<[f64]>>(front: &[P]) -> Option<usize> {
	front.first().map(|point| point.as_ref().len())
}

// coordinates below the reference point add no volume
fn clamped<P: AsRef<[f64]>>(front: &[P]) -> Vec<Vec<f64>> {
	front
		.iter()
		.map(|point| point.as_ref().iter().map(|value| value.max(0.0)).collect())
		.collect()
}

/// Exclusive volume of `point` against `others`, using the first `dims` coordinates.
pub(crate) fn contribution(point: &[f64], others: &[Vec<f64>], dims: usize) -> f64 {
	let limited = others
		.iter()
		.map(|other| limit(other, point, dims))
		.collect::<Vec<_>>();
	inclusive(&point[..dims]) - volume(nondominated(limited, dims), dims)
}

fn limit(other: &[f64], point: &[f64], dims: usize) -> Vec<f64> {
	other[..dims]
		.iter()
		.zip(&point[..dims])
		.map(|(a, b)| a.min(*b))
		.collect()
}

/// Removes every point covered by another one. Of equal points the first is kept.
pub(crate) fn nondominated(points: Vec<Vec<f64>>, dims: usize) -> Vec<Vec<f64>> {
	let mut result = Vec::<Vec<f64>>::with_capacity(points.len());
	for point in points {
		if result.iter().any(|kept| covers(kept, &point, dims)) {
			continue;
		}
		result.retain(|kept| !covers(&point, kept, dims));
		result.push(point);
	}
	result
}

pub(crate) fn volume(mut points: Vec<Vec<f64>>, dims: usize) -> f64 {
	match (points.len(), dims) {
		(0, _) | (_, 0) => 0.0,
		(1, _) => inclusive(&points[0][..dims]),
		(_, 1) => points.iter().map(|point| point[0]).fold(0.0, f64::max),
		(_, 2) => {
			points.sort_by(|a, b| b[0].total_cmp(&a[0]));
			let mut area = 0.0;
			let mut height = 0.0;
			for point in points.iter() {
				if point[1] > height {
					area += point[0] * (point[1] - height);
					height = point[1];
				}
			}
			area
		},
		_ => {
			// worsening in the last objective keeps the limited sets small
			let last = dims - 1;
			points.sort_by(|a, b| b[last].total_cmp(&a[last]));
			let mut total = 0.0;
			for i in 0..points.len() {
				total += contribution(&points[i], &points[(i + 1)..], dims);
			}
			total
		},
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use approx::*;

	#[test]
	fn inclusive_box() {
		assert_relative_eq!(inclusive(&[0.5, 0.5, 0.5]), 0.125);
		assert_relative_eq!(inclusive(&[0.5, -1.0]), 0.0);
		assert_relative_eq!(inclusive(&[]), 1.0);
	}

	#[test]
	fn staircase_2d() {
		let front = [[1.0, 3.0], [2.0, 2.5], [4.0, 1.0]];
		assert_relative_eq!(hypervolume(&front).unwrap(), 7.5);
		let values = contributions(&front).unwrap();
		assert_relative_eq!(values[0], 0.5);
		assert_relative_eq!(values[1], 1.5);
		assert_relative_eq!(values[2], 2.0);
		assert_relative_eq!(exclusive(&front, 1).unwrap(), 1.5);
	}

	#[test]
	fn overlapping_boxes_3d() {
		let front = [[1.0, 1.0, 0.5], [0.5, 0.5, 1.0]];
		assert_relative_eq!(hypervolume(&front).unwrap(), 0.625);
		assert_relative_eq!(exclusive(&front, 0).unwrap(), 0.375);
		assert_relative_eq!(exclusive(&front, 1).unwrap(), 0.125);
	}

	#[test]
	fn dominated_point_adds_nothing() {
		let front = [[0.5, 0.5, 0.5], [1.0, 1.0, 1.0], [0.2, 0.9, 0.1]];
		let values = contributions(&front).unwrap();
		assert_relative_eq!(values[0], 0.0);
		assert_relative_eq!(hypervolume(&front).unwrap(), 1.0);
	}

	#[test]
	fn duplicates_share_their_volume() {
		let front = [[0.5, 0.5, 0.5], [0.5, 0.5, 0.5]];
		assert_relative_eq!(hypervolume(&front).unwrap(), 0.125);
		assert_eq!(contributions(&front).unwrap(), vec![0.0, 0.0]);
	}

	#[test]
	fn four_objectives_match_inclusion_exclusion() {
		let a = [0.9, 0.2, 0.5, 0.7];
		let b = [0.3, 0.8, 0.6, 0.4];
		let both = [0.3, 0.2, 0.5, 0.4];
		let expected = inclusive(&a) + inclusive(&b) - inclusive(&both);
		assert_relative_eq!(hypervolume(&[a, b]).unwrap(), expected, epsilon = 1e-12);
	}

	#[test]
	fn contributions_never_exceed_the_total() {
		let front = [
			[0.2, 0.8, 0.6],
			[0.5, 0.4, 0.9],
			[0.7, 0.2, 0.3],
			[0.9, 0.6, 0.1],
			[0.3, 0.5, 0.7],
			[0.5, 0.5, 0.5],
		];
		let total = hypervolume(&front).unwrap();
		let values = contributions(&front).unwrap();
		assert!(values.iter().all(|&value| value >= -1e-12));
		assert!(values.iter().sum::<f64>() <= total + 1e-12);
		for (index, value) in values.iter().enumerate() {
			let mut rest = front.to_vec();
			rest.remove(index);
			assert_relative_eq!(total - hypervolume(&rest).unwrap(), *value, epsilon = 1e-12);
		}
	}

	#[test]
	fn empty_and_malformed_fronts() {
		assert_eq!(hypervolume::<[f64; 3]>(&[]), Ok(0.0));
		assert_eq!(exclusive::<[f64; 3]>(&[], 0), Err(Error::EmptyFront));
		let front = vec![vec![0.1, 0.2], vec![0.1, f64::INFINITY]];
		assert_eq!(hypervolume(&front), Err(Error::NonFinite { index: 1, axis: 1 }));
	}
}
