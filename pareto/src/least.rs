use std::{
	cmp::{Ordering, Reverse},
	collections::BinaryHeap,
};

use crate::{
	check, covers,
	hypervolume::{contribution, inclusive},
	Error,
};

/// Slab of a contribution between two values of the last objective.
#[derive(Debug)]
struct Slice {
	depth: f64,
	/// other points covering the whole slab, without the last objective
	points: Vec<Vec<f64>>,
}

#[derive(Debug)]
struct Contributor {
	index: usize,
	point: Vec<f64>,
	slices: Vec<Slice>,
	done: usize,
	volume: f64,
}

impl Contributor {
	fn finished(&self) -> bool {
		self.done == self.slices.len()
	}

	fn next_slice(&mut self) {
		let slice = &self.slices[self.done];
		let dims = self.point.len() - 1;
		let area = if slice.points.is_empty() {
			inclusive(&self.point[..dims])
		} else {
			contribution(&self.point, &slice.points, dims)
		};
		log::trace!(
			"point {} slice {} depth {} area {}",
			self.index,
			self.done,
			slice.depth,
			area
		);
		self.volume += area * slice.depth;
		self.done += 1;
	}
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Key {
	volume: f64,
	position: usize,
}

impl Eq for Key {}

impl PartialOrd for Key {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Key {
	fn cmp(&self, other: &Self) -> Ordering {
		self.volume
			.total_cmp(&other.volume)
			.then(self.position.cmp(&other.position))
	}
}

/// Indices of the `k` points with the smallest exclusive contribution, smallest first.
///
/// `k` larger than the front is clamped.
pub fn bottom_k<P: AsRef<[f64]>>(front: &[P], k: usize) -> Result<Vec<usize>, Error> {
	let Some(first) = front.first() else {
		return Err(Error::EmptyFront);
	};
	if k == 0 {
		return Err(Error::InvalidCount(k));
	}
	let dims = first.as_ref().len();
	check(front, dims)?;
	let k = k.min(front.len());

	let points = front
		.iter()
		.map(|point| {
			point
				.as_ref()
				.iter()
				.map(|value| value.max(0.0))
				.collect::<Vec<_>>()
		})
		.collect::<Vec<_>>();

	if dims <= 1 {
		let mut order = (0..points.len()).collect::<Vec<_>>();
		order.sort_by(|&a, &b| {
			let a = points[a].first().copied().unwrap_or(0.0);
			let b = points[b].first().copied().unwrap_or(0.0);
			a.total_cmp(&b)
		});
		order.truncate(k);
		return Ok(order);
	}

	// worsening in the last objective, ties broken by the earlier objectives
	let mut order = (0..points.len()).collect::<Vec<_>>();
	order.sort_by(|&a, &b| {
		let (a, b) = (&points[a], &points[b]);
		(0..dims)
			.rev()
			.map(|axis| b[axis].total_cmp(&a[axis]))
			.find(|ordering| ordering.is_ne())
			.unwrap_or(Ordering::Equal)
	});

	let mut contributors = order
		.iter()
		.map(|&index| {
			let others = order
				.iter()
				.filter(|&&other| other != index)
				.map(|&other| points[other].as_slice());
			let slices = slices(&points[index], others);
			Contributor {
				index,
				point: points[index].clone(),
				slices,
				done: 0,
				volume: 0.0,
			}
		})
		.collect::<Vec<_>>();

	let mut queue = BinaryHeap::with_capacity(contributors.len());
	for (position, contributor) in contributors.iter_mut().enumerate() {
		if !contributor.finished() {
			contributor.next_slice();
		}
		queue.push(Reverse(Key { volume: contributor.volume, position }));
	}

	let mut result = Vec::with_capacity(k);
	while result.len() < k {
		let Some(Reverse(key)) = queue.pop() else {
			break;
		};
		let contributor = &mut contributors[key.position];
		if contributor.finished() {
			log::debug!(
				"least contributor {} with {}",
				contributor.index,
				contributor.volume
			);
			result.push(contributor.index);
		} else {
			contributor.next_slice();
			queue.push(Reverse(Key {
				volume: contributor.volume,
				position: key.position,
			}));
		}
	}
	Ok(result)
}

/// Splits the exclusive contribution of `point` along the last objective.
///
/// `others` must be ordered worsening in the last objective.
fn slices<'a>(point: &[f64], others: impl Iterator<Item = &'a [f64]>) -> Vec<Slice> {
	let last = point.len() - 1;
	let mut top = point[last];
	let mut covering = Vec::<Vec<f64>>::new();
	let mut slices = Vec::new();
	let mut dominated = false;

	for other in others {
		if top > other[last] {
			slices.push(Slice {
				depth: top - other[last],
				points: covering.clone(),
			});
			top = other[last];
		}

		let projected = other[..last].to_vec();
		if !covering.iter().any(|kept| covers(kept, &projected, last)) {
			covering.retain(|kept| !covers(&projected, kept, last));
			covering.push(projected);
		}

		if covers(other, point, last) {
			dominated = true;
			break;
		}
	}
	if !dominated && top > 0.0 {
		slices.push(Slice { depth: top, points: covering });
	}

	slices.sort_by(|a, b| b.depth.total_cmp(&a.depth));
	slices
}
