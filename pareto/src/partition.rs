use std::{cmp::Ordering, ops::Not};

/// Points ordered by their last coordinate, ascending. Equal keys keep their input order,
/// `-0.0` and `0.0` are equal.
pub fn sorted(points: &[[f64; 3]]) -> Vec<[f64; 3]> {
	let mut points = points.to_vec();
	points.sort_by(|a, b| a[2].partial_cmp(&b[2]).unwrap_or(Ordering::Equal));
	points
}

/// `resolution` evenly spaced samples of [0, 1], both ends included.
pub fn lattice(resolution: usize) -> Vec<f64> {
	match resolution {
		0 => Vec::new(),
		1 => vec![0.0],
		_ => {
			let step = 1.0 / (resolution - 1) as f64;
			let mut values = (0..resolution)
				.map(|i| i as f64 * step)
				.collect::<Vec<_>>();
			values[resolution - 1] = 1.0;
			values
		},
	}
}

/// Owner of every node of a `resolution`³ lattice over the unit cube.
///
/// Nodes are claimed point by point, a node keeps the first point that dominates it.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
	resolution: usize,
	lattice: Vec<f64>,
	owners: Vec<Option<usize>>,
}

impl Partition {
	pub fn new(points: &[[f64; 3]], resolution: usize) -> Self {
		let lattice = lattice(resolution);
		let mut owners = vec![None; resolution * resolution * resolution];

		for (owner, point) in points.iter().enumerate() {
			for (i, &x) in lattice.iter().enumerate() {
				if (x <= point[0]).not() {
					continue;
				}
				for (j, &y) in lattice.iter().enumerate() {
					if (y <= point[1]).not() {
						continue;
					}
					for (k, &z) in lattice.iter().enumerate() {
						let cell = &mut owners[(i * resolution + j) * resolution + k];
						if z <= point[2] && cell.is_none() {
							*cell = Some(owner);
						}
					}
				}
			}
		}

		Self { resolution, lattice, owners }
	}

	pub fn index(&self, cell: [usize; 3]) -> usize {
		(cell[0] * self.resolution + cell[1]) * self.resolution + cell[2]
	}

	pub fn owner(&self, cell: [usize; 3]) -> Option<usize> {
		self.owners[self.index(cell)]
	}

	pub fn owners(&self) -> &[Option<usize>] {
		&self.owners
	}

	/// Lattice coordinates of a node.
	pub fn position(&self, cell: [usize; 3]) -> [f64; 3] {
		cell.map(|i| self.lattice[i])
	}

	pub fn occupancy(&self) -> Vec<bool> {
		self.owners.iter().map(Option::is_some).collect()
	}

	pub fn owned(&self) -> usize {
		self.owners.iter().filter(|owner| owner.is_some()).count()
	}

	/// Number of nodes claimed by each of the `points` owners.
	pub fn counts(&self, points: usize) -> Vec<usize> {
		let mut counts = vec![0; points];
		for &owner in self.owners.iter().flatten() {
			counts[owner] += 1;
		}
		counts
	}

	pub fn cells(&self) -> impl Iterator<Item = ([usize; 3], Option<usize>)> + '_ {
		let resolution = self.resolution;
		self.owners.iter().enumerate().map(move |(index, &owner)| {
			let cell = [
				index / (resolution * resolution),
				index / resolution % resolution,
				index % resolution,
			];
			(cell, owner)
		})
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn default_points() -> Vec<[f64; 3]> {
		sorted(&[
			[0.2, 0.8, 0.6],
			[0.5, 0.4, 0.9],
			[0.7, 0.2, 0.3],
			[0.9, 0.6, 0.1],
			[0.3, 0.5, 0.7],
			[0.5, 0.5, 0.5],
		])
	}

	#[test]
	fn sort_by_last_coordinate() {
		let points = default_points();
		let last = points.iter().map(|p| p[2]).collect::<Vec<_>>();
		assert_eq!(last, vec![0.1, 0.3, 0.5, 0.6, 0.7, 0.9]);
	}

	#[test]
	fn sort_is_stable() {
		let points = sorted(&[[0.9, 0.0, 0.5], [0.1, 0.0, 0.5], [0.5, 0.0, 0.2]]);
		assert_eq!(points, vec![[0.5, 0.0, 0.2], [0.9, 0.0, 0.5], [0.1, 0.0, 0.5]]);
	}

	#[test]
	fn signed_zeros_keep_input_order() {
		let input = [[1.0, 1.0, 0.0], [0.5, 0.5, -0.0]];
		let points = sorted(&input);
		assert_eq!(points[0], [1.0, 1.0, 0.0]);
		assert!(points[1][2].is_sign_negative());
		let partition = Partition::new(&points, 2);
		assert_eq!(partition.owner([0, 0, 0]), Some(0));
		assert_eq!(points[partition.owner([0, 0, 0]).unwrap()], input[0]);
	}

	#[test]
	fn lattice_ends() {
		assert!(lattice(0).is_empty());
		assert_eq!(lattice(1), vec![0.0]);
		assert_eq!(lattice(2), vec![0.0, 1.0]);
		let values = lattice(10);
		assert_eq!(values.len(), 10);
		assert_eq!(values[0], 0.0);
		assert_eq!(values[9], 1.0);
	}

	#[test]
	fn single_point_at_one_owns_everything() {
		let partition = Partition::new(&[[1.0, 1.0, 1.0]], 2);
		assert!(partition.owners().iter().all(|&owner| owner == Some(0)));
		assert_eq!(partition.owned(), 8);
	}

	#[test]
	fn single_point_at_origin_owns_origin() {
		let partition = Partition::new(&[[0.0, 0.0, 0.0]], 2);
		assert_eq!(partition.owner([0, 0, 0]), Some(0));
		assert_eq!(partition.owned(), 1);
		for (cell, owner) in partition.cells() {
			if cell != [0, 0, 0] {
				assert_eq!(owner, None);
			}
		}
	}

	#[test]
	fn empty_inputs_own_nothing() {
		assert_eq!(Partition::new(&[], 10).owned(), 0);
		let partition = Partition::new(&[[1.0, 1.0, 1.0]], 0);
		assert!(partition.owners().is_empty());
		assert_eq!(partition.counts(1), vec![0]);
	}

	#[test]
	fn owners_dominate_their_cells() {
		let points = default_points();
		let partition = Partition::new(&points, 10);
		for (cell, owner) in partition.cells() {
			let position = partition.position(cell);
			if let Some(owner) = owner {
				let point = points[owner];
				assert!((0..3).all(|axis| point[axis] >= position[axis]));
			}
		}
	}

	#[test]
	fn first_dominator_wins() {
		let points = default_points();
		let partition = Partition::new(&points, 10);
		for (cell, owner) in partition.cells() {
			let position = partition.position(cell);
			let first = points
				.iter()
				.position(|point| (0..3).all(|axis| point[axis] >= position[axis]));
			assert_eq!(owner, first);
		}
	}

	#[test]
	fn occupancy_matches_owners() {
		let points = default_points();
		let partition = Partition::new(&points, 10);
		let occupancy = partition.occupancy();
		assert_eq!(occupancy.len(), 1000);
		assert_eq!(occupancy.iter().filter(|&&filled| filled).count(), partition.owned());
		assert_eq!(partition.counts(points.len()).iter().sum::<usize>(), partition.owned());
		assert!(partition.owned() <= 1000);
	}

	#[test]
	fn repeatable() {
		let points = default_points();
		assert_eq!(Partition::new(&points, 10), Partition::new(&points, 10));
	}

	#[test]
	fn boundary_is_inclusive() {
		// 0.5 is not a node of a 10 lattice, but 1/3 is a node of a 4 lattice
		let values = lattice(4);
		let point = [values[1], values[2], values[3]];
		let partition = Partition::new(&[point], 4);
		assert_eq!(partition.owner([1, 2, 3]), Some(0));
		assert_eq!(partition.owner([2, 2, 3]), None);
		assert_eq!(partition.owned(), 2 * 3 * 4);
	}

	#[test]
	fn index_layout() {
		let partition = Partition::new(&[], 3);
		assert_eq!(partition.index([0, 0, 1]), 1);
		assert_eq!(partition.index([0, 1, 0]), 3);
		assert_eq!(partition.index([1, 0, 0]), 9);
		let cells = partition.cells().map(|(cell, _)| cell).collect::<Vec<_>>();
		assert_eq!(cells[10], [1, 0, 1]);
	}
}
