use std::collections::{HashMap, HashSet};

use nalgebra as na;
use render::{LineVertex, VoxelVertex};

const EDGE_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Triangles and edges of the filled voxels.
///
/// Voxel `(i, j, k)` spans `[i, i + 1] × [j, j + 1] × [k, k + 1] / resolution`.
#[derive(Debug, Default)]
pub struct Geometry {
	/// four corners per face
	pub faces: Vec<VoxelVertex>,
	pub centers: Vec<na::Point3<f32>>,
	pub edges: Vec<LineVertex>,
	pub edge_indices: Vec<u32>,
}

impl Geometry {
	/// `filled` and `colors` hold one entry per voxel, first axis slowest.
	pub fn new(resolution: usize, filled: &[bool], colors: &[[f32; 4]]) -> Self {
		let mut geometry = Self::default();
		let mut corners = Corners::default();
		let scale = if resolution == 0 { 1.0 } else { 1.0 / resolution as f32 };
		let index = |cell: [usize; 3]| (cell[0] * resolution + cell[1]) * resolution + cell[2];

		for i in 0..resolution {
			for j in 0..resolution {
				for k in 0..resolution {
					let cell = [i, j, k];
					if !filled[index(cell)] {
						continue;
					}
					for axis in 0..3 {
						for positive in [false, true] {
							let neighbor = if positive {
								(cell[axis] + 1 < resolution).then(|| {
									let mut next = cell;
									next[axis] += 1;
									next
								})
							} else {
								cell[axis].checked_sub(1).map(|value| {
									let mut next = cell;
									next[axis] = value;
									next
								})
							};
							if neighbor.is_some_and(|neighbor| filled[index(neighbor)]) {
								continue;
							}
							let quad = quad(cell, axis, positive);
							geometry.push_face(&quad, axis, positive, colors[index(cell)], scale);
							for side in 0..4 {
								let (a, b) = (quad[side], quad[(side + 1) % 4]);
								if let Some([a, b]) = corners.edge(a, b) {
									geometry.edge_indices.push(a);
									geometry.edge_indices.push(b);
								}
							}
						}
					}
				}
			}
		}

		geometry.edges = corners
			.points
			.iter()
			.map(|corner| LineVertex::new(scaled(*corner, scale), EDGE_COLOR))
			.collect();

		log::debug!(
			"{} faces and {} edges",
			geometry.centers.len(),
			geometry.edge_indices.len() / 2
		);
		geometry
	}

	fn push_face(
		&mut self,
		quad: &[[usize; 3]; 4],
		axis: usize,
		positive: bool,
		color: [f32; 4],
		scale: f32,
	) {
		let mut normal = [0.0; 3];
		normal[axis] = if positive { 1.0 } else { -1.0 };
		let mut center = na::Point3::origin();
		for &corner in quad {
			let position = scaled(corner, scale);
			center += position.coords / 4.0;
			self.faces.push(VoxelVertex {
				position: position.into(),
				normal,
				color,
			});
		}
		self.centers.push(center);
	}
}

/// Corners of the face of `cell` facing along `axis`, in winding order.
fn quad(cell: [usize; 3], axis: usize, positive: bool) -> [[usize; 3]; 4] {
	let (u, v) = ((axis + 1) % 3, (axis + 2) % 3);
	let mut base = cell;
	if positive {
		base[axis] += 1;
	}
	let corner = |du: usize, dv: usize| {
		let mut corner = base;
		corner[u] += du;
		corner[v] += dv;
		corner
	};
	[corner(0, 0), corner(1, 0), corner(1, 1), corner(0, 1)]
}

fn scaled(corner: [usize; 3], scale: f32) -> na::Point3<f32> {
	na::Point3::from(corner.map(|value| value as f32 * scale))
}

/// Lattice corners shared by the edges, every edge is stored once.
#[derive(Debug, Default)]
struct Corners {
	points: Vec<[usize; 3]>,
	lookup: HashMap<[usize; 3], u32>,
	edges: HashSet<(u32, u32)>,
}

impl Corners {
	fn get(&mut self, corner: [usize; 3]) -> u32 {
		if let Some(&index) = self.lookup.get(&corner) {
			return index;
		}
		let index = self.points.len() as u32;
		self.points.push(corner);
		self.lookup.insert(corner, index);
		index
	}

	/// Indices of a new edge, `None` if it exists already.
	fn edge(&mut self, a: [usize; 3], b: [usize; 3]) -> Option<[u32; 2]> {
		let (a, b) = (self.get(a), self.get(b));
		let key = (a.min(b), a.max(b));
		self.edges.insert(key).then_some([a, b])
	}
}

/// Face order from the farthest to the closest center.
pub fn back_to_front(centers: &[na::Point3<f32>], eye: na::Point3<f32>) -> Vec<u32> {
	let distances = centers
		.iter()
		.map(|center| na::distance_squared(center, &eye))
		.collect::<Vec<_>>();
	let mut order = (0..centers.len() as u32).collect::<Vec<_>>();
	order.sort_by(|&a, &b| distances[b as usize].total_cmp(&distances[a as usize]));
	order
}

/// The twelve edges of the unit cube.
pub fn bounding_box(color: [f32; 4]) -> (Vec<LineVertex>, Vec<u32>) {
	let vertices = (0..8)
		.map(|corner| {
			let position = na::point![
				(corner & 1) as f32,
				((corner >> 1) & 1) as f32,
				((corner >> 2) & 1) as f32
			];
			LineVertex::new(position, color)
		})
		.collect();
	let mut indices = Vec::with_capacity(24);
	for corner in 0..8u32 {
		for bit in [1, 2, 4] {
			if corner & bit == 0 {
				indices.push(corner);
				indices.push(corner | bit);
			}
		}
	}
	(vertices, indices)
}

#[cfg(test)]
mod test {
	use super::*;
	use approx::*;

	const RED: [f32; 4] = [1.0, 0.0, 0.0, 0.8];

	#[test]
	fn single_voxel() {
		let geometry = Geometry::new(1, &[true], &[RED]);
		assert_eq!(geometry.centers.len(), 6);
		assert_eq!(geometry.faces.len(), 24);
		assert_eq!(geometry.edges.len(), 8);
		assert_eq!(geometry.edge_indices.len(), 24);
		assert!(geometry.faces.iter().all(|vertex| vertex.color == RED));
		assert!(geometry.edges.iter().all(|vertex| vertex.color == EDGE_COLOR));
	}

	#[test]
	fn adjacent_voxels_share_no_face() {
		let mut filled = vec![false; 8];
		filled[0] = true;
		filled[4] = true;
		let geometry = Geometry::new(2, &filled, &[RED; 8]);
		// two cubes stacked along the first axis
		assert_eq!(geometry.centers.len(), 10);
		assert!(geometry
			.centers
			.iter()
			.all(|center| (center.x - 0.5).abs() > 1e-6));
		assert_eq!(geometry.edges.len(), 12);
		assert_eq!(geometry.edge_indices.len(), 2 * 20);
	}

	#[test]
	fn empty_grid() {
		let geometry = Geometry::new(3, &[false; 27], &[RED; 27]);
		assert!(geometry.faces.is_empty());
		assert!(geometry.edges.is_empty());
		let geometry = Geometry::new(0, &[], &[]);
		assert!(geometry.centers.is_empty());
	}

	#[test]
	fn faces_are_scaled_into_the_unit_cube() {
		let mut filled = vec![false; 8];
		filled[7] = true;
		let geometry = Geometry::new(2, &filled, &[RED; 8]);
		for vertex in geometry.faces.iter() {
			assert!(vertex.position.iter().all(|&value| (0.5..=1.0).contains(&value)));
		}
		let top = geometry
			.faces
			.chunks(4)
			.zip(&geometry.centers)
			.find(|(quad, _)| quad[0].normal == [0.0, 0.0, 1.0])
			.map(|(_, center)| *center)
			.unwrap();
		assert_relative_eq!(top, na::point![0.75, 0.75, 1.0]);
	}

	#[test]
	fn farthest_face_first() {
		let centers = [
			na::point![0.0, 0.0, 1.0],
			na::point![0.0, 0.0, 3.0],
			na::point![0.0, 0.0, 2.0],
		];
		assert_eq!(back_to_front(&centers, na::point![0.0, 0.0, 0.0]), vec![1, 2, 0]);
	}

	#[test]
	fn unit_cube_outline() {
		let (vertices, indices) = bounding_box(EDGE_COLOR);
		assert_eq!(vertices.len(), 8);
		assert_eq!(indices.len(), 24);
	}
}
