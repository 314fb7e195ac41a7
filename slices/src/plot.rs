use crate::{colormap, voxels::Geometry, Error, Scene};

/// Row of the side table, one per sorted point.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
	pub point: [f64; 3],
	/// sRGBA
	pub color: [f32; 4],
	pub cells: usize,
	pub fraction: f64,
	pub contribution: f64,
}

/// Everything shown for one scene, computed once.
#[derive(Debug)]
pub struct Plot {
	pub title: String,
	pub resolution: usize,
	pub entries: Vec<Entry>,
	pub hypervolume: f64,
	pub least: Option<usize>,
	pub owned: usize,
	pub geometry: Geometry,
}

impl Plot {
	pub fn new(scene: &Scene) -> Result<Self, Error> {
		scene.validate()?;
		let points = pareto::sorted(&scene.points);
		log::debug!("sorted points {:?}", points);

		let resolution = scene.resolution;
		let partition = pareto::Partition::new(&points, resolution);
		let palette = colormap::palette(points.len(), scene.alpha);

		// unowned cells are masked, their color only fills the array
		let fallback = palette.first().copied().unwrap_or([0.0, 0.0, 0.0, scene.alpha]);
		let colors = partition
			.owners()
			.iter()
			.map(|owner| colormap::linear(owner.map_or(fallback, |owner| palette[owner])))
			.collect::<Vec<_>>();
		let geometry = Geometry::new(resolution, &partition.occupancy(), &colors);

		let counts = partition.counts(points.len());
		let contributions = pareto::contributions(&points)?;
		let hypervolume = pareto::hypervolume(&points)?;
		let least = match points.len() {
			0 => None,
			_ => pareto::bottom_k(&points, 1)?.first().copied(),
		};
		let total = resolution * resolution * resolution;

		let entries = points
			.iter()
			.enumerate()
			.map(|(index, &point)| Entry {
				point,
				color: palette[index],
				cells: counts[index],
				fraction: if total == 0 { 0.0 } else { counts[index] as f64 / total as f64 },
				contribution: contributions[index],
			})
			.collect::<Vec<_>>();

		log::info!(
			"{} points on a {}³ grid, {} cells owned",
			points.len(),
			resolution,
			partition.owned()
		);
		for (index, entry) in entries.iter().enumerate() {
			log::info!(
				"point {} {:?}: {} cells, exclusive hypervolume {:.6}",
				index,
				entry.point,
				entry.cells,
				entry.contribution
			);
		}
		log::info!("hypervolume {:.6}", hypervolume);
		if let Some(least) = least {
			log::info!("least contributor {}", least);
		}

		Ok(Self {
			title: scene.title.clone(),
			resolution,
			entries,
			hypervolume,
			least,
			owned: partition.owned(),
			geometry,
		})
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use approx::*;
	use nalgebra as na;

	#[test]
	fn default_scene() {
		let plot = Plot::new(&Scene::default()).unwrap();
		assert_eq!(plot.entries.len(), 6);
		assert_eq!(plot.title, crate::scene::TITLE);
		let last = plot.entries.iter().map(|entry| entry.point[2]).collect::<Vec<_>>();
		assert_eq!(last, vec![0.1, 0.3, 0.5, 0.6, 0.7, 0.9]);
		assert_eq!(plot.entries.iter().map(|entry| entry.cells).sum::<usize>(), plot.owned);
		assert!(plot.owned <= 1000);
		assert!(!plot.geometry.centers.is_empty());

		let contributions = plot.entries.iter().map(|entry| entry.contribution).sum::<f64>();
		assert!(contributions <= plot.hypervolume + 1e-12);
		let least = plot.least.unwrap();
		assert!(plot
			.entries
			.iter()
			.all(|entry| entry.contribution >= plot.entries[least].contribution - 1e-12));
	}

	#[test]
	fn fractions_and_colors() {
		let scene = Scene {
			points: vec![[1.0, 1.0, 1.0]],
			resolution: 2,
			..Default::default()
		};
		let plot = Plot::new(&scene).unwrap();
		assert_eq!(plot.owned, 8);
		assert_relative_eq!(plot.entries[0].fraction, 1.0);
		assert_relative_eq!(plot.entries[0].contribution, 1.0);
		// a lone owner has no place on the map and is drawn black
		assert_eq!(plot.entries[0].color, [0.0, 0.0, 0.0, 0.8]);
		assert_eq!(plot.least, Some(0));
		// a filled 2³ block shows only its hull
		assert_eq!(plot.geometry.centers.len(), 24);
	}

	#[test]
	fn faces_take_the_color_of_their_owner() {
		let scene = Scene::default();
		let plot = Plot::new(&scene).unwrap();
		let resolution = scene.resolution;
		let partition = pareto::Partition::new(&pareto::sorted(&scene.points), resolution);

		let mut seen = std::collections::HashSet::new();
		for (face, center) in plot.geometry.faces.chunks(4).zip(&plot.geometry.centers) {
			let normal = na::Vector3::from(face[0].normal);
			let inside = *center - normal * (0.5 / resolution as f32);
			let cell = [0, 1, 2].map(|axis| (inside[axis] * resolution as f32).floor() as usize);
			let owner = partition.owner(cell).unwrap();
			seen.insert(owner);
			let expected = colormap::linear(plot.entries[owner].color);
			assert!(face.iter().all(|vertex| vertex.color == expected));
		}
		assert!(seen.len() > 1);

		let again = Plot::new(&scene).unwrap();
		assert_eq!(again.geometry.faces, plot.geometry.faces);
		assert_eq!(again.entries, plot.entries);
	}

	#[test]
	fn empty_scene() {
		let scene = Scene { points: Vec::new(), ..Default::default() };
		let plot = Plot::new(&scene).unwrap();
		assert!(plot.entries.is_empty());
		assert_eq!(plot.least, None);
		assert!(plot.geometry.faces.is_empty());
		assert_eq!(plot.hypervolume, 0.0);
	}

	#[test]
	fn invalid_points_are_rejected() {
		let scene = Scene {
			points: vec![[0.5, f64::NAN, 0.5]],
			..Default::default()
		};
		assert!(matches!(Plot::new(&scene), Err(Error::Pareto(_))));
	}
}
