use std::{fs::File, io::BufReader, path::Path};

use crate::Error;

pub const TITLE: &str = "Exclusive ΔHV slices rendered as voxels";

/// 256³ cells
pub const MAX_RESOLUTION: usize = 256;

/// Points and grid of one plot.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Scene {
	pub points: Vec<[f64; 3]>,
	pub resolution: usize,
	pub alpha: f32,
	pub title: String,
}

impl Default for Scene {
	fn default() -> Self {
		Self {
			points: vec![
				[0.2, 0.8, 0.6],
				[0.5, 0.4, 0.9],
				[0.7, 0.2, 0.3],
				[0.9, 0.6, 0.1],
				[0.3, 0.5, 0.7],
				[0.5, 0.5, 0.5],
			],
			resolution: 10,
			alpha: 0.8,
			title: TITLE.into(),
		}
	}
}

impl Scene {
	pub fn load(path: &Path) -> Result<Self, Error> {
		let file = File::open(path)?;
		let scene: Self = serde_json::from_reader(BufReader::new(file))?;
		log::info!("loaded scene from {}", path.display());
		Ok(scene)
	}

	pub fn validate(&self) -> Result<(), Error> {
		if self.resolution > MAX_RESOLUTION {
			return Err(Error::Resolution(self.resolution));
		}
		pareto::check(&self.points, 3)?;
		Ok(())
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn default_scene() {
		let scene = Scene::default();
		assert_eq!(scene.points.len(), 6);
		assert_eq!(scene.resolution, 10);
		assert_eq!(scene.alpha, 0.8);
		assert_eq!(scene.title, "Exclusive ΔHV slices rendered as voxels");
		assert!(scene.validate().is_ok());
	}

	#[test]
	fn missing_fields_use_defaults() {
		let scene: Scene = serde_json::from_str(r#"{ "resolution": 4 }"#).unwrap();
		assert_eq!(scene.resolution, 4);
		assert_eq!(scene.points, Scene::default().points);
		assert_eq!(scene.title, TITLE);

		let scene: Scene = serde_json::from_str(r#"{ "points": [[1.0, 1.0, 1.0]] }"#).unwrap();
		assert_eq!(scene.points, vec![[1.0, 1.0, 1.0]]);
		assert_eq!(scene.resolution, 10);
	}

	#[test]
	fn resolution_is_limited() {
		let mut scene = Scene { resolution: MAX_RESOLUTION, ..Default::default() };
		assert!(scene.validate().is_ok());
		scene.resolution = MAX_RESOLUTION + 1;
		assert!(matches!(scene.validate(), Err(Error::Resolution(257))));
		scene.resolution = usize::MAX;
		assert!(matches!(scene.validate(), Err(Error::Resolution(usize::MAX))));
	}

	#[test]
	fn rejects_malformed_files() {
		assert!(serde_json::from_str::<Scene>(r#"{ "points": [[1.0, 1.0]] }"#).is_err());
		assert!(matches!(
			Scene::load(Path::new("does/not/exist.json")),
			Err(Error::IO(_))
		));
	}
}
