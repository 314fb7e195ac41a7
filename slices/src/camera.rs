use nalgebra as na;

const BASE_ROTATE_SPEED: f32 = 0.005;
const KEY_ROTATE_SPEED: f32 = 1.5;
const MAX_ELEVATION: f32 = 89.0 * std::f32::consts::TAU / 360.0;

/// 30 degrees
const FIELD_OF_VIEW: f32 = 30.0 * std::f32::consts::TAU / 360.0;

/// Orbit around the center of the unit cube, `f3` up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
	pub elevation: f32,
	pub azimuth: f32,
	pub distance: f32,
}

impl Default for Orbit {
	/// elevation 30°, azimuth -60°
	fn default() -> Self {
		Self {
			elevation: 30.0f32.to_radians(),
			azimuth: (-60.0f32).to_radians(),
			distance: 3.5,
		}
	}
}

impl Orbit {
	pub fn target() -> na::Point3<f32> {
		na::point![0.5, 0.5, 0.5]
	}

	pub fn eye(&self) -> na::Point3<f32> {
		let (sin_e, cos_e) = self.elevation.sin_cos();
		let (sin_a, cos_a) = self.azimuth.sin_cos();
		Self::target() + na::vector![cos_e * cos_a, cos_e * sin_a, sin_e] * self.distance
	}

	/// Camera to world.
	pub fn transform(&self) -> na::Isometry3<f32> {
		na::Isometry3::look_at_rh(&self.eye(), &Self::target(), &na::Vector3::z()).inverse()
	}

	pub fn rotate(&mut self, delta: na::Vector2<f32>) {
		self.azimuth -= delta.x;
		self.elevation = (self.elevation + delta.y).clamp(-MAX_ELEVATION, MAX_ELEVATION);
	}

	pub fn scroll(&mut self, value: f32) {
		self.distance = (self.distance * (1.0 + value / 10.0)).clamp(0.5, 50.0);
	}
}

/// Camera controller
pub struct Camera {
	gpu: render::Camera3DGPU,
	cam: render::Camera3D,
	orbit: Orbit,
}

impl Camera {
	pub fn new(state: &render::State, aspect: f32) -> Self {
		let camera = render::Camera3D {
			aspect,
			fovy: FIELD_OF_VIEW,
			near: 0.05,
			far: 100.0,
		};
		let orbit = Orbit::default();

		Self {
			gpu: render::Camera3DGPU::new(state, &camera, &orbit.transform()),
			cam: camera,
			orbit,
		}
	}

	pub fn update_aspect(&mut self, aspect: f32, state: &render::State) {
		self.cam.aspect = aspect;
		self.update_gpu(state);
	}

	fn update_gpu(&self, state: &render::State) {
		self.gpu.update(state, &self.cam, &self.orbit.transform());
	}

	/// Drag distance in pixels.
	pub fn rotate(&mut self, delta: na::Vector2<f32>, state: &render::State) {
		self.orbit.rotate(delta * BASE_ROTATE_SPEED);
		self.update_gpu(state);
	}

	/// Arrow key direction, held for `seconds`.
	pub fn turn(&mut self, direction: na::Vector2<f32>, seconds: f32, state: &render::State) {
		self.orbit.rotate(direction * KEY_ROTATE_SPEED * seconds);
		self.update_gpu(state);
	}

	pub fn scroll(&mut self, value: f32, state: &render::State) {
		self.orbit.scroll(value);
		self.update_gpu(state);
	}

	pub fn reset(&mut self, state: &render::State) {
		self.orbit = Orbit::default();
		self.update_gpu(state);
	}

	pub fn position(&self) -> na::Point3<f32> {
		self.orbit.eye()
	}

	/// Window position in pixels of a world point.
	pub fn project(&self, point: na::Point3<f32>, window_size: na::Vector2<f32>) -> Option<na::Point2<f32>> {
		self.cam.project(&self.orbit.transform(), point, window_size)
	}

	pub fn gpu(&self) -> &render::Camera3DGPU {
		&self.gpu
	}
}
