use nalgebra as na;
use wgpu::util::DeviceExt;

use crate::State;

/// wgpu clip space has depth in [0, 1], nalgebra projections use [-1, 1]
#[rustfmt::skip]
fn depth_correction() -> na::Matrix4<f32> {
	na::matrix![
		1.0, 0.0, 0.0, 0.0;
		0.0, 1.0, 0.0, 0.0;
		0.0, 0.0, 0.5, 0.5;
		0.0, 0.0, 0.0, 1.0;
	]
}

#[derive(Debug, Clone, Copy)]
pub struct Camera3D {
	pub aspect: f32,
	pub fovy: f32,
	pub near: f32,
	pub far: f32,
}

impl Camera3D {
	pub fn projection(&self) -> na::Matrix4<f32> {
		depth_correction() * na::Matrix4::new_perspective(self.aspect, self.fovy, self.near, self.far)
	}

	/// `transform` places the camera in the world, looking along its negative z axis.
	pub fn view_projection(&self, transform: &na::Isometry3<f32>) -> na::Matrix4<f32> {
		self.projection() * transform.inverse().to_homogeneous()
	}

	/// Window position in pixels of a world point, `None` behind the camera.
	pub fn project(
		&self,
		transform: &na::Isometry3<f32>,
		point: na::Point3<f32>,
		window_size: na::Vector2<f32>,
	) -> Option<na::Point2<f32>> {
		let clip = self.view_projection(transform) * point.to_homogeneous();
		if clip.w <= 0.0 {
			return None;
		}
		let ndc = clip.xy() / clip.w;
		Some(na::point![
			(ndc.x + 1.0) / 2.0 * window_size.x,
			(1.0 - ndc.y) / 2.0 * window_size.y
		])
	}
}

pub struct Camera3DGPU {
	buffer: wgpu::Buffer,
	bind_group: wgpu::BindGroup,
}

impl Camera3DGPU {
	pub fn new(state: &State, camera: &Camera3D, transform: &na::Isometry3<f32>) -> Self {
		let uniform = Uniform::new(camera, transform);
		let buffer = state
			.device
			.create_buffer_init(&wgpu::util::BufferInitDescriptor {
				label: Some("Camera Buffer"),
				contents: bytemuck::cast_slice(&[uniform]),
				usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
			});

		let bind_group = state.device.create_bind_group(&wgpu::BindGroupDescriptor {
			layout: &Self::get_layout(state),
			entries: &[wgpu::BindGroupEntry {
				binding: 0,
				resource: buffer.as_entire_binding(),
			}],
			label: Some("camera_bind_group"),
		});
		Self { buffer, bind_group }
	}

	pub fn update(&self, state: &State, camera: &Camera3D, transform: &na::Isometry3<f32>) {
		let uniform = Uniform::new(camera, transform);
		state
			.queue
			.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[uniform]));
	}

	pub fn get_layout(state: &State) -> wgpu::BindGroupLayout {
		state
			.device
			.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
				entries: &[wgpu::BindGroupLayoutEntry {
					binding: 0,
					visibility: wgpu::ShaderStages::VERTEX,
					ty: wgpu::BindingType::Buffer {
						ty: wgpu::BufferBindingType::Uniform,
						has_dynamic_offset: false,
						min_binding_size: None,
					},
					count: None,
				}],
				label: Some("camera_bind_group_layout"),
			})
	}

	pub fn get_bind_group(&self) -> &wgpu::BindGroup {
		&self.bind_group
	}
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniform {
	view_proj: [[f32; 4]; 4],
}

impl Uniform {
	fn new(camera: &Camera3D, transform: &na::Isometry3<f32>) -> Self {
		Self { view_proj: camera.view_projection(transform).into() }
	}
}
