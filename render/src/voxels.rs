use wgpu::{util::DeviceExt, vertex_attr_array};

use crate::{depth_texture::DepthTexture, Camera3DGPU, RenderPass, State};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct VoxelVertex {
	pub position: [f32; 3],
	pub normal: [f32; 3],
	pub color: [f32; 4],
}

/// Translucent quads, four vertices per face.
pub struct VoxelState {
	pipeline: wgpu::RenderPipeline,
}

impl VoxelState {
	pub fn new(state: &State) -> Self {
		let shader = state
			.device
			.create_shader_module(wgpu::include_wgsl!("voxels.wgsl"));
		let render_pipeline_layout = state
			.device
			.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
				label: Some("Voxel Pipeline Layout"),
				bind_group_layouts: &[&Camera3DGPU::get_layout(state)],
				push_constant_ranges: &[],
			});

		let pipeline = state
			.device
			.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
				label: Some("voxels"),
				layout: Some(&render_pipeline_layout),
				vertex: wgpu::VertexState {
					module: &shader,
					entry_point: "vs_main",
					compilation_options: Default::default(),
					buffers: &[description()],
				},
				fragment: Some(wgpu::FragmentState {
					module: &shader,
					entry_point: "fs_main",
					compilation_options: Default::default(),
					targets: &[Some(wgpu::ColorTargetState {
						format: state.surface_format,
						blend: Some(wgpu::BlendState::ALPHA_BLENDING),
						write_mask: wgpu::ColorWrites::ALL,
					})],
				}),
				primitive: wgpu::PrimitiveState {
					topology: wgpu::PrimitiveTopology::TriangleList,
					strip_index_format: None,
					front_face: wgpu::FrontFace::Ccw,
					cull_mode: None,
					polygon_mode: wgpu::PolygonMode::Fill,
					unclipped_depth: false,
					conservative: false,
				},
				// faces are sorted back to front and only tested against the opaque edges,
				// pushed slightly back so the edges on top of them stay visible
				depth_stencil: Some(wgpu::DepthStencilState {
					format: DepthTexture::DEPTH_FORMAT,
					depth_write_enabled: false,
					depth_compare: wgpu::CompareFunction::Less,
					stencil: wgpu::StencilState::default(),
					bias: wgpu::DepthBiasState {
						constant: 4,
						slope_scale: 1.0,
						clamp: 0.0,
					},
				}),
				multisample: wgpu::MultisampleState {
					count: 1,
					mask: !0,
					alpha_to_coverage_enabled: false,
				},
				multiview: None,
				cache: None,
			});

		Self { pipeline }
	}
}

pub trait VoxelRenderExt {
	fn render_voxels(&mut self, value: &VoxelMesh, state: &VoxelState, camera: &Camera3DGPU);
}

impl<'a> VoxelRenderExt for RenderPass<'a> {
	fn render_voxels(&mut self, value: &VoxelMesh, state: &VoxelState, camera: &Camera3DGPU) {
		if value.faces == 0 {
			return;
		}
		self.set_pipeline(&state.pipeline);
		self.set_bind_group(0, camera.get_bind_group(), &[]);
		self.set_vertex_buffer(0, value.buffer.slice(..));
		self.set_index_buffer(value.indices.slice(..), wgpu::IndexFormat::Uint32);
		self.draw_indexed(0..value.faces * 6, 0, 0..1);
	}
}

#[derive(Debug)]
pub struct VoxelMesh {
	buffer: wgpu::Buffer,
	indices: wgpu::Buffer,
	faces: u32,
}

impl VoxelMesh {
	/// `vertices` holds four corners per face, in winding order.
	pub fn new(state: &State, vertices: &[VoxelVertex]) -> Self {
		let faces = (vertices.len() / 4) as u32;
		let buffer = state
			.device
			.create_buffer_init(&wgpu::util::BufferInitDescriptor {
				label: Some("voxel buffer"),
				contents: bytemuck::cast_slice(vertices),
				usage: wgpu::BufferUsages::VERTEX,
			});
		let order = (0..faces).collect::<Vec<_>>();
		let indices = state
			.device
			.create_buffer_init(&wgpu::util::BufferInitDescriptor {
				label: Some("voxel indices buffer"),
				contents: bytemuck::cast_slice(&face_indices(&order)),
				usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
			});

		Self { buffer, indices, faces }
	}

	/// Draw the faces in `order`, which must be a permutation of all faces.
	pub fn sort(&self, state: &State, order: &[u32]) {
		debug_assert_eq!(order.len(), self.faces as usize);
		if order.is_empty() {
			return;
		}
		state
			.queue
			.write_buffer(&self.indices, 0, bytemuck::cast_slice(&face_indices(order)));
	}
}

/// Two triangles for every face in `order`.
pub fn face_indices(order: &[u32]) -> Vec<u32> {
	order
		.iter()
		.flat_map(|&face| {
			let base = face * 4;
			[base, base + 1, base + 2, base, base + 2, base + 3]
		})
		.collect()
}

const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
	vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x4];

fn description<'a>() -> wgpu::VertexBufferLayout<'a> {
	wgpu::VertexBufferLayout {
		array_stride: std::mem::size_of::<VoxelVertex>() as wgpu::BufferAddress,
		step_mode: wgpu::VertexStepMode::Vertex,
		attributes: &ATTRIBUTES,
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn two_triangles_per_face() {
		assert_eq!(face_indices(&[1, 0]), vec![4, 5, 6, 4, 6, 7, 0, 1, 2, 0, 2, 3]);
		assert!(face_indices(&[]).is_empty());
	}
}
