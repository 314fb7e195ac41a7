use nalgebra as na;
use wgpu::{util::DeviceExt, vertex_attr_array};

use crate::{depth_texture::DepthTexture, Camera3DGPU, RenderPass, State};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
	pub position: [f32; 3],
	pub color: [f32; 4],
}

impl LineVertex {
	pub fn new(position: na::Point3<f32>, color: [f32; 4]) -> Self {
		Self { position: position.into(), color }
	}
}

pub struct LinesState {
	pipeline: wgpu::RenderPipeline,
}

impl LinesState {
	pub fn new(state: &State) -> Self {
		let shader = state
			.device
			.create_shader_module(wgpu::include_wgsl!("lines.wgsl"));
		let render_pipeline_layout = state
			.device
			.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
				label: Some("Lines Pipeline Layout"),
				bind_group_layouts: &[&Camera3DGPU::get_layout(state)],
				push_constant_ranges: &[],
			});

		let pipeline = state
			.device
			.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
				label: Some("lines"),
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
						blend: Some(wgpu::BlendState::REPLACE),
						write_mask: wgpu::ColorWrites::ALL,
					})],
				}),
				primitive: wgpu::PrimitiveState {
					topology: wgpu::PrimitiveTopology::LineList,
					strip_index_format: None,
					front_face: wgpu::FrontFace::Ccw,
					cull_mode: None,
					polygon_mode: wgpu::PolygonMode::Fill,
					unclipped_depth: false,
					conservative: false,
				},
				depth_stencil: Some(wgpu::DepthStencilState {
					format: DepthTexture::DEPTH_FORMAT,
					depth_write_enabled: true,
					depth_compare: wgpu::CompareFunction::LessEqual,
					stencil: wgpu::StencilState::default(),
					bias: wgpu::DepthBiasState::default(),
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

pub trait LinesRenderExt {
	fn render_lines(&mut self, value: &Lines, state: &LinesState, camera: &Camera3DGPU);
}

impl<'a> LinesRenderExt for RenderPass<'a> {
	fn render_lines(&mut self, value: &Lines, state: &LinesState, camera: &Camera3DGPU) {
		if value.instances == 0 {
			return;
		}
		self.set_pipeline(&state.pipeline);
		self.set_bind_group(0, camera.get_bind_group(), &[]);
		self.set_vertex_buffer(0, value.buffer.slice(..));
		self.set_index_buffer(value.indices.slice(..), wgpu::IndexFormat::Uint32);
		self.draw_indexed(0..value.instances, 0, 0..1);
	}
}

/// Line segments, every pair of `indices` is one segment.
#[derive(Debug)]
pub struct Lines {
	buffer: wgpu::Buffer,
	indices: wgpu::Buffer,
	instances: u32,
}

impl Lines {
	pub fn new(state: &State, vertices: &[LineVertex], indices: &[u32]) -> Self {
		let buffer = state
			.device
			.create_buffer_init(&wgpu::util::BufferInitDescriptor {
				label: Some("lines buffer"),
				contents: bytemuck::cast_slice(vertices),
				usage: wgpu::BufferUsages::VERTEX,
			});

		let indices_buffer = state
			.device
			.create_buffer_init(&wgpu::util::BufferInitDescriptor {
				label: Some("lines indices buffer"),
				contents: bytemuck::cast_slice(indices),
				usage: wgpu::BufferUsages::INDEX,
			});

		Self {
			buffer,
			indices: indices_buffer,
			instances: indices.len() as u32,
		}
	}
}

const ATTRIBUTES: [wgpu::VertexAttribute; 2] = vertex_attr_array![0 => Float32x3, 1 => Float32x4];

fn description<'a>() -> wgpu::VertexBufferLayout<'a> {
	wgpu::VertexBufferLayout {
		array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
		step_mode: wgpu::VertexStepMode::Vertex,
		attributes: &ATTRIBUTES,
	}
}
