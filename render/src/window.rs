use std::sync::Arc;

use nalgebra as na;

use crate::{DepthTexture, Error, RenderPass, State};

pub struct Window {
	window: Arc<winit::window::Window>,
	config: wgpu::SurfaceConfiguration,
	surface: wgpu::Surface<'static>,
	depth_texture: DepthTexture,
}

/// Frame being recorded, handed to the closure of [`Window::render`].
pub struct Context<'a> {
	encoder: wgpu::CommandEncoder,
	view: wgpu::TextureView,
	depth: &'a DepthTexture,
}

impl Window {
	pub fn new(
		window: Arc<winit::window::Window>,
		config: wgpu::SurfaceConfiguration,
		surface: wgpu::Surface<'static>,
		depth_texture: DepthTexture,
	) -> Self {
		Self { window, config, surface, depth_texture }
	}

	pub fn inner(&self) -> &winit::window::Window {
		&self.window
	}

	pub fn inner_size(&self) -> winit::dpi::PhysicalSize<u32> {
		self.window.inner_size()
	}

	pub fn get_aspect(&self) -> f32 {
		self.config.width as f32 / self.config.height as f32
	}

	pub fn get_size(&self) -> na::Vector2<f32> {
		na::vector![self.config.width as f32, self.config.height as f32]
	}

	pub fn request_redraw(&self) {
		self.window.request_redraw();
	}

	pub fn config(&self) -> &wgpu::SurfaceConfiguration {
		&self.config
	}

	pub fn resized(&mut self, state: &State) {
		let size = self.window.inner_size();
		self.config.width = size.width.max(1);
		self.config.height = size.height.max(1);
		self.surface.configure(&state.device, &self.config);
		self.depth_texture = DepthTexture::new(&state.device, &self.config, "depth");
	}

	/// Records one frame with `render` and presents it.
	///
	/// A lost or outdated surface is reconfigured and the frame skipped.
	pub fn render(&mut self, state: &State, render: impl FnOnce(&mut Context)) -> Result<(), Error> {
		let output = match self.surface.get_current_texture() {
			Ok(output) => output,
			Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
				log::debug!("surface lost, reconfigure");
				self.surface.configure(&state.device, &self.config);
				return Ok(());
			},
			Err(wgpu::SurfaceError::Timeout) => {
				log::warn!("surface timeout");
				return Ok(());
			},
			Err(wgpu::SurfaceError::OutOfMemory) => return Err(Error::OutOfMemory),
		};
		let view = output.texture.create_view(&Default::default());
		let encoder = state
			.device
			.create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Render Encoder") });

		let mut context = Context { encoder, view, depth: &self.depth_texture };
		render(&mut context);

		state.queue.submit(Some(context.encoder.finish()));
		output.present();
		Ok(())
	}
}

impl<'a> Context<'a> {
	pub fn encoder(&mut self) -> &mut wgpu::CommandEncoder {
		&mut self.encoder
	}

	/// Clears color and depth, for the 3D content.
	pub fn render_pass(&mut self, background: na::Point3<f32>) -> RenderPass {
		RenderPass::new(self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
			label: Some("Render Pass"),
			color_attachments: &[Some(wgpu::RenderPassColorAttachment {
				view: &self.view,
				resolve_target: None,
				ops: wgpu::Operations {
					load: wgpu::LoadOp::Clear(wgpu::Color {
						r: background.x as f64,
						g: background.y as f64,
						b: background.z as f64,
						a: 1.0,
					}),
					store: wgpu::StoreOp::Store,
				},
			})],
			depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
				view: &self.depth.view,
				depth_ops: Some(wgpu::Operations {
					load: wgpu::LoadOp::Clear(1.0),
					store: wgpu::StoreOp::Store,
				}),
				stencil_ops: None,
			}),
			occlusion_query_set: None,
			timestamp_writes: None,
		}))
	}

	/// Keeps the color, without depth, for overlays.
	pub fn post_process_pass(&mut self) -> RenderPass {
		RenderPass::new(self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
			label: Some("overlay"),
			color_attachments: &[Some(wgpu::RenderPassColorAttachment {
				view: &self.view,
				resolve_target: None,
				ops: wgpu::Operations {
					load: wgpu::LoadOp::Load,
					store: wgpu::StoreOp::Store,
				},
			})],
			depth_stencil_attachment: None,
			occlusion_query_set: None,
			timestamp_writes: None,
		}))
	}
}
