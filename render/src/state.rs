use std::sync::Arc;

use crate::{DepthTexture, Error, Window};

#[derive(Debug)]
pub struct State {
	pub device: wgpu::Device,
	pub queue: wgpu::Queue,
	pub surface_format: wgpu::TextureFormat,
}

impl State {
	pub async fn new(window: Arc<winit::window::Window>) -> Result<(Self, Window), Error> {
		let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
			backends: wgpu::Backends::PRIMARY,
			..Default::default()
		});

		let surface = instance.create_surface(window.clone())?;

		let adapter = instance
			.request_adapter(&wgpu::RequestAdapterOptions {
				power_preference: wgpu::PowerPreference::HighPerformance,
				compatible_surface: Some(&surface),
				force_fallback_adapter: false,
			})
			.await
			.ok_or(Error::NoAdapter)?;
		log::debug!("adapter {:?}", adapter.get_info());

		let (device, queue) = adapter
			.request_device(
				&wgpu::DeviceDescriptor {
					label: None,
					required_features: wgpu::Features::empty(),
					required_limits: wgpu::Limits::default(),
					..Default::default()
				},
				None,
			)
			.await?;

		let config = surface_config(&surface.get_capabilities(&adapter), window.inner_size())?;
		let surface_format = config.format;
		surface.configure(&device, &config);

		let depth_texture = DepthTexture::new(&device, &config, "depth");

		let window = Window::new(window, config, surface, depth_texture);

		Ok((Self { device, queue, surface_format }, window))
	}

	pub fn device(&self) -> &wgpu::Device {
		&self.device
	}

	pub fn surface_format(&self) -> wgpu::TextureFormat {
		self.surface_format
	}
}

/// Prefers an sRGB format, otherwise the first entry of every capability list.
fn surface_config(
	surface_caps: &wgpu::SurfaceCapabilities,
	size: winit::dpi::PhysicalSize<u32>,
) -> Result<wgpu::SurfaceConfiguration, Error> {
	let format = surface_caps
		.formats
		.iter()
		.copied()
		.find(|f| f.is_srgb())
		.or_else(|| surface_caps.formats.first().copied())
		.ok_or(Error::UnsupportedSurface)?;
	let present_mode = surface_caps
		.present_modes
		.first()
		.copied()
		.ok_or(Error::UnsupportedSurface)?;
	let alpha_mode = surface_caps
		.alpha_modes
		.first()
		.copied()
		.ok_or(Error::UnsupportedSurface)?;

	Ok(wgpu::SurfaceConfiguration {
		usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
		format,
		width: size.width.max(1),
		height: size.height.max(1),
		present_mode,
		alpha_mode,
		desired_maximum_frame_latency: 2,
		view_formats: Vec::new(),
	})
}

#[cfg(test)]
mod test {
	use super::*;

	fn capabilities() -> wgpu::SurfaceCapabilities {
		wgpu::SurfaceCapabilities {
			formats: vec![wgpu::TextureFormat::Bgra8Unorm, wgpu::TextureFormat::Bgra8UnormSrgb],
			present_modes: vec![wgpu::PresentMode::Fifo],
			alpha_modes: vec![wgpu::CompositeAlphaMode::Opaque],
			usages: wgpu::TextureUsages::RENDER_ATTACHMENT,
		}
	}

	#[test]
	fn prefers_srgb() {
		let config = surface_config(&capabilities(), winit::dpi::PhysicalSize::new(0, 300)).unwrap();
		assert_eq!(config.format, wgpu::TextureFormat::Bgra8UnormSrgb);
		assert_eq!(config.present_mode, wgpu::PresentMode::Fifo);
		assert_eq!((config.width, config.height), (1, 300));
	}

	#[test]
	fn empty_capabilities_are_an_error() {
		let size = winit::dpi::PhysicalSize::new(640, 480);
		for strip in 0..3 {
			let mut caps = capabilities();
			match strip {
				0 => caps.formats.clear(),
				1 => caps.present_modes.clear(),
				_ => caps.alpha_modes.clear(),
			}
			assert!(matches!(surface_config(&caps, size), Err(Error::UnsupportedSurface)));
		}
	}
}
