mod camera_3d;
mod depth_texture;
mod lines;
mod render_pass;
mod state;
mod voxels;
mod window;

pub use camera_3d::*;
pub use depth_texture::*;
pub use lines::*;
pub use render_pass::*;
pub use state::*;
pub use voxels::*;
pub use window::*;

#[derive(thiserror::Error, Debug)]
pub enum Error {
	#[error(transparent)]
	CreateSurface(#[from] wgpu::CreateSurfaceError),

	#[error("no graphics adapter for the window surface")]
	NoAdapter,

	#[error("the adapter reports no format for the window surface")]
	UnsupportedSurface,

	#[error(transparent)]
	RequestDevice(#[from] wgpu::RequestDeviceError),

	#[error("surface out of memory")]
	OutOfMemory,
}
