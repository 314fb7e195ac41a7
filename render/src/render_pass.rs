pub struct RenderPass<'a>(wgpu::RenderPass<'a>);

impl<'a> std::ops::Deref for RenderPass<'a> {
	type Target = wgpu::RenderPass<'a>;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl<'a> std::ops::DerefMut for RenderPass<'a> {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.0
	}
}

impl<'a> RenderPass<'a> {
	pub fn new(render_pass: wgpu::RenderPass<'a>) -> Self {
		Self(render_pass)
	}

	/// Hands the pass to renderers that need an owned `'static` pass, like egui.
	pub fn forget_lifetime(self) -> wgpu::RenderPass<'static> {
		self.0.forget_lifetime()
	}
}
