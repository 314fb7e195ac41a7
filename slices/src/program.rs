use std::sync::Arc;

use nalgebra as na;
use pollster::FutureExt;
use render::{LinesRenderExt, VoxelRenderExt};
use winit::event_loop::ActiveEventLoop;

use crate::{
	camera::Camera,
	plot::Plot,
	ui::{self, Label},
	voxels, Error,
};

const BACKGROUND: [f32; 3] = [1.0, 1.0, 1.0];
const OUTLINE_COLOR: [f32; 4] = [0.6, 0.6, 0.6, 1.0];

pub struct Program {
	pub state: render::State,
	pub window: render::Window,

	pub keyboard: input::Keyboard,
	pub mouse: input::Mouse,
	time: Time,
	paused: bool,

	pub egui: egui::Context,
	pub egui_winit: egui_winit::State,
	pub egui_wgpu: egui_wgpu::Renderer,

	pub camera: Camera,
	voxel_state: render::VoxelState,
	lines_state: render::LinesState,
	mesh: render::VoxelMesh,
	edges: render::Lines,
	outline: render::Lines,
	labels: Vec<Label>,

	plot: Plot,
}

impl Program {
	pub fn new(event_loop: &ActiveEventLoop, plot: Plot) -> Result<Self, Error> {
		let attributes = winit::window::Window::default_attributes()
			.with_title(plot.title.as_str())
			.with_inner_size(winit::dpi::LogicalSize::new(1000.0, 720.0));
		let window = Arc::new(event_loop.create_window(attributes)?);
		let (state, window) = render::State::new(window).block_on()?;

		let camera = Camera::new(&state, window.get_aspect());
		let voxel_state = render::VoxelState::new(&state);
		let lines_state = render::LinesState::new(&state);

		let mesh = render::VoxelMesh::new(&state, &plot.geometry.faces);
		let edges = render::Lines::new(&state, &plot.geometry.edges, &plot.geometry.edge_indices);
		let (outline_vertices, outline_indices) = voxels::bounding_box(OUTLINE_COLOR);
		let outline = render::Lines::new(&state, &outline_vertices, &outline_indices);
		let labels = ui::axis_labels(plot.resolution);

		let egui = egui::Context::default();
		egui.set_visuals(egui::Visuals::light());
		let egui_winit = egui_winit::State::new(
			egui.clone(),
			egui.viewport_id(),
			window.inner(),
			Some(window.inner().scale_factor() as f32),
			None,
			None,
		);
		let egui_wgpu = egui_wgpu::Renderer::new(state.device(), state.surface_format(), None, 1, false);

		let program = Self {
			state,
			window,

			keyboard: input::Keyboard::new(),
			mouse: input::Mouse::new(),
			time: Time::new(),
			paused: false,

			egui,
			egui_winit,
			egui_wgpu,

			camera,
			voxel_state,
			lines_state,
			mesh,
			edges,
			outline,
			labels,

			plot,
		};
		program.sort_faces();
		Ok(program)
	}

	/// Faces are blended in the order they are drawn.
	fn sort_faces(&self) {
		let order = voxels::back_to_front(&self.plot.geometry.centers, self.camera.position());
		self.mesh.sort(&self.state, &order);
	}

	pub fn render(&mut self) -> Result<(), Error> {
		if self.paused {
			return Ok(());
		}
		let window_size = self.window.get_size();
		let labels = self
			.labels
			.iter()
			.filter_map(|label| {
				self.camera
					.project(label.position, window_size)
					.map(|position| (label, position))
			})
			.collect::<Vec<_>>();

		let raw_input = self.egui_winit.take_egui_input(self.window.inner());
		let full_output = self
			.egui
			.run(raw_input, |ctx| ui::ui(ctx, &self.plot, &labels));
		self.egui_winit
			.handle_platform_output(self.window.inner(), full_output.platform_output);

		let paint_jobs = self
			.egui
			.tessellate(full_output.shapes, full_output.pixels_per_point);

		let config = self.window.config();
		let screen = egui_wgpu::ScreenDescriptor {
			size_in_pixels: [config.width, config.height],
			pixels_per_point: full_output.pixels_per_point,
		};
		for (id, delta) in full_output.textures_delta.set {
			self.egui_wgpu
				.update_texture(&self.state.device, &self.state.queue, id, &delta);
		}
		for id in full_output.textures_delta.free {
			self.egui_wgpu.free_texture(&id);
		}

		self.window.render(&self.state, |context| {
			let command_encoder = context.encoder();
			let commands = self.egui_wgpu.update_buffers(
				&self.state.device,
				&self.state.queue,
				command_encoder,
				&paint_jobs,
				&screen,
			);
			self.state.queue.submit(commands);

			let mut render_pass = context.render_pass(na::Point3::from(BACKGROUND));
			render_pass.render_lines(&self.outline, &self.lines_state, self.camera.gpu());
			render_pass.render_lines(&self.edges, &self.lines_state, self.camera.gpu());
			render_pass.render_voxels(&self.mesh, &self.voxel_state, self.camera.gpu());
			drop(render_pass);

			let mut render_pass = context.post_process_pass().forget_lifetime();
			self.egui_wgpu.render(&mut render_pass, &paint_jobs, &screen);
			drop(render_pass);
		})?;
		Ok(())
	}

	/// Turns the view while arrow keys are held, returns `true` if it moved.
	pub fn update(&mut self) -> bool {
		let delta = self.time.elapsed().as_secs_f32();
		let mut direction = na::vector![0.0, 0.0];
		if self.keyboard.pressed(input::KeyCode::ArrowRight) {
			direction.x += 1.0;
		}
		if self.keyboard.pressed(input::KeyCode::ArrowDown) {
			direction.y -= 1.0;
		}
		if self.keyboard.pressed(input::KeyCode::ArrowLeft) {
			direction.x -= 1.0;
		}
		if self.keyboard.pressed(input::KeyCode::ArrowUp) {
			direction.y += 1.0;
		}
		if direction.norm() == 0.0 {
			return false;
		}
		self.camera.turn(direction, delta.min(0.1), &self.state);
		self.moved();
		true
	}

	pub fn key(&mut self, key: input::KeyCode, key_state: input::State) {
		if self.keyboard.update(key, key_state) && key == input::KeyCode::KeyR {
			self.camera.reset(&self.state);
			self.moved();
		}
	}

	pub fn mouse_click(&mut self, button: input::MouseButton, button_state: input::State) {
		self.mouse.update(button, button_state);
	}

	pub fn mouse_move(&mut self, position: na::Point2<f32>) {
		let delta = self.mouse.delta(position);
		if self.mouse.pressed(input::MouseButton::Left) {
			self.camera.rotate(delta, &self.state);
			self.moved();
		}
	}

	pub fn scroll(&mut self, delta: f32) {
		self.camera.scroll(delta, &self.state);
		self.moved();
	}

	pub fn focus_lost(&mut self) {
		self.keyboard.release_all();
	}

	fn moved(&self) {
		self.sort_faces();
		self.window.request_redraw();
	}

	pub fn resized(&mut self) {
		if self.window.inner_size().width == 0 || self.window.inner_size().height == 0 {
			self.paused = true;
			return;
		}
		self.paused = false;
		self.window.resized(&self.state);
		self.camera
			.update_aspect(self.window.get_aspect(), &self.state);
	}
}

struct Time {
	last: std::time::Instant,
}

impl Time {
	pub fn new() -> Self {
		Self { last: std::time::Instant::now() }
	}

	pub fn elapsed(&mut self) -> std::time::Duration {
		let delta = self.last.elapsed();
		self.last = std::time::Instant::now();
		delta
	}
}
