mod camera;
mod colormap;
mod plot;
mod program;
mod scene;
mod ui;
mod voxels;

use nalgebra as na;
use program::Program;
use winit::event_loop::{ActiveEventLoop, ControlFlow};

pub use plot::{Entry, Plot};
pub use scene::Scene;

/// Computes the partition of `scene` and shows it until the window closes.
pub fn run(scene: Scene) -> Result<(), Error> {
	let plot = Plot::new(&scene)?;

	let event_loop = winit::event_loop::EventLoop::new()?;
	let mut app = App::Starting(Some(plot));
	event_loop.run_app(&mut app)?;

	if let App::Error(err) = app {
		return Err(err);
	}
	Ok(())
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
	#[error(transparent)]
	EventLoop(#[from] winit::error::EventLoopError),

	#[error(transparent)]
	Window(#[from] winit::error::OsError),

	#[error(transparent)]
	Render(#[from] render::Error),

	#[error(transparent)]
	IO(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error(transparent)]
	Pareto(#[from] pareto::Error),

	#[error("resolution {0} is above the limit of {max}", max = scene::MAX_RESOLUTION)]
	Resolution(usize),
}

enum App {
	/// the window is created on the first resume
	Starting(Option<Plot>),
	Running(Box<Program>),
	Error(Error),
}

impl winit::application::ApplicationHandler for App {
	fn resumed(&mut self, event_loop: &ActiveEventLoop) {
		let Self::Starting(plot) = self else {
			return;
		};
		let Some(plot) = plot.take() else {
			return;
		};
		match Program::new(event_loop, plot) {
			Ok(program) => {
				log::debug!("window created");
				*self = Self::Running(Box::new(program));
			},
			Err(err) => {
				event_loop.exit();
				*self = Self::Error(err);
			},
		}
	}

	fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
		self.try_do(event_loop, |program| {
			let flow = if program.update() {
				ControlFlow::Poll
			} else {
				ControlFlow::Wait
			};
			event_loop.set_control_flow(flow);
			Ok(())
		})
	}

	fn window_event(
		&mut self,
		event_loop: &ActiveEventLoop,
		_window_id: winit::window::WindowId,
		event: winit::event::WindowEvent,
	) {
		self.try_do(event_loop, move |program| {
			let response = program
				.egui_winit
				.on_window_event(program.window.inner(), &event);
			if response.repaint {
				program.window.request_redraw();
			}
			if response.consumed {
				return Ok(());
			}

			match event {
				winit::event::WindowEvent::CloseRequested => {
					event_loop.exit();
				},
				winit::event::WindowEvent::RedrawRequested => {
					program.render()?;
				},
				winit::event::WindowEvent::Resized(_size) => {
					program.resized();
				},
				winit::event::WindowEvent::ScaleFactorChanged { .. } => {
					program.resized();
				},
				winit::event::WindowEvent::Focused(false) => {
					program.focus_lost();
				},
				winit::event::WindowEvent::KeyboardInput { event, .. } => {
					match event.physical_key {
						winit::keyboard::PhysicalKey::Code(key) => program.key(key, event.state),
						winit::keyboard::PhysicalKey::Unidentified(_) => {},
					}
				},
				winit::event::WindowEvent::MouseInput { state, button, .. } => {
					program.mouse_click(button.into(), state);
				},
				winit::event::WindowEvent::CursorMoved { position, .. } => {
					let position = na::point![position.x as f32, position.y as f32];
					program.mouse_move(position);
				},
				winit::event::WindowEvent::MouseWheel { delta, .. } => {
					let delta = match delta {
						winit::event::MouseScrollDelta::LineDelta(_, y) => -y,
						winit::event::MouseScrollDelta::PixelDelta(pos) => -pos.y as f32 / 100.0,
					};
					program.scroll(delta);
				},
				_ => {},
			}
			Ok(())
		})
	}
}

impl App {
	fn try_do(
		&mut self,
		event_loop: &ActiveEventLoop,
		action: impl FnOnce(&mut Program) -> Result<(), Error>,
	) {
		match self {
			Self::Running(program) => match action(program.as_mut()) {
				Ok(()) => {},
				Err(err) => {
					event_loop.exit();
					*self = Self::Error(err)
				},
			},
			Self::Starting(_) | Self::Error(_) => {},
		}
	}
}
