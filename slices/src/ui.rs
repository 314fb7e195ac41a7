use nalgebra as na;

use crate::plot::Plot;

const AXIS_OFFSET: f32 = 0.08;

/// Text placed next to the cube, in world space.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
	pub text: String,
	pub position: na::Point3<f32>,
	pub heading: bool,
}

/// Axis names and ticks in voxel units along the three outer edges of the cube.
pub fn axis_labels(resolution: usize) -> Vec<Label> {
	let mut labels = vec![
		Label {
			text: "f1".into(),
			position: na::point![0.5, -3.0 * AXIS_OFFSET, 0.0],
			heading: true,
		},
		Label {
			text: "f2".into(),
			position: na::point![1.0 + 3.0 * AXIS_OFFSET, 0.5, 0.0],
			heading: true,
		},
		Label {
			text: "f3".into(),
			position: na::point![-3.0 * AXIS_OFFSET, 0.0, 0.5],
			heading: true,
		},
	];
	if resolution == 0 {
		return labels;
	}
	let step = (resolution / 5).max(1);
	for tick in (0..=resolution).step_by(step) {
		let t = tick as f32 / resolution as f32;
		let text = tick.to_string();
		labels.push(Label {
			text: text.clone(),
			position: na::point![t, -AXIS_OFFSET, 0.0],
			heading: false,
		});
		labels.push(Label {
			text: text.clone(),
			position: na::point![1.0 + AXIS_OFFSET, t, 0.0],
			heading: false,
		});
		labels.push(Label {
			text,
			position: na::point![-AXIS_OFFSET, 0.0, t],
			heading: false,
		});
	}
	labels
}

fn color32(color: [f32; 4]) -> egui::Color32 {
	let [r, g, b, a] = color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
	egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// `labels` hold window positions in pixels.
pub fn ui(ctx: &egui::Context, plot: &Plot, labels: &[(&Label, na::Point2<f32>)]) {
	egui::TopBottomPanel::top("title")
		.resizable(false)
		.show_separator_line(false)
		.show(ctx, |ui| {
			ui.vertical_centered(|ui| ui.heading(&plot.title));
		});

	egui::SidePanel::right("points")
		.resizable(false)
		.show(ctx, |ui| {
			ui.strong("Exclusive hypervolume");
			ui.add_space(4.0);
			egui::Grid::new("contributions")
				.striped(true)
				.num_columns(5)
				.show(ui, |ui| {
					ui.label("");
					ui.label("point");
					ui.label("cells");
					ui.label("fraction");
					ui.label("ΔHV");
					ui.end_row();

					for (index, entry) in plot.entries.iter().enumerate() {
						let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
						ui.painter().rect_filled(rect, 2.0, color32(entry.color));
						ui.label(format!(
							"({:.2}, {:.2}, {:.2})",
							entry.point[0], entry.point[1], entry.point[2]
						));
						ui.label(entry.cells.to_string());
						ui.label(format!("{:.3}", entry.fraction));
						let value = egui::RichText::new(format!("{:.4}", entry.contribution));
						if plot.least == Some(index) {
							ui.label(value.strong()).on_hover_text("least contributor");
						} else {
							ui.label(value);
						}
						ui.end_row();
					}
				});
			ui.separator();
			ui.label(format!("hypervolume {:.4}", plot.hypervolume));
			ui.label(format!(
				"{} of {} cells owned",
				plot.owned,
				plot.resolution.pow(3)
			));
		});

	let painter = ctx.layer_painter(egui::LayerId::background());
	let scale = ctx.pixels_per_point();
	for (label, position) in labels {
		let size = if label.heading { 16.0 } else { 11.0 };
		painter.text(
			egui::pos2(position.x / scale, position.y / scale),
			egui::Align2::CENTER_CENTER,
			&label.text,
			egui::FontId::proportional(size),
			egui::Color32::BLACK,
		);
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn axis_names() {
		let labels = axis_labels(10);
		let names = labels
			.iter()
			.filter(|label| label.heading)
			.map(|label| label.text.as_str())
			.collect::<Vec<_>>();
		assert_eq!(names, vec!["f1", "f2", "f3"]);
		// 0, 2, ..., 10 on each axis
		assert_eq!(labels.len(), 3 + 3 * 6);
		assert!(labels.iter().any(|label| label.text == "10"));
	}

	#[test]
	fn small_grids() {
		assert_eq!(axis_labels(0).len(), 3);
		assert_eq!(axis_labels(1).len(), 3 + 3 * 2);
	}

	#[test]
	fn colors_round_to_bytes() {
		assert_eq!(
			color32([1.0, 0.0, 0.5, 1.0]),
			egui::Color32::from_rgba_unmultiplied(255, 0, 128, 255)
		);
	}
}
