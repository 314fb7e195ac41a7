use std::path::PathBuf;

use clap::Parser;

/// Shows which point dominates every cell of a grid over the unit cube
#[derive(clap::Parser)]
#[command(version)]
struct Args {
	/// JSON scene with `points`, `resolution`, `alpha` and `title`, missing fields use the built in scene
	scene: Option<PathBuf>,
}

fn main() -> std::process::ExitCode {
	let args = Args::parse();
	if let Err(err) = simple_logger::SimpleLogger::new()
		.with_level(log::LevelFilter::Info)
		.env()
		.init()
	{
		eprintln!("Error: {}", err);
	}

	let res = match args.scene {
		Some(path) => slices::Scene::load(&path),
		None => Ok(slices::Scene::default()),
	}
	.and_then(slices::run);

	match res {
		Ok(()) => std::process::ExitCode::SUCCESS,
		Err(err) => {
			println!("Error: {}", err);
			std::process::ExitCode::FAILURE
		},
	}
}
