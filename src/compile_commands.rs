use std::{env, path::Path};

use serde::Serialize;

use crate::{
	schedule::Schedule,
	toolchain::{output_path, Toolchain},
};

// Field order matters: emitted as-declared, matching the usual
// compile_commands.json layout consumed by clangd and friends.
#[derive(Debug, Serialize)]
pub struct CompileCommand {
	pub directory: String,
	pub command: String,
	pub file: String,
	pub output: String,
}

// The shells export PWD; fall back to the OS view of the cwd when launched
// without one (e.g. from a process spawner).
fn working_directory() -> String {
	match env::var("PWD") {
		Ok(x) => x,
		Err(_) => match env::current_dir() {
			Ok(x) => x.to_string_lossy().into_owned(),
			Err(e) => {
				log::warn!("Could not determine working directory: {}", e);
				String::new()
			}
		},
	}
}

pub fn compile_commands(schedule: &Schedule, toolchain: &Toolchain, build_dir: &Path) -> Vec<CompileCommand> {
	let directory = working_directory();
	schedule
		.compile
		.iter()
		.map(|job| CompileCommand {
			directory: directory.clone(),
			command: toolchain.compile_argv(build_dir, job).join(" "),
			file: job.source.clone(),
			output: output_path(build_dir, &job.object),
		})
		.collect()
}

pub fn generate_compile_commands(
	schedule: &Schedule,
	toolchain: &Toolchain,
	build_dir: &Path,
) -> Result<String, serde_json::Error> {
	let mut text = serde_json::to_string_pretty(&compile_commands(schedule, toolchain, build_dir))?;
	text.push('\n');
	Ok(text)
}
