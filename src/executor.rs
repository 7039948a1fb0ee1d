use std::{
	fs,
	io,
	path::Path,
	process::{Command, ExitStatus},
	sync::Arc,
};

use thiserror::Error;

use crate::{
	compile_commands::generate_compile_commands,
	schedule::{GraphError, Schedule},
	target::{Target, TargetKind},
	toolchain::Toolchain,
};

pub const COMPILE_COMMANDS_JSON: &str = "compile_commands.json";

#[derive(Debug, Error)]
pub enum BuildError {
	#[error("Compiling {object} failed: {status}")]
	CompileFailed { object: String, status: ExitStatus },
	#[error("Linking {output} failed: {status}")]
	LinkFailed { output: String, status: ExitStatus },
	#[error("Error running \"{program}\": {source}")]
	Spawn { program: String, source: io::Error },
	#[error("{context} \"{path}\": {source}")]
	Io {
		context: &'static str,
		path: String,
		source: io::Error,
	},
	#[error(transparent)]
	Graph(#[from] GraphError),
	#[error("Error serializing compilation database: {0}")]
	Database(#[from] serde_json::Error),
}

fn run(argv: &[String]) -> Result<ExitStatus, BuildError> {
	log::debug!("run: {}", argv.join(" "));
	let (program, args) = match argv.split_first() {
		Some(x) => x,
		None => {
			return Err(BuildError::Spawn {
				program: String::new(),
				source: io::Error::new(io::ErrorKind::InvalidInput, "empty command"),
			})
		}
	};
	match Command::new(program).args(args).status() {
		Ok(status) => Ok(status),
		Err(e) => Err(BuildError::Spawn { program: program.clone(), source: e }),
	}
}

fn create_parent_dir(build_dir: &Path, name: &str) -> Result<(), BuildError> {
	let out = build_dir.join(name);
	if let Some(parent) = out.parent() {
		if let Err(e) = fs::create_dir_all(parent) {
			return Err(BuildError::Io {
				context: "Error creating directory",
				path: parent.to_string_lossy().into_owned(),
				source: e,
			});
		}
	}
	Ok(())
}

pub fn compile_objects(schedule: &mut Schedule, toolchain: &Toolchain, build_dir: &Path) -> Result<(), BuildError> {
	let Schedule { compile, jobs, jobs_done, .. } = schedule;
	for job in compile.iter() {
		println!("[{}/{}] Compiling {}", *jobs_done + 1, jobs, job.object);
		create_parent_dir(build_dir, &job.object)?;
		let status = run(&toolchain.compile_argv(build_dir, job))?;
		if !status.success() {
			return Err(BuildError::CompileFailed { object: job.object.clone(), status });
		}
		*jobs_done += 1;
	}
	Ok(())
}

pub fn link_targets(schedule: &mut Schedule, toolchain: &Toolchain, build_dir: &Path) -> Result<(), BuildError> {
	let Schedule { link, jobs, jobs_done, .. } = schedule;
	for job in link.iter() {
		println!("[{}/{}] Linking {}", *jobs_done + 1, jobs, job.output);
		create_parent_dir(build_dir, &job.output)?;
		let argv = match job.kind {
			TargetKind::StaticLibrary => toolchain.archive_argv(build_dir, job),
			TargetKind::Executable => toolchain.link_argv(build_dir, job),
			// The scheduler emits no link jobs for dependency groups
			TargetKind::DependencyGroup => continue,
		};
		let status = run(&argv)?;
		if !status.success() {
			return Err(BuildError::LinkFailed { output: job.output.clone(), status });
		}
		*jobs_done += 1;
	}
	Ok(())
}

// Every build starts from an empty output root. There is no incremental
// rebuild support: stale artifacts are removed wholesale.
fn recreate_build_dir(build_dir: &Path) -> Result<(), BuildError> {
	match fs::remove_dir_all(build_dir) {
		Ok(()) => {}
		Err(e) if e.kind() == io::ErrorKind::NotFound => {}
		Err(e) => {
			return Err(BuildError::Io {
				context: "Error removing directory",
				path: build_dir.to_string_lossy().into_owned(),
				source: e,
			})
		}
	}
	if let Err(e) = fs::create_dir_all(build_dir) {
		return Err(BuildError::Io {
			context: "Error creating directory",
			path: build_dir.to_string_lossy().into_owned(),
			source: e,
		});
	}
	Ok(())
}

pub fn run_schedule(schedule: &mut Schedule, toolchain: &Toolchain, build_dir: &Path) -> Result<(), BuildError> {
	recreate_build_dir(build_dir)?;
	compile_objects(schedule, toolchain, build_dir)?;
	link_targets(schedule, toolchain, build_dir)?;

	println!("Generating {}", COMPILE_COMMANDS_JSON);
	let json = generate_compile_commands(schedule, toolchain, build_dir)?;
	let json_path = build_dir.join(COMPILE_COMMANDS_JSON);
	if let Err(e) = fs::write(&json_path, json) {
		return Err(BuildError::Io {
			context: "Error writing",
			path: json_path.to_string_lossy().into_owned(),
			source: e,
		});
	}
	Ok(())
}

pub fn build(target: &Arc<Target>, toolchain: &Toolchain, build_dir: &Path) -> Result<Schedule, BuildError> {
	let mut schedule = Schedule::of(target)?;
	run_schedule(&mut schedule, toolchain, build_dir)?;
	Ok(schedule)
}
