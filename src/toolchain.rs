use std::{fs, path::Path};

use serde::Deserialize;

use crate::{
	err_msg, //
	schedule::{CompileJob, LinkJob},
};

#[derive(Debug, Deserialize)]
pub struct ToolchainFile {
	compiler: Option<Vec<String>>,
	archiver: Option<Vec<String>>,
	linker: Option<Vec<String>>,
}

#[derive(Clone, Debug)]
pub struct Toolchain {
	pub compiler: Vec<String>,
	pub archiver: Vec<String>,
	pub linker: Vec<String>,
}

impl Default for Toolchain {
	fn default() -> Toolchain {
		Toolchain {
			compiler: vec!["cc".to_owned()],
			archiver: vec!["ar".to_owned()],
			linker: vec!["cc".to_owned()],
		}
	}
}

pub fn read_toolchain(toolchain_path: &Path) -> Result<Toolchain, anyhow::Error> {
	let toolchain_toml = match fs::read_to_string(toolchain_path) {
		Ok(x) => x,
		Err(e) => return err_msg(format!("Error opening toolchain file \"{}\": {}", toolchain_path.display(), e)),
	};

	let toolchain_file = match toml::from_str::<ToolchainFile>(&toolchain_toml) {
		Ok(x) => x,
		Err(e) => return err_msg(format!("Error reading toolchain file \"{}\": {}", toolchain_path.display(), e)),
	};

	let defaults = Toolchain::default();
	let toolchain = Toolchain {
		compiler: toolchain_file.compiler.unwrap_or(defaults.compiler),
		archiver: toolchain_file.archiver.unwrap_or(defaults.archiver),
		linker: toolchain_file.linker.unwrap_or(defaults.linker),
	};

	for (cmd, what) in [
		(&toolchain.compiler, "compiler"),
		(&toolchain.archiver, "archiver"),
		(&toolchain.linker, "linker"),
	] {
		if cmd.is_empty() {
			return err_msg(format!("Toolchain {} command is empty in \"{}\"", what, toolchain_path.display()));
		}
	}

	log::info!("compiler: {}", toolchain.compiler.join(" "));
	log::info!("archiver: {}", toolchain.archiver.join(" "));
	log::info!("  linker: {}", toolchain.linker.join(" "));

	Ok(toolchain)
}

pub(crate) fn output_path(build_dir: &Path, name: &str) -> String {
	build_dir
		.join(name)
		.to_string_lossy()
		.trim_start_matches(r"\\?\")
		.to_owned()
}

impl Toolchain {
	// The exact argv the executor runs. generate_compile_commands() reuses
	// this, so the database and the real invocation cannot drift apart.
	pub fn compile_argv(&self, build_dir: &Path, job: &CompileJob) -> Vec<String> {
		let mut argv = self.compiler.clone();
		argv.push("-c".to_owned());
		argv.push("-o".to_owned());
		argv.push(output_path(build_dir, &job.object));
		for dir in &job.include_dirs {
			argv.push(format!("-I{}", dir));
		}
		argv.push(job.source.clone());
		argv
	}

	pub fn archive_argv(&self, build_dir: &Path, job: &LinkJob) -> Vec<String> {
		let mut argv = self.archiver.clone();
		argv.push("-crs".to_owned());
		argv.push(output_path(build_dir, &job.output));
		for object in &job.objects {
			argv.push(output_path(build_dir, object));
		}
		argv
	}

	pub fn link_argv(&self, build_dir: &Path, job: &LinkJob) -> Vec<String> {
		let mut argv = self.linker.clone();
		argv.push("-o".to_owned());
		argv.push(output_path(build_dir, &job.output));
		argv.push(format!("-L{}", build_dir.display()));
		for library in &job.libraries {
			argv.push(format!("-l{}", library));
		}
		for object in &job.objects {
			argv.push(output_path(build_dir, object));
		}
		argv
	}
}
