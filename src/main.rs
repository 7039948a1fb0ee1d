use std::{
	fs, //
	path::PathBuf,
	process::ExitCode,
};

use clap::Parser;

use onager::{
	compile_commands::generate_compile_commands,
	executor,
	manifest::{self, ONAGER_TOML},
	schedule::Schedule,
	toolchain::{read_toolchain, Toolchain},
};

#[derive(Parser)]
#[command(name = "onager", version, about = "A declarative build engine for C projects")]
struct Args {
	/// Path to the build manifest
	#[arg(short = 'f', long = "manifest", default_value = ONAGER_TOML)]
	manifest: PathBuf,

	/// Directory receiving build artifacts, wiped before every build
	#[arg(short = 'B', long = "build-dir", default_value = "build")]
	build_dir: PathBuf,

	/// Toolchain description file; defaults to cc/ar
	#[arg(short = 'T', long = "toolchain")]
	toolchain: Option<PathBuf>,

	/// Only write compile_commands.json, without compiling or linking
	#[arg(long = "emit-only")]
	emit_only: bool,

	/// Target to build; defaults to the manifest's default-target
	target: Option<String>,
}

fn run(args: &Args) -> Result<(), anyhow::Error> {
	let toolchain = match &args.toolchain {
		Some(path) => read_toolchain(path)?,
		None => Toolchain::default(),
	};

	let manifest = manifest::read_manifest(&args.manifest)?;
	let targets = manifest.resolve()?;
	let root = manifest.select_target(&targets, args.target.as_deref())?;
	log::info!("package: {}", manifest.package_name());
	log::info!(" target: {}", root.name);

	if args.emit_only {
		let schedule = Schedule::of(root)?;
		let json = generate_compile_commands(&schedule, &toolchain, &args.build_dir)?;
		fs::create_dir_all(&args.build_dir)?;
		fs::write(args.build_dir.join(executor::COMPILE_COMMANDS_JSON), json)?;
		return Ok(());
	}

	let schedule = executor::build(root, &toolchain, &args.build_dir)?;
	println!("Built {} jobs for {}", schedule.jobs, root.name);
	Ok(())
}

fn main() -> ExitCode {
	env_logger::Builder::from_env(env_logger::Env::default().filter_or("ONAGER_LOG", "off"))
		.format_timestamp(None)
		.init();

	let args = Args::parse();

	match run(&args) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			println!("Error: {}", e);
			ExitCode::FAILURE
		}
	}
}
