use std::path::Path;

use onager::{
	manifest::read_manifest, //
	toolchain::read_toolchain,
	GraphError,
	Schedule,
	TargetKind,
};

#[test]
fn demo_manifest_resolves() {
	let manifest = read_manifest(Path::new("tests/test_data/demo.toml")).expect("Could not read manifest");
	assert_eq!(manifest.package_name(), "demo");

	let targets = manifest.resolve().expect("Could not resolve targets");
	assert_eq!(targets.len(), 4);
	assert_eq!(targets[0].name, "core");
	assert_eq!(targets[0].kind, TargetKind::StaticLibrary);
	assert_eq!(targets[0].sources, vec!["core/hash.c", "core/arena.c"]);
	assert_eq!(targets[0].include_dirs, vec!["include"]);
	assert_eq!(targets[2].name, "vendored");
	assert_eq!(targets[2].kind, TargetKind::DependencyGroup);
	assert_eq!(targets[3].name, "app");
	assert_eq!(targets[3].kind, TargetKind::Executable);
	assert_eq!(targets[3].dependencies.len(), 2);
	assert_eq!(targets[3].dependencies[0].name, "core");
	assert_eq!(targets[3].dependencies[1].name, "util");
}

#[test]
fn demo_manifest_schedules() {
	let manifest = read_manifest(Path::new("tests/test_data/demo.toml")).expect("Could not read manifest");
	let targets = manifest.resolve().expect("Could not resolve targets");
	let app = manifest.select_target(&targets, None).expect("Could not select target");
	assert_eq!(app.name, "app");

	let schedule = Schedule::of(app).expect("Could not schedule build");
	assert_eq!(schedule.compile.len(), 4);
	assert_eq!(schedule.link.len(), 3);
	let outputs = schedule.link.iter().map(|x| x.output.as_str()).collect::<Vec<_>>();
	assert_eq!(outputs, vec!["libcore.a", "libutil.a", "app"]);
}

#[test]
fn requested_target_overrides_default() {
	let manifest = read_manifest(Path::new("tests/test_data/demo.toml")).expect("Could not read manifest");
	let targets = manifest.resolve().expect("Could not resolve targets");

	let core = manifest.select_target(&targets, Some("core")).expect("Could not select target");
	assert_eq!(core.name, "core");

	assert!(manifest.select_target(&targets, Some("nonesuch")).is_err());
}

#[test]
fn duplicate_target_name_is_an_error() {
	let manifest = read_manifest(Path::new("tests/test_data/duplicate.toml")).expect("Could not read manifest");
	let err = manifest.resolve().expect_err("Duplicate name was not rejected");
	match err {
		GraphError::DuplicateName { name } => assert_eq!(name, "core"),
		other => panic!("Expected DuplicateName, got {:?}", other),
	}
}

#[test]
fn forward_dependency_reference_is_an_error() {
	let manifest = read_manifest(Path::new("tests/test_data/forward.toml")).expect("Could not read manifest");
	let err = manifest.resolve().expect_err("Forward reference was not rejected");
	match err {
		GraphError::UnknownDependency { target, dependency } => {
			assert_eq!(target, "app");
			assert_eq!(dependency, "core");
		}
		other => panic!("Expected UnknownDependency, got {:?}", other),
	}
}

#[test]
fn missing_manifest_is_an_error() {
	assert!(read_manifest(Path::new("tests/test_data/nonesuch.toml")).is_err());
}

#[test]
fn toolchain_file_overrides_defaults() {
	let toolchain = read_toolchain(Path::new("tests/test_data/toolchain.toml")).expect("Could not read toolchain");
	assert_eq!(toolchain.compiler, vec!["ccache", "cc"]);
	assert_eq!(toolchain.archiver, vec!["llvm-ar"]);
	// Unspecified entries keep their defaults
	assert_eq!(toolchain.linker, vec!["cc"]);
}

#[test]
fn missing_toolchain_file_is_an_error() {
	assert!(read_toolchain(Path::new("tests/test_data/nonesuch.toml")).is_err());
}
