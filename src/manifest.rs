use std::{
	env, //
	fs,
	path::Path,
	sync::Arc,
};

use serde::Deserialize;

use crate::{
	err_msg,
	schedule::GraphError,
	target::{Target, TargetKind},
};

pub const ONAGER_TOML: &str = "onager.toml";

#[derive(Debug, Deserialize)]
pub struct Manifest {
	package: PackageManifest,
	#[serde(default, rename = "target")]
	targets: Vec<TargetManifest>,
}

#[derive(Debug, Deserialize)]
struct PackageManifest {
	name: String,
	#[allow(dead_code)]
	version: Option<String>,
	#[serde(rename = "default-target")]
	default_target: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TargetManifest {
	name: String,
	kind: TargetKind,
	#[serde(default)]
	sources: Vec<String>,
	#[serde(default, rename = "include-dirs")]
	include_dirs: Vec<String>,
	#[serde(default)]
	dependencies: Vec<String>,
}

pub fn read_manifest(manifest_path: &Path) -> Result<Manifest, anyhow::Error> {
	let manifest_toml = match fs::read_to_string(manifest_path) {
		Ok(x) => x,
		Err(e) => {
			return err_msg(format!(
				"Error opening {}: {}",
				env::current_dir()?.join(manifest_path).display(),
				e
			))
		}
	};

	let manifest = match toml::from_str::<Manifest>(&manifest_toml) {
		Ok(x) => x,
		Err(e) => {
			return err_msg(format!(
				"Error reading {}: {}",
				env::current_dir()?.join(manifest_path).display(),
				e
			))
		}
	};

	Ok(manifest)
}

impl Manifest {
	pub fn package_name(&self) -> &str {
		&self.package.name
	}

	// Entries are resolved in file order; a dependency must be declared
	// before any target naming it, which also rules out manifest cycles.
	pub fn resolve(&self) -> Result<Vec<Arc<Target>>, GraphError> {
		let mut resolved: Vec<Arc<Target>> = Vec::new();
		for entry in &self.targets {
			if resolved.iter().any(|t| t.name == entry.name) {
				return Err(GraphError::DuplicateName { name: entry.name.clone() });
			}
			let mut target = match entry.kind {
				TargetKind::Executable => Target::executable(&entry.name),
				TargetKind::StaticLibrary => Target::static_library(&entry.name),
				TargetKind::DependencyGroup => Target::dependency_group(&entry.name),
			};
			for source in &entry.sources {
				target.add_source(source);
			}
			for dir in &entry.include_dirs {
				target.add_include_directory(dir);
			}
			for dep_name in &entry.dependencies {
				match resolved.iter().find(|t| &t.name == dep_name) {
					Some(dep) => target.add_dependency(dep.clone()),
					None => {
						return Err(GraphError::UnknownDependency {
							target: entry.name.clone(),
							dependency: dep_name.clone(),
						})
					}
				}
			}
			log::debug!("resolved target: {}", target);
			resolved.push(Arc::new(target));
		}
		Ok(resolved)
	}

	pub fn select_target<'a>(
		&self,
		resolved: &'a [Arc<Target>],
		requested: Option<&str>,
	) -> Result<&'a Arc<Target>, anyhow::Error> {
		let name = match requested {
			Some(x) => x,
			None => match &self.package.default_target {
				Some(x) => x.as_str(),
				// The last declared target is the most dependent one
				None => match resolved.last() {
					Some(x) => return Ok(x),
					None => return err_msg(format!("Package \"{}\" defines no targets", self.package.name)),
				},
			},
		};
		match resolved.iter().find(|t| t.name == name) {
			Some(x) => Ok(x),
			None => err_msg(format!("No target named \"{}\" in package \"{}\"", name, self.package.name)),
		}
	}
}
