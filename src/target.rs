use core::fmt;
use std::sync::Arc;

use serde::Deserialize;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TargetKind {
	Executable,
	StaticLibrary,
	DependencyGroup,
}

#[derive(Debug)]
pub struct Target {
	pub name: String,
	pub kind: TargetKind,
	pub sources: Vec<String>,
	pub include_dirs: Vec<String>,
	pub dependencies: Vec<Arc<Target>>,
}

impl fmt::Display for Target {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			r#"Target{{
   name: {},
   kind: {:?},
   sources: [{}],
   include_dirs: [{}],
   dependencies: [{}],
}}"#,
			self.name,
			self.kind,
			self.sources.join(", "),
			self.include_dirs.join(", "),
			self.dependencies.iter().map(|x| x.name.clone()).collect::<Vec<String>>().join(", "),
		)
	}
}

impl Target {
	fn new(name: &str, kind: TargetKind) -> Target {
		Target {
			name: name.to_owned(),
			kind,
			sources: Vec::new(),
			include_dirs: Vec::new(),
			dependencies: Vec::new(),
		}
	}

	pub fn executable(name: &str) -> Target {
		Target::new(name, TargetKind::Executable)
	}

	pub fn static_library(name: &str) -> Target {
		Target::new(name, TargetKind::StaticLibrary)
	}

	pub fn dependency_group(name: &str) -> Target {
		Target::new(name, TargetKind::DependencyGroup)
	}

	pub fn add_source(&mut self, source: &str) {
		self.sources.push(source.to_owned());
	}

	pub fn add_include_directory(&mut self, dir: &str) {
		self.include_dirs.push(dir.to_owned());
	}

	pub fn add_dependency(&mut self, dep: Arc<Target>) {
		self.dependencies.push(dep);
	}

	// Dependency groups produce no artifact of their own
	pub fn output_name(&self) -> Option<String> {
		match self.kind {
			TargetKind::Executable => Some(self.name.clone()),
			TargetKind::StaticLibrary => Some(format!("lib{}.a", self.name)),
			TargetKind::DependencyGroup => None,
		}
	}
}
