use std::sync::Arc;

use thiserror::Error;

use crate::target::{Target, TargetKind};

#[derive(Debug, Error)]
pub enum GraphError {
	#[error("Dependency cycle detected: {path} -> {name}")]
	CycleDetected { name: String, path: String },
	#[error("Duplicate target name: {name}")]
	DuplicateName { name: String },
	#[error("Target \"{target}\" depends on \"{dependency}\", which is not defined before it")]
	UnknownDependency { target: String, dependency: String },
}

#[derive(Clone, Debug)]
pub struct CompileJob {
	pub object: String,
	pub source: String,
	pub include_dirs: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct LinkJob {
	pub output: String,
	pub kind: TargetKind,
	pub objects: Vec<String>,
	pub libraries: Vec<String>,
}

#[derive(Debug, Default)]
pub struct Schedule {
	pub compile: Vec<CompileJob>,
	pub link: Vec<LinkJob>,
	pub jobs: usize,
	pub jobs_done: usize,

	scheduled: Vec<String>,
}

impl Schedule {
	pub fn new() -> Schedule {
		Schedule::default()
	}

	pub fn of(target: &Arc<Target>) -> Result<Schedule, GraphError> {
		let mut schedule = Schedule::new();
		schedule.add(target)?;
		Ok(schedule)
	}

	pub fn add(&mut self, target: &Arc<Target>) -> Result<(), GraphError> {
		let mut in_progress = Vec::new();
		self.schedule_target(target, &mut in_progress)
	}

	pub fn is_scheduled(&self, name: &str) -> bool {
		self.scheduled.iter().any(|x| x == name)
	}

	// Depth-first post-order walk. Dependencies land in the job lists before
	// their dependents, so every library is produced before a link job names
	// it. Targets are identified by name alone; a name seen again while its
	// first visit is still on the stack is a cycle.
	fn schedule_target(&mut self, target: &Arc<Target>, in_progress: &mut Vec<String>) -> Result<(), GraphError> {
		if self.is_scheduled(&target.name) {
			log::debug!("already scheduled: {}", target.name);
			return Ok(());
		}
		if in_progress.iter().any(|x| x == &target.name) {
			return Err(GraphError::CycleDetected {
				name: target.name.clone(),
				path: in_progress.join(" -> "),
			});
		}
		in_progress.push(target.name.clone());

		// Link-library order is dependency declaration order, nothing smarter
		let mut libraries = Vec::new();
		for dep in &target.dependencies {
			self.schedule_target(dep, in_progress)?;
			libraries.push(dep.name.clone());
		}

		let mut objects = Vec::new();
		for source in &target.sources {
			let object = format!("{}.o", source);
			objects.push(object.clone());
			self.compile.push(CompileJob {
				object,
				source: source.clone(),
				include_dirs: target.include_dirs.clone(),
			});
			self.jobs += 1;
		}

		if let Some(output) = target.output_name() {
			self.link.push(LinkJob {
				output,
				kind: target.kind,
				objects,
				libraries,
			});
			self.jobs += 1;
		}

		in_progress.pop();
		self.scheduled.push(target.name.clone());
		log::debug!("scheduled: {}", target.name);
		Ok(())
	}
}
