pub mod compile_commands;
pub mod executor;
pub mod manifest;
pub mod schedule;
pub mod target;
pub mod toolchain;

pub use executor::{build, BuildError};
pub use schedule::{CompileJob, GraphError, LinkJob, Schedule};
pub use target::{Target, TargetKind};
pub use toolchain::Toolchain;

pub(crate) fn err_msg<T>(msg: String) -> Result<T, anyhow::Error> {
	Err(anyhow::Error::msg(msg))
}
