//! the import-resolution and simulation-compilation pipeline: resolves the
//! model's import declarations into bound data-source handles, validates each
//! simulation block's vehicle assignments, derives the artifact layout, and
//! drives the exporters that produce the SUMO input bundle.
mod artifact;
mod assignment;
mod compile_error;
mod compiler;
mod import_resolver;
mod sumo_config;
pub mod time_ops;

pub use artifact::ArtifactPlan;
pub use assignment::{build_assignment_mappings, AssignmentMappings};
pub use compile_error::CompileError;
pub use compiler::SimulationCompiler;
pub use import_resolver::{DataSourceHandles, ImportResolver};
pub use sumo_config::{SumoConfig, TIME_TO_TELEPORT_SECONDS};
