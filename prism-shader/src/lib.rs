
//////
//
// Language config
//

// Eff this convention.
#![allow(non_snake_case)]



//////
//
// Module definitions
//

/// Submodule implementing the configuration sets (defines and type conformances) that select a program version.
pub mod config;
pub use config::{DefineList, TypeConformance, TypeConformanceList}; // re-export

/// Submodule implementing the static program descriptor.
pub mod desc;
pub use desc::{
	ShaderStage, ShaderModel, CompilerFlags, ShaderSource, ShaderModule, EntryPoint, EntryPointGroup, ProgramDesc
}; // re-export

/// Submodule defining the errors that program compilation can report.
mod error;
pub use error::{ConfigurationError, ProgramError}; // re-export

/// Submodule implementing shader source file resolution.
pub mod source;
pub use source::{SourceResolver, SourceError}; // re-export

/// Submodule defining the boundary to the external shader compiler.
pub mod compile;
pub use compile::{
	CompilerService, CodeGenerator, ProgramCode, CompileRequest, CompileOutput, CompiledProgram, Target
}; // re-export

/// Submodule defining the boundary to the graphics device layer.
pub mod device;
pub use device::{
	DeviceLayer, DeviceType, ComponentOf, ReflectionOf, PipelineDispatcher, PipelineCreation, PipelineError,
	TimedDispatcher
}; // re-export

/// Submodule implementing programs, their cached versions and the linked kernels produced from them.
pub mod program;
pub use program::{
	Program, ProgramId, ProgramVersion, ProgramVersionKey, VersionId, ProgramKernels, EntryPointGroupKernels,
	EntryPointKernel, GroupKernelsType, ProgramReflection, EntryPointGroupReflection
}; // re-export

/// Submodule implementing the program manager.
mod manager;
pub use manager::{ProgramManager, ForcedCompilerFlags, CompilationStats}; // re-export

/// Unit tests.
#[cfg(test)]
mod tests;



//////
//
// Imports
//

// Local imports
use prism_util as util;
