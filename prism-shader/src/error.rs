
//////
//
// Imports
//

// Standard library
use std::{error::Error, fmt::{Display, Formatter}, path::PathBuf};



//////
//
// Errors
//

/// Errors in the configuration of a program, as opposed to errors reported by the compiler about the shader code.
#[derive(Debug,Clone,PartialEq,Eq)]
pub enum ConfigurationError {
	/// A type named in a type conformance does not exist in the compiled program.
	UnresolvedType(String),

	/// An interface named in a type conformance does not exist in the compiled program.
	UnresolvedInterface(String),

	/// A shader model profile string could not be parsed.
	MalformedProfile(String),

	/// A shader source file could not be located in any of the search paths.
	SourceNotFound(PathBuf),

	/// A compiler flag name in a configuration file is not known.
	UnknownCompilerFlag(String),

	/// An entry point group references a shader module index that the program does not have.
	InvalidShaderModuleIndex { group: usize, index: usize },

	/// An entry point group mixes stages of different pipeline types.
	MixedStageGroup(usize),

	/// An entry point group contains no entry points.
	EmptyEntryPointGroup(usize)
}
impl Display for ConfigurationError {
	fn fmt (&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
		let desc = match self {
			Self::UnresolvedType(name) => format!("type `{name}` in type conformance was not found"),
			Self::UnresolvedInterface(name) => format!("interface type `{name}` in type conformance was not found"),
			Self::MalformedProfile(profile) => format!("malformed shader model profile: `{profile}`"),
			Self::SourceNotFound(path) => format!("can't find shader file `{}`", path.display()),
			Self::UnknownCompilerFlag(name) => format!("unknown compiler flag: `{name}`"),
			Self::InvalidShaderModuleIndex { group, index } => format!(
				"entry point group #{group} references non-existent shader module #{index}"
			),
			Self::MixedStageGroup(group) => format!("entry point group #{group} mixes incompatible pipeline stages"),
			Self::EmptyEntryPointGroup(group) => format!("entry point group #{group} contains no entry points")
		};
		write!(formatter, "ConfigurationError[{desc}]")
	}
}
impl Error for ConfigurationError {}


/// Errors that can occur when turning a [`Program`](crate::Program) into a
/// [version](crate::ProgramVersion) or into [kernels](crate::ProgramKernels). Every variant except `Orphaned` carries
/// the full diagnostics log accumulated up to the point of failure.
#[derive(Debug,Clone)]
pub enum ProgramError {
	/// The program is misconfigured.
	Configuration { error: ConfigurationError, log: String },

	/// The compiler front end rejected the program.
	Compilation { program: String, log: String },

	/// Composing type conformances or entry points, or reflecting the composition, failed.
	Linking { program: String, log: String },

	/// The device layer failed to materialize the linked program.
	Device { program: String, log: String },

	/// The program version outlived the program it was produced from.
	Orphaned,

	/// The program version was produced from a different program than the one it was passed with.
	VersionMismatch
}
impl ProgramError
{
	/// The diagnostics log accumulated before the error occurred, if the error carries one.
	pub fn log (&self) -> Option<&str> {
		match self {
			Self::Configuration { log, .. } | Self::Compilation { log, .. } | Self::Linking { log, .. }
			| Self::Device { log, .. } => Some(log.as_str()),
			Self::Orphaned | Self::VersionMismatch => None
		}
	}

	///
	#[inline(always)]
	pub fn isConfigurationError (&self) -> bool {
		matches!(self, Self::Configuration {..})
	}
}
impl Display for ProgramError {
	fn fmt (&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
		let desc = match self {
			Self::Configuration { error, log } => format!("invalid configuration: {error}\n{log}"),
			Self::Compilation { program, log } => format!("failed to compile program {program}:\n{log}"),
			Self::Linking { program, log } => format!("failed to link program {program}:\n{log}"),
			Self::Device { program, log } => format!("failed to create device program for {program}:\n{log}"),
			Self::Orphaned => "the program of the version no longer exists".into(),
			Self::VersionMismatch => "version belongs to a different program".into()
		};
		write!(formatter, "ProgramError[{desc}]")
	}
}
impl Error for ProgramError {}
impl From<ConfigurationError> for ProgramError {
	#[inline(always)]
	fn from (error: ConfigurationError) -> Self {
		Self::Configuration { error, log: String::new() }
	}
}
