
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

/// Tests for the runtime environment.
#[cfg(test)]
mod tests;



//////
//
// Imports
//

// Standard library
use std::{fs, collections::BTreeMap, path::{Path, PathBuf}};

// Serde framework
use serde;
use serde_yaml_ng;



//////
//
// Structs
//

/// Names of compiler flags that should be forcefully enabled or disabled on every program. The names are those of the
/// `prism_shader::CompilerFlags` constants (e.g. `GENERATE_DEBUG_INFO`). A flag listed in both sets ends up enabled.
#[derive(Default, Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ForcedFlags {
	/// Flags forced on for all programs.
	pub enabled: Vec<String>,

	/// Flags forced off for all programs.
	pub disabled: Vec<String>
}

/// A struct storing runtime environment information for a *Prism* application: the shader search path and the global
/// compilation settings that participate in every program compilation.
#[derive(Default, Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Environment {
	/// Array of directory paths to search for whenever shader files are given by a relative path. Earlier entries take
	/// precedence.
	pub shaderPath: Vec<PathBuf>,

	/// Preprocessor defines applied to all programs (before any program-specific defines).
	pub globalDefines: BTreeMap<String, String>,

	/// Additional command line arguments passed to the compiler for all programs.
	pub globalCompilerArguments: Vec<String>,

	/// Compiler flags that are forced on or off for all programs.
	pub forcedFlags: ForcedFlags,

	/// Whether to generate shader debug information for all programs.
	pub generateDebugInfo: bool,

	/// Whether *SPIR-V* should be emitted directly by the compiler instead of through a downstream compiler.
	pub spirvDirect: bool,

	/// Compiler profile (e.g. `sm_6_5`) naming the shader model of programs that don't specify one. If absent, the
	/// default of the device is used.
	pub shaderModel: Option<String>
}
impl Environment
{
	///
	pub fn serialize (&self) -> Vec<u8> {
		let mut bytes = Vec::new();
		serde_yaml_ng::to_writer(&mut bytes, self).expect(
			"INTERNAL LOGIC ERROR: failed to serialize an instance of prism_runenv::Environment"
		);
		bytes
	}

	///
	pub fn serializeToFile (&self, filename: impl AsRef<Path>) -> anyhow::Result<()> {
		Ok(fs::write(filename, self.serialize())?)
	}

	///
	pub fn deserialize (bytes: impl AsRef<[u8]>) -> Result<Self, serde_yaml_ng::Error> {
		serde_yaml_ng::from_slice(bytes.as_ref())
	}

	/// Load the environment from the given YAML file. Relative entries of the shader path are anchored at the directory
	/// containing the file.
	pub fn fromFile (filename: impl AsRef<Path>) -> anyhow::Result<Self>
	{
		let filename = filename.as_ref();
		let mut env = Self::deserialize(fs::read(filename)?).map_err(
			|err| anyhow::anyhow!("Invalid runtime environment `{}`: {err}", filename.display())
		)?;
		if let Some(anchor) = filename.parent() {
			for path in env.shaderPath.iter_mut() {
				if path.is_relative() {
					*path = anchor.join(&path);
				}
			}
		}
		Ok(env)
	}
}
