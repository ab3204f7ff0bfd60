
//////
//
// Imports
//

// Standard library
use std::{error::Error, fmt::{Display, Formatter}, path::{Path, PathBuf}};

// Tracing library
use tracing;

// Local imports
use crate::*;



//////
//
// Errors
//

///
#[derive(Debug,Clone,PartialEq,Eq)]
pub enum SourceError {
	NotFound(PathBuf)
}
impl Display for SourceError {
	fn fmt (&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
		let desc = match self {
			Self::NotFound(path) => format!("not found: {}", path.display())
		};
		write!(formatter, "SourceError[{desc}]")
	}
}
impl Error for SourceError {}
impl From<SourceError> for ConfigurationError {
	fn from (error: SourceError) -> Self {
		match error {
			SourceError::NotFound(path) => ConfigurationError::SourceNotFound(path)
		}
	}
}



//////
//
// Classes
//

/// Locates shader source files in an ordered list of search directories.
#[derive(Debug,Clone,Default)]
pub struct SourceResolver {
	searchPaths: Vec<PathBuf>
}
impl SourceResolver
{
	///
	#[inline(always)]
	pub fn new () -> Self {
		Self::default()
	}

	/// Append a directory to the list of search paths. Directories already in the list are not added again.
	///
	/// # Returns
	///
	/// `true` if the directory was added, `false` if it was already present.
	pub fn addSearchPath (&mut self, path: impl AsRef<Path>) -> bool
	{
		let path = util::path::normalize(path);
		if self.searchPaths.contains(&path) {
			return false;
		}
		self.searchPaths.push(path);
		true
	}

	///
	pub fn addSearchPaths<PathRef: AsRef<Path>> (&mut self, paths: impl IntoIterator<Item=PathRef>) {
		for path in paths {
			self.addSearchPath(path);
		}
	}

	/// The search directories in the order they are tried.
	#[inline(always)]
	pub fn searchPaths (&self) -> &[PathBuf] {
		&self.searchPaths
	}

	/// Find a shader source file.
	///
	/// An absolute `path` is returned as-is if it exists. A relative one is tried against every search directory in
	/// order, and the first existing candidate is returned.
	///
	/// # Returns
	///
	/// The normalized path of the file, or [`SourceError::NotFound`].
	pub fn findFile (&self, path: impl AsRef<Path>) -> Result<PathBuf, SourceError>
	{
		let path = path.as_ref();
		if path.is_absolute() {
			return if path.is_file() {
				Ok(util::path::normalize(path))
			} else {
				Err(SourceError::NotFound(path.to_owned()))
			};
		}
		for dir in &self.searchPaths {
			let candidate = util::path::normalizeToAnchor(dir, path);
			if candidate.is_file() {
				return Ok(candidate);
			}
		}
		Err(SourceError::NotFound(path.to_owned()))
	}
}



//////
//
// Functions
//

/// Check whether the given file has one of the extensions the compiler expects shader code in.
pub fn hasShaderExtension (path: impl AsRef<Path>) -> bool {
	let path = path.as_ref();
	util::path::hasExtension(path, "slang") || util::path::hasExtension(path, "hlsl")
}

/// Resolve a source file for compilation, warning if it does not look like shader code.
pub(crate) fn resolveSourceFile (resolver: &SourceResolver, path: &Path) -> Result<PathBuf, SourceError>
{
	if !hasShaderExtension(path) {
		tracing::warn!(
			"Compiling a shader file which is not a SLANG file or an HLSL file: `{}`. This is not an error, but make sure \
			 that the file contains valid shaders", path.display()
		);
	}
	resolver.findFile(path)
}
