
//////
//
// Imports
//

// Local imports
use super::{CompilerService, Target};



//////
//
// Enums
//

/// Target code generated for a linked component.
#[derive(Clone,Debug,PartialEq,Eq)]
pub enum ProgramCode {
	///
	Text(String),

	///
	Binary(Vec<u8>)
}
impl ProgramCode
{
	///
	#[inline(always)]
	pub fn isText (&self) -> bool {
		matches!(self, Self::Text(_))
	}

	///
	#[inline(always)]
	pub fn isBinary (&self) -> bool {
		matches!(self, Self::Binary(_))
	}

	/// Reference the code as text, if it is text.
	#[inline]
	pub fn asText (&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text.as_str()),
			Self::Binary(_) => None
		}
	}

	/// Check whether the kind of code matches what the given target produces (*WGSL* is text, all other targets are
	/// binary).
	#[inline]
	pub fn fitsTarget (&self, target: Target) -> bool {
		match target {
			Target::WGSL => self.isText(),
			Target::SPIRV | Target::DXIL => self.isBinary()
		}
	}
}
impl From<String> for ProgramCode {
	fn from (text: String) -> Self {
		Self::Text(text)
	}
}
impl From<Vec<u8>> for ProgramCode {
	fn from (bin: Vec<u8>) -> Self {
		Self::Binary(bin)
	}
}
impl AsRef<[u8]> for ProgramCode {
	#[inline]
	fn as_ref(&self) -> &[u8] {
		match self {
			Self::Text(text) => text.as_bytes(),
			Self::Binary(bin) => bin.as_slice()
		}
	}
}



//////
//
// Traits
//

/// Extension of a [`CompilerService`] that can generate target code, needed by device layers that consume code
/// directly rather than compiler handles.
pub trait CodeGenerator: CompilerService {
	/// Generate code for the entry point contained in the given linked component.
	fn entryPointCode (&self, linked: &Self::Component, target: Target, log: &mut String) -> Result<ProgramCode, String>;
}
