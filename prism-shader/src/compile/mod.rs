
//////
//
// Module definitions
//

/// Submodule implementing generated target code.
mod code;
pub use code::{ProgramCode, CodeGenerator}; // re-export



//////
//
// Imports
//

// Standard library
use std::{fmt::{Display, Formatter}, path::PathBuf};

// Local imports
use crate::*;



//////
//
// Enums
//

/// The code formats a program can be compiled to.
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub enum Target {
	/// *DirectX* intermediate language.
	DXIL,

	/// *SPIR-V* bytecode.
	SPIRV,

	/// Self-contained *WGSL* source code.
	WGSL
}
impl Display for Target {
	fn fmt (&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::DXIL => write!(formatter, "DXIL"),
			Self::SPIRV => write!(formatter, "SPIR-V"),
			Self::WGSL => write!(formatter, "WGSL")
		}
	}
}


///
#[derive(Debug,Clone,Copy,Default,PartialEq,Eq,Hash)]
pub enum FloatingPointMode {
	/// Let the compiler decide.
	#[default]
	Default,
	Fast,
	Precise
}


///
#[derive(Debug,Clone,Copy,Default,PartialEq,Eq,Hash)]
pub enum MatrixLayout {
	#[default]
	RowMajor,
	ColumnMajor
}



//////
//
// Structs
//

/// A compilation unit made from the sources of one [`ShaderModule`]. File sources have been resolved to full paths.
#[derive(Debug,Clone,PartialEq,Eq)]
pub struct TranslationUnit {
	///
	pub name: Option<String>,

	///
	pub sources: Vec<ShaderSource>
}


/// Declares an entry point the compiler should produce.
#[derive(Debug,Clone,PartialEq,Eq)]
pub struct EntryPointDecl {
	/// Index into [`CompileRequest::translationUnits`].
	pub translationUnit: usize,

	/// Source name of the entry point function.
	pub name: String,

	///
	pub stage: ShaderStage,

	/// The global index of the entry point. Compilers must return entry points ordered by this index.
	pub globalIndex: u32
}


/// Everything the compiler service needs to compile one [program version](ProgramVersion).
#[derive(Debug,Clone,PartialEq,Eq)]
pub struct CompileRequest {
	/// Directories searched for `#include` and `import` statements.
	pub searchPaths: Vec<PathBuf>,

	/// Preprocessor macros in the order they must be applied.
	pub macros: Vec<(String, String)>,

	///
	pub target: Target,

	/// Name of the compiler profile of the requested shader model, e.g. `sm_6_6`.
	pub profile: String,

	/// The program compiler flags with the forced flags of the manager applied.
	pub flags: CompilerFlags,

	///
	pub floatingPointMode: FloatingPointMode,

	///
	pub matrixLayout: MatrixLayout,

	///
	pub debugInfo: bool,

	///
	pub dumpIntermediates: bool,

	/// Whether *SPIR-V* should be generated without going through a downstream compiler.
	pub emitSpirvDirectly: bool,

	/// Use scalar layout rules for structured buffers on *SPIR-V* targets.
	pub forceScalarBufferLayout: bool,

	/// Skip code generation, leaving specialization parameters unresolved. Always set, since code is only generated
	/// after type conformances have been linked in.
	pub noCodegen: bool,

	/// Numeric ids of compiler diagnostics to suppress.
	pub disabledDiagnostics: Vec<u32>,

	/// Additional command line arguments, global ones first.
	pub arguments: Vec<String>,

	///
	pub translationUnits: Vec<TranslationUnit>,

	///
	pub entryPoints: Vec<EntryPointDecl>
}
impl CompileRequest
{
	/// Diagnostics that get suppressed in every request (`#pragma once` in modules, implicit conversions).
	pub const SUPPRESSED_DIAGNOSTICS: [u32; 2] = [15602, 30081];

	/// The effective value of the given macro, i.e. the value it was last defined to.
	pub fn macroValue (&self, name: &str) -> Option<&str> {
		self.macros.iter().rev().find(|(macroName, _)| macroName == name).map(|(_, value)| value.as_str())
	}

	/// The position of the first definition of the given macro in application order.
	pub fn macroPosition (&self, name: &str) -> Option<usize> {
		self.macros.iter().position(|(macroName, _)| macroName == name)
	}
}


/// The opaque products of a successful front-end compilation.
#[derive(Debug,Clone)]
pub struct CompiledProgram<Component> {
	/// The compiled global scope of the program.
	pub globalScope: Component,

	/// One handle per [declared entry point](EntryPointDecl), ordered by global index.
	pub entryPoints: Vec<Component>
}


/// The response of the compiler service to a [`CompileRequest`].
#[derive(Debug,Clone)]
pub struct CompileOutput<Component> {
	/// The compiled program, or `None` if compilation failed.
	pub program: Option<CompiledProgram<Component>>,

	/// Diagnostic messages, warnings included. Empty if the compiler had nothing to report.
	pub diagnostics: String
}
impl<Component> CompileOutput<Component>
{
	///
	#[inline(always)]
	pub fn success (program: CompiledProgram<Component>, diagnostics: impl Into<String>) -> Self {
		Self { program: Some(program), diagnostics: diagnostics.into() }
	}

	///
	#[inline(always)]
	pub fn failure (diagnostics: impl Into<String>) -> Self {
		Self { program: None, diagnostics: diagnostics.into() }
	}

	///
	#[inline(always)]
	pub fn isSuccess (&self) -> bool {
		self.program.is_some()
	}
}



//////
//
// Traits
//

/// The interface to the shader compiler that programs get compiled with.
///
/// All handles are opaque to the program cache. A `Component` can be a compiled global scope, an entry point, a type
/// conformance or a composite of any of those.
pub trait CompilerService: Send+Sync+'static
{
	/// Handle to a compiled, re-usable piece of program code.
	type Component: Clone+Send+Sync+'static;

	/// Handle to a type declared in a compiled program.
	type Type;

	/// Reflection metadata describing the parameter layout of a compiled component.
	type Reflection: Send+Sync+'static;

	/// Compile the sources described by the request.
	fn compile (&self, request: &CompileRequest) -> CompileOutput<Self::Component>;

	/// Obtain reflection data for the given component.
	fn reflect (&self, component: &Self::Component) -> Result<Self::Reflection, String>;

	/// Produce a view of an entry point that gets exported under a different name.
	fn renameEntryPoint (&self, entryPoint: &Self::Component, exportName: &str) -> Result<Self::Component, String>;

	/// Look up a type declared in the given scope.
	fn findTypeByName (&self, scope: &Self::Component, name: &str) -> Option<Self::Type>;

	/// Create a component declaring that `ty` conforms to `interface`, using `id` as the dispatch id of the type.
	/// Diagnostics reported on success get appended to `log`.
	fn createTypeConformance (
		&self, ty: &Self::Type, interface: &Self::Type, id: u32, log: &mut String
	) -> Result<Self::Component, String>;

	/// Create a composite of the given components. Diagnostics reported on success get appended to `log`.
	fn composeComponents (&self, components: &[&Self::Component], log: &mut String) -> Result<Self::Component, String>;

	/// The name under which the (first) entry point contained in the given component gets exported, if any.
	fn entryPointName (&self, component: &Self::Component) -> Option<String>;
}
