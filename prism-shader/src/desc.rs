
//////
//
// Imports
//

// Standard library
use std::{fmt::{Display, Formatter}, path::{Path, PathBuf}};

// Bitflags library
use bitflags::bitflags;

// Serde library
use serde::{Serialize, Deserialize};

// Local imports
use crate::*;



//////
//
// Enums
//

/// Enumerates the pipeline stages an [`EntryPoint`] can be compiled for.
#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub enum ShaderStage {
	Vertex,
	Pixel,
	Geometry,
	/// AKA *tessellation control*.
	Hull,
	/// AKA *tessellation evaluation*.
	Domain,
	Compute,
	RayGeneration,
	Intersection,
	AnyHit,
	ClosestHit,
	Miss,
	Callable
}
impl ShaderStage
{
	/// All stages in declaration order.
	pub const ALL: [ShaderStage; 12] = [
		Self::Vertex, Self::Pixel, Self::Geometry, Self::Hull, Self::Domain, Self::Compute, Self::RayGeneration,
		Self::Intersection, Self::AnyHit, Self::ClosestHit, Self::Miss, Self::Callable
	];

	/// Check if the stage is part of the rasterization pipeline.
	#[inline(always)]
	pub fn isRasterization (self) -> bool {
		matches!(self, Self::Vertex | Self::Pixel | Self::Geometry | Self::Hull | Self::Domain)
	}

	///
	#[inline(always)]
	pub fn isCompute (self) -> bool {
		self == Self::Compute
	}

	/// Check if the stage is part of the ray tracing pipeline.
	#[inline(always)]
	pub fn isRayTracing (self) -> bool {
		matches!(
			self, Self::RayGeneration | Self::Intersection | Self::AnyHit | Self::ClosestHit | Self::Miss | Self::Callable
		)
	}
}
impl Display for ShaderStage {
	fn fmt (&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			Self::Vertex => "vertex",
			Self::Pixel => "pixel",
			Self::Geometry => "geometry",
			Self::Hull => "hull",
			Self::Domain => "domain",
			Self::Compute => "compute",
			Self::RayGeneration => "raygeneration",
			Self::Intersection => "intersection",
			Self::AnyHit => "anyhit",
			Self::ClosestHit => "closesthit",
			Self::Miss => "miss",
			Self::Callable => "callable"
		};
		write!(formatter, "{name}")
	}
}


/// The shader models a program can be compiled against.
#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub enum ShaderModel {
	SM6_0 = 60,
	SM6_1 = 61,
	SM6_2 = 62,
	SM6_3 = 63,
	SM6_4 = 64,
	SM6_5 = 65,
	SM6_6 = 66,
	SM6_7 = 67
}
impl ShaderModel
{
	const ALL: [ShaderModel; 8] = [
		Self::SM6_0, Self::SM6_1, Self::SM6_2, Self::SM6_3, Self::SM6_4, Self::SM6_5, Self::SM6_6, Self::SM6_7
	];

	///
	#[inline(always)]
	pub fn major (self) -> u32 {
		self as u32 / 10
	}

	///
	#[inline(always)]
	pub fn minor (self) -> u32 {
		self as u32 % 10
	}

	/// The compiler profile name of the shader model, e.g. `sm_6_6`.
	#[inline]
	pub fn profileString (self) -> String {
		format!("sm_{}_{}", self.major(), self.minor())
	}

	/// The name of the preprocessor macro announcing the shader model to shader code, e.g. `__SM_6_6__`.
	#[inline]
	pub fn macroName (self) -> String {
		format!("__SM_{}_{}__", self.major(), self.minor())
	}

	/// Parse a compiler profile name as produced by [`ShaderModel::profileString`].
	pub fn fromProfileString (profile: &str) -> Result<Self, ConfigurationError>
	{
		let malformed = || ConfigurationError::MalformedProfile(profile.to_owned());
		let version = profile.trim().strip_prefix("sm_").ok_or_else(malformed)?;
		let (major, minor) = version.split_once('_').ok_or_else(malformed)?;
		let major: u32 = major.parse().map_err(|_| malformed())?;
		let minor: u32 = minor.parse().map_err(|_| malformed())?;
		Self::ALL.into_iter().find(|sm| sm.major() == major && sm.minor() == minor).ok_or_else(malformed)
	}
}
impl Display for ShaderModel {
	fn fmt (&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
		write!(formatter, "SM{}.{}", self.major(), self.minor())
	}
}


/// Where the code of a [`ShaderModule`] comes from.
#[derive(Debug,Clone,PartialEq,Eq,Hash)]
pub enum ShaderSource {
	/// A file that will be looked up via the [`SourceResolver`] of the [`ProgramManager`].
	File(PathBuf),

	/// Code held in memory, compiled as if it was loaded from `virtualPath`.
	String { virtualPath: PathBuf, code: String }
}
impl ShaderSource {
	///
	#[inline(always)]
	pub fn isFile (&self) -> bool {
		matches!(self, Self::File(_))
	}
}



//////
//
// Structs
//

bitflags! {
	/// Flags controlling the behavior of the shader compiler for a program.
	#[derive(Debug,Default,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize)]
	pub struct CompilerFlags: u32 {
		const TREAT_WARNINGS_AS_ERRORS = 0x1;
		/// Dump intermediate artifacts produced during compilation.
		const DUMP_INTERMEDIATES = 0x2;
		const FLOATING_POINT_MODE_FAST = 0x4;
		const FLOATING_POINT_MODE_PRECISE = 0x8;
		const GENERATE_DEBUG_INFO = 0x10;
		/// Row-major matrix layout is the default. Only intended for compiling stand-alone external shaders.
		const MATRIX_LAYOUT_COLUMN_MAJOR = 0x20;
	}
}
impl CompilerFlags {
	/// Parse a flag from its name (as used in configuration files), e.g. `GENERATE_DEBUG_INFO`.
	#[inline]
	pub fn fromFlagName (name: &str) -> Option<Self> {
		Self::from_name(name.trim())
	}
}


/// A translation unit made up of one or more [sources](ShaderSource).
#[derive(Debug,Clone,Default,PartialEq,Eq)]
pub struct ShaderModule {
	/// The module name. If `None`, the compiler chooses one.
	pub name: Option<String>,

	///
	pub sources: Vec<ShaderSource>
}
impl ShaderModule
{
	///
	#[inline(always)]
	pub fn new (name: Option<String>) -> Self {
		Self { name, sources: Vec::new() }
	}

	/// Create an unnamed module consisting of a single source file.
	pub fn fromFile (path: impl AsRef<Path>) -> Self {
		Self { name: None, sources: vec![ShaderSource::File(path.as_ref().to_owned())] }
	}

	/// Create an unnamed module consisting of a single in-memory source.
	pub fn fromString (code: impl Into<String>, virtualPath: impl AsRef<Path>) -> Self {
		Self {
			name: None, sources: vec![ShaderSource::String {
				virtualPath: virtualPath.as_ref().to_owned(), code: code.into()
			}]
		}
	}

	///
	pub fn addFile (&mut self, path: impl AsRef<Path>) -> &mut Self {
		self.sources.push(ShaderSource::File(path.as_ref().to_owned()));
		self
	}

	///
	pub fn addString (&mut self, code: impl Into<String>, virtualPath: impl AsRef<Path>) -> &mut Self {
		self.sources.push(ShaderSource::String { virtualPath: virtualPath.as_ref().to_owned(), code: code.into() });
		self
	}
}


/// A named, stage-tagged function in a shader module that gets compiled into an executable kernel.
#[derive(Debug,Clone,PartialEq,Eq)]
pub struct EntryPoint {
	///
	pub stage: ShaderStage,

	/// The function name in the shader source.
	pub name: String,

	/// The name under which the entry point appears in generated code. Usually identical to `name`, but different
	/// export names allow several specializations of the same source function to coexist.
	pub exportName: String,

	/// Position of the entry point among all entry points of the program. Assigned by [`ProgramDesc::finalize`].
	pub globalIndex: Option<u32>
}
impl EntryPoint {
	///
	#[inline(always)]
	pub fn new (stage: ShaderStage, name: impl Into<String>, exportName: impl Into<String>) -> Self {
		Self { stage, name: name.into(), exportName: exportName.into(), globalIndex: None }
	}
}


/// A set of entry points that get compiled and linked together, e.g. all stages of one rasterization pipeline.
#[derive(Debug,Clone,Default,PartialEq,Eq)]
pub struct EntryPointGroup {
	/// Index into [`ProgramDesc::shaderModules`] of the module containing the entry point functions.
	pub shaderModuleIndex: usize,

	/// Type conformances applying only to this group, merged with the ones of the program.
	pub typeConformances: TypeConformanceList,

	///
	pub entryPoints: Vec<EntryPoint>
}
impl EntryPointGroup
{
	///
	#[inline(always)]
	pub fn new (shaderModuleIndex: usize) -> Self {
		Self { shaderModuleIndex, ..Default::default() }
	}

	/// Add an entry point exported under its source name.
	#[inline(always)]
	pub fn addEntryPoint (&mut self, stage: ShaderStage, name: &str) -> &mut Self {
		self.addEntryPointExported(stage, name, name)
	}

	/// Add an entry point exported under the given name.
	pub fn addEntryPointExported (&mut self, stage: ShaderStage, name: &str, exportName: &str) -> &mut Self {
		self.entryPoints.push(EntryPoint::new(stage, name, exportName));
		self
	}

	///
	#[inline(always)]
	pub fn csEntry (&mut self, name: &str) -> &mut Self { self.addEntryPoint(ShaderStage::Compute, name) }

	///
	#[inline(always)]
	pub fn vsEntry (&mut self, name: &str) -> &mut Self { self.addEntryPoint(ShaderStage::Vertex, name) }

	///
	#[inline(always)]
	pub fn psEntry (&mut self, name: &str) -> &mut Self { self.addEntryPoint(ShaderStage::Pixel, name) }

	#[inline(always)]
	pub fn gsEntry (&mut self, name: &str) -> &mut Self { self.addEntryPoint(ShaderStage::Geometry, name) }

	#[inline(always)]
	pub fn hsEntry (&mut self, name: &str) -> &mut Self { self.addEntryPoint(ShaderStage::Hull, name) }

	#[inline(always)]
	pub fn dsEntry (&mut self, name: &str) -> &mut Self { self.addEntryPoint(ShaderStage::Domain, name) }

	///
	#[inline(always)]
	pub fn rayGenEntry (&mut self, name: &str) -> &mut Self { self.addEntryPoint(ShaderStage::RayGeneration, name) }

	///
	#[inline(always)]
	pub fn missEntry (&mut self, name: &str) -> &mut Self { self.addEntryPoint(ShaderStage::Miss, name) }

	#[inline(always)]
	pub fn closestHitEntry (&mut self, name: &str) -> &mut Self { self.addEntryPoint(ShaderStage::ClosestHit, name) }

	#[inline(always)]
	pub fn anyHitEntry (&mut self, name: &str) -> &mut Self { self.addEntryPoint(ShaderStage::AnyHit, name) }

	#[inline(always)]
	pub fn intersectionEntry (&mut self, name: &str) -> &mut Self {
		self.addEntryPoint(ShaderStage::Intersection, name)
	}

	#[inline(always)]
	pub fn callableEntry (&mut self, name: &str) -> &mut Self { self.addEntryPoint(ShaderStage::Callable, name) }

	/// Add a type conformance that only applies to this group.
	pub fn addTypeConformance (&mut self, typeName: &str, interfaceName: &str, id: u32) -> &mut Self {
		self.typeConformances.add(typeName, interfaceName, id);
		self
	}
}


/// Describes the static shape of a program: its shader modules, its entry points grouped by pipeline compatibility and
/// the options to compile them with.
///
/// A descriptor must be [finalized](ProgramDesc::finalize) before global entry point indices can be read. A
/// [`Program`] takes care of this upon construction.
#[derive(Debug,Clone,Default,PartialEq,Eq)]
pub struct ProgramDesc {
	///
	pub shaderModules: Vec<ShaderModule>,

	///
	pub entryPointGroups: Vec<EntryPointGroup>,

	/// Program-wide type conformances. They form the initial conformance configuration of a [`Program`].
	pub typeConformances: TypeConformanceList,

	/// The shader model to compile for. The device default is used if `None`.
	pub shaderModel: Option<ShaderModel>,

	///
	pub compilerFlags: CompilerFlags,

	/// Additional command line arguments passed verbatim to the compiler after the global ones.
	pub compilerArguments: Vec<String>
}
impl ProgramDesc
{
	///
	#[inline(always)]
	pub fn new () -> Self {
		Self::default()
	}

	///
	pub fn addShaderModule (&mut self, module: ShaderModule) -> &mut Self {
		self.shaderModules.push(module);
		self
	}

	///
	pub fn addShaderModules (&mut self, modules: impl IntoIterator<Item=ShaderModule>) -> &mut Self {
		self.shaderModules.extend(modules);
		self
	}

	/// Add a module compiled from the given file and open a new entry point group referring to it.
	///
	/// # Returns
	///
	/// The newly opened entry point group for adding entry points to.
	pub fn addShaderLibrary (&mut self, path: impl AsRef<Path>) -> &mut EntryPointGroup {
		self.addShaderModule(ShaderModule::fromFile(path));
		self.addEntryPointGroup(self.shaderModules.len()-1)
	}

	/// Open a new entry point group referring to the module with the given index.
	pub fn addEntryPointGroup (&mut self, shaderModuleIndex: usize) -> &mut EntryPointGroup {
		self.entryPointGroups.push(EntryPointGroup::new(shaderModuleIndex));
		let last = self.entryPointGroups.len()-1;
		&mut self.entryPointGroups[last]
	}

	/// Add program-wide type conformances.
	pub fn addTypeConformances (&mut self, conformances: &TypeConformanceList) -> &mut Self {
		self.typeConformances.addAll(conformances);
		self
	}

	///
	#[inline(always)]
	pub fn setCompilerFlags (&mut self, flags: CompilerFlags) -> &mut Self {
		self.compilerFlags = flags;
		self
	}

	///
	pub fn addCompilerArguments (&mut self, args: impl IntoIterator<Item=impl Into<String>>) -> &mut Self {
		self.compilerArguments.extend(args.into_iter().map(Into::into));
		self
	}

	///
	#[inline(always)]
	pub fn setShaderModel (&mut self, shaderModel: ShaderModel) -> &mut Self {
		self.shaderModel = Some(shaderModel);
		self
	}

	/// Check whether any group contains an entry point for the given stage.
	pub fn hasEntryPoint (&self, stage: ShaderStage) -> bool {
		self.entryPoints().any(|ep| ep.stage == stage)
	}

	/// The total number of entry points over all groups.
	pub fn entryPointCount (&self) -> usize {
		self.entryPointGroups.iter().map(|group| group.entryPoints.len()).sum()
	}

	/// Iterate over all entry points in group-then-entry order, i.e. in order of their global index.
	pub fn entryPoints (&self) -> impl Iterator<Item=&EntryPoint> {
		self.entryPointGroups.iter().flat_map(|group| group.entryPoints.iter())
	}

	/// Assign the global index of every entry point, counting up in group-then-entry order. Calling this again yields
	/// the same assignment.
	pub fn finalize (&mut self) -> &mut Self
	{
		let mut globalIndex = 0u32;
		for group in &mut self.entryPointGroups {
			for entryPoint in &mut group.entryPoints {
				entryPoint.globalIndex = Some(globalIndex);
				globalIndex += 1;
			}
		}
		self
	}

	/// Check whether every entry point has received its global index.
	pub fn isFinalized (&self) -> bool {
		self.entryPoints().enumerate().all(|(idx, ep)| ep.globalIndex == Some(idx as u32))
	}

	/// Look up an entry point by its global index. Always `None` before finalization.
	pub fn entryPoint (&self, globalIndex: u32) -> Option<&EntryPoint> {
		self.entryPoints().find(|ep| ep.globalIndex == Some(globalIndex))
	}

	/// Produce a human-readable description of the program listing its source files and the export names of its
	/// entry points.
	pub fn descString (&self) -> String
	{
		let mut desc = String::new();
		for module in &self.shaderModules {
			for source in &module.sources {
				match source {
					ShaderSource::File(path) => desc.push_str(&path.display().to_string()),
					ShaderSource::String {..} => desc.push_str("<string>")
				}
				desc.push(' ');
			}
		}
		desc.push('(');
		desc.push_str(&util::joinDisplay(self.entryPoints().map(|ep| &ep.exportName), ", "));
		desc.push(')');
		desc
	}
}
