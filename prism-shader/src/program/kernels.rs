
//////
//
// Imports
//

// Local imports
use crate::*;



//////
//
// Enums
//

/// The pipeline type all entry points of an [`EntryPointGroupKernels`] belong to.
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub enum GroupKernelsType {
	Rasterization,
	Compute,
	RayTracing
}
impl GroupKernelsType
{
	///
	#[inline]
	pub fn forStage (stage: ShaderStage) -> Self {
		if stage.isRayTracing() {
			Self::RayTracing
		}
		else if stage.isCompute() {
			Self::Compute
		}
		else {
			Self::Rasterization
		}
	}

	/// Determine the type of the given entry point group, which must not be empty nor mix pipeline types.
	pub(crate) fn classify (groupIndex: usize, group: &EntryPointGroup) -> Result<Self, ConfigurationError>
	{
		let first = group.entryPoints.first().ok_or(ConfigurationError::EmptyEntryPointGroup(groupIndex))?;
		let kind = Self::forStage(first.stage);
		if group.entryPoints.iter().any(|ep| Self::forStage(ep.stage) != kind) {
			return Err(ConfigurationError::MixedStageGroup(groupIndex));
		}
		Ok(kind)
	}

	/// The pipeline creation step kernels of this type go through first.
	#[inline]
	pub fn pipelineCreation (self) -> PipelineCreation {
		match self {
			Self::Rasterization => PipelineCreation::Graphics,
			Self::Compute => PipelineCreation::Compute,
			Self::RayTracing => PipelineCreation::RayTracingPre
		}
	}
}



//////
//
// Structs
//

/// A compiled kernel for one entry point.
#[derive(Debug,Clone)]
pub struct EntryPointKernel<Component> {
	pub stage: ShaderStage,
	pub exportName: String,

	/// The type-specialized entry point composed with the global scope.
	pub linked: Component
}


/// The kernels of one entry point group.
#[derive(Debug,Clone)]
pub struct EntryPointGroupKernels<Component> {
	kind: GroupKernelsType,
	kernels: Vec<EntryPointKernel<Component>>,
	exportName: String
}
impl<Component> EntryPointGroupKernels<Component>
{
	pub(crate) fn new (kind: GroupKernelsType, kernels: Vec<EntryPointKernel<Component>>) -> Self {
		let exportName = kernels.first().map(|kernel| kernel.exportName.clone()).unwrap_or_default();
		Self { kind, kernels, exportName }
	}

	///
	#[inline(always)]
	pub fn kind (&self) -> GroupKernelsType {
		self.kind
	}

	///
	#[inline(always)]
	pub fn kernels (&self) -> &[EntryPointKernel<Component>] {
		&self.kernels
	}

	/// The export name of the first entry point in the group.
	#[inline(always)]
	pub fn exportName (&self) -> &str {
		&self.exportName
	}

	/// Find the kernel for the given stage.
	pub fn getKernel (&self, stage: ShaderStage) -> Option<&EntryPointKernel<Component>> {
		self.kernels.iter().find(|kernel| kernel.stage == stage)
	}
}



//////
//
// Classes
//

/// The fully linked, type-specialized kernels of a [`ProgramVersion`] together with the executable program the device
/// layer created from them.
pub struct ProgramKernels<D: DeviceLayer> {
	name: String,
	versionId: VersionId,
	conformances: TypeConformanceList,
	reflection: ProgramReflection<ReflectionOf<D>>,
	entryPointGroups: Vec<EntryPointGroupKernels<ComponentOf<D>>>,
	deviceEntryPoints: Vec<String>,
	deviceProgram: D::DeviceProgram
}
impl<D: DeviceLayer> ProgramKernels<D>
{
	pub(crate) fn new (
		name: String, versionId: VersionId, conformances: TypeConformanceList,
		reflection: ProgramReflection<ReflectionOf<D>>, entryPointGroups: Vec<EntryPointGroupKernels<ComponentOf<D>>>,
		deviceEntryPoints: Vec<String>, deviceProgram: D::DeviceProgram
	) -> Self {
		Self { name, versionId, conformances, reflection, entryPointGroups, deviceEntryPoints, deviceProgram }
	}

	/// The description of the program the kernels were linked from.
	#[inline(always)]
	pub fn name (&self) -> &str {
		&self.name
	}

	///
	#[inline(always)]
	pub fn versionId (&self) -> VersionId {
		self.versionId
	}

	/// The program-level type conformances the kernels were linked against.
	#[inline(always)]
	pub fn typeConformances (&self) -> &TypeConformanceList {
		&self.conformances
	}

	/// Reflection of the specialized program.
	#[inline(always)]
	pub fn reflection (&self) -> &ProgramReflection<ReflectionOf<D>> {
		&self.reflection
	}

	///
	#[inline(always)]
	pub fn deviceProgram (&self) -> &D::DeviceProgram {
		&self.deviceProgram
	}

	///
	#[inline(always)]
	pub fn entryPointGroups (&self) -> &[EntryPointGroupKernels<ComponentOf<D>>] {
		&self.entryPointGroups
	}

	/// Names of the entry points that were handed to the device layer, after de-duplication for ray tracing programs.
	#[inline(always)]
	pub fn deviceEntryPoints (&self) -> &[String] {
		&self.deviceEntryPoints
	}

	/// Find the first kernel for the given stage, scanning the entry point groups in order.
	pub fn getKernel (&self, stage: ShaderStage) -> Option<&EntryPointKernel<ComponentOf<D>>> {
		self.entryPointGroups.iter().find_map(|group| group.getKernel(stage))
	}
}
