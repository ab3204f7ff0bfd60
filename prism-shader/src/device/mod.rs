
//////
//
// Module definitions
//

/// Submodule implementing a device layer on top of *WGPU*.
#[cfg(feature="wgpu_runtime")]
mod wgpudevice;
#[cfg(feature="wgpu_runtime")]
pub use wgpudevice::{WgpuDevice, WgpuProgram, WgpuEntryPoint, WgpuDispatcher}; // re-export



//////
//
// Imports
//

// Standard library
use std::{error::Error, fmt::{Display, Formatter}, time::{Duration, Instant}};

// Local imports
use crate::*;



//////
//
// Errors
//

///
#[derive(Debug)]
pub enum PipelineError {
	/// The dispatcher does not support creating the requested kind of pipeline.
	Unsupported(PipelineCreation),

	/// The program kernels cannot be used for the requested kind of pipeline.
	IncompatibleKernels(PipelineCreation),

	/// The program kernels have no entry point group of the given index.
	NoSuchGroup(usize),

	ImplementationSpecific(anyhow::Error)
}
impl Display for PipelineError {
	fn fmt (&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
		let desc = match self {
			Self::Unsupported(creation) => format!("unsupported pipeline type: {creation}"),
			Self::IncompatibleKernels(creation) => format!("kernels not suitable for {creation} pipeline"),
			Self::NoSuchGroup(index) => format!("no entry point group #{index}"),
			Self::ImplementationSpecific(err) => format!("nested implementation error: {err}")
		};
		write!(formatter, "PipelineError[{desc}]")
	}
}
impl Error for PipelineError {}



//////
//
// Enums
//

/// The graphics APIs a device layer can be built on. Determines the compilation target of programs.
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub enum DeviceType {
	D3D12,
	Vulkan,
	WebGpu
}
impl DeviceType
{
	/// The code format programs get compiled to for this API.
	#[inline]
	pub fn target (self) -> Target {
		match self {
			Self::D3D12 => Target::DXIL,
			Self::Vulkan => Target::SPIRV,
			Self::WebGpu => Target::WGSL
		}
	}

	/// The name of the macro announcing the API to shader code.
	#[inline]
	pub fn targetMacroName (self) -> &'static str {
		match self {
			Self::D3D12 => "PRISM_D3D12",
			Self::Vulkan => "PRISM_VULKAN",
			Self::WebGpu => "PRISM_WEBGPU"
		}
	}
}


/// The kinds of pipeline state creation a [`PipelineDispatcher`] handles.
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub enum PipelineCreation {
	Compute,
	Graphics,
	Mesh,

	/// Hook invoked right before a ray tracing state object is created.
	RayTracingPre,

	/// Hook invoked right after a ray tracing state object was created.
	RayTracingPost
}
impl Display for PipelineCreation {
	fn fmt (&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			Self::Compute => "compute",
			Self::Graphics => "graphics",
			Self::Mesh => "mesh",
			Self::RayTracingPre => "ray tracing (pre-creation)",
			Self::RayTracingPost => "ray tracing (post-creation)"
		};
		write!(formatter, "{name}")
	}
}



//////
//
// Traits
//

/// The interface to the graphics device that turns linked programs into executable device objects. The device layer
/// owns the [compiler service](CompilerService) programs for it are compiled with.
pub trait DeviceLayer: Send+Sync+'static
{
	///
	type Compiler: CompilerService;

	/// The executable program object of the device.
	type DeviceProgram: Send+Sync+'static;

	///
	fn compiler (&self) -> &Self::Compiler;

	///
	fn deviceType (&self) -> DeviceType;

	/// The shader model programs get compiled for unless their descriptor requests one.
	#[inline(always)]
	fn defaultShaderModel (&self) -> ShaderModel {
		ShaderModel::SM6_6
	}

	/// Materialize an executable program from the given global scope and type-specialized entry points. Diagnostics
	/// reported on success get appended to `log`, failures are reported through the returned error message.
	fn createDeviceProgram (
		&self, globalScope: &ComponentOf<Self>, entryPoints: &[&ComponentOf<Self>], log: &mut String
	) -> Result<Self::DeviceProgram, String>;
}

/// Shorthand for the compiled component type of a device layer.
pub type ComponentOf<D> = <<D as DeviceLayer>::Compiler as CompilerService>::Component;

/// Shorthand for the reflection type of a device layer.
pub type ReflectionOf<D> = <<D as DeviceLayer>::Compiler as CompilerService>::Reflection;


/// Capability of a device layer to create pipeline state objects from [program kernels](ProgramKernels). Graphics and
/// mesh pipelines are unsupported and the ray tracing hooks do nothing unless overridden.
pub trait PipelineDispatcher<D: DeviceLayer>
{
	/// The pipeline state object type.
	type Pipeline;

	///
	fn createComputePipeline (&mut self, kernels: &ProgramKernels<D>) -> Result<Self::Pipeline, PipelineError>;

	///
	fn createGraphicsPipeline (&mut self, _kernels: &ProgramKernels<D>) -> Result<Self::Pipeline, PipelineError> {
		Err(PipelineError::Unsupported(PipelineCreation::Graphics))
	}

	///
	fn createMeshPipeline (&mut self, _kernels: &ProgramKernels<D>) -> Result<Self::Pipeline, PipelineError> {
		Err(PipelineError::Unsupported(PipelineCreation::Mesh))
	}

	///
	fn beforeCreateRayTracingState (&mut self, _kernels: &ProgramKernels<D>) -> Result<(), PipelineError> {
		Ok(())
	}

	///
	fn afterCreateRayTracingState (&mut self, _kernels: &ProgramKernels<D>) -> Result<(), PipelineError> {
		Ok(())
	}
}



//////
//
// Classes
//

/// Wraps a [`PipelineDispatcher`], routing each [`PipelineCreation`] to the matching method and recording the time
/// spent creating pipelines.
pub struct TimedDispatcher<Dispatcher> {
	dispatcher: Dispatcher,
	creationTime: Duration,
	creationCount: usize
}
impl<Dispatcher> TimedDispatcher<Dispatcher>
{
	///
	pub fn new (dispatcher: Dispatcher) -> Self {
		Self { dispatcher, creationTime: Duration::ZERO, creationCount: 0 }
	}

	/// Perform the requested creation step.
	///
	/// # Returns
	///
	/// The created pipeline for [`Compute`](PipelineCreation::Compute), [`Graphics`](PipelineCreation::Graphics) and
	/// [`Mesh`](PipelineCreation::Mesh) requests, `None` for the ray tracing hooks.
	pub fn dispatch<D: DeviceLayer> (&mut self, creation: PipelineCreation, kernels: &ProgramKernels<D>)
		-> Result<Option<<Dispatcher as PipelineDispatcher<D>>::Pipeline>, PipelineError>
	where Dispatcher: PipelineDispatcher<D>
	{
		let start = Instant::now();
		let result = match creation {
			PipelineCreation::Compute => self.dispatcher.createComputePipeline(kernels).map(Some),
			PipelineCreation::Graphics => self.dispatcher.createGraphicsPipeline(kernels).map(Some),
			PipelineCreation::Mesh => self.dispatcher.createMeshPipeline(kernels).map(Some),
			PipelineCreation::RayTracingPre => self.dispatcher.beforeCreateRayTracingState(kernels).map(|_| None),
			PipelineCreation::RayTracingPost => self.dispatcher.afterCreateRayTracingState(kernels).map(|_| None)
		};
		self.creationTime += start.elapsed();
		self.creationCount += 1;
		result
	}

	/// Perform the creation step matching the type of the given entry point group: [`Graphics`](PipelineCreation::Graphics)
	/// for rasterization groups, [`Compute`](PipelineCreation::Compute) for compute groups and the
	/// [pre-creation hook](PipelineCreation::RayTracingPre) for ray tracing groups.
	pub fn dispatchGroup<D: DeviceLayer> (&mut self, kernels: &ProgramKernels<D>, groupIndex: usize)
		-> Result<Option<<Dispatcher as PipelineDispatcher<D>>::Pipeline>, PipelineError>
	where Dispatcher: PipelineDispatcher<D>
	{
		let group = kernels.entryPointGroups().get(groupIndex).ok_or(PipelineError::NoSuchGroup(groupIndex))?;
		self.dispatch(group.kind().pipelineCreation(), kernels)
	}

	/// Total time spent in dispatched creation steps.
	#[inline(always)]
	pub fn creationTime (&self) -> Duration {
		self.creationTime
	}

	/// Number of dispatched creation steps, failed ones included.
	#[inline(always)]
	pub fn creationCount (&self) -> usize {
		self.creationCount
	}

	///
	#[inline(always)]
	pub fn resetTimer (&mut self) {
		self.creationTime = Duration::ZERO;
		self.creationCount = 0;
	}

	///
	#[inline(always)]
	pub fn inner (&self) -> &Dispatcher {
		&self.dispatcher
	}
}
