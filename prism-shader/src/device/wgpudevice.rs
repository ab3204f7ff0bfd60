
//////
//
// Imports
//

// Standard library
use std::sync::{Mutex, PoisonError};

// Anyhow library
use anyhow::anyhow;

// WGPU API
use wgpu;

// Local imports
use crate::*;
use crate::device::TimedDispatcher;



//////
//
// Structs
//

/// An entry point materialized as a *WGPU* shader module.
pub struct WgpuEntryPoint {
	/// The name of the entry point function in the generated code.
	pub exportName: String,

	///
	pub module: wgpu::ShaderModule
}


/// The device program of a [`WgpuDevice`]: one shader module per entry point.
pub struct WgpuProgram {
	pub entryPoints: Vec<WgpuEntryPoint>
}
impl WgpuProgram {
	/// Find the entry point exported under the given name.
	pub fn entryPoint (&self, exportName: &str) -> Option<&WgpuEntryPoint> {
		self.entryPoints.iter().find(|ep| ep.exportName == exportName)
	}
}


/// Creates compute pipelines from the kernels of a [`WgpuDevice`]. *WGPU* offers no ray tracing, and graphics
/// pipelines need render state that kernels don't carry, so those remain unsupported.
pub struct WgpuDispatcher {
	device: wgpu::Device
}
impl<Compiler: CodeGenerator> PipelineDispatcher<WgpuDevice<Compiler>> for WgpuDispatcher
{
	type Pipeline = wgpu::ComputePipeline;

	fn createComputePipeline (&mut self, kernels: &ProgramKernels<WgpuDevice<Compiler>>)
		-> Result<Self::Pipeline, PipelineError>
	{
		let kernel = kernels.getKernel(ShaderStage::Compute).ok_or(
			PipelineError::IncompatibleKernels(PipelineCreation::Compute)
		)?;
		let entryPoint = kernels.deviceProgram().entryPoint(&kernel.exportName).ok_or_else(||
			PipelineError::ImplementationSpecific(anyhow!("no shader module for `{}`", kernel.exportName))
		)?;
		Ok(self.device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
			label: Some(kernel.exportName.as_str()),
			layout: None,
			module: &entryPoint.module,
			entry_point: Some(entryPoint.exportName.as_str()),
			compilation_options: wgpu::PipelineCompilationOptions::default(),
			cache: None
		}))
	}
}



//////
//
// Classes
//

/// A device layer materializing programs through *WGPU*, using a compiler service that can generate *SPIR-V* or *WGSL*
/// code.
pub struct WgpuDevice<Compiler: CodeGenerator> {
	device: wgpu::Device,
	compiler: Compiler,
	target: Target,
	dispatcher: Mutex<TimedDispatcher<WgpuDispatcher>>
}
impl<Compiler: CodeGenerator> WgpuDevice<Compiler>
{
	/// Create a device layer for the given *WGPU* device. The target must be [`Target::SPIRV`] or [`Target::WGSL`].
	pub fn new (device: wgpu::Device, compiler: Compiler, target: Target) -> anyhow::Result<Self>
	{
		if target == Target::DXIL {
			return Err(anyhow!("WGPU cannot consume {target} code"));
		}
		let dispatcher = Mutex::new(TimedDispatcher::new(WgpuDispatcher { device: device.clone() }));
		Ok(Self { device, compiler, target, dispatcher })
	}

	///
	#[inline(always)]
	pub fn device (&self) -> &wgpu::Device {
		&self.device
	}

	/// Create the pipeline for the entry point group with the given index. Only compute groups yield a pipeline.
	pub fn createPipeline (&self, kernels: &ProgramKernels<Self>, groupIndex: usize)
		-> Result<wgpu::ComputePipeline, PipelineError>
	{
		let mut dispatcher = self.dispatcher.lock().unwrap_or_else(PoisonError::into_inner);
		dispatcher.dispatchGroup(kernels, groupIndex)?.ok_or(
			PipelineError::Unsupported(PipelineCreation::RayTracingPre)
		)
	}

	/// Total time spent creating pipelines, in seconds.
	pub fn pipelineCreationTime (&self) -> f64 {
		self.dispatcher.lock().unwrap_or_else(PoisonError::into_inner).creationTime().as_secs_f64()
	}
}
impl<Compiler: CodeGenerator> DeviceLayer for WgpuDevice<Compiler>
{
	type Compiler = Compiler;
	type DeviceProgram = WgpuProgram;

	#[inline(always)]
	fn compiler (&self) -> &Self::Compiler {
		&self.compiler
	}

	fn deviceType (&self) -> DeviceType {
		match self.target {
			Target::WGSL => DeviceType::WebGpu,
			_ => DeviceType::Vulkan
		}
	}

	fn createDeviceProgram (
		&self, globalScope: &ComponentOf<Self>, entryPoints: &[&ComponentOf<Self>], log: &mut String
	) -> Result<Self::DeviceProgram, String>
	{
		let mut modules = Vec::with_capacity(entryPoints.len());
		for &entryPoint in entryPoints
		{
			// Generate code for the entry point linked with the global scope
			let exportName = self.compiler.entryPointName(entryPoint).ok_or("entry point without name")?;
			let linked = self.compiler.composeComponents(&[globalScope, entryPoint], log)?;
			let code = self.compiler.entryPointCode(&linked, self.target, log)?;
			if !code.fitsTarget(self.target) {
				return Err(format!("code generated for `{exportName}` does not match target {}", self.target));
			}

			// Create shader module
			let label = util::concatIfSome(&Some(&exportName), "_shaderModule");
			let source = match &code {
				ProgramCode::Text(text) => wgpu::ShaderSource::Wgsl(text.as_str().into()),
				ProgramCode::Binary(bin) => wgpu::util::make_spirv(bin)
			};
			let module = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
				label: label.as_deref(), source
			});
			modules.push(WgpuEntryPoint { exportName, module });
		}

		// Done!
		Ok(WgpuProgram { entryPoints: modules })
	}
}
