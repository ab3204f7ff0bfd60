
//////
//
// Imports
//

// Local imports
use crate::*;
use crate::tests::mock::*;



//////
//
// Tests
//

#[test]
fn test_deviceTypeTargets()
{
	assert_eq!(DeviceType::D3D12.target(), Target::DXIL);
	assert_eq!(DeviceType::Vulkan.target(), Target::SPIRV);
	assert_eq!(DeviceType::WebGpu.target(), Target::WGSL);
	assert_eq!(DeviceType::WebGpu.targetMacroName(), "PRISM_WEBGPU");
	assert_eq!(Target::SPIRV.to_string(), "SPIR-V");
}

#[test]
fn test_timedDispatcher()
{
	let manager = newManager();
	let program = newProgram(&manager, computeDesc("main"));
	let kernels = program.activeKernels().unwrap();
	let mut dispatcher = TimedDispatcher::new(MockDispatcher);

	let creation = kernels.entryPointGroups()[0].kind().pipelineCreation();
	assert_eq!(creation, PipelineCreation::Compute);
	assert_eq!(dispatcher.dispatch(creation, &kernels).unwrap(), Some("pipeline:main".to_string()));

	// Graphics and mesh pipelines are not supported unless the dispatcher says so
	assert!(matches!(
		dispatcher.dispatch(PipelineCreation::Graphics, &kernels),
		Err(PipelineError::Unsupported(PipelineCreation::Graphics))
	));
	assert!(matches!(
		dispatcher.dispatch(PipelineCreation::Mesh, &kernels), Err(PipelineError::Unsupported(PipelineCreation::Mesh))
	));

	// Ray tracing hooks do nothing by default
	assert!(matches!(dispatcher.dispatch(PipelineCreation::RayTracingPre, &kernels), Ok(None)));
	assert!(matches!(dispatcher.dispatch(PipelineCreation::RayTracingPost, &kernels), Ok(None)));
	assert_eq!(dispatcher.creationCount(), 5);

	dispatcher.resetTimer();
	assert_eq!(dispatcher.creationCount(), 0);
	assert!(dispatcher.creationTime().is_zero());
}

#[test]
fn test_incompatibleKernels()
{
	let manager = newManager();
	let mut desc = ProgramDesc::new();
	desc.addShaderModule(ShaderModule::fromString("// raster", "raster.slang"));
	desc.addEntryPointGroup(0).vsEntry("vsMain").psEntry("psMain");
	let program = newProgram(&manager, desc);
	let kernels = program.activeKernels().unwrap();

	let mut dispatcher = TimedDispatcher::new(MockDispatcher);
	assert!(matches!(
		dispatcher.dispatch(PipelineCreation::Compute, &kernels),
		Err(PipelineError::IncompatibleKernels(PipelineCreation::Compute))
	));
	assert_eq!(dispatcher.creationCount(), 1);
}

#[test]
fn test_dispatchByGroupType()
{
	let manager = newManager();
	let mut desc = ProgramDesc::new();
	desc.addShaderModule(ShaderModule::fromString("// mixed", "mixed.slang"));
	desc.addEntryPointGroup(0).vsEntry("vsMain").psEntry("psMain");
	desc.addEntryPointGroup(0).csEntry("csMain");
	desc.addEntryPointGroup(0).rayGenEntry("rayGen");
	let program = newProgram(&manager, desc);
	let kernels = program.activeKernels().unwrap();

	let mut dispatcher = TimedDispatcher::new(MockDispatcher);
	assert!(matches!(
		dispatcher.dispatchGroup(&kernels, 0), Err(PipelineError::Unsupported(PipelineCreation::Graphics))
	));
	assert_eq!(dispatcher.dispatchGroup(&kernels, 1).unwrap(), Some("pipeline:csMain".to_string()));
	assert!(matches!(dispatcher.dispatchGroup(&kernels, 2), Ok(None)));
	assert_eq!(dispatcher.creationCount(), 3);

	// Out of range groups are not dispatched at all
	assert!(matches!(dispatcher.dispatchGroup(&kernels, 3), Err(PipelineError::NoSuchGroup(3))));
	assert_eq!(dispatcher.creationCount(), 3);
}

#[test]
fn test_programCode()
{
	let text = ProgramCode::from("fn main() {}".to_string());
	let binary = ProgramCode::from(vec![0x03u8, 0x02, 0x23, 0x07]);
	assert!(text.isText() && !text.isBinary());
	assert_eq!(text.asText(), Some("fn main() {}"));
	assert_eq!(binary.asText(), None);
	assert_eq!(binary.as_ref(), [0x03, 0x02, 0x23, 0x07]);

	assert!(text.fitsTarget(Target::WGSL));
	assert!(!text.fitsTarget(Target::SPIRV));
	assert!(binary.fitsTarget(Target::SPIRV));
	assert!(binary.fitsTarget(Target::DXIL));
	assert!(!binary.fitsTarget(Target::WGSL));
}

#[test]
fn test_entryPointCodeGeneration()
{
	let manager = newManager();
	let program = newProgram(&manager, computeDesc("main"));
	let kernels = program.activeKernels().unwrap();
	let linked = &kernels.getKernel(ShaderStage::Compute).unwrap().linked;
	let compiler = manager.device().compiler();

	let mut log = String::new();
	let wgsl = compiler.entryPointCode(linked, Target::WGSL, &mut log).unwrap();
	assert!(wgsl.asText().unwrap().contains("fn main()"));
	assert!(compiler.entryPointCode(linked, Target::SPIRV, &mut log).unwrap().fitsTarget(Target::SPIRV));
}
