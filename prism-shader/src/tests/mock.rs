
//////
//
// Imports
//

// Standard library
use std::{
	collections::BTreeSet, sync::{Arc, Mutex, PoisonError, atomic::{AtomicBool, AtomicUsize, Ordering}}
};

// Local imports
use crate::*;



//////
//
// Enums
//

/// What a component handle of the [`MockCompiler`] stands for.
#[derive(Debug,Clone,PartialEq,Eq)]
pub enum MockComponent {
	GlobalScope { macros: Vec<(String, String)> },
	EntryPoint { name: String, exportName: String, stage: ShaderStage },
	Conformance { typeName: String, interfaceName: String, id: u32 },
	Composite(Vec<MockHandle>)
}

///
pub type MockHandle = Arc<MockComponent>;



//////
//
// Structs
//

/// The reflection produced by the [`MockCompiler`]: a flat summary of what a composite contains.
#[derive(Debug,Clone,Default,PartialEq,Eq)]
pub struct MockReflection {
	pub globalScopes: usize,
	pub entryPoints: Vec<String>,
	pub conformances: Vec<(String, String, u32)>
}
impl MockReflection
{
	fn gather (&mut self, component: &MockComponent) {
		match component {
			MockComponent::GlobalScope {..} => self.globalScopes += 1,
			MockComponent::EntryPoint { exportName, .. } => self.entryPoints.push(exportName.clone()),
			MockComponent::Conformance { typeName, interfaceName, id } => self.conformances.push(
				(typeName.clone(), interfaceName.clone(), *id)
			),
			MockComponent::Composite(children) => children.iter().for_each(|child| self.gather(child))
		}
	}
}


/// The device program of the [`MockDevice`].
#[derive(Debug,Clone)]
pub struct MockDeviceProgram {
	pub entryPointNames: Vec<String>
}


/// A dispatcher that creates "pipelines" named after the compute kernel.
#[derive(Default)]
pub struct MockDispatcher;
impl PipelineDispatcher<MockDevice> for MockDispatcher
{
	type Pipeline = String;

	fn createComputePipeline (&mut self, kernels: &ProgramKernels<MockDevice>) -> Result<Self::Pipeline, PipelineError>
	{
		kernels.getKernel(ShaderStage::Compute).map(|kernel| format!("pipeline:{}", kernel.exportName)).ok_or(
			PipelineError::IncompatibleKernels(PipelineCreation::Compute)
		)
	}
}



//////
//
// Classes
//

/// A compiler service that compiles nothing but faithfully records what it is asked to do. Type lookups succeed for
/// the configured set of known type names.
#[derive(Default)]
pub struct MockCompiler {
	pub knownTypes: Mutex<BTreeSet<String>>,
	pub diagnostics: Mutex<String>,
	pub failCompile: AtomicBool,
	pub failCompose: AtomicBool,
	pub compileCount: AtomicUsize,
	pub composeCount: AtomicUsize,
	pub reflectCount: AtomicUsize,
	pub lastRequest: Mutex<Option<CompileRequest>>
}
impl MockCompiler
{
	///
	pub fn knowTypes (&self, names: &[&str]) {
		let mut knownTypes = self.knownTypes.lock().unwrap_or_else(PoisonError::into_inner);
		knownTypes.extend(names.iter().map(|name| name.to_string()));
	}

	///
	pub fn setDiagnostics (&self, diagnostics: &str) {
		*self.diagnostics.lock().unwrap_or_else(PoisonError::into_inner) = diagnostics.to_owned();
	}

	///
	pub fn compileCount (&self) -> usize {
		self.compileCount.load(Ordering::SeqCst)
	}

	///
	pub fn lastRequest (&self) -> CompileRequest {
		self.lastRequest.lock().unwrap_or_else(PoisonError::into_inner).clone().expect("a request should have been made")
	}
}
impl CompilerService for MockCompiler
{
	type Component = MockHandle;
	type Type = String;
	type Reflection = MockReflection;

	fn compile (&self, request: &CompileRequest) -> CompileOutput<Self::Component>
	{
		self.compileCount.fetch_add(1, Ordering::SeqCst);
		*self.lastRequest.lock().unwrap_or_else(PoisonError::into_inner) = Some(request.clone());
		let diagnostics = self.diagnostics.lock().unwrap_or_else(PoisonError::into_inner).clone();
		if self.failCompile.load(Ordering::SeqCst) {
			return CompileOutput::failure(format!("{diagnostics}error: scripted compilation failure\n"));
		}

		let mut entryPoints = request.entryPoints.clone();
		entryPoints.sort_by_key(|ep| ep.globalIndex);
		CompileOutput::success(CompiledProgram {
			globalScope: Arc::new(MockComponent::GlobalScope { macros: request.macros.clone() }),
			entryPoints: entryPoints.into_iter().map(|ep| Arc::new(MockComponent::EntryPoint {
				exportName: ep.name.clone(), name: ep.name, stage: ep.stage
			})).collect()
		}, diagnostics)
	}

	fn reflect (&self, component: &Self::Component) -> Result<Self::Reflection, String> {
		self.reflectCount.fetch_add(1, Ordering::SeqCst);
		let mut reflection = MockReflection::default();
		reflection.gather(component);
		Ok(reflection)
	}

	fn renameEntryPoint (&self, entryPoint: &Self::Component, exportName: &str) -> Result<Self::Component, String> {
		match entryPoint.as_ref() {
			MockComponent::EntryPoint { name, stage, .. } => Ok(Arc::new(MockComponent::EntryPoint {
				name: name.clone(), exportName: exportName.to_owned(), stage: *stage
			})),
			_ => Err("not an entry point".into())
		}
	}

	fn findTypeByName (&self, _scope: &Self::Component, name: &str) -> Option<Self::Type> {
		let knownTypes = self.knownTypes.lock().unwrap_or_else(PoisonError::into_inner);
		knownTypes.contains(name).then(|| name.to_owned())
	}

	fn createTypeConformance (&self, ty: &Self::Type, interface: &Self::Type, id: u32, _log: &mut String)
		-> Result<Self::Component, String>
	{
		Ok(Arc::new(MockComponent::Conformance { typeName: ty.clone(), interfaceName: interface.clone(), id }))
	}

	fn composeComponents (&self, components: &[&Self::Component], _log: &mut String)
		-> Result<Self::Component, String>
	{
		self.composeCount.fetch_add(1, Ordering::SeqCst);
		if self.failCompose.load(Ordering::SeqCst) {
			return Err("scripted composition failure".into());
		}
		Ok(Arc::new(MockComponent::Composite(components.iter().map(|&component| component.clone()).collect())))
	}

	fn entryPointName (&self, component: &Self::Component) -> Option<String> {
		match component.as_ref() {
			MockComponent::EntryPoint { exportName, .. } => Some(exportName.clone()),
			MockComponent::Composite(children) => children.iter().find_map(|child| self.entryPointName(child)),
			_ => None
		}
	}
}
impl CodeGenerator for MockCompiler
{
	fn entryPointCode (&self, linked: &Self::Component, target: Target, _log: &mut String)
		-> Result<ProgramCode, String>
	{
		let name = self.entryPointName(linked).ok_or("no entry point in component")?;
		Ok(match target {
			Target::WGSL => ProgramCode::Text(format!("@compute @workgroup_size(1) fn {name}() {{}}")),
			_ => ProgramCode::Binary(vec![0x03, 0x02, 0x23, 0x07])
		})
	}
}


/// A device layer on top of the [`MockCompiler`] that counts the device programs it creates.
pub struct MockDevice {
	compiler: MockCompiler,
	deviceType: DeviceType,
	pub failDevice: AtomicBool,
	pub deviceProgramCount: AtomicUsize
}
impl MockDevice
{
	///
	pub fn new (deviceType: DeviceType) -> Arc<Self> {
		Arc::new(Self {
			compiler: MockCompiler::default(), deviceType, failDevice: AtomicBool::new(false),
			deviceProgramCount: AtomicUsize::new(0)
		})
	}

	///
	pub fn deviceProgramCount (&self) -> usize {
		self.deviceProgramCount.load(Ordering::SeqCst)
	}
}
impl DeviceLayer for MockDevice
{
	type Compiler = MockCompiler;
	type DeviceProgram = MockDeviceProgram;

	fn compiler (&self) -> &Self::Compiler {
		&self.compiler
	}

	fn deviceType (&self) -> DeviceType {
		self.deviceType
	}

	fn createDeviceProgram (
		&self, _globalScope: &ComponentOf<Self>, entryPoints: &[&ComponentOf<Self>], _log: &mut String
	) -> Result<Self::DeviceProgram, String>
	{
		if self.failDevice.load(Ordering::SeqCst) {
			return Err("device refused the program".into());
		}
		self.deviceProgramCount.fetch_add(1, Ordering::SeqCst);
		Ok(MockDeviceProgram {
			entryPointNames: entryPoints.iter().map(|&ep| self.compiler.entryPointName(ep).unwrap_or_default()).collect()
		})
	}
}



//////
//
// Functions
//

/// A manager for a fresh *Vulkan* mock device.
pub fn newManager () -> Arc<ProgramManager<MockDevice>> {
	ProgramManager::new(MockDevice::new(DeviceType::Vulkan))
}

/// A descriptor for a single compute shader held in memory.
pub fn computeDesc (entryPoint: &str) -> ProgramDesc
{
	let mut desc = ProgramDesc::new();
	desc.addShaderModule(ShaderModule::fromString(
		format!("[numthreads(1,1,1)] void {entryPoint}() {{}}"), "compute.slang"
	));
	desc.addEntryPointGroup(0).csEntry(entryPoint);
	desc
}

/// Create a program of the given descriptor without initial defines.
pub fn newProgram (manager: &Arc<ProgramManager<MockDevice>>, desc: ProgramDesc) -> Program<MockDevice> {
	Program::new(manager, desc, DefineList::new())
}
