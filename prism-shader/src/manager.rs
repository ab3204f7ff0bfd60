
//////
//
// Imports
//

// Standard library
use std::{
	collections::BTreeSet, path::{Path, PathBuf}, time::Instant,
	sync::{Arc, Weak, Mutex, RwLock, PoisonError, RwLockReadGuard, RwLockWriteGuard, MutexGuard}
};

// DashMap library
use dashmap::DashMap;

// Tracing library
use tracing;

// Local imports
use crate::*;
use crate::{compile::*, program::{ProgramShared, ProgramVersionBuilder}};



//////
//
// Structs
//

/// Compiler flags the [`ProgramManager`] forces on or off for every program. A flag that is both force-enabled and
/// force-disabled ends up enabled.
#[derive(Debug,Clone,Copy,Default,PartialEq,Eq)]
pub struct ForcedCompilerFlags {
	pub enabled: CompilerFlags,
	pub disabled: CompilerFlags
}
impl ForcedCompilerFlags
{
	/// Apply the forced flags to the given program flags.
	#[inline(always)]
	pub fn apply (&self, flags: CompilerFlags) -> CompilerFlags {
		(flags & !self.disabled) | self.enabled
	}

	/// Create forced flags from lists of flag names as found in configuration files.
	pub fn fromFlagNames (enabled: &[String], disabled: &[String]) -> Result<Self, ConfigurationError>
	{
		let parse = |names: &[String]| names.iter().try_fold(CompilerFlags::empty(), |flags, name|
			CompilerFlags::fromFlagName(name).map(|flag| flags | flag)
				.ok_or_else(|| ConfigurationError::UnknownCompilerFlag(name.clone()))
		);
		Ok(Self { enabled: parse(enabled)?, disabled: parse(disabled)? })
	}
}


/// Running statistics about the compilation work done by a [`ProgramManager`]. Times are in seconds.
#[derive(Debug,Clone,Copy,Default,PartialEq)]
pub struct CompilationStats {
	pub programVersionCount: usize,
	pub programKernelsCount: usize,
	pub programVersionMaxTime: f64,
	pub programKernelsMaxTime: f64,
	pub programVersionTotalTime: f64,
	pub programKernelsTotalTime: f64
}
impl CompilationStats
{
	fn recordVersion (&mut self, time: f64) {
		self.programVersionCount += 1;
		self.programVersionTotalTime += time;
		self.programVersionMaxTime = self.programVersionMaxTime.max(time);
	}

	fn recordKernels (&mut self, time: f64) {
		self.programKernelsCount += 1;
		self.programKernelsTotalTime += time;
		self.programKernelsMaxTime = self.programKernelsMaxTime.max(time);
	}
}


/// Configuration applying to every compilation.
#[derive(Debug,Clone,Default)]
struct GlobalConfig {
	defines: DefineList,
	compilerArguments: Vec<String>,
	forcedFlags: ForcedCompilerFlags,
	generateDebugInfo: bool,
	spirvDirect: bool,
	defaultShaderModel: Option<ShaderModel>
}



//////
//
// Classes
//

/// Compiles [programs](Program) into [versions](ProgramVersion) and links versions into [kernels](ProgramKernels),
/// applying the global compilation settings.
///
/// The manager keeps track of every live program so a change to the global settings can reset them all.
pub struct ProgramManager<D: DeviceLayer> {
	device: Arc<D>,
	resolver: RwLock<SourceResolver>,
	config: RwLock<GlobalConfig>,
	stats: Mutex<CompilationStats>,
	registry: DashMap<ProgramId, Weak<ProgramShared<D>>>
}
impl<D: DeviceLayer> ProgramManager<D>
{
	/// Create a manager for the given device without any search paths.
	#[inline(always)]
	pub fn new (device: Arc<D>) -> Arc<Self> {
		Self::withSourceResolver(device, SourceResolver::new())
	}

	/// Create a manager for the given device that looks up shader files using the given resolver.
	pub fn withSourceResolver (device: Arc<D>, resolver: SourceResolver) -> Arc<Self> {
		Arc::new(Self {
			device, resolver: RwLock::new(resolver), config: RwLock::new(GlobalConfig::default()),
			stats: Mutex::new(CompilationStats::default()), registry: DashMap::new()
		})
	}

	/// Create a manager for the given device configured by the given runtime environment.
	pub fn withEnvironment (device: Arc<D>, environment: &prism_runenv::Environment)
		-> Result<Arc<Self>, ConfigurationError>
	{
		// Step 1 - validate
		let forcedFlags = ForcedCompilerFlags::fromFlagNames(
			&environment.forcedFlags.enabled, &environment.forcedFlags.disabled
		)?;
		let defaultShaderModel = environment.shaderModel.as_deref().map(ShaderModel::fromProfileString).transpose()?;

		// Step 2 - build manager
		let mut resolver = SourceResolver::new();
		resolver.addSearchPaths(&environment.shaderPath);
		let manager = Self::withSourceResolver(device, resolver);
		{
			let mut config = manager.writeConfig();
			config.defines = environment.globalDefines.clone().into();
			config.compilerArguments = environment.globalCompilerArguments.clone();
			config.forcedFlags = forcedFlags;
			config.generateDebugInfo = environment.generateDebugInfo;
			config.spirvDirect = environment.spirvDirect;
			config.defaultShaderModel = defaultShaderModel;
		}

		// Done!
		Ok(manager)
	}

	fn readConfig (&self) -> RwLockReadGuard<'_, GlobalConfig> {
		self.config.read().unwrap_or_else(PoisonError::into_inner)
	}

	fn writeConfig (&self) -> RwLockWriteGuard<'_, GlobalConfig> {
		self.config.write().unwrap_or_else(PoisonError::into_inner)
	}

	fn lockStats (&self) -> MutexGuard<'_, CompilationStats> {
		self.stats.lock().unwrap_or_else(PoisonError::into_inner)
	}

	/// The device layer programs are compiled for.
	#[inline(always)]
	pub fn device (&self) -> &Arc<D> {
		&self.device
	}

	/// The shader model of programs whose descriptor does not name one. Unless the environment the manager was created
	/// with names a profile, this is the default of the device layer.
	pub fn defaultShaderModel (&self) -> ShaderModel {
		self.readConfig().defaultShaderModel.unwrap_or_else(|| self.device.defaultShaderModel())
	}

	/// Append a directory to the shader search paths. Returns `false` if it was already present.
	pub fn addSearchPath (&self, path: impl AsRef<Path>) -> bool {
		self.resolver.write().unwrap_or_else(PoisonError::into_inner).addSearchPath(path)
	}

	/// Snapshot of the shader search paths.
	pub fn searchPaths (&self) -> Vec<PathBuf> {
		self.resolver.read().unwrap_or_else(PoisonError::into_inner).searchPaths().to_vec()
	}

	/// Find a shader file in the search paths. See [`SourceResolver::findFile`].
	pub fn findFile (&self, path: impl AsRef<Path>) -> Result<PathBuf, SourceError> {
		self.resolver.read().unwrap_or_else(PoisonError::into_inner).findFile(path)
	}

	/// Add global defines and reload all programs.
	pub fn addGlobalDefines (&self, defines: &DefineList) {
		self.writeConfig().defines.addAll(defines);
		self.reloadAllPrograms(true);
	}

	/// Remove global defines and reload all programs.
	pub fn removeGlobalDefines (&self, defines: &DefineList) {
		self.writeConfig().defines.removeAll(defines);
		self.reloadAllPrograms(true);
	}

	///
	pub fn globalDefines (&self) -> DefineList {
		self.readConfig().defines.clone()
	}

	/// Set the compiler arguments passed before the program-specific ones. Reloads all programs if the arguments
	/// changed.
	pub fn setGlobalCompilerArguments (&self, args: Vec<String>) {
		let changed = {
			let mut config = self.writeConfig();
			let changed = config.compilerArguments != args;
			config.compilerArguments = args;
			changed
		};
		if changed {
			self.reloadAllPrograms(true);
		}
	}

	///
	pub fn globalCompilerArguments (&self) -> Vec<String> {
		self.readConfig().compilerArguments.clone()
	}

	/// Enable debug info for every compilation, regardless of the program flags. Reloads all programs on change.
	pub fn setGenerateDebugInfoEnabled (&self, enabled: bool) {
		let changed = std::mem::replace(&mut self.writeConfig().generateDebugInfo, enabled) != enabled;
		if changed {
			self.reloadAllPrograms(true);
		}
	}

	///
	pub fn isGenerateDebugInfoEnabled (&self) -> bool {
		self.readConfig().generateDebugInfo
	}

	/// Set the forced compiler flags and reload all programs.
	pub fn setForcedCompilerFlags (&self, forcedFlags: ForcedCompilerFlags) {
		self.writeConfig().forcedFlags = forcedFlags;
		self.reloadAllPrograms(true);
	}

	///
	pub fn forcedCompilerFlags (&self) -> ForcedCompilerFlags {
		self.readConfig().forcedFlags
	}

	/// Apply the forced compiler flags to the given program flags.
	pub fn applyForcedCompilerFlags (&self, flags: CompilerFlags) -> CompilerFlags {
		self.readConfig().forcedFlags.apply(flags)
	}

	/// Make the compiler emit *SPIR-V* directly. Reloads all programs on change.
	pub fn setSpirvDirectMode (&self, enabled: bool) {
		let changed = std::mem::replace(&mut self.writeConfig().spirvDirect, enabled) != enabled;
		if changed {
			self.reloadAllPrograms(true);
		}
	}

	///
	pub fn isSpirvDirectMode (&self) -> bool {
		self.readConfig().spirvDirect
	}

	///
	pub fn compilationStats (&self) -> CompilationStats {
		*self.lockStats()
	}

	///
	pub fn resetCompilationStats (&self) {
		*self.lockStats() = CompilationStats::default();
	}

	pub(crate) fn registerProgramForReload (&self, program: &Arc<ProgramShared<D>>) {
		self.registry.insert(program.id, Arc::downgrade(program));
	}

	pub(crate) fn unregisterProgramForReload (&self, id: ProgramId) {
		self.registry.remove(&id);
	}

	/// Number of programs currently registered for reloading.
	#[inline(always)]
	pub fn registeredProgramCount (&self) -> usize {
		self.registry.len()
	}

	/// Reset every registered program, discarding its active and cached versions so it gets recompiled on next use.
	///
	/// # Arguments
	///
	/// * `force` – Also reset programs that have nothing cached. Without it, such programs are skipped.
	///
	/// # Returns
	///
	/// `true` if at least one program was reset.
	pub fn reloadAllPrograms (&self, force: bool) -> bool
	{
		let programs: Vec<_> = self.registry.iter().filter_map(|entry| entry.value().upgrade()).collect();
		let mut reloaded = 0usize;
		for program in programs {
			if force || program.hasCachedState() {
				program.reset();
				reloaded += 1;
			}
		}
		tracing::debug!("Reloaded {reloaded} program(s)");
		reloaded > 0
	}

	/// Build the compile request for the given program descriptor and defines.
	pub(crate) fn createCompileRequest (&self, desc: &ProgramDesc, defines: &DefineList)
		-> Result<CompileRequest, ConfigurationError>
	{
		let config = self.readConfig().clone();
		let deviceType = self.device.deviceType();
		let shaderModel = desc.shaderModel.or(config.defaultShaderModel)
			.unwrap_or_else(|| self.device.defaultShaderModel());

		// Step 1 - adjust compiler flags
		let flags = config.forcedFlags.apply(desc.compilerFlags);
		let mut fast = flags.contains(CompilerFlags::FLOATING_POINT_MODE_FAST);
		let precise = flags.contains(CompilerFlags::FLOATING_POINT_MODE_PRECISE);
		if fast && precise {
			tracing::warn!(
				"Shader compiler flags 'FLOATING_POINT_MODE_FAST' and 'FLOATING_POINT_MODE_PRECISE' can't be used \
				 simultaneously. Ignoring 'FLOATING_POINT_MODE_FAST'."
			);
			fast = false;
		}
		let floatingPointMode = if fast {
			FloatingPointMode::Fast
		} else if precise {
			FloatingPointMode::Precise
		} else {
			FloatingPointMode::Default
		};

		// Step 2 - macros, global ones first
		let mut macros: Vec<(String, String)> = config.defines.iter().chain(defines.iter())
			.map(|(name, value)| (name.to_owned(), value.to_owned()))
			.collect();
		macros.push((deviceType.targetMacroName().to_owned(), "1".to_owned()));
		macros.push((shaderModel.macroName(), "1".to_owned()));

		// Step 3 - translation units
		let resolver = self.resolver.read().unwrap_or_else(PoisonError::into_inner);
		let mut translationUnits = Vec::with_capacity(desc.shaderModules.len());
		for module in &desc.shaderModules {
			let mut sources = Vec::with_capacity(module.sources.len());
			for source in &module.sources {
				sources.push(match source {
					ShaderSource::File(path) => ShaderSource::File(crate::source::resolveSourceFile(&resolver, path)?),
					ShaderSource::String {..} => source.clone()
				});
			}
			translationUnits.push(TranslationUnit { name: module.name.clone(), sources });
		}

		// Step 4 - entry points
		let mut entryPoints = Vec::with_capacity(desc.entryPointCount());
		for (groupIndex, group) in desc.entryPointGroups.iter().enumerate() {
			if group.shaderModuleIndex >= translationUnits.len() {
				return Err(ConfigurationError::InvalidShaderModuleIndex {
					group: groupIndex, index: group.shaderModuleIndex
				});
			}
			for entryPoint in &group.entryPoints {
				let globalIndex = entryPoint.globalIndex.unwrap_or(entryPoints.len() as u32);
				entryPoints.push(EntryPointDecl {
					translationUnit: group.shaderModuleIndex, name: entryPoint.name.clone(), stage: entryPoint.stage,
					globalIndex
				});
			}
		}

		// Step 5 - arguments, global ones first
		let mut arguments = config.compilerArguments.clone();
		arguments.extend(desc.compilerArguments.iter().cloned());

		// Done!
		Ok(CompileRequest {
			searchPaths: resolver.searchPaths().to_vec(),
			macros,
			target: deviceType.target(),
			profile: shaderModel.profileString(),
			flags,
			floatingPointMode,
			matrixLayout: if flags.contains(CompilerFlags::MATRIX_LAYOUT_COLUMN_MAJOR) {
				MatrixLayout::ColumnMajor
			} else {
				MatrixLayout::RowMajor
			},
			debugInfo: config.generateDebugInfo || flags.contains(CompilerFlags::GENERATE_DEBUG_INFO),
			dumpIntermediates: flags.contains(CompilerFlags::DUMP_INTERMEDIATES),
			emitSpirvDirectly: config.spirvDirect,
			forceScalarBufferLayout: true,
			noCodegen: true,
			disabledDiagnostics: CompileRequest::SUPPRESSED_DIAGNOSTICS.to_vec(),
			arguments,
			translationUnits,
			entryPoints
		})
	}

	/// Compile the given program for its current defines, bypassing its version cache.
	pub fn createProgramVersion (&self, program: &Program<D>, log: &mut String)
		-> Result<Arc<ProgramVersion<D>>, ProgramError>
	{
		let defines = program.defines();
		self.createProgramVersionFor(program.shared(), &defines, log)
	}

	pub(crate) fn createProgramVersionFor (
		&self, program: &Arc<ProgramShared<D>>, defines: &DefineList, log: &mut String
	) -> Result<Arc<ProgramVersion<D>>, ProgramError>
	{
		let start = Instant::now();
		let desc = &program.desc;
		let compiler = self.device.compiler();
		let compilationError = |log: &String| ProgramError::Compilation {
			program: program.descString.clone(), log: log.clone()
		};

		// Step 1 - front end compilation
		let request = self.createCompileRequest(desc, defines).map_err(|error| {
			log.push_str(&format!("{error}\n"));
			ProgramError::Configuration { error, log: log.clone() }
		})?;
		let output = compiler.compile(&request);
		log.push_str(&output.diagnostics);
		let Some(compiled) = output.program else {
			return Err(compilationError(log));
		};

		// Step 2 - gather entry points, renaming where the export name differs
		let mut entryPoints = Vec::with_capacity(desc.entryPointCount());
		for (index, entryPoint) in desc.entryPoints().enumerate() {
			let Some(handle) = compiled.entryPoints.get(index) else {
				log.push_str(&format!("Compiler did not produce entry point `{}`.\n", entryPoint.name));
				return Err(compilationError(log));
			};
			if entryPoint.exportName != entryPoint.name {
				match compiler.renameEntryPoint(handle, &entryPoint.exportName) {
					Ok(renamed) => entryPoints.push(renamed),
					Err(msg) => {
						log.push_str(&format!("Renaming entry point `{}` failed: {msg}\n", entryPoint.name));
						return Err(compilationError(log));
					}
				}
			}
			else {
				entryPoints.push(handle.clone());
			}
		}

		// Step 3 - reflect global scope together with the entry points
		let builder = ProgramVersionBuilder::createEmpty(Arc::downgrade(program), compiled.globalScope);
		let handle = {
			let mut components = vec![builder.globalScope()];
			components.extend(entryPoints.iter());
			self.composeAndReflect(&components, log).map_err(|_| compilationError(log))?
		};
		let reflection = ProgramReflection::create(builder.id(), desc, handle);

		// Step 4 - finish version
		let version = Arc::new(builder.init(defines.clone(), reflection, program.descString.clone(), entryPoints));
		let time = start.elapsed().as_secs_f64();
		self.lockStats().recordVersion(time);
		tracing::info!(
			"Created program version {} of {} [defines {:016x}] in {time:.3}s", version.id(), version.name(),
			defines.digest()
		);

		// Done!
		Ok(version)
	}

	fn composeAndReflect (&self, components: &[&ComponentOf<D>], log: &mut String) -> Result<ReflectionOf<D>, ()>
	{
		let compiler = self.device.compiler();
		let composite = compiler.composeComponents(components, log).map_err(|msg| {
			log.push_str(&format!("Creating composite component failed: {msg}\n"));
		})?;
		compiler.reflect(&composite).map_err(|msg| {
			log.push_str(&format!("Reflecting program failed: {msg}\n"));
		})
	}

	/// Compose all given conformances into one component. Returns `None` if there are no conformances.
	fn createConformanceComposite (
		&self, scope: &ComponentOf<D>, conformances: &TypeConformanceList, log: &mut String
	) -> Result<Option<ComponentOf<D>>, LinkFailure>
	{
		let compiler = self.device.compiler();
		let mut components = Vec::with_capacity(conformances.len());
		for (conformance, id) in conformances.iter()
		{
			// Look up type and interface
			let Some(ty) = compiler.findTypeByName(scope, &conformance.typeName) else {
				log.push_str(&format!("Type {} in type conformance was not found.\n", conformance.typeName));
				return Err(LinkFailure::Configuration(ConfigurationError::UnresolvedType(conformance.typeName.clone())));
			};
			let Some(interface) = compiler.findTypeByName(scope, &conformance.interfaceName) else {
				log.push_str(&format!(
					"Interface type {} in type conformance was not found.\n", conformance.interfaceName
				));
				return Err(LinkFailure::Configuration(
					ConfigurationError::UnresolvedInterface(conformance.interfaceName.clone())
				));
			};

			// Create conformance component
			let component = compiler.createTypeConformance(&ty, &interface, id, log).map_err(|msg| {
				log.push_str(&format!("Creating type conformance {conformance} failed: {msg}\n"));
				LinkFailure::Linking
			})?;
			components.push(component);
		}
		if components.is_empty() {
			return Ok(None);
		}
		let refs: Vec<_> = components.iter().collect();
		compiler.composeComponents(&refs, log).map(Some).map_err(|msg| {
			log.push_str(&format!("Creating type conformance composite failed: {msg}\n"));
			LinkFailure::Linking
		})
	}

	/// Link the given version of the program against the program's current type conformances, bypassing the kernels
	/// cache of the version.
	pub fn createProgramKernels (&self, program: &Program<D>, version: &ProgramVersion<D>, log: &mut String)
		-> Result<ProgramKernels<D>, ProgramError>
	{
		let owner = version.owner().ok_or(ProgramError::Orphaned)?;
		if !Arc::ptr_eq(&owner, program.shared()) {
			return Err(ProgramError::VersionMismatch);
		}
		let conformances = owner.typeConformances();
		self.createKernelsFor(&owner, &conformances, version, log)
	}

	pub(crate) fn createKernelsFor (
		&self, program: &ProgramShared<D>, conformances: &TypeConformanceList, version: &ProgramVersion<D>,
		log: &mut String
	) -> Result<ProgramKernels<D>, ProgramError>
	{
		let start = Instant::now();
		let desc = &program.desc;
		let compiler = self.device.compiler();
		let linkingError = |log: &String| ProgramError::Linking {
			program: program.descString.clone(), log: log.clone()
		};
		let fail = |failure: LinkFailure, log: &String| match failure {
			LinkFailure::Configuration(error) => ProgramError::Configuration { error, log: log.clone() },
			LinkFailure::Linking => linkingError(log)
		};

		// Global specialization arguments are not supported, so the specialized global scope is the original one
		let globalScope = version.globalScope();

		// Step 1 - one conformance composite per group, merging program and group conformances
		let mut composites = Vec::with_capacity(desc.entryPointGroups.len());
		for group in &desc.entryPointGroups {
			let mut groupConformances = conformances.clone();
			groupConformances.addAll(&group.typeConformances);
			composites.push(
				self.createConformanceComposite(globalScope, &groupConformances, log).map_err(|f| fail(f, log))?
			);
		}

		// Step 2 - specialize and link entry points
		let mut specialized = Vec::with_capacity(desc.entryPointCount());
		let mut linked = Vec::with_capacity(desc.entryPointCount());
		for (groupIndex, group) in desc.entryPointGroups.iter().enumerate() {
			for entryPoint in &group.entryPoints
			{
				let Some(handle) = entryPoint.globalIndex.and_then(|index| version.entryPoint(index)) else {
					log.push_str(&format!("Version {} lacks entry point `{}`.\n", version.id(), entryPoint.name));
					return Err(linkingError(log));
				};
				let specializedEntryPoint = match &composites[groupIndex] {
					Some(composite) => compiler.composeComponents(&[handle, composite], log).map_err(|msg| {
						log.push_str(&format!("Specializing entry point `{}` failed: {msg}\n", entryPoint.exportName));
						linkingError(log)
					})?,
					None => handle.clone()
				};
				let linkedEntryPoint = compiler.composeComponents(&[globalScope, &specializedEntryPoint], log)
					.map_err(|msg| {
						log.push_str(&format!("Linking entry point `{}` failed: {msg}\n", entryPoint.exportName));
						linkingError(log)
					})?;
				specialized.push(specializedEntryPoint);
				linked.push(linkedEntryPoint);
			}
		}

		// Step 3 - re-reflect, using the unlinked entry points so the global scope is not included repeatedly
		let handle = {
			let mut components = vec![globalScope];
			components.extend(version.entryPoints().iter());
			components.extend(composites.iter().flatten());
			self.composeAndReflect(&components, log).map_err(|_| linkingError(log))?
		};
		let reflection = ProgramReflection::create(version.id(), desc, handle);

		// Step 4 - assemble kernels per group
		let mut linked = linked.into_iter();
		let mut groups = Vec::with_capacity(desc.entryPointGroups.len());
		for (groupIndex, group) in desc.entryPointGroups.iter().enumerate() {
			let kind = GroupKernelsType::classify(groupIndex, group).map_err(|error| {
				log.push_str(&format!("{error}\n"));
				ProgramError::Configuration { error, log: log.clone() }
			})?;
			let kernels = group.entryPoints.iter().zip(linked.by_ref()).map(|(entryPoint, linked)|
				EntryPointKernel { stage: entryPoint.stage, exportName: entryPoint.exportName.clone(), linked }
			).collect();
			groups.push(EntryPointGroupKernels::new(kind, kernels));
		}

		// Step 5 - hand over specialized entry points to the device, de-duplicated for ray tracing
		let isRayTracing = desc.entryPoints().next().is_some_and(|ep| ep.stage.isRayTracing());
		let mut deviceEntryPoints = Vec::with_capacity(specialized.len());
		let mut deviceEntryPointNames = Vec::with_capacity(specialized.len());
		let mut seenNames = BTreeSet::new();
		for (entryPoint, component) in desc.entryPoints().zip(specialized.iter()) {
			let name = compiler.entryPointName(component).unwrap_or_else(|| entryPoint.exportName.clone());
			if isRayTracing && !seenNames.insert(name.clone()) {
				continue;
			}
			deviceEntryPoints.push(component);
			deviceEntryPointNames.push(name);
		}
		let deviceProgram = self.device.createDeviceProgram(globalScope, &deviceEntryPoints, log).map_err(|msg| {
			log.push_str(&format!("Creating device program failed: {msg}\n"));
			ProgramError::Device { program: program.descString.clone(), log: log.clone() }
		})?;

		// Step 6 - finish
		let kernels = ProgramKernels::new(
			program.descString.clone(), version.id(), conformances.clone(), reflection, groups, deviceEntryPointNames,
			deviceProgram
		);
		let time = start.elapsed().as_secs_f64();
		self.lockStats().recordKernels(time);
		tracing::info!(
			"Created program kernels of {} for version {} [conformances {:016x}] in {time:.3}s", kernels.name(),
			version.id(), conformances.digest()
		);

		// Done!
		Ok(kernels)
	}
}



//////
//
// Enums
//

/// Internal classification of linking failures before they are turned into a [`ProgramError`].
enum LinkFailure {
	Configuration(ConfigurationError),
	Linking
}
