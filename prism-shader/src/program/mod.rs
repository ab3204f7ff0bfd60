
//////
//
// Module definitions
//

/// Submodule implementing program versions.
mod version;
pub use version::{ProgramVersion, VersionId}; // re-export
pub(crate) use version::ProgramVersionBuilder;

/// Submodule implementing program reflection.
mod reflection;
pub use reflection::{ProgramReflection, EntryPointGroupReflection}; // re-export

/// Submodule implementing linked program kernels.
mod kernels;
pub use kernels::{ProgramKernels, EntryPointGroupKernels, EntryPointKernel, GroupKernelsType}; // re-export



//////
//
// Imports
//

// Standard library
use std::{
	collections::HashMap, fmt::{Display, Formatter}, sync::{Arc, Weak, Mutex, MutexGuard, PoisonError}
};

// CRC64-fast library
use crc64fast_nvme as crc64;

// Tracing library
use tracing;

// Local imports
use crate::*;



//////
//
// Globals
//

static PROGRAM_IDS: util::unique::IdRealm = util::unique::IdRealm::startingAt(1);



//////
//
// Structs
//

/// Process-unique identifier of a [`Program`].
#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub struct ProgramId(u64);
impl ProgramId {
	fn new () -> Self {
		Self(PROGRAM_IDS.next())
	}
}
impl Display for ProgramId {
	fn fmt (&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
		write!(formatter, "#{}", self.0)
	}
}


/// Identifies a [program version](ProgramVersion) by the configuration that produced it. Two keys are equal iff their
/// defines and their type conformances are structurally equal.
#[derive(Debug,Clone,PartialEq,Eq,Hash)]
pub struct ProgramVersionKey {
	pub defines: DefineList,
	pub conformances: TypeConformanceList
}
impl ProgramVersionKey
{
	///
	#[inline(always)]
	pub fn new (defines: &DefineList, conformances: &TypeConformanceList) -> Self {
		Self { defines: defines.clone(), conformances: conformances.clone() }
	}

	/// Fingerprint of the key for log output. See [`DefineList::digest`].
	pub fn digest (&self) -> u64 {
		let mut digest = crc64::Digest::new();
		self.defines.writeCanonical(&mut digest);
		digest.write(b"|");
		self.conformances.writeCanonical(&mut digest);
		digest.sum64()
	}
}


/// The mutable part of a program.
struct ProgramState<D: DeviceLayer> {
	defines: DefineList,
	conformances: TypeConformanceList,
	dirty: bool,
	activeVersion: Option<Arc<ProgramVersion<D>>>,
	versions: HashMap<ProgramVersionKey, Arc<ProgramVersion<D>>>,

	// Every version ever produced, for orphaning them when the program goes away.
	produced: Vec<Weak<ProgramVersion<D>>>
}
impl<D: DeviceLayer> ProgramState<D>
{
	fn markDirty (&mut self) {
		self.dirty = true;
	}

	fn track (&mut self, version: &Arc<ProgramVersion<D>>) {
		self.produced.retain(|produced| produced.strong_count() > 0);
		self.produced.push(Arc::downgrade(version));
	}
}


/// The part of a program that versions and the manager registry refer to.
pub(crate) struct ProgramShared<D: DeviceLayer> {
	pub(crate) id: ProgramId,
	pub(crate) manager: Arc<ProgramManager<D>>,
	pub(crate) desc: ProgramDesc,
	pub(crate) descString: String,
	state: Mutex<ProgramState<D>>
}
impl<D: DeviceLayer> ProgramShared<D>
{
	fn lockState (&self) -> MutexGuard<'_, ProgramState<D>> {
		self.state.lock().unwrap_or_else(PoisonError::into_inner)
	}

	/// Snapshot of the currently configured type conformances.
	pub(crate) fn typeConformances (&self) -> TypeConformanceList {
		self.lockState().conformances.clone()
	}

	/// Snapshot of the currently configured defines.
	pub(crate) fn defines (&self) -> DefineList {
		self.lockState().defines.clone()
	}

	/// Whether the program has anything a reload would discard.
	pub(crate) fn hasCachedState (&self) -> bool {
		let state = self.lockState();
		state.activeVersion.is_some() || !state.versions.is_empty()
	}

	pub(crate) fn reset (&self) {
		let mut state = self.lockState();
		state.activeVersion = None;
		state.versions.clear();
		state.markDirty();
	}
}



//////
//
// Classes
//

/// A shader program whose compiled form depends on a live configuration of defines and type conformances.
///
/// Every distinct configuration gets compiled at most once into a [`ProgramVersion`] which is kept in a per-program
/// cache. Mutating the configuration only marks the program dirty, the next call to [`Program::activeVersion`]
/// then either adopts a cached version or compiles a new one.
pub struct Program<D: DeviceLayer> {
	shared: Arc<ProgramShared<D>>
}
impl<D: DeviceLayer> Program<D>
{
	/// Create a program from the given descriptor and initial defines. The descriptor gets finalized, and the initial
	/// type conformances are the program-wide conformances of the descriptor.
	pub fn new (manager: &Arc<ProgramManager<D>>, mut desc: ProgramDesc, defines: DefineList) -> Self
	{
		// Finalize descriptor
		desc.finalize();
		if desc.shaderModel.is_none() {
			desc.shaderModel = Some(manager.defaultShaderModel());
		}

		// Create shared part and register with manager
		let state = ProgramState {
			defines, conformances: desc.typeConformances.clone(), dirty: true, activeVersion: None,
			versions: HashMap::new(), produced: Vec::new()
		};
		let shared = Arc::new(ProgramShared {
			id: ProgramId::new(), manager: manager.clone(), descString: desc.descString(), desc,
			state: Mutex::new(state)
		});
		manager.registerProgramForReload(&shared);
		tracing::debug!("Registered program {} {}", shared.id, shared.descString);

		// Done!
		Self { shared }
	}

	///
	#[inline(always)]
	pub fn id (&self) -> ProgramId {
		self.shared.id
	}

	/// The finalized descriptor of the program.
	#[inline(always)]
	pub fn desc (&self) -> &ProgramDesc {
		&self.shared.desc
	}

	/// Human-readable description listing the program's sources and entry points.
	#[inline(always)]
	pub fn descString (&self) -> &str {
		&self.shared.descString
	}

	///
	#[inline(always)]
	pub fn manager (&self) -> &Arc<ProgramManager<D>> {
		&self.shared.manager
	}

	/// Snapshot of the current defines.
	#[inline(always)]
	pub fn defines (&self) -> DefineList {
		self.shared.defines()
	}

	/// Snapshot of the current type conformances.
	#[inline(always)]
	pub fn typeConformances (&self) -> TypeConformanceList {
		self.shared.typeConformances()
	}

	/// Whether the next call to [`Program::activeVersion`] has to consult the version cache.
	pub fn isDirty (&self) -> bool {
		self.shared.lockState().dirty
	}

	/// Number of versions currently held in the version cache.
	pub fn cachedVersionCount (&self) -> usize {
		self.shared.lockState().versions.len()
	}

	/// Set the define `name` to `value`.
	///
	/// # Returns
	///
	/// `true` if the configuration changed, in which case the program is now dirty.
	pub fn addDefine (&self, name: &str, value: &str) -> bool
	{
		let mut state = self.shared.lockState();
		let changed = state.defines.add(name, value);
		if changed {
			state.markDirty();
		}
		changed
	}

	/// Set all given defines. Returns `true` if any of them changed the configuration.
	pub fn addDefines (&self, defines: &DefineList) -> bool
	{
		let mut state = self.shared.lockState();
		let changed = state.defines.addAll(defines);
		if changed {
			state.markDirty();
		}
		changed
	}

	/// Remove the define `name`. Returns `true` if it was present.
	pub fn removeDefine (&self, name: &str) -> bool
	{
		let mut state = self.shared.lockState();
		let changed = state.defines.remove(name);
		if changed {
			state.markDirty();
		}
		changed
	}

	/// Remove all defines with names contained in `defines`. Returns `true` if any was present.
	pub fn removeDefines (&self, defines: &DefineList) -> bool
	{
		let mut state = self.shared.lockState();
		let changed = state.defines.removeAll(defines);
		if changed {
			state.markDirty();
		}
		changed
	}

	/// Remove all defines matching according to [`DefineList::removeMatching`]. Returns `true` if any was removed.
	pub fn removeDefinesMatching (&self, pos: usize, len: usize, str: &str) -> bool
	{
		let mut state = self.shared.lockState();
		let changed = state.defines.removeMatching(pos, len, str);
		if changed {
			state.markDirty();
		}
		changed
	}

	/// Replace the entire define list. Returns `true` if the new list differs from the current one.
	pub fn setDefines (&self, defines: DefineList) -> bool
	{
		let mut state = self.shared.lockState();
		if state.defines == defines {
			return false;
		}
		state.defines = defines;
		state.markDirty();
		true
	}

	/// Declare that `typeName` conforms to `interfaceName` with the given dispatch id. Nothing happens if a
	/// conformance of that type to that interface is already configured, regardless of its id.
	///
	/// # Returns
	///
	/// `true` if the conformance was added.
	pub fn addTypeConformance (&self, typeName: &str, interfaceName: &str, id: u32) -> bool
	{
		let mut state = self.shared.lockState();
		if state.conformances.find(&TypeConformance::new(typeName, interfaceName)).is_some() {
			return false;
		}
		state.conformances.add(typeName, interfaceName, id);
		state.markDirty();
		true
	}

	/// Remove the conformance of `typeName` to `interfaceName`. Returns `true` if it was configured.
	pub fn removeTypeConformance (&self, typeName: &str, interfaceName: &str) -> bool
	{
		let mut state = self.shared.lockState();
		let changed = state.conformances.remove(typeName, interfaceName);
		if changed {
			state.markDirty();
		}
		changed
	}

	/// Replace all type conformances. Returns `true` if the new list differs from the current one.
	pub fn setTypeConformances (&self, conformances: TypeConformanceList) -> bool
	{
		let mut state = self.shared.lockState();
		if state.conformances == conformances {
			return false;
		}
		state.conformances = conformances;
		state.markDirty();
		true
	}

	/// Obtain the version of the program for the current configuration.
	///
	/// If the program is not dirty, the current active version is returned right away. Otherwise the version cache is
	/// consulted, and the program gets compiled in case of a miss. A failed compilation leaves the program dirty, so
	/// the next call will try again.
	pub fn activeVersion (&self) -> Result<Arc<ProgramVersion<D>>, ProgramError>
	{
		let mut state = self.shared.lockState();

		// Step 1 - reuse the active version if nothing changed
		if !state.dirty && let Some(active) = &state.activeVersion {
			return Ok(active.clone());
		}

		// Step 2 - consult the cache
		let key = ProgramVersionKey::new(&state.defines, &state.conformances);
		if let Some(cached) = state.versions.get(&key).cloned() {
			tracing::debug!("Program {}: adopting cached version {} [{:016x}]", self.shared.id, cached.id(), key.digest());
			state.activeVersion = Some(cached.clone());
			state.dirty = false;
			return Ok(cached);
		}

		// Step 3 - compile
		let mut log = String::new();
		let version = match self.shared.manager.createProgramVersionFor(&self.shared, &key.defines, &mut log) {
			Ok(version) => version,
			Err(err) => {
				tracing::error!("Program {}: {err}", self.shared.id);
				return Err(err);
			}
		};
		if !log.trim().is_empty() {
			tracing::warn!("Warnings in program {}:\n{log}", self.shared.descString);
		}

		// Step 4 - commit to cache
		state.track(&version);
		state.versions.insert(key, version.clone());
		state.activeVersion = Some(version.clone());
		state.dirty = false;

		// Done!
		Ok(version)
	}

	/// Obtain the linked kernels of the active version for the current type conformances.
	pub fn activeKernels (&self) -> Result<Arc<ProgramKernels<D>>, ProgramError> {
		self.activeVersion()?.kernels()
	}

	/// Drop the active version and every cached version, marking the program dirty. Versions still referenced
	/// elsewhere remain valid.
	#[inline(always)]
	pub fn reset (&self) {
		self.shared.reset()
	}

	pub(crate) fn shared (&self) -> &Arc<ProgramShared<D>> {
		&self.shared
	}
}
impl<D: DeviceLayer> Drop for Program<D>
{
	fn drop (&mut self)
	{
		self.shared.manager.unregisterProgramForReload(self.shared.id);
		let state = self.shared.lockState();
		for version in state.produced.iter().filter_map(Weak::upgrade) {
			version.orphan();
		}
		tracing::debug!("Unregistered program {} {}", self.shared.id, self.shared.descString);
	}
}
