
//////
//
// Imports
//

// Standard library
use std::{fmt::{Display, Formatter}, sync::{Arc, Weak, Mutex, PoisonError}};

// DashMap library
use dashmap::DashMap;

// Tracing library
use tracing;

// Local imports
use crate::*;
use crate::program::ProgramShared;



//////
//
// Globals
//

static VERSION_IDS: util::unique::IdRealm = util::unique::IdRealm::startingAt(1);



//////
//
// Structs
//

/// Process-unique identifier of a [`ProgramVersion`]. Reflection data refers to its version through this id.
#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub struct VersionId(u64);
impl Display for VersionId {
	fn fmt (&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
		write!(formatter, "v{}", self.0)
	}
}


/// An allocated but not yet initialized [`ProgramVersion`]. Its id can be handed out before the version exists, which
/// is how the reflection of a version gets to refer to it.
pub(crate) struct ProgramVersionBuilder<D: DeviceLayer> {
	id: VersionId,
	owner: Weak<ProgramShared<D>>,
	globalScope: ComponentOf<D>
}
impl<D: DeviceLayer> ProgramVersionBuilder<D>
{
	pub(crate) fn createEmpty (owner: Weak<ProgramShared<D>>, globalScope: ComponentOf<D>) -> Self {
		Self { id: VersionId(VERSION_IDS.next()), owner, globalScope }
	}

	#[inline(always)]
	pub(crate) fn id (&self) -> VersionId {
		self.id
	}

	#[inline(always)]
	pub(crate) fn globalScope (&self) -> &ComponentOf<D> {
		&self.globalScope
	}

	pub(crate) fn init (
		self, defines: DefineList, reflection: ProgramReflection<ReflectionOf<D>>, name: String,
		entryPoints: Vec<ComponentOf<D>>
	) -> ProgramVersion<D> {
		ProgramVersion {
			id: self.id, owner: Mutex::new(Some(self.owner)), defines, name, reflection, globalScope: self.globalScope,
			entryPoints, kernels: DashMap::new()
		}
	}
}



//////
//
// Classes
//

/// The result of compiling a [`Program`] for one configuration: the compiled global scope, the entry points and the
/// reflection of the unspecialized program.
///
/// A version is immutable once created. It refers back to its program only weakly. When the program is dropped, the
/// version becomes *orphaned* and can no longer produce kernels.
pub struct ProgramVersion<D: DeviceLayer> {
	id: VersionId,
	owner: Mutex<Option<Weak<ProgramShared<D>>>>,
	defines: DefineList,
	name: String,
	reflection: ProgramReflection<ReflectionOf<D>>,
	globalScope: ComponentOf<D>,
	entryPoints: Vec<ComponentOf<D>>,

	/// Kernels linked so far, keyed by effective program conformances. Entries are never evicted, they live as long as
	/// the version.
	kernels: DashMap<TypeConformanceList, Arc<ProgramKernels<D>>>
}
impl<D: DeviceLayer> ProgramVersion<D>
{
	///
	#[inline(always)]
	pub fn id (&self) -> VersionId {
		self.id
	}

	/// The description of the program this version was compiled from.
	#[inline(always)]
	pub fn name (&self) -> &str {
		&self.name
	}

	/// The defines the version was compiled with.
	#[inline(always)]
	pub fn defines (&self) -> &DefineList {
		&self.defines
	}

	///
	#[inline(always)]
	pub fn reflection (&self) -> &ProgramReflection<ReflectionOf<D>> {
		&self.reflection
	}

	///
	#[inline(always)]
	pub fn globalScope (&self) -> &ComponentOf<D> {
		&self.globalScope
	}

	/// The entry point with the given global index.
	#[inline(always)]
	pub fn entryPoint (&self, globalIndex: u32) -> Option<&ComponentOf<D>> {
		self.entryPoints.get(globalIndex as usize)
	}

	/// All entry points in order of their global index.
	#[inline(always)]
	pub fn entryPoints (&self) -> &[ComponentOf<D>] {
		&self.entryPoints
	}

	pub(crate) fn owner (&self) -> Option<Arc<ProgramShared<D>>> {
		self.owner.lock().unwrap_or_else(PoisonError::into_inner).as_ref().and_then(Weak::upgrade)
	}

	pub(crate) fn orphan (&self) {
		*self.owner.lock().unwrap_or_else(PoisonError::into_inner) = None;
	}

	/// Check whether the program this version was compiled from is gone.
	#[inline(always)]
	pub fn isOrphaned (&self) -> bool {
		self.owner().is_none()
	}

	/// The id of the program this version was compiled from, or `None` if the version is orphaned.
	#[inline(always)]
	pub fn program (&self) -> Option<ProgramId> {
		self.owner().map(|owner| owner.id)
	}

	/// Obtain the kernels of this version linked against the current type conformances of its program.
	///
	/// Kernels are cached per distinct conformance list, so linking against the same conformances again returns the
	/// same object. The cache keeps every conformance list ever linked until the version is dropped.
	pub fn kernels (&self) -> Result<Arc<ProgramKernels<D>>, ProgramError>
	{
		let owner = self.owner().ok_or(ProgramError::Orphaned)?;
		let conformances = owner.typeConformances();
		if let Some(cached) = self.kernels.get(&conformances).map(|entry| entry.value().clone()) {
			tracing::debug!("Version {}: reusing kernels for conformances [{:016x}]", self.id, conformances.digest());
			return Ok(cached);
		}

		let mut log = String::new();
		let kernels = Arc::new(owner.manager.createKernelsFor(&owner, &conformances, self, &mut log)?);
		if !log.trim().is_empty() {
			tracing::warn!("Warnings while linking program {}:\n{log}", self.name);
		}
		Ok(self.kernels.entry(conformances).or_insert(kernels).value().clone())
	}

	/// Number of kernel objects cached by this version.
	#[inline(always)]
	pub fn cachedKernelsCount (&self) -> usize {
		self.kernels.len()
	}
}
