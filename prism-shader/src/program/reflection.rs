
//////
//
// Imports
//

// Local imports
use crate::*;



//////
//
// Structs
//

/// Describes how the entry points of one [`EntryPointGroup`] are laid out in a reflected program.
#[derive(Debug,Clone,PartialEq,Eq)]
pub struct EntryPointGroupReflection {
	/// Index of the group in the descriptor.
	pub groupIndex: usize,

	/// Global indices of the entry points in the group.
	pub entryPointIndices: Vec<u32>,

	/// Stages of the entry points in the group, in the same order.
	pub stages: Vec<ShaderStage>
}


/// Reflection data of a compiled program: the compiler's reflection handle for the reflected composite plus the
/// entry point group layout. Refers to the version it describes by [id](VersionId).
pub struct ProgramReflection<Reflection> {
	versionId: VersionId,
	handle: Reflection,
	entryPointGroups: Vec<EntryPointGroupReflection>
}
impl<Reflection> ProgramReflection<Reflection>
{
	pub(crate) fn create (versionId: VersionId, desc: &ProgramDesc, handle: Reflection) -> Self
	{
		let entryPointGroups = desc.entryPointGroups.iter().enumerate().map(|(groupIndex, group)|
			EntryPointGroupReflection {
				groupIndex,
				entryPointIndices: group.entryPoints.iter().filter_map(|ep| ep.globalIndex).collect(),
				stages: group.entryPoints.iter().map(|ep| ep.stage).collect()
			}
		).collect();
		Self { versionId, handle, entryPointGroups }
	}

	/// The version this reflection was created for.
	#[inline(always)]
	pub fn versionId (&self) -> VersionId {
		self.versionId
	}

	/// The reflection object reported by the compiler.
	#[inline(always)]
	pub fn handle (&self) -> &Reflection {
		&self.handle
	}

	///
	#[inline(always)]
	pub fn entryPointGroups (&self) -> &[EntryPointGroupReflection] {
		&self.entryPointGroups
	}

	///
	#[inline(always)]
	pub fn entryPointGroup (&self, groupIndex: usize) -> Option<&EntryPointGroupReflection> {
		self.entryPointGroups.get(groupIndex)
	}
}
