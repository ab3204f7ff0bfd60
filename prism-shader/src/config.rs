
//////
//
// Imports
//

// Standard library
use std::{collections::BTreeMap, fmt::{Display, Formatter}};

// CRC64-fast library
use crc64fast_nvme as crc64;

// Serde library
use serde::{Serialize, Deserialize};



//////
//
// Structs
//

/// A set of named compile-time constants passed to the shader compiler front end.
///
/// Defines are kept ordered by name, so two lists compare (and hash) equal whenever they contain the same
/// name-value pairs, regardless of the order in which they were added.
#[derive(Default,Debug,Clone,PartialEq,Eq,PartialOrd,Ord,Hash,Serialize,Deserialize)]
#[serde(transparent)]
pub struct DefineList {
	defines: BTreeMap<String, String>
}
impl DefineList
{
	/// Create an empty define list.
	#[inline(always)]
	pub fn new () -> Self {
		Self::default()
	}

	/// Add a define, overwriting the value of a define with the same name if present.
	///
	/// # Returns
	///
	/// `true` if the list changed as a result of the call, `false` if the exact same define was already present.
	pub fn add (&mut self, name: impl Into<String>, value: impl Into<String>) -> bool
	{
		let name = name.into();
		let value = value.into();
		if self.defines.get(&name) == Some(&value) {
			return false;
		}
		self.defines.insert(name, value);
		true
	}

	/// Builder-style variant of [`DefineList::add`].
	#[inline(always)]
	pub fn with (mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.add(name, value);
		self
	}

	/// Remove the define with the given name.
	///
	/// # Returns
	///
	/// `true` if a define was removed, `false` if no define of that name existed.
	#[inline(always)]
	pub fn remove (&mut self, name: &str) -> bool {
		self.defines.remove(name).is_some()
	}

	/// Merge all defines of `other` into this list. Values from `other` take precedence.
	///
	/// # Returns
	///
	/// `true` if at least one define was added or changed.
	pub fn addAll (&mut self, other: &DefineList) -> bool {
		other.iter().fold(false, |changed, (name, value)| self.add(name, value) || changed)
	}

	/// Remove every define whose name appears in `other`. The values stored in `other` are ignored.
	///
	/// # Returns
	///
	/// `true` if at least one define was removed.
	pub fn removeAll (&mut self, other: &DefineList) -> bool {
		other.names().fold(false, |changed, name| self.remove(name) || changed)
	}

	/// Remove every define whose name, starting at byte offset `pos` and spanning at most `len` bytes, equals `str`.
	/// Names that are not longer than `pos` are never removed.
	///
	/// # Returns
	///
	/// `true` if at least one define was removed.
	pub fn removeMatching (&mut self, pos: usize, len: usize, str: &str) -> bool
	{
		let before = self.defines.len();
		self.defines.retain(|name, _| {
			let bytes = name.as_bytes();
			if pos >= bytes.len() {
				return true;
			}
			let end = bytes.len().min(pos.saturating_add(len));
			&bytes[pos..end] != str.as_bytes()
		});
		before != self.defines.len()
	}

	///
	#[inline(always)]
	pub fn get (&self, name: &str) -> Option<&str> {
		self.defines.get(name).map(String::as_str)
	}

	///
	#[inline(always)]
	pub fn contains (&self, name: &str) -> bool {
		self.defines.contains_key(name)
	}

	///
	#[inline(always)]
	pub fn len (&self) -> usize {
		self.defines.len()
	}

	///
	#[inline(always)]
	pub fn isEmpty (&self) -> bool {
		self.defines.is_empty()
	}

	/// Iterate over all `(name, value)` pairs in name order.
	#[inline(always)]
	pub fn iter (&self) -> impl Iterator<Item=(&str, &str)> {
		self.defines.iter().map(|(name, value)| (name.as_str(), value.as_str()))
	}

	///
	#[inline(always)]
	pub fn names (&self) -> impl Iterator<Item=&str> {
		self.defines.keys().map(String::as_str)
	}

	/// Compute a CRC-64 fingerprint of the list for use in log output and object names. Equality of lists must never
	/// be decided by comparing digests.
	pub fn digest (&self) -> u64 {
		let mut digest = crc64::Digest::new();
		self.writeCanonical(&mut digest);
		digest.sum64()
	}

	pub(crate) fn writeCanonical (&self, digest: &mut crc64::Digest) {
		for (name, value) in &self.defines {
			digest.write(name.as_bytes());
			digest.write(b"=");
			digest.write(value.as_bytes());
			digest.write(b"\n");
		}
	}
}
impl<Name: Into<String>, Value: Into<String>> FromIterator<(Name, Value)> for DefineList {
	fn from_iter<I: IntoIterator<Item=(Name, Value)>> (iter: I) -> Self {
		Self { defines: iter.into_iter().map(|(name, value)| (name.into(), value.into())).collect() }
	}
}
impl From<BTreeMap<String, String>> for DefineList {
	#[inline(always)]
	fn from (defines: BTreeMap<String, String>) -> Self {
		Self { defines }
	}
}
impl Display for DefineList {
	fn fmt (&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
		write!(formatter, "{{")?;
		for (idx, (name, value)) in self.iter().enumerate() {
			if idx > 0 {
				write!(formatter, ", ")?;
			}
			write!(formatter, "{name}={value}")?;
		}
		write!(formatter, "}}")
	}
}


/// Declares that the concrete type `typeName` conforms to the interface `interfaceName`.
#[derive(Debug,Clone,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub struct TypeConformance {
	pub typeName: String,
	pub interfaceName: String
}
impl TypeConformance {
	///
	#[inline(always)]
	pub fn new (typeName: impl Into<String>, interfaceName: impl Into<String>) -> Self {
		Self { typeName: typeName.into(), interfaceName: interfaceName.into() }
	}
}
impl Display for TypeConformance {
	fn fmt (&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
		write!(formatter, "{}:{}", self.typeName, self.interfaceName)
	}
}


/// A set of [type conformances](TypeConformance), each carrying the numeric id that the compiled program uses to
/// dispatch to the conforming type.
///
/// Lookup and removal are keyed on the *(type, interface)* pair only, while equality of two lists also takes the ids
/// into account – binding the same type under a different id yields a different program configuration.
#[derive(Default,Debug,Clone,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub struct TypeConformanceList {
	conformances: BTreeMap<TypeConformance, u32>
}
impl TypeConformanceList
{
	///
	#[inline(always)]
	pub fn new () -> Self {
		Self::default()
	}

	/// Add a conformance or overwrite the id of an existing one.
	#[inline(always)]
	pub fn add (&mut self, typeName: impl Into<String>, interfaceName: impl Into<String>, id: u32) -> &mut Self {
		self.conformances.insert(TypeConformance::new(typeName, interfaceName), id);
		self
	}

	/// Builder-style variant of [`TypeConformanceList::add`].
	#[inline(always)]
	pub fn with (mut self, typeName: impl Into<String>, interfaceName: impl Into<String>, id: u32) -> Self {
		self.add(typeName, interfaceName, id);
		self
	}

	/// Remove the conformance of `typeName` to `interfaceName`.
	///
	/// # Returns
	///
	/// `true` if a conformance was removed.
	pub fn remove (&mut self, typeName: &str, interfaceName: &str) -> bool {
		self.conformances.remove(&TypeConformance::new(typeName, interfaceName)).is_some()
	}

	/// Find the id bound to the given conformance.
	#[inline(always)]
	pub fn find (&self, conformance: &TypeConformance) -> Option<u32> {
		self.conformances.get(conformance).copied()
	}

	/// Form the union with `other` in-place. Ids from `other` take precedence for pairs present in both lists.
	pub fn addAll (&mut self, other: &TypeConformanceList) -> &mut Self {
		for (conformance, id) in &other.conformances {
			self.conformances.insert(conformance.clone(), *id);
		}
		self
	}

	///
	#[inline(always)]
	pub fn len (&self) -> usize {
		self.conformances.len()
	}

	///
	#[inline(always)]
	pub fn isEmpty (&self) -> bool {
		self.conformances.is_empty()
	}

	/// Iterate over all conformances together with their ids, ordered by type and then interface name.
	#[inline(always)]
	pub fn iter (&self) -> impl Iterator<Item=(&TypeConformance, u32)> {
		self.conformances.iter().map(|(conformance, id)| (conformance, *id))
	}

	/// Compute a CRC-64 fingerprint of the list. See [`DefineList::digest`] for the intended use.
	pub fn digest (&self) -> u64 {
		let mut digest = crc64::Digest::new();
		self.writeCanonical(&mut digest);
		digest.sum64()
	}

	pub(crate) fn writeCanonical (&self, digest: &mut crc64::Digest) {
		for (conformance, id) in &self.conformances {
			digest.write(conformance.typeName.as_bytes());
			digest.write(b":");
			digest.write(conformance.interfaceName.as_bytes());
			digest.write(b"#");
			digest.write(&id.to_le_bytes());
			digest.write(b"\n");
		}
	}
}
impl<Type: Into<String>, Interface: Into<String>> FromIterator<(Type, Interface, u32)> for TypeConformanceList {
	fn from_iter<I: IntoIterator<Item=(Type, Interface, u32)>> (iter: I) -> Self {
		let mut list = Self::new();
		for (typeName, interfaceName, id) in iter {
			list.add(typeName, interfaceName, id);
		}
		list
	}
}
