
//////
//
// Imports
//

// Standard library
use std::sync::atomic::{AtomicU64, Ordering};



//////
//
// Globals
//

/// The realm backing [`uint64`].
pub static GLOBAL_REALM: IdRealm = IdRealm::startingAt(1);



//////
//
// Classes
//

/// Hands out 64-bit ids that are unique within the realm, counting up from a fixed first id. Realms can be placed in
/// `static`s, so distinct kinds of objects can draw from distinct id sequences.
pub struct IdRealm {
	next: AtomicU64
}
impl IdRealm
{
	/// Create a realm whose first id will be `first`.
	pub const fn startingAt (first: u64) -> Self {
		Self { next: AtomicU64::new(first) }
	}

	/// Draw the next id.
	#[inline(always)]
	pub fn next (&self) -> u64 {
		self.next.fetch_add(1, Ordering::Relaxed)
	}

	/// The id the next call to [`IdRealm::next`] will return, barring concurrent draws.
	#[inline(always)]
	pub fn peek (&self) -> u64 {
		self.next.load(Ordering::Relaxed)
	}
}



//////
//
// Functions
//

/// Draw an id that is unique within the current process. Never returns `0`, so that value can serve as a sentinel.
#[inline(always)]
pub fn uint64 () -> u64 {
	GLOBAL_REALM.next()
}
