
//////
//
// Language config
//

// Eff this convention.
#![allow(non_snake_case)]



//////
//
// Module definitions
//

/// Submodule providing operations on file system paths.
pub mod path;

/// Submodule providing unique entity generators (IDs etc.)
pub mod unique;

/// Tests for the utilities.
#[cfg(test)]
mod tests;



//////
//
// Imports
//

// Normalize-path library
pub use normalize_path; // re-export



//////
//
// Functions
//

/// If the given option contains a string or string slice, returns an option containing the concatenation of the two
/// inputs.
///
/// # Arguments
///
/// * `option` – The optional string.
/// * `concat` – The string to concatenate to the option in case it does contain something.
///
/// # Returns
///
/// The concatenation of both strings in case `option` contained something, [`None`] otherwise.
#[inline(always)]
pub fn concatIfSome<Str: AsRef<str>> (option: &Option<Str>, concat: &str) -> Option<String> {
	option.as_ref().map(|source| format!("{}{concat}", source.as_ref()))
}

/// Joins the string representations of all items yielded by the given iterator, separating them by `separator`.
pub fn joinDisplay<Item: std::fmt::Display> (items: impl IntoIterator<Item=Item>, separator: &str) -> String
{
	let mut joined = String::new();
	for (index, item) in items.into_iter().enumerate() {
		if index > 0 {
			joined.push_str(separator);
		}
		joined.push_str(&item.to_string());
	}
	joined
}
