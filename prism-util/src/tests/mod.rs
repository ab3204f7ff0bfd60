
//////
//
// Imports
//

// Standard library
use std::path::{Path, PathBuf};

// Local imports
use crate::*;



//////
//
// Tests
//

#[test]
fn test_concatIfSome()
{
	let someStr = Some("hello");
	let noneStr: Option<&str> = None;
	let someString = Some("world".to_string());

	assert_eq!(concatIfSome(&someStr, " world"), Some("hello world".to_string()));
	assert_eq!(concatIfSome(&noneStr, " world"), None);
	assert_eq!(concatIfSome(&someString, "!"), Some("world!".to_string()));
}

#[test]
fn test_joinDisplay() {
	assert_eq!(joinDisplay(["a", "b", "c"], ", "), "a, b, c");
	assert_eq!(joinDisplay([1, 2], "+"), "1+2");
	assert_eq!(joinDisplay(Vec::<u8>::new(), ", "), "");
}

#[test]
fn test_realmsAreUnique()
{
	let realm = unique::IdRealm::startingAt(100);
	assert_eq!(realm.peek(), 100);
	assert_eq!(realm.next(), 100);
	assert_eq!(realm.next(), 101);

	let first = unique::uint64();
	let second = unique::uint64();
	assert_ne!(first, 0);
	assert!(second > first);
}

#[test]
fn test_normalizeToAnchor()
{
	let anchor = Path::new("/shaders/lib");
	assert_eq!(path::normalizeToAnchor(anchor, "../common/util.slang"), PathBuf::from("/shaders/common/util.slang"));
	assert_eq!(path::normalizeToAnchor(anchor, "/abs/file.slang"), PathBuf::from("/abs/file.slang"));
	assert_eq!(path::normalize("a/./b/../c.hlsl"), PathBuf::from("a/c.hlsl"));
}

#[test]
fn test_hasExtension()
{
	assert!(path::hasExtension("Materials/Standard.SLANG", "slang"));
	assert!(path::hasExtension("pass.cs.hlsl", ".hlsl"));
	assert!(!path::hasExtension("notes.txt", "slang"));
	assert!(!path::hasExtension("Makefile", "slang"));
	assert_eq!(path::lowercaseExtension("x/y.HlSl"), "hlsl");
}
