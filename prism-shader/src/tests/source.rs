
//////
//
// Imports
//

// Standard library
use std::fs;

// Local imports
use crate::*;
use crate::tests::makeTempDir;



//////
//
// Tests
//

#[test]
fn test_findFileSearchOrder()
{
	let first = makeTempDir("first");
	let second = makeTempDir("second");
	fs::write(first.join("shared.slang"), "// first").unwrap();
	fs::write(second.join("shared.slang"), "// second").unwrap();
	fs::create_dir_all(second.join("lib")).unwrap();
	fs::write(second.join("lib/only.slang"), "// only").unwrap();

	let mut resolver = SourceResolver::new();
	resolver.addSearchPaths([&first, &second]);

	// The first directory containing the file wins
	assert_eq!(resolver.findFile("shared.slang"), Ok(first.join("shared.slang")));
	assert_eq!(resolver.findFile("lib/only.slang"), Ok(second.join("lib/only.slang")));
	assert_eq!(resolver.findFile("lib/../shared.slang"), Ok(first.join("shared.slang")));
	assert_eq!(
		resolver.findFile("missing.slang"), Err(SourceError::NotFound("missing.slang".into()))
	);

	fs::remove_dir_all(first).unwrap();
	fs::remove_dir_all(second).unwrap();
}

#[test]
fn test_findAbsolutePath()
{
	let dir = makeTempDir("absolute");
	let file = dir.join("abs.hlsl");
	fs::write(&file, "// abs").unwrap();

	// Absolute paths don't need search directories
	let resolver = SourceResolver::new();
	assert_eq!(resolver.findFile(&file), Ok(file.clone()));
	assert_eq!(resolver.findFile(dir.join("nope.hlsl")), Err(SourceError::NotFound(dir.join("nope.hlsl"))));

	fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_searchPathsAreDeduplicated()
{
	let mut resolver = SourceResolver::new();
	assert!(resolver.addSearchPath("/shaders/common"));
	assert!(!resolver.addSearchPath("/shaders/common"));
	assert!(!resolver.addSearchPath("/shaders/./common/"));
	assert!(resolver.addSearchPath("/shaders/materials"));
	assert_eq!(resolver.searchPaths().len(), 2);
}

#[test]
fn test_shaderExtensions()
{
	assert!(source::hasShaderExtension("a.slang"));
	assert!(source::hasShaderExtension("dir/b.HLSL"));
	assert!(!source::hasShaderExtension("c.glsl"));
	assert!(!source::hasShaderExtension("slang"));
}

#[test]
fn test_sourceErrorConversion()
{
	let error: ConfigurationError = SourceError::NotFound("x.slang".into()).into();
	assert_eq!(error, ConfigurationError::SourceNotFound("x.slang".into()));
}
