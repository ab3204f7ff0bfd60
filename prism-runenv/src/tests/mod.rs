
//////
//
// Imports
//

// Standard library
use std::path::PathBuf;

// Local imports
use crate::*;



//////
//
// Tests
//

#[test]
fn test_missingKeysDefault()
{
	let env = Environment::deserialize("shaderPath: [shaders]\n").unwrap();
	assert_eq!(env.shaderPath, vec![PathBuf::from("shaders")]);
	assert!(env.globalDefines.is_empty());
	assert!(env.forcedFlags.enabled.is_empty());
	assert!(!env.generateDebugInfo);
	assert!(!env.spirvDirect);
	assert_eq!(env.shaderModel, None);
}

#[test]
fn test_fullDocument()
{
	let yaml = "\
shaderPath:
  - /opt/shaders
  - shaders
globalDefines:
  USE_NEE: '1'
  MAX_BOUNCES: '3'
globalCompilerArguments: ['-O3']
forcedFlags:
  enabled: [GENERATE_DEBUG_INFO]
  disabled: [GENERATE_DEBUG_INFO, DUMP_INTERMEDIATES]
generateDebugInfo: true
spirvDirect: true
shaderModel: sm_6_5
";
	let env = Environment::deserialize(yaml).unwrap();
	assert_eq!(env.shaderPath.len(), 2);
	assert_eq!(env.globalDefines.get("MAX_BOUNCES").map(String::as_str), Some("3"));
	assert_eq!(env.globalCompilerArguments, vec!["-O3".to_string()]);
	assert_eq!(env.forcedFlags.enabled, vec!["GENERATE_DEBUG_INFO".to_string()]);
	assert_eq!(env.forcedFlags.disabled.len(), 2);
	assert!(env.generateDebugInfo);
	assert!(env.spirvDirect);
	assert_eq!(env.shaderModel.as_deref(), Some("sm_6_5"));
}

#[test]
fn test_serializeRoundtripsThroughFile()
{
	let mut env = Environment::default();
	env.shaderPath.push("lib".into());
	env.globalDefines.insert("TARGET_FAST".into(), "1".into());

	let dir = std::env::temp_dir().join(format!("prism-runenv-test-{}", std::process::id()));
	std::fs::create_dir_all(&dir).unwrap();
	let file = dir.join("env.yaml");
	env.serializeToFile(&file).unwrap();

	// Relative search paths get anchored at the file location
	let loaded = Environment::fromFile(&file).unwrap();
	assert_eq!(loaded.shaderPath, vec![dir.join("lib")]);
	assert_eq!(loaded.globalDefines, env.globalDefines);

	std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_invalidDocumentIsRejected() {
	assert!(Environment::deserialize("shaderPath: 42: [").is_err());
}
