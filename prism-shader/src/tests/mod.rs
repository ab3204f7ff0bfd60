
//////
//
// Module definitions
//

/// Scripted compiler service and device layer the tests run against.
mod mock;

/// Tests for define lists and type conformance lists.
mod config;


/// Tests for source file resolution.
mod source;




/// Tests for the device layer interface.
mod device;



//////
//
// Imports
//

// Standard library
use std::{path::PathBuf, sync::Once};

// Tracing library
use tracing_subscriber::EnvFilter;

// Local imports
use crate::util;



//////
//
// Functions
//

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber printing to the test output. Can be called from every test.
pub fn initTracing () {
	TRACING_INIT.call_once(|| {
		let envFilter = EnvFilter::builder()
			.with_default_directive(tracing::Level::DEBUG.into())
			.from_env_lossy();
		let _ = tracing_subscriber::fmt().with_env_filter(envFilter).with_test_writer().try_init();
	});
}

/// Create a fresh, empty directory below the system temp directory.
pub fn makeTempDir (tag: &str) -> PathBuf
{
	let dir = std::env::temp_dir().join(format!(
		"prism-shader-{tag}-{}-{}", std::process::id(), util::unique::uint64()
	));
	std::fs::create_dir_all(&dir).expect("temp dir creation should succeed");
	dir
}
