use std::env;
use std::path::Path;

fn main() {
	println!("cargo:rerun-if-changed=../build/linker.ld");

	// Host builds (cargo check/test on a dev machine) link normally.
	if env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("none") {
		return;
	}

	let build_dir = Path::new(env!("CARGO_MANIFEST_DIR"))
		.parent()
		.expect("kernel crate must have a parent directory")
		.join("build");
	println!("cargo:rustc-link-search=native={}", build_dir.display());
	println!("cargo:rustc-link-arg=-Tlinker.ld");
}
