//! Stamps the coursectl binary with its version and build flavour

use std::env;

fn main() {
    let version = env::var("COURSECTL_VERSION").unwrap_or_else(|_| env!("CARGO_PKG_VERSION").into());
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".into());
    let target = env::var("TARGET").unwrap_or_else(|_| "unknown".into());

    for (key, value) in [
        ("COURSECTL_VERSION", version.clone()),
        ("COURSECTL_BUILD_INFO", format!("{} ({}, {})", version, profile, target)),
    ] {
        println!("cargo:rustc-env={}={}", key, value);
    }

    println!("cargo:rerun-if-env-changed=COURSECTL_VERSION");
}
