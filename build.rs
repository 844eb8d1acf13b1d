//! Build script - places the nRF52840 linker script where the linker
//! can find it and tracks the build-time Wi-Fi credentials.

use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-env-changed=SHUTTER_WIFI_SSID");
    println!("cargo:rerun-if-env-changed=SHUTTER_WIFI_PASSWORD");

    // Host builds (unit tests) link with the platform default.
    let target = env::var("TARGET").unwrap_or_default();
    if !target.starts_with("thumbv") {
        return;
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::copy("memory.x", out_dir.join("memory.x")).unwrap();
    println!("cargo:rustc-link-search={}", out_dir.display());
}
