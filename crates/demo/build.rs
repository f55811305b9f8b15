//! This build script copies the `memory.x` file from the crate root into
//! a directory where the linker can always find it at build time, selects
//! the `riscv-rt` linker script and links the prebuilt FreeRTOS library.
//!
//! Nothing is done for host builds.

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-env-changed=FREERTOS_LIB_DIR");

    let target = env::var("TARGET").unwrap_or_default();
    if !target.starts_with("riscv32") {
        return;
    }

    // Put `memory.x` in our output directory and ensure it's
    // on the linker search path.
    let out = &PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR not set"));
    File::create(out.join("memory.x"))
        .expect("Failed to create memory.x")
        .write_all(include_bytes!("memory.x"))
        .expect("Failed to write memory.x");
    println!("cargo:rustc-link-search={}", out.display());

    // Set the linker script to the one provided by riscv-rt.
    println!("cargo:rustc-link-arg=-Tlink.x");

    // Kernel, port assembly and blinky application, built out of tree
    let lib_dir = env::var("FREERTOS_LIB_DIR").unwrap_or_else(|_| String::from("rtos/build"));
    println!("cargo:rustc-link-search=native={}", lib_dir);
    println!("cargo:rustc-link-lib=static=freertos");
}
