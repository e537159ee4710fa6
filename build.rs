use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=TAGRT_ENTRY_OBJECT");

    // With the `entry` feature the host binary needs an object file that
    // defines `our_code_starts_here`.
    if env::var_os("CARGO_FEATURE_ENTRY").is_none() {
        return;
    }
    if let Some(object) = env::var_os("TAGRT_ENTRY_OBJECT") {
        println!("cargo:rerun-if-changed={}", object.to_string_lossy());
        println!("cargo:rustc-link-arg-bins={}", object.to_string_lossy());
    }
}
