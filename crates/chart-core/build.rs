// File: crates/chart-core/build.rs
// Summary: Build script; links the Windows system libraries Skia/ICU expect.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // Needed for RegOpenKeyExW, RegQueryInfoKeyW, etc.
        println!("cargo:rustc-link-lib=advapi32");
    }
}
