//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `dinorun <version> (<commit> <date>)`, as printed by `--version`.
pub fn version_line() -> String {
    format!(
        "dinorun {} ({} {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_COMMIT,
        BUILD_DATE
    )
}
