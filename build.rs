//! Embeds the commit hash and build date for `dinorun --version`.

use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

fn git_short_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn main() {
    // Packagers can pin both values through the environment
    let commit = env::var("DINORUN_BUILD_COMMIT")
        .ok()
        .or_else(git_short_hash)
        .unwrap_or_else(|| "unknown".to_string());
    let date = env::var("DINORUN_BUILD_DATE")
        .unwrap_or_else(|_| chrono::Utc::now().format("%Y-%m-%d").to_string());

    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR");
    let dest_path = Path::new(&out_dir).join("build_info.rs");
    fs::write(
        &dest_path,
        format!(
            "pub const BUILD_COMMIT: &str = {:?};\npub const BUILD_DATE: &str = {:?};\n",
            commit, date
        ),
    )
    .expect("write build_info.rs");

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=DINORUN_BUILD_COMMIT");
    println!("cargo:rerun-if-env-changed=DINORUN_BUILD_DATE");
}
