//! Build information for `--version`.

pub mod build_info;

pub use build_info::version_line;
