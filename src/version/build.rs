//! Build-time metadata exposed at runtime.
//!
//! The four fields are injected by the build pipeline through compile-time
//! environment variables (`SCAFFOLD_BUILD_VERSION`, `SCAFFOLD_BUILD_COMMIT`,
//! `SCAFFOLD_BUILD_TIME`, `SCAFFOLD_BUILD_RELEASE`); a plain development
//! build falls back to `v0.0.0` and an unset release flag.

use serde::Serialize;

const DEFAULT_VERSION: &str = "v0.0.0";

/// Snapshot of the metadata baked into the running binary.
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    /// Semantic version of the binary, `v`-prefixed tag form.
    pub version: &'static str,
    /// Commit hash the build was run against.
    pub commit: &'static str,
    /// Timestamp of the build.
    pub build_time: &'static str,
    /// Whether this binary is an official release, boolean-as-string.
    pub release: &'static str,
}

impl BuildInfo {
    /// Values injected at compile time, with development defaults.
    pub fn current() -> Self {
        Self {
            version: option_env!("SCAFFOLD_BUILD_VERSION").unwrap_or(DEFAULT_VERSION),
            commit: option_env!("SCAFFOLD_BUILD_COMMIT").unwrap_or(""),
            build_time: option_env!("SCAFFOLD_BUILD_TIME").unwrap_or(""),
            release: option_env!("SCAFFOLD_BUILD_RELEASE").unwrap_or("false"),
        }
    }

    /// Whether the binary was built as an official release. Accepts the
    /// usual truthy spellings (`true`, `t`, `1`, any case); anything else,
    /// including an unset flag, counts as a development build.
    pub fn released(&self) -> bool {
        matches!(
            self.release.trim().to_ascii_lowercase().as_str(),
            "true" | "t" | "1"
        )
    }
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self::current()
    }
}
