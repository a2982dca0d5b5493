//! Build metadata and release checking.

pub mod build;
pub mod release;

pub use build::BuildInfo;
pub use release::{ReleaseChecker, ReleaseError};
