//! Platform-version bookkeeping for a project.
//!
//! This module maintains the manifest recording which native platforms are
//! installed into a project and at which version, and can derive the same
//! information from the filesystem when the manifest is missing.

mod discovery;
mod manifest;
mod registry;

pub use discovery::{FsPlatformLister, PlatformLister};
pub use manifest::Manifest;
pub use registry::PlatformRegistry;

#[cfg(test)]
pub use discovery::MockPlatformLister;

/// Directory under the project root holding installed platforms.
pub(crate) const PLATFORMS_DIR: &str = "platforms";

/// Manifest file name inside the platforms directory.
pub(crate) const MANIFEST_FILE: &str = "platforms.json";

/// An installed platform and its version descriptor.
///
/// The version is opaque pass-through data: a semantic version like
/// `"3.4.0"`, a local filesystem path, or a source-control URL. No format
/// validation is performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformEntry {
    pub platform: String,
    pub version: String,
}
