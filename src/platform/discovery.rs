use anyhow::{Context, Result};
use std::path::Path;

use crate::runtime::Runtime;

use super::PLATFORMS_DIR;

/// Enumerates the platforms installed under a project's `platforms`
/// directory.
///
/// Kept behind a trait so callers can substitute their own inclusion rules
/// (or a mock) for what counts as an installed platform.
#[cfg_attr(test, mockall::automock)]
pub trait PlatformLister: Send + Sync {
    fn list_platforms(&self, project_root: &Path) -> Result<Vec<String>>;
}

/// Default lister: every subdirectory of `<project_root>/platforms` whose
/// name does not start with a dot. Plain files (including the manifest
/// itself) are skipped.
pub struct FsPlatformLister<'a, R: Runtime> {
    runtime: &'a R,
}

impl<'a, R: Runtime> FsPlatformLister<'a, R> {
    pub fn new(runtime: &'a R) -> Self {
        Self { runtime }
    }
}

impl<'a, R: Runtime> PlatformLister for FsPlatformLister<'a, R> {
    #[tracing::instrument(skip(self, project_root))]
    fn list_platforms(&self, project_root: &Path) -> Result<Vec<String>> {
        let platforms_dir = project_root.join(PLATFORMS_DIR);

        let mut platforms = Vec::new();
        for entry in self
            .runtime
            .read_dir(&platforms_dir)
            .with_context(|| format!("Failed to list platforms under {:?}", platforms_dir))?
        {
            if !self.runtime.is_dir(&entry) {
                continue;
            }
            if let Some(name) = entry.file_name().and_then(|n| n.to_str())
                && !name.starts_with('.')
            {
                platforms.push(name.to_string());
            }
        }

        // read_dir order is filesystem-dependent
        platforms.sort();
        Ok(platforms)
    }
}
