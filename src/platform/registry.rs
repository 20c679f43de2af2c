use anyhow::{Context, Result};
use futures_util::future::try_join_all;
use log::debug;
use std::path::PathBuf;

use crate::runtime::Runtime;

use super::{MANIFEST_FILE, Manifest, PLATFORMS_DIR, PlatformEntry, PlatformLister};

/// Registry of the platforms installed into one project.
///
/// The manifest file on disk is the single source of truth: every operation
/// re-reads and re-writes it, there is no in-memory cache.
pub struct PlatformRegistry<'a, R: Runtime> {
    runtime: &'a R,
    project_root: PathBuf,
}

impl<'a, R: Runtime> PlatformRegistry<'a, R> {
    pub fn new(runtime: &'a R, project_root: impl Into<PathBuf>) -> Self {
        Self {
            runtime,
            project_root: project_root.into(),
        }
    }

    /// The platforms directory for this project.
    ///
    /// Returns: `<project_root>/platforms`
    pub fn platforms_dir(&self) -> PathBuf {
        self.project_root.join(PLATFORMS_DIR)
    }

    /// The manifest path for this project.
    ///
    /// Returns: `<project_root>/platforms/platforms.json`
    pub fn manifest_path(&self) -> PathBuf {
        self.platforms_dir().join(MANIFEST_FILE)
    }

    /// The version-reporting script of an installed platform.
    ///
    /// Returns: `<project_root>/platforms/<platform>/cordova/version`
    pub fn version_script(&self, platform: &str) -> PathBuf {
        self.platforms_dir()
            .join(platform)
            .join("cordova")
            .join("version")
    }

    /// Load the manifest.
    ///
    /// Returns `Ok(None)` when the manifest file does not exist; an
    /// unreadable or malformed manifest is an error.
    pub fn load_manifest(&self) -> Result<Option<Manifest>> {
        let manifest_path = self.manifest_path();
        if !self.runtime.exists(&manifest_path) {
            return Ok(None);
        }

        let content = self
            .runtime
            .read_to_string(&manifest_path)
            .with_context(|| format!("Failed to read platform manifest {:?}", manifest_path))?;
        Manifest::parse(&content)
            .map(Some)
            .with_context(|| format!("Malformed platform manifest {:?}", manifest_path))
    }

    /// The installed platforms and their versions.
    ///
    /// Read from the manifest when it is present and well-formed, in stored
    /// key order. A missing or unreadable manifest is an expected state, not
    /// an error: the versions are then derived from the filesystem by asking
    /// `lister` for the installed platforms and running each platform's
    /// version script. In that case we cannot know which source (folder,
    /// git URL) a platform came from, only its version.
    pub async fn platform_versions<L: PlatformLister>(
        &self,
        lister: &L,
    ) -> Result<Vec<PlatformEntry>> {
        match self.load_manifest() {
            Ok(Some(manifest)) => return Ok(manifest.entries()),
            Ok(None) => debug!(
                "No platform manifest at {:?}, deriving versions from the filesystem",
                self.manifest_path()
            ),
            Err(e) => debug!(
                "Unreadable platform manifest at {:?} ({:#}), deriving versions from the filesystem",
                self.manifest_path(),
                e
            ),
        }

        self.versions_from_scripts(lister).await
    }

    /// Run every installed platform's version script concurrently and
    /// collect the results. Any failing script fails the whole batch; the
    /// remaining lookups are dropped.
    async fn versions_from_scripts<L: PlatformLister>(
        &self,
        lister: &L,
    ) -> Result<Vec<PlatformEntry>> {
        let platforms = lister.list_platforms(&self.project_root)?;

        let lookups = platforms.into_iter().map(|platform| async move {
            let script = self.version_script(&platform);
            let output = self
                .runtime
                .run_script(&script)
                .await
                .with_context(|| format!("Failed to read version of platform {}", platform))?;

            // Version scripts tend to print through their logger, which
            // appends line breaks, so strip every CR/LF from the value.
            let version: String = output.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();

            Ok::<_, anyhow::Error>(PlatformEntry { platform, version })
        });

        try_join_all(lookups).await
    }

    /// Record `platform@version` in the manifest, creating the manifest (and
    /// the platforms directory) if absent.
    ///
    /// This is a read-modify-write without locking: concurrent savers racing
    /// on the same manifest lose updates, last writer wins.
    pub fn save(&self, platform: &str, version: &str) -> Result<()> {
        let mut manifest = self.load_manifest()?.unwrap_or_default();
        manifest.set(platform, version);
        self.write_manifest(&manifest)
    }

    /// Drop a platform from the manifest.
    ///
    /// A missing manifest file and an absent key are both no-ops; in the
    /// missing-file case no file is created.
    pub fn remove(&self, platform: &str) -> Result<()> {
        let Some(mut manifest) = self.load_manifest()? else {
            return Ok(());
        };
        manifest.remove(platform);
        self.write_manifest(&manifest)
    }

    fn write_manifest(&self, manifest: &Manifest) -> Result<()> {
        let manifest_path = self.manifest_path();

        // Ensure the platforms directory exists
        if let Some(parent) = manifest_path.parent()
            && !self.runtime.exists(parent)
        {
            self.runtime.create_dir_all(parent)?;
        }

        let content = manifest.to_pretty_json()?;
        self.runtime
            .write(&manifest_path, content.as_bytes())
            .with_context(|| format!("Failed to save platform manifest to {:?}", manifest_path))
    }
}
