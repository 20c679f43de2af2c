use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value, ser::PrettyFormatter};

use super::PlatformEntry;

/// The persisted platform manifest: an ordered mapping from platform name
/// to version string.
///
/// Key order is preserved from the parsed document, and overwriting an
/// existing key keeps its position, so repeated save/load cycles are
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    entries: Map<String, Value>,
}

impl Manifest {
    /// Parse a manifest document.
    ///
    /// The document must be a JSON object whose values are all strings;
    /// anything else is rejected as malformed.
    pub fn parse(content: &str) -> Result<Self> {
        let document: Value =
            serde_json::from_str(content).context("Platform manifest is not valid JSON")?;

        let entries = match document {
            Value::Object(map) => map,
            _ => anyhow::bail!("Platform manifest must be a JSON object"),
        };

        for (platform, version) in &entries {
            if !version.is_string() {
                anyhow::bail!("Version of platform {:?} must be a string", platform);
            }
        }

        Ok(Self { entries })
    }

    /// Set or overwrite the version for a platform.
    pub fn set(&mut self, platform: &str, version: &str) {
        self.entries
            .insert(platform.to_string(), Value::String(version.to_string()));
    }

    /// Delete a platform's entry. Returns whether the key was present.
    pub fn remove(&mut self, platform: &str) -> bool {
        self.entries.remove(platform).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// All entries, in stored key order.
    pub fn entries(&self) -> Vec<PlatformEntry> {
        self.entries
            .iter()
            .map(|(platform, version)| PlatformEntry {
                platform: platform.clone(),
                version: version.as_str().unwrap_or_default().to_string(),
            })
            .collect()
    }

    /// Render the manifest as pretty-printed JSON with 4-space indentation,
    /// the format the manifest file is always written in.
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.entries
            .serialize(&mut serializer)
            .context("Failed to serialize platform manifest")?;
        String::from_utf8(buf).context("Serialized manifest is not valid UTF-8")
    }
}
