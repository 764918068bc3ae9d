mod models;
pub use models::*;

use crate::checksum::sha1_file;
use crate::error::UpdaterError;
use chrono::{DateTime, Utc};
use semver::Version;
use std::path::{Path, PathBuf};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Read and parse the index document at `path`.
#[tracing::instrument]
pub fn load_index(path: &Path) -> Result<RepoIndex, UpdaterError> {
    tracing::debug!("Loading index from {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|source| UpdaterError::ReadIndex {
        path: path.to_path_buf(),
        source,
    })?;

    parse_index(path, &content)
}

pub fn parse_index(path: &Path, content: &str) -> Result<RepoIndex, UpdaterError> {
    let parse_error = |source| UpdaterError::ParseIndex {
        path: path.to_path_buf(),
        source,
    };

    if !has_content(content) {
        return Err(UpdaterError::EmptyIndex {
            path: path.to_path_buf(),
        });
    }

    let document: serde_yaml::Value = serde_yaml::from_str(content).map_err(parse_error)?;
    if document.is_null() {
        return Err(UpdaterError::EmptyIndex {
            path: path.to_path_buf(),
        });
    }

    serde_yaml::from_value(document).map_err(parse_error)
}

// Blank lines, comments and bare document markers carry no YAML node.
fn has_content(content: &str) -> bool {
    content.lines().map(str::trim).any(|line| {
        !line.is_empty() && !line.starts_with('#') && line != "---" && line != "..."
    })
}

pub fn render_index(index: &RepoIndex) -> Result<String, UpdaterError> {
    serde_yaml::to_string(index).map_err(UpdaterError::from)
}

/// Overwrite the index document at `path`.
#[tracing::instrument(skip(index))]
pub fn store_index(path: &Path, index: &RepoIndex) -> Result<(), UpdaterError> {
    let rendered = render_index(index)?;

    tracing::debug!("Writing {} bytes to {}", rendered.len(), path.display());
    std::fs::write(path, rendered).map_err(|source| UpdaterError::WriteIndex {
        path: path.to_path_buf(),
        source,
    })
}

pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// A new release of one plugin binary.
#[derive(Debug, Clone)]
pub struct PluginUpdate {
    pub plugin_name: String,
    pub version: String,
    pub platform: String,
    pub download_url: String,
    pub artifact: PathBuf,
    pub updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateReport {
    pub plugins_matched: usize,
    pub binaries_matched: usize,
}

impl UpdateReport {
    /// Turn a partial match into an error.
    pub fn ensure_matched(&self, update: &PluginUpdate) -> Result<(), UpdaterError> {
        if self.plugins_matched == 0 {
            return Err(UpdaterError::PluginNotFound {
                name: update.plugin_name.clone(),
            });
        }

        if self.binaries_matched == 0 {
            return Err(UpdaterError::PlatformNotFound {
                name: update.plugin_name.clone(),
                platform: update.platform.clone(),
            });
        }

        Ok(())
    }
}

impl RepoIndex {
    /// Apply `update` to every entry named `update.plugin_name`.
    ///
    /// Entries and binaries that don't match are left alone. The artifact is only read
    /// if a binary for the platform exists, and at most once.
    #[tracing::instrument(
        skip(self, update),
        fields(plugin = update.plugin_name.as_str(), platform = update.platform.as_str())
    )]
    pub fn apply(&mut self, update: &PluginUpdate) -> Result<UpdateReport, UpdaterError> {
        let mut report = UpdateReport::default();
        let mut checksum: Option<String> = None;
        let updated = format_timestamp(update.updated);

        for mut entry in self
            .entries_mut()
            .filter(|entry| entry.name() == Some(update.plugin_name.as_str()))
        {
            report.plugins_matched += 1;

            check_version_change(entry.version().as_deref(), &update.version);
            entry.set_version(&update.version);
            entry.set_updated(&updated);

            for mut binary in entry
                .binaries_mut()
                .filter(|binary| binary.platform() == Some(update.platform.as_str()))
            {
                report.binaries_matched += 1;

                let digest = match checksum.take() {
                    Some(digest) => digest,
                    None => {
                        let digest = sha1_file(&update.artifact)?;
                        tracing::debug!("{} has sha1 {}", update.artifact.display(), digest);
                        digest
                    }
                };

                binary.set_url(&update.download_url);
                binary.set_checksum(&digest);
                checksum = Some(digest);
            }
        }

        Ok(report)
    }
}

fn check_version_change(current: Option<&str>, new: &str) {
    let Ok(new_version) = Version::parse(new) else {
        tracing::warn!("Version '{}' is not a semantic version", new);
        return;
    };

    let Some(current_version) = current.and_then(|v| Version::parse(v).ok()) else {
        return;
    };

    if new_version < current_version {
        tracing::warn!(
            "Version {} is lower than the currently indexed {}",
            new_version,
            current_version
        );
    }
}
