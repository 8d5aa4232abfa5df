// src/mods.rs

//! Archive-distributed mods
//!
//! An [`ArchiveMod`] is a package published as a single archive. Installing
//! any of its components produces this action graph:
//!
//! ```text
//! <pkg>:download -> <pkg>:verify -> <pkg>:extract -> <pkg>.<comp>:merge (one per component)
//! ```
//!
//! The archive is expected to hold one directory per component, nested the
//! same way as the component tree (`core/textures/...` for `pkg.core.textures`).

use crate::actions::InstallAction;
use crate::components::{Component, Package, PackageKind};
use crate::error::Result;
use crate::tools::{ArchiveStatus, FetchOutcome, InstallEnv};
use std::path::PathBuf;
use tracing::{debug, info};

/// Metadata persisted for archive mods
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModMetadata {
    pub version: Option<String>,
    pub download_url: String,
    pub readme_url: Option<String>,
    pub description: Option<String>,
}

impl ModMetadata {
    pub fn new(download_url: impl Into<String>) -> Self {
        Self {
            download_url: download_url.into(),
            ..Default::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

/// Package kind for mods installed from a downloadable archive
#[derive(Debug)]
pub struct ArchiveMod {
    metadata: ModMetadata,
    env: InstallEnv,
}

impl ArchiveMod {
    pub fn new(metadata: ModMetadata, env: InstallEnv) -> Self {
        Self { metadata, env }
    }

    /// File name of the downloaded archive
    ///
    /// Taken from the last URL segment; falls back to `<id>_<version>`.
    pub fn archive_name(&self, package_id: &str) -> String {
        let from_url = self
            .metadata
            .download_url
            .split(['?', '#'])
            .next()
            .and_then(|url| url.rsplit('/').next())
            .filter(|segment| !segment.is_empty() && !segment.contains(':'));
        match from_url {
            Some(name) => name.to_string(),
            None => match &self.metadata.version {
                Some(version) => format!("{}_{}", package_id, version),
                None => package_id.to_string(),
            },
        }
    }

    /// Cache location of the archive, in a directory of its own per package
    fn archive_path(&self, package_id: &str) -> PathBuf {
        self.env
            .layout
            .cache_dir
            .join(package_id)
            .join(self.archive_name(package_id))
    }

    fn staging_path(&self, package_id: &str) -> PathBuf {
        self.env.layout.staging_dir.join(package_id)
    }
}

impl PackageKind for ArchiveMod {
    fn kind_name(&self) -> &'static str {
        "archive"
    }

    fn metadata(&self) -> Option<&ModMetadata> {
        Some(&self.metadata)
    }

    fn generate_install_actions(
        &self,
        package: &Package,
        selected: &[Component],
    ) -> Result<Vec<InstallAction>> {
        let package_id = package.id();
        let archive = self.archive_path(package_id);
        let staging = self.staging_path(package_id);
        debug!(
            "Generating actions for {} ({} components)",
            package_id,
            selected.len()
        );

        let download_id = format!("{}:download", package_id);
        let verify_id = format!("{}:verify", package_id);
        let extract_id = format!("{}:extract", package_id);
        let mut actions = Vec::with_capacity(selected.len() + 3);

        let tools = self.env.tools.clone();
        let url = self.metadata.download_url.clone();
        let dest = archive.clone();
        actions.push(InstallAction::new(download_id.clone(), move || {
            match tools.fetch(&url, &dest) {
                outcome @ FetchOutcome::Completed { status, bytes } => {
                    if !outcome.is_success() {
                        anyhow::bail!("HTTP {} from {}", status, url);
                    }
                    info!("Done downloading {} to {}, {} bytes", url, dest.display(), bytes);
                    Ok(())
                }
                FetchOutcome::Failed => anyhow::bail!("Could not download {}", url),
            }
        }));

        let tools = self.env.tools.clone();
        let target = archive.clone();
        actions.push(
            InstallAction::new(verify_id.clone(), move || {
                match tools.verify_archive(&target) {
                    ArchiveStatus::Ok => Ok(()),
                    status => anyhow::bail!("Checking {} failed: {}", target.display(), status),
                }
            })
            .after(download_id),
        );

        let tools = self.env.tools.clone();
        let into = staging.clone();
        actions.push(
            InstallAction::new(extract_id.clone(), move || {
                match tools.extract_archive(&archive, &into) {
                    ArchiveStatus::Ok => Ok(()),
                    status => anyhow::bail!("Extracting {} failed: {}", archive.display(), status),
                }
            })
            .after(verify_id),
        );

        for component in selected {
            let full_id = component.full_id();
            let source = component
                .ancestors()
                .iter()
                .skip(1)
                .chain(std::iter::once(component))
                .filter(|c| *c != package.root())
                .fold(staging.clone(), |path, c| path.join(c.id()));
            let tools = self.env.tools.clone();
            let target = self.env.layout.target_dir.clone();
            actions.push(
                InstallAction::new(format!("{}:merge", full_id), move || {
                    tools.merge_tree(&source, &target)
                })
                .after(extract_id.clone())
                .for_component(full_id),
            );
        }

        Ok(actions)
    }
}
