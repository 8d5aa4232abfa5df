// src/tools.rs

//! Installation primitives consumed by install actions
//!
//! Downloading, archive checking, extraction and directory merging are
//! supplied by the caller through [`InstallTools`]. Install actions only
//! invoke them and turn a non-success status into an action failure.
//!
//! [`DryRunTools`] logs every call and reports success, which is what the
//! command line uses to preview a plan.

use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::info;

/// Result of a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Transfer finished with a transport status code
    Completed { status: u16, bytes: u64 },
    /// Transport could not be established
    Failed,
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed { status, .. } if (200..300).contains(status))
    }
}

/// Result of an archive check or extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveStatus {
    Ok,
    /// The tool ran and reported a damaged archive
    Corrupt,
    /// The tool itself failed or is missing
    ToolFailed,
}

impl fmt::Display for ArchiveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Corrupt => write!(f, "archive is corrupt"),
            Self::ToolFailed => write!(f, "archive tool failed"),
        }
    }
}

/// Installation primitives
pub trait InstallTools: fmt::Debug {
    /// Download `url` to `dest`
    fn fetch(&self, url: &str, dest: &Path) -> FetchOutcome;

    /// Check the integrity of an archive
    fn verify_archive(&self, archive: &Path) -> ArchiveStatus;

    /// Extract an archive into `target`
    fn extract_archive(&self, archive: &Path, target: &Path) -> ArchiveStatus;

    /// Move the contents of `src` into `dst`, replacing existing files
    fn merge_tree(&self, src: &Path, dst: &Path) -> anyhow::Result<()>;
}

/// Tools that only log what they would do
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunTools;

impl InstallTools for DryRunTools {
    fn fetch(&self, url: &str, dest: &Path) -> FetchOutcome {
        info!("[dry run] fetch {} -> {}", url, dest.display());
        FetchOutcome::Completed {
            status: 200,
            bytes: 0,
        }
    }

    fn verify_archive(&self, archive: &Path) -> ArchiveStatus {
        info!("[dry run] verify {}", archive.display());
        ArchiveStatus::Ok
    }

    fn extract_archive(&self, archive: &Path, target: &Path) -> ArchiveStatus {
        info!("[dry run] extract {} -> {}", archive.display(), target.display());
        ArchiveStatus::Ok
    }

    fn merge_tree(&self, src: &Path, dst: &Path) -> anyhow::Result<()> {
        info!("[dry run] merge {} -> {}", src.display(), dst.display());
        Ok(())
    }
}

/// Directories used while installing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    /// Downloaded archives
    pub cache_dir: PathBuf,
    /// Extracted archives, one directory per package
    pub staging_dir: PathBuf,
    /// Directory the components are merged into
    pub target_dir: PathBuf,
}

impl Default for InstallLayout {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("cache"),
            staging_dir: PathBuf::from("staging"),
            target_dir: PathBuf::from("."),
        }
    }
}

/// Tools plus layout, shared by every package that installs from archives
#[derive(Debug, Clone)]
pub struct InstallEnv {
    pub tools: Rc<dyn InstallTools>,
    pub layout: InstallLayout,
}

impl InstallEnv {
    pub fn new(tools: Rc<dyn InstallTools>, layout: InstallLayout) -> Self {
        Self { tools, layout }
    }

    /// Dry-run tools with the default layout
    pub fn dry_run() -> Self {
        Self::new(Rc::new(DryRunTools), InstallLayout::default())
    }
}
