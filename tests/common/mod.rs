// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use modkit::{ArchiveStatus, FetchOutcome, InstallEnv, InstallLayout, InstallTools};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::TempDir;

/// Catalog with three archive mods and one unsourced package.
///
/// - `bgfix`: core{textures}, tweaks; tweaks conflicts with `widescreen`
/// - `widescreen`: main, installs after `bgfix.core`
/// - `music`: main, requires `bgfix.core`
/// - `notes`: no download source
pub const CATALOG: &str = r#"{
    "bgfix": {
        "id": "bgfix",
        "name": "BG Fixpack",
        "version": "3",
        "downloadurl": "https://example.org/files/bgfix-v3.zip",
        "components": [
            {
                "id": "core",
                "name": "Core fixes",
                "subcomponents": [{"id": "textures", "name": "Texture fixes"}]
            },
            {
                "id": "tweaks",
                "name": "Tweaks",
                "dependencies": {"conflicts": ["widescreen"]}
            }
        ]
    },
    "widescreen": {
        "id": "widescreen",
        "name": "Widescreen",
        "downloadurl": "https://example.org/files/widescreen.zip",
        "dependencies": {"after": ["bgfix.core"]},
        "components": [{"id": "main", "name": "Widescreen"}]
    },
    "music": {
        "id": "music",
        "name": "Music pack",
        "downloadurl": "https://example.org/files/music.7z",
        "components": [
            {"id": "main", "name": "Music", "dependencies": {"requirements": ["bgfix.core"]}}
        ]
    },
    "notes": {
        "id": "notes",
        "name": "Notes",
        "components": [{"id": "readme", "name": "Readme"}]
    }
}"#;

/// Write [`CATALOG`] into a fresh temp dir.
///
/// Returns (TempDir, catalog path) - keep the TempDir alive to prevent cleanup.
pub fn write_catalog() -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("mods.json");
    std::fs::write(&path, CATALOG).unwrap();
    (temp_dir, path)
}

/// Install tools that record every call and can fail on demand.
#[derive(Debug, Default)]
pub struct RecordingTools {
    pub calls: RefCell<Vec<String>>,
    /// Archives (by file name) reported as corrupt
    pub corrupt: Vec<String>,
}

impl RecordingTools {
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl InstallTools for RecordingTools {
    fn fetch(&self, _url: &str, dest: &Path) -> FetchOutcome {
        self.record(format!("fetch {}", file_name(dest)));
        FetchOutcome::Completed {
            status: 200,
            bytes: 1024,
        }
    }

    fn verify_archive(&self, archive: &Path) -> ArchiveStatus {
        let name = file_name(archive);
        self.record(format!("verify {}", name));
        if self.corrupt.contains(&name) {
            ArchiveStatus::Corrupt
        } else {
            ArchiveStatus::Ok
        }
    }

    fn extract_archive(&self, archive: &Path, _target: &Path) -> ArchiveStatus {
        self.record(format!("extract {}", file_name(archive)));
        ArchiveStatus::Ok
    }

    fn merge_tree(&self, src: &Path, _dst: &Path) -> anyhow::Result<()> {
        self.record(format!("merge {}", src.display()));
        Ok(())
    }
}

/// Environment backed by `tools`, with the layout rooted at `root`.
pub fn recording_env(tools: Rc<RecordingTools>, root: &Path) -> InstallEnv {
    InstallEnv::new(
        tools,
        InstallLayout {
            cache_dir: root.join("cache"),
            staging_dir: root.join("staging"),
            target_dir: root.join("game"),
        },
    )
}
