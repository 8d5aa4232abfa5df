// src/catalog.rs

//! JSON catalog of packages
//!
//! A catalog maps each package id to its record:
//!
//! ```json
//! {
//!   "bgfix": {
//!     "id": "bgfix",
//!     "name": "BG Fixpack",
//!     "version": "3",
//!     "downloadurl": "https://example.org/bgfix-v3.zip",
//!     "dependencies": {"requirements": [], "conflicts": [], "before": [], "after": []},
//!     "components": [
//!       {"id": "core", "name": "Core", "dependencies": {}, "subcomponents": []}
//!     ]
//!   }
//! }
//! ```
//!
//! Records with a `downloadurl` decode to [`ArchiveMod`] packages, the rest
//! to [`Unsourced`] ones. Dependency sets are written sorted.

use crate::components::{Component, Package, PackageKind, Unsourced};
use crate::dependencies::Dependencies;
use crate::error::{Error, Result};
use crate::mods::{ArchiveMod, ModMetadata};
use crate::tools::InstallEnv;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;
use tracing::{debug, info};

/// Persisted form of a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub dependencies: Dependencies,

    #[serde(default)]
    pub components: Vec<ComponentRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Archive location; packages without one cannot be installed
    #[serde(rename = "downloadurl", default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,

    #[serde(rename = "readmeurl", default, skip_serializing_if = "Option::is_none")]
    pub readme_url: Option<String>,

    #[serde(rename = "desc", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Persisted form of a component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub dependencies: Dependencies,

    #[serde(default)]
    pub subcomponents: Vec<ComponentRecord>,
}

pub fn encode_component(component: &Component) -> ComponentRecord {
    ComponentRecord {
        id: component.id().to_string(),
        name: component.name().to_string(),
        dependencies: component.depends().clone(),
        subcomponents: component.children().iter().map(encode_component).collect(),
    }
}

pub fn encode_package(package: &Package) -> PackageRecord {
    let metadata = package.metadata();
    PackageRecord {
        id: package.id().to_string(),
        name: package.name().to_string(),
        dependencies: package.depends().clone(),
        components: package.components().iter().map(encode_component).collect(),
        version: metadata.and_then(|m| m.version.clone()),
        download_url: metadata.map(|m| m.download_url.clone()),
        readme_url: metadata.and_then(|m| m.readme_url.clone()),
        description: metadata.and_then(|m| m.description.clone()),
    }
}

pub fn decode_component(record: &ComponentRecord) -> Result<Component> {
    let children = record
        .subcomponents
        .iter()
        .map(decode_component)
        .collect::<Result<Vec<_>>>()?;
    Component::new(
        record.id.clone(),
        record.name.clone(),
        record.dependencies.clone(),
        children,
    )
}

/// Build a package from its record; `env` is used by archive mods
pub fn decode_package(record: &PackageRecord, env: &InstallEnv) -> Result<Package> {
    let components = record
        .components
        .iter()
        .map(decode_component)
        .collect::<Result<Vec<_>>>()?;

    let kind: Rc<dyn PackageKind> = match &record.download_url {
        Some(url) => Rc::new(ArchiveMod::new(
            ModMetadata {
                version: record.version.clone(),
                download_url: url.clone(),
                readme_url: record.readme_url.clone(),
                description: record.description.clone(),
            },
            env.clone(),
        )),
        None => Rc::new(Unsourced),
    };

    Package::new(
        record.id.clone(),
        record.name.clone(),
        record.dependencies.clone(),
        components,
        kind,
    )
}

/// Parse a catalog document into packages, ordered by id
pub fn from_json_str(json: &str, env: &InstallEnv) -> Result<Vec<Package>> {
    let records: BTreeMap<String, PackageRecord> = serde_json::from_str(json)?;
    let mut packages = Vec::with_capacity(records.len());
    for (key, record) in &records {
        if *key != record.id {
            return Err(Error::Catalog(format!(
                "entry '{}' holds package '{}'",
                key, record.id
            )));
        }
        packages.push(decode_package(record, env)?);
    }
    debug!("Decoded {} packages", packages.len());
    Ok(packages)
}

/// Serialize packages into a catalog document
pub fn to_json_string(packages: &[Package]) -> Result<String> {
    let mut records = BTreeMap::new();
    for package in packages {
        if records
            .insert(package.id().to_string(), encode_package(package))
            .is_some()
        {
            return Err(Error::Catalog(format!("package '{}' listed twice", package.id())));
        }
    }
    Ok(serde_json::to_string_pretty(&records)?)
}

pub fn load(path: &Path, env: &InstallEnv) -> Result<Vec<Package>> {
    let json = std::fs::read_to_string(path)?;
    let packages = from_json_str(&json, env)?;
    info!("Loaded {} packages from {}", packages.len(), path.display());
    Ok(packages)
}

pub fn save(packages: &[Package], path: &Path) -> Result<()> {
    std::fs::write(path, to_json_string(packages)?)?;
    info!("Saved {} packages to {}", packages.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "pid03": {
            "id": "pid03",
            "name": "namep03",
            "version": "1.2",
            "downloadurl": "https://example.org/pid03.zip",
            "desc": "Third package",
            "dependencies": {"requirements": ["pid01.cid01"]},
            "components": [
                {
                    "id": "cid05",
                    "name": "namec05",
                    "dependencies": {"conflicts": ["pid02", "pid01"]},
                    "subcomponents": [
                        {"id": "cid04", "name": "namec04", "subcomponents": []}
                    ]
                }
            ]
        },
        "pid01": {
            "id": "pid01",
            "name": "namep01",
            "components": [{"id": "cid01", "name": "namec01"}]
        }
    }"#;

    #[test]
    fn test_decode_catalog() {
        let packages = from_json_str(CATALOG, &InstallEnv::dry_run()).unwrap();
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].id(), "pid01");
        assert_eq!(packages[0].kind().kind_name(), "unsourced");

        let p3 = &packages[1];
        assert_eq!(p3.kind().kind_name(), "archive");
        assert_eq!(p3.metadata().unwrap().version.as_deref(), Some("1.2"));
        assert!(p3.depends().requires.contains("pid01.cid01"));

        let c4 = p3.resolve("cid05").unwrap().resolve("cid04").unwrap();
        assert_eq!(c4.full_id(), "pid03.cid05.cid04");
        assert!(c4.effective_dependencies().conflicts.contains("pid02"));
    }

    #[test]
    fn test_round_trip() {
        let env = InstallEnv::dry_run();
        let packages = from_json_str(CATALOG, &env).unwrap();
        let first: Vec<_> = packages.iter().map(encode_package).collect();

        let again = from_json_str(&to_json_string(&packages).unwrap(), &env).unwrap();
        let second: Vec<_> = again.iter().map(encode_package).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_sets_written_sorted() {
        let packages = from_json_str(CATALOG, &InstallEnv::dry_run()).unwrap();
        let json = to_json_string(&packages).unwrap();
        let conflicts = &json[json.find("\"conflicts\": [\n").unwrap()..];
        assert!(conflicts.find("\"pid01\"").unwrap() < conflicts.find("\"pid02\"").unwrap());
        assert!(json.contains("\"downloadurl\""));
        assert!(!json.contains("\"readmeurl\""));
    }

    #[test]
    fn test_key_must_match_id() {
        let json = r#"{"pid01": {"id": "pid02", "name": "n"}}"#;
        let err = from_json_str(json, &InstallEnv::dry_run()).unwrap_err();
        assert!(matches!(err, Error::Catalog(_)));
    }

    #[test]
    fn test_structural_errors_surface() {
        let json = r#"{"pid01": {"id": "pid01", "name": "n", "components": [
            {"id": "cid01", "name": "a"}, {"id": "cid01", "name": "b"}
        ]}}"#;
        let err = from_json_str(json, &InstallEnv::dry_run()).unwrap_err();
        assert!(matches!(err, Error::DuplicateId { .. }));

        assert!(matches!(
            from_json_str("{not json", &InstallEnv::dry_run()),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_dotted_component_id_rejected() {
        let json = r#"{"pid01": {"id": "pid01", "name": "n", "components": [
            {"id": "a", "name": "a", "subcomponents": [{"id": "b", "name": "b"}]},
            {"id": "a.b", "name": "ab"}
        ]}}"#;
        let err = from_json_str(json, &InstallEnv::dry_run()).unwrap_err();
        assert!(matches!(err, Error::InvalidId(ref id) if id == "a.b"));
    }

    #[test]
    fn test_save_rejects_duplicate_ids() {
        let a = Package::unsourced("pid01", "a", Dependencies::new(), vec![]).unwrap();
        let b = Package::unsourced("pid01", "b", Dependencies::new(), vec![]).unwrap();
        assert!(matches!(to_json_string(&[a, b]), Err(Error::Catalog(_))));
    }
}
