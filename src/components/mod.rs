// src/components/mod.rs

//! Component model for modkit packages
//!
//! A package is a tree: the root [`Package`] holds top-level components,
//! which may nest further sub-components to any depth. Each node carries a
//! local id (unique among its siblings), a display name and its own
//! [`Dependencies`](crate::Dependencies).
//!
//! # Addressing
//!
//! | Form | Example | Scope |
//! |------|---------|-------|
//! | local id | `cid04` | among siblings |
//! | full id | `pid01.cid04.cid02` | global, starts with the package id |
//!
//! # Usage
//!
//! ```ignore
//! use modkit::{Component, Dependencies, Package};
//!
//! let textures = Component::leaf("textures", "HD textures");
//! let core = Component::new("core", "Core", Dependencies::new(), vec![textures])?;
//! let pkg = Package::unsourced("bg2fixpack", "BG2 Fixpack", Dependencies::new(), vec![core])?;
//!
//! let textures = pkg.resolve("core")?.resolve("textures")?;
//! assert_eq!(textures.full_id(), "bg2fixpack.core.textures");
//! ```

mod package;
mod tree;

pub use package::{Package, PackageKind, Unsourced};
pub use tree::{Component, ComponentKind, Descendants};

/// Split a full id into its package id and the local path below it
///
/// Returns `None` for an empty id or an id with empty segments.
pub fn split_full_id(full_id: &str) -> Option<(&str, Vec<&str>)> {
    let mut segments = full_id.split('.');
    let package = segments.next().filter(|s| !s.is_empty())?;
    let rest: Vec<&str> = segments.collect();
    if rest.iter().any(|s| s.is_empty()) {
        return None;
    }
    Some((package, rest))
}

/// True when `full_id` is `scope` itself or lies below it
pub fn is_within(full_id: &str, scope: &str) -> bool {
    full_id == scope
        || (full_id.len() > scope.len()
            && full_id.starts_with(scope)
            && full_id.as_bytes()[scope.len()] == b'.')
}
