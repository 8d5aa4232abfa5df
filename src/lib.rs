// src/lib.rs

//! modkit - mod selection and install planning
//!
//! Packages are trees of selectable components. Each component declares what
//! it requires, conflicts with, and must be installed before or after. The
//! [`Manager`] tracks which components are selected, refuses selections that
//! clash with already selected components, and turns the selections into an
//! ordered [`InstallPlan`].
//!
//! # Architecture
//!
//! - Components: `Rc` tree with weak parent links, built once and never re-parented
//! - Dependencies: four id sets per node, inherited from every ancestor
//! - Conflicts: reference counted on the target component
//! - Installation: package kinds emit install actions, sorted depth first
//!
//! The engine is single threaded; a [`Manager`] and its packages are not `Send`.

pub mod actions;
pub mod catalog;
pub mod components;
pub mod config;
pub mod dependencies;
mod error;
pub mod manager;
pub mod mods;
pub mod selection;
pub mod tools;

pub use actions::{
    ExecutionReport, InstallAction, InstallPlan, OrderingConstraint, link_ordering,
    sort_install_actions,
};
pub use components::{Component, ComponentKind, Package, PackageKind, Unsourced};
pub use config::Settings;
pub use dependencies::Dependencies;
pub use error::{Error, Result};
pub use manager::Manager;
pub use mods::{ArchiveMod, ModMetadata};
pub use selection::Selection;
pub use tools::{ArchiveStatus, DryRunTools, FetchOutcome, InstallEnv, InstallLayout, InstallTools};
