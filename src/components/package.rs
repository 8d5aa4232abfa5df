// src/components/package.rs

//! Packages: component tree roots with an install behaviour
//!
//! A [`Package`] pairs the root node of a component tree with a
//! [`PackageKind`], the extension point that turns a selection of components
//! into install actions. Kinds own whatever metadata they need (version,
//! download location, ...).

use crate::actions::InstallAction;
use crate::dependencies::Dependencies;
use crate::error::{Error, Result};
use crate::mods::ModMetadata;
use std::cell::Ref;
use std::fmt;
use std::rc::Rc;

use super::tree::{Component, ComponentKind, Descendants};

/// Behaviour supplied by a concrete kind of package
pub trait PackageKind: fmt::Debug {
    /// Short name of the kind, used in listings
    fn kind_name(&self) -> &'static str;

    /// Build the install actions for `selected`, all of which belong to `package`
    ///
    /// Implementations may fail with their own errors (for example a missing
    /// remote source); the manager passes them through unchanged.
    fn generate_install_actions(
        &self,
        package: &Package,
        selected: &[Component],
    ) -> Result<Vec<InstallAction>>;

    /// Mod metadata persisted alongside the tree, if this kind has any
    fn metadata(&self) -> Option<&ModMetadata> {
        None
    }
}

/// Kind for packages that describe components but have nothing to install from
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsourced;

impl PackageKind for Unsourced {
    fn kind_name(&self) -> &'static str {
        "unsourced"
    }

    fn generate_install_actions(
        &self,
        package: &Package,
        _selected: &[Component],
    ) -> Result<Vec<InstallAction>> {
        Err(Error::MissingSource(package.id().to_string()))
    }
}

/// Root installable unit
///
/// Cloning is cheap and yields a handle to the same tree.
#[derive(Clone)]
pub struct Package {
    root: Component,
    kind: Rc<dyn PackageKind>,
}

impl Package {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        depends: Dependencies,
        components: Vec<Component>,
        kind: Rc<dyn PackageKind>,
    ) -> Result<Self> {
        let root = Component::with_kind(id, name, ComponentKind::Package, depends, components)?;
        Ok(Self { root, kind })
    }

    /// Package of the [`Unsourced`] kind
    pub fn unsourced(
        id: impl Into<String>,
        name: impl Into<String>,
        depends: Dependencies,
        components: Vec<Component>,
    ) -> Result<Self> {
        Self::new(id, name, depends, components, Rc::new(Unsourced))
    }

    pub fn id(&self) -> &str {
        self.root.id()
    }

    pub fn name(&self) -> &str {
        self.root.name()
    }

    /// Package-level dependencies, inherited by every component
    pub fn depends(&self) -> &Dependencies {
        self.root.depends()
    }

    /// The root node of the tree
    pub fn root(&self) -> &Component {
        &self.root
    }

    /// Top-level components
    pub fn components(&self) -> Ref<'_, [Component]> {
        self.root.children()
    }

    /// Every component in the tree, pre-order, root excluded
    pub fn descendants(&self) -> Descendants {
        self.root.descendants()
    }

    /// Look up a top-level component by local id
    pub fn resolve(&self, id: &str) -> Result<Component> {
        self.root.resolve(id)
    }

    /// True when `component` is the root or sits anywhere in this tree
    pub fn contains(&self, component: &Component) -> bool {
        component.belongs_to(&self.root)
    }

    pub fn kind(&self) -> &dyn PackageKind {
        self.kind.as_ref()
    }

    pub fn metadata(&self) -> Option<&ModMetadata> {
        self.kind.metadata()
    }

    /// Delegate action generation to the package kind
    pub fn generate_install_actions(&self, selected: &[Component]) -> Result<Vec<InstallAction>> {
        self.kind.generate_install_actions(self, selected)
    }

    /// Same tree instance, not just the same id
    pub fn same_instance(&self, other: &Package) -> bool {
        self.root == other.root
    }
}

impl fmt::Debug for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Package")
            .field("id", &self.id())
            .field("name", &self.name())
            .field("kind", &self.kind.kind_name())
            .field("components", &self.components().len())
            .finish()
    }
}
