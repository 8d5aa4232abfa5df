// src/selection.rs

//! Components chosen for installation from one package

use crate::components::{Component, Package};
use crate::dependencies::Dependencies;
use crate::error::{Error, Result};
use tracing::debug;

/// The components a user picked from a single package, in selection order
#[derive(Debug, Clone)]
pub struct Selection {
    package: Package,
    components: Vec<Component>,
}

impl Selection {
    /// Create a selection, selecting each of `components` in turn
    pub fn new(package: Package, components: impl IntoIterator<Item = Component>) -> Result<Self> {
        let mut selection = Self {
            package,
            components: Vec::new(),
        };
        for component in components {
            selection.select_component(component)?;
        }
        Ok(selection)
    }

    pub fn package(&self) -> &Package {
        &self.package
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn contains(&self, component: &Component) -> bool {
        self.components.contains(component)
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Add a component of this selection's package
    ///
    /// Duplicates are the caller's responsibility; the manager filters them.
    pub fn select_component(&mut self, component: Component) -> Result<()> {
        if !self.package.contains(&component) {
            return Err(Error::ForeignComponent {
                component: component.full_id(),
                package: self.package.id().to_string(),
            });
        }
        debug!("Selecting {} in {}", component.full_id(), self.package.id());
        self.components.push(component);
        Ok(())
    }

    /// Remove the first occurrence of `component`
    pub fn unselect_component(&mut self, component: &Component) -> Result<()> {
        let position = self
            .components
            .iter()
            .position(|c| c == component)
            .ok_or_else(|| Error::ComponentNotSelected(component.full_id()))?;
        self.components.remove(position);
        Ok(())
    }

    /// Full ids of the selected components, in selection order
    pub fn component_ids(&self) -> Vec<String> {
        self.components.iter().map(Component::full_id).collect()
    }

    /// Union of the effective dependencies of every selected component
    pub fn aggregate_dependencies(&self) -> Dependencies {
        self.components
            .iter()
            .fold(Dependencies::new(), |acc, c| acc.union(&c.effective_dependencies()))
    }
}
