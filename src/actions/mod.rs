// src/actions/mod.rs

//! Install actions and their ordering
//!
//! An [`InstallAction`] is one opaque step of an installation (download an
//! archive, extract it, merge a component into the game directory, ...).
//! Actions name their predecessors by id; [`sort_install_actions`] turns a
//! list of actions into an order where every action runs after all of its
//! predecessors, and [`InstallPlan`] executes that order.

mod plan;
mod sort;

pub use plan::{ExecutionReport, InstallPlan, OrderingConstraint, link_ordering};
pub use sort::sort_install_actions;

use crate::error::{Error, Result};
use std::fmt;
use tracing::info;

type Operation = Box<dyn FnOnce() -> anyhow::Result<()>>;

/// One orderable unit of installation work
pub struct InstallAction {
    id: String,
    component: Option<String>,
    predecessors: Vec<String>,
    operation: Operation,
}

impl InstallAction {
    /// Create an action with no predecessors
    pub fn new<F>(id: impl Into<String>, operation: F) -> Self
    where
        F: FnOnce() -> anyhow::Result<()> + 'static,
    {
        Self {
            id: id.into(),
            component: None,
            predecessors: Vec::new(),
            operation: Box::new(operation),
        }
    }

    /// Action that does nothing when executed
    pub fn noop(id: impl Into<String>) -> Self {
        Self::new(id, || Ok(()))
    }

    /// Run after the action with id `predecessor`
    pub fn after(mut self, predecessor: impl Into<String>) -> Self {
        self.add_predecessor(predecessor);
        self
    }

    /// Tag the action with the full id of the component it installs
    pub fn for_component(mut self, full_id: impl Into<String>) -> Self {
        self.component = Some(full_id.into());
        self
    }

    pub fn add_predecessor(&mut self, predecessor: impl Into<String>) {
        let predecessor = predecessor.into();
        if !self.predecessors.contains(&predecessor) {
            self.predecessors.push(predecessor);
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn component(&self) -> Option<&str> {
        self.component.as_deref()
    }

    /// Ids of the actions that must run first, in declaration order
    pub fn predecessors(&self) -> &[String] {
        &self.predecessors
    }

    /// Run the operation, consuming the action
    pub fn execute(self) -> Result<()> {
        info!("Running install action {}", self.id);
        let id = self.id;
        (self.operation)().map_err(|source| Error::ActionFailed { action: id, source })
    }
}

impl fmt::Debug for InstallAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstallAction")
            .field("id", &self.id)
            .field("component", &self.component)
            .field("predecessors", &self.predecessors)
            .finish_non_exhaustive()
    }
}
