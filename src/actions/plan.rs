// src/actions/plan.rs

//! Ordered install plans
//!
//! A plan is a sorted list of install actions ready to run. Before sorting,
//! `before`/`after` relations between components are turned into extra
//! predecessor edges between the actions tagged with those components.

use super::{InstallAction, sort_install_actions};
use crate::components::is_within;
use crate::error::Result;
use tracing::{debug, error, info};

/// Actions for `first` (or anything below it) must run before actions for `then`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct OrderingConstraint {
    pub first: String,
    pub then: String,
}

impl OrderingConstraint {
    pub fn new(first: impl Into<String>, then: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            then: then.into(),
        }
    }
}

/// Add predecessor edges for each constraint; returns the number of edges added
///
/// Actions without a component tag are never linked. An action is never made
/// its own predecessor.
pub fn link_ordering(actions: &mut [InstallAction], constraints: &[OrderingConstraint]) -> usize {
    let mut added = 0;
    for constraint in constraints {
        let firsts: Vec<String> = actions
            .iter()
            .filter(|a| a.component().is_some_and(|c| is_within(c, &constraint.first)))
            .map(|a| a.id().to_string())
            .collect();
        if firsts.is_empty() {
            continue;
        }

        for action in actions.iter_mut() {
            if !action.component().is_some_and(|c| is_within(c, &constraint.then)) {
                continue;
            }
            for first in &firsts {
                if first != action.id() && !action.predecessors().contains(first) {
                    debug!("Ordering {} after {}", action.id(), first);
                    action.add_predecessor(first.clone());
                    added += 1;
                }
            }
        }
    }
    added
}

/// Outcome of a successful plan execution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    /// Ids of the executed actions, in execution order
    pub completed: Vec<String>,
}

/// Install actions in an execution-safe order
#[derive(Debug)]
pub struct InstallPlan {
    actions: Vec<InstallAction>,
}

impl InstallPlan {
    /// Sort `actions` into a plan
    pub fn new(actions: Vec<InstallAction>) -> Result<Self> {
        Ok(Self {
            actions: sort_install_actions(actions)?,
        })
    }

    /// Link `constraints`, then sort
    pub fn with_ordering(
        mut actions: Vec<InstallAction>,
        constraints: &[OrderingConstraint],
    ) -> Result<Self> {
        let added = link_ordering(&mut actions, constraints);
        debug!("Added {} ordering edges from {} constraints", added, constraints.len());
        Self::new(actions)
    }

    pub fn actions(&self) -> &[InstallAction] {
        &self.actions
    }

    pub fn action_ids(&self) -> Vec<&str> {
        self.actions.iter().map(InstallAction::id).collect()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Run every action in order, stopping at the first failure
    ///
    /// Failed actions are not retried and completed ones are not rolled back.
    pub fn execute(self) -> Result<ExecutionReport> {
        let total = self.actions.len();
        let mut report = ExecutionReport::default();
        for action in self.actions {
            let id = action.id().to_string();
            if let Err(e) = action.execute() {
                error!(
                    "Installation stopped at {} after {}/{} actions: {}",
                    id,
                    report.completed.len(),
                    total,
                    e
                );
                return Err(e);
            }
            report.completed.push(id);
        }
        info!("Executed {} install actions", total);
        Ok(report)
    }
}
