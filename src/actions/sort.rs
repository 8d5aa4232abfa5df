// src/actions/sort.rs

//! Depth-first topological sort of install actions
//!
//! Every action is visited in input order. A visit opens the action, visits
//! its predecessors, closes it and appends it to the output, so predecessors
//! always land first. Reaching an action that is still open means the
//! predecessor edges loop back on themselves.
//!
//! Visit state lives in a side table for the duration of one call; the
//! actions themselves carry no sort state. The walk uses an explicit stack.

use super::InstallAction;
use crate::error::{Error, Result};
use std::collections::HashMap;
use tracing::{debug, error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    Open,
    Closed,
}

/// Order `actions` so that each one follows all of its predecessors
///
/// Fails with [`Error::CyclicDependency`] when the predecessor edges contain a
/// cycle, [`Error::DuplicateAction`] when two actions share an id and
/// [`Error::UnknownPredecessor`] when an edge names an action not in the list.
pub fn sort_install_actions(actions: Vec<InstallAction>) -> Result<Vec<InstallAction>> {
    let predecessors = resolve_predecessors(&actions)?;
    let order = depth_first_order(&actions, &predecessors)?;

    let mut slots: Vec<Option<InstallAction>> = actions.into_iter().map(Some).collect();
    Ok(order
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect())
}

/// Map every predecessor id to the index of its action
fn resolve_predecessors(actions: &[InstallAction]) -> Result<Vec<Vec<usize>>> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(actions.len());
    for (i, action) in actions.iter().enumerate() {
        if index.insert(action.id(), i).is_some() {
            return Err(Error::DuplicateAction(action.id().to_string()));
        }
    }

    actions
        .iter()
        .map(|action| {
            action
                .predecessors()
                .iter()
                .map(|pred| {
                    index.get(pred.as_str()).copied().ok_or_else(|| Error::UnknownPredecessor {
                        action: action.id().to_string(),
                        predecessor: pred.clone(),
                    })
                })
                .collect::<Result<Vec<usize>>>()
        })
        .collect()
}

fn depth_first_order(actions: &[InstallAction], predecessors: &[Vec<usize>]) -> Result<Vec<usize>> {
    let mut state = vec![Visit::Unvisited; actions.len()];
    let mut order = Vec::with_capacity(actions.len());
    // (action, next predecessor to visit)
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for start in 0..actions.len() {
        if state[start] == Visit::Closed {
            debug!("Action {} is closed, nothing new here", actions[start].id());
            continue;
        }

        debug!("Initialising search on action {}", actions[start].id());
        state[start] = Visit::Open;
        stack.push((start, 0));

        while let Some(frame) = stack.last_mut() {
            let current = frame.0;
            match predecessors[current].get(frame.1) {
                Some(&pred) => {
                    frame.1 += 1;
                    match state[pred] {
                        Visit::Open => {
                            error!(
                                "There is a loop in the action list, the action {} is within its predecessors",
                                actions[pred].id()
                            );
                            return Err(Error::CyclicDependency(actions[pred].id().to_string()));
                        }
                        Visit::Closed => {}
                        Visit::Unvisited => {
                            debug!("Opening {}", actions[pred].id());
                            state[pred] = Visit::Open;
                            stack.push((pred, 0));
                        }
                    }
                }
                None => {
                    debug!("Closing {}", actions[current].id());
                    state[current] = Visit::Closed;
                    order.push(current);
                    stack.pop();
                }
            }
        }
    }

    Ok(order)
}
