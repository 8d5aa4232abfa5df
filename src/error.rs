// src/error.rs

//! Error types for modkit
//!
//! Errors fall into a few families:
//! - Structural: raised while building component trees or resolving ids
//! - Selection: raised by the manager and selections; callers inspect and react
//! - Scheduling: raised by the install action sort
//! - Execution: raised while running install actions
//! - Persistence/config: catalog and settings files

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Two children with the same id under one parent
    #[error("Component '{id}' already exists in '{parent}'")]
    DuplicateId { parent: String, id: String },

    /// Component attached to a second parent
    #[error("Component '{id}' already has '{parent}' as a parent")]
    AlreadyParented { id: String, parent: String },

    /// A package root used as a child component
    #[error("Package '{0}' cannot be nested inside another component")]
    NestedPackage(String),

    /// Empty id, or one containing the full id separator
    #[error("Invalid component id '{0}': ids must be non-empty and contain no '.'")]
    InvalidId(String),

    /// Direct child lookup failed
    #[error("No component '{id}' in '{parent}'")]
    NoSuchComponent { parent: String, id: String },

    #[error("Package '{0}' is already registered")]
    DuplicatePackage(String),

    /// Component does not belong to the selection's package
    #[error("Component '{component}' does not belong to package '{package}'")]
    ForeignComponent { component: String, package: String },

    /// Requested components are blocked by conflicts of selected components
    #[error("Conflicting components: {}", .0.join(", "))]
    Conflict(Vec<String>),

    #[error("Package '{0}' is not registered")]
    UnknownPackage(String),

    /// Package handle whose conflict counters were never initialized
    #[error("Package '{0}' was not initialized by registration")]
    UninitializedPackage(String),

    /// Package has no active selection
    #[error("Package '{0}' has no active selection")]
    NotSelected(String),

    #[error("Component '{0}' is not selected")]
    ComponentNotSelected(String),

    /// Global dotted id did not resolve
    #[error("Unknown component '{0}'")]
    UnknownComponent(String),

    #[error("Cycle in install actions: '{0}' is within its own predecessors")]
    CyclicDependency(String),

    #[error("Install action '{0}' appears more than once")]
    DuplicateAction(String),

    #[error("Install action '{action}' depends on unknown action '{predecessor}'")]
    UnknownPredecessor { action: String, predecessor: String },

    /// Package kind has nothing to install from
    #[error("Package '{0}' has no installation source")]
    MissingSource(String),

    #[error("Install action '{action}' failed: {source}")]
    ActionFailed {
        action: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for modkit operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Errors raised while building or walking component trees
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::DuplicateId { .. }
                | Self::AlreadyParented { .. }
                | Self::NestedPackage(_)
                | Self::InvalidId(_)
                | Self::NoSuchComponent { .. }
        )
    }

    /// Errors a front end is expected to show to the user and recover from
    pub fn is_selection(&self) -> bool {
        matches!(
            self,
            Self::ForeignComponent { .. }
                | Self::Conflict(_)
                | Self::UnknownPackage(_)
                | Self::UninitializedPackage(_)
                | Self::NotSelected(_)
                | Self::ComponentNotSelected(_)
                | Self::UnknownComponent(_)
        )
    }
}
