// src/cli.rs
//! CLI definitions for modkit
//!
//! This module contains the command-line interface definitions using clap.
//! The command implementations are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "modkit")]
#[command(version)]
#[command(about = "Select mod components and plan their installation", long_about = None)]
pub struct Cli {
    /// Settings file (default: ./modkit.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Package catalog, overrides the settings file
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Allow selecting components blocked by conflicts
    #[arg(long, global = true)]
    pub ignore_conflicts: bool,

    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the packages in the catalog
    List,

    /// Show the component tree of a package
    Show {
        /// Package id
        package: String,
    },

    /// Check that every dependency in the catalog points at a known component
    Check,

    /// Select components and print the ordered install actions
    Plan {
        /// Global component ids (package.component...)
        #[arg(required = true)]
        components: Vec<String>,

        /// Run the plan with dry-run tools
        #[arg(long)]
        execute: bool,
    },
}
