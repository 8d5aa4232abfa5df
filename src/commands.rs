// src/commands.rs
//! Command handlers for the modkit CLI

use anyhow::{Context, Result};
use modkit::{Component, InstallEnv, Manager, Settings, catalog};
use std::rc::Rc;
use tracing::info;

/// Load the catalog and register every package
fn open_manager(settings: &Settings) -> Result<Manager> {
    let env = InstallEnv::new(Rc::new(modkit::DryRunTools), settings.layout());
    let packages = catalog::load(&settings.catalog, &env)
        .with_context(|| format!("Failed to load catalog {}", settings.catalog.display()))?;

    let mut manager = Manager::new();
    for package in packages {
        manager.register_package(package)?;
    }
    Ok(manager)
}

/// List all packages
pub fn cmd_list(settings: &Settings) -> Result<()> {
    let manager = open_manager(settings)?;
    let packages = manager.available_packages();

    if packages.is_empty() {
        println!("No packages in {}.", settings.catalog.display());
        return Ok(());
    }

    println!("Packages ({}):", packages.len());
    for package in packages.values() {
        print!("  {} - {}", package.id(), package.name());
        if let Some(version) = package.metadata().and_then(|m| m.version.as_deref()) {
            print!(" [{}]", version);
        }
        println!(" ({} components)", package.descendants().count());
    }
    Ok(())
}

/// Show one package as a tree
pub fn cmd_show(settings: &Settings, package_id: &str) -> Result<()> {
    let manager = open_manager(settings)?;
    let package = manager
        .package(package_id)
        .ok_or_else(|| anyhow::anyhow!("Package '{}' is not in the catalog", package_id))?;

    println!("{} - {} ({})", package.id(), package.name(), package.kind().kind_name());
    if let Some(meta) = package.metadata() {
        println!("  source: {}", meta.download_url);
        if let Some(desc) = &meta.description {
            println!("  {}", desc);
        }
    }
    print_dependencies(package.root(), 1);
    for component in package.descendants() {
        let indent = component.depth();
        println!("{}{} - {}", "  ".repeat(indent), component.id(), component.name());
        print_dependencies(&component, indent + 1);
    }
    Ok(())
}

fn print_dependencies(component: &Component, indent: usize) {
    let deps = component.depends();
    let pad = "  ".repeat(indent);
    for (label, ids) in [
        ("requires", &deps.requires),
        ("conflicts", &deps.conflicts),
        ("before", &deps.before),
        ("after", &deps.after),
    ] {
        if !ids.is_empty() {
            let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
            println!("{}{}: {}", pad, label, ids.join(", "));
        }
    }
}

/// Verify that all dependency ids resolve
pub fn cmd_check(settings: &Settings) -> Result<()> {
    let manager = open_manager(settings)?;
    let unresolved = manager.unresolved_references();

    if unresolved.is_empty() {
        println!(
            "All dependencies of {} packages resolve.",
            manager.available_packages().len()
        );
        return Ok(());
    }

    for (owner, id) in &unresolved {
        println!("  {} -> {} (unknown)", owner, id);
    }
    anyhow::bail!("{} unresolved dependencies", unresolved.len())
}

/// Select components and print (or run) the install plan
pub fn cmd_plan(settings: &Settings, components: &[String], execute: bool) -> Result<()> {
    let mut manager = open_manager(settings)?;
    manager.select_by_id(components, settings.enforce_conflicts)?;

    for (component, requirement) in manager.unmet_requirements() {
        println!("warning: {} requires {}, which is not selected", component, requirement);
    }

    let plan = manager.plan()?;
    println!("Install plan ({} actions):", plan.len());
    for (i, action) in plan.actions().iter().enumerate() {
        println!("  {:>3}. {}", i + 1, action.id());
    }

    if execute {
        info!("Executing install plan");
        let report = plan.execute()?;
        println!("Completed {} actions.", report.completed.len());
    }
    Ok(())
}
