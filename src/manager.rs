// src/manager.rs

//! Package registry and selection bookkeeping
//!
//! The [`Manager`] owns the set of known packages and the active selection of
//! each package. Selecting a component increments the conflict counter of
//! every component it declares a conflict with; unselecting it decrements the
//! same counters. A component whose counter is above zero is blocked and,
//! when conflicts are enforced, cannot be selected.
//!
//! Counters are counts rather than flags because several selected components
//! may conflict with the same target; the target only becomes selectable
//! again once the last of them is unselected.

use crate::actions::{InstallAction, InstallPlan, OrderingConstraint};
use crate::components::{Component, Package, is_within, split_full_id};
use crate::error::{Error, Result};
use crate::selection::Selection;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

/// Registry of packages and their active selections
#[derive(Debug, Default)]
pub struct Manager {
    available: BTreeMap<String, Package>,
    selections: BTreeMap<String, Selection>,
}

impl Manager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a package and reset the conflict counters of its tree
    pub fn register_package(&mut self, package: Package) -> Result<()> {
        if self.available.contains_key(package.id()) {
            return Err(Error::DuplicatePackage(package.id().to_string()));
        }

        package.root().reset_conflicts();
        for component in package.descendants() {
            component.reset_conflicts();
        }

        info!(
            "Registered package {} ({})",
            package.id(),
            package.kind().kind_name()
        );
        self.available.insert(package.id().to_string(), package);
        Ok(())
    }

    pub fn available_packages(&self) -> &BTreeMap<String, Package> {
        &self.available
    }

    pub fn package(&self, id: &str) -> Option<&Package> {
        self.available.get(id)
    }

    pub fn selections(&self) -> &BTreeMap<String, Selection> {
        &self.selections
    }

    pub fn selection(&self, package_id: &str) -> Option<&Selection> {
        self.selections.get(package_id)
    }

    /// Resolve a global id (`package.component.subcomponent`)
    ///
    /// A bare package id resolves to the package root.
    pub fn component(&self, global_id: &str) -> Result<Component> {
        let unknown = || Error::UnknownComponent(global_id.to_string());
        let (package_id, path) = split_full_id(global_id).ok_or_else(unknown)?;
        let package = self.available.get(package_id).ok_or_else(unknown)?;

        let mut current = package.root().clone();
        for segment in path {
            current = current.resolve(segment).map_err(|_| unknown())?;
        }
        Ok(current)
    }

    /// Select `components` of `package`
    ///
    /// Either every requested component is selected or nothing changes.
    /// Components already in the selection are skipped.
    pub fn select(
        &mut self,
        package: &Package,
        components: &[Component],
        enforce_conflicts: bool,
    ) -> Result<()> {
        let pending = self.prepare(package, components)?;
        if enforce_conflicts {
            check_blocked([(package, components)])?;
        }
        self.apply(package, pending)
    }

    /// Unselect `components` of `package`
    ///
    /// Components that are not selected are ignored. The selection is dropped
    /// once it becomes empty.
    pub fn unselect(&mut self, package: &Package, components: &[Component]) -> Result<()> {
        if !self.available.contains_key(package.id()) {
            return Err(Error::UnknownPackage(package.id().to_string()));
        }
        let selection = self
            .selections
            .get(package.id())
            .ok_or_else(|| Error::NotSelected(package.id().to_string()))?;

        let mut removed: Vec<Component> = Vec::new();
        for component in components {
            if selection.contains(component) && !removed.contains(component) {
                removed.push(component.clone());
            } else if !selection.contains(component) {
                debug!("{} is not selected, skipping", component.full_id());
            }
        }

        let targets = removed
            .iter()
            .map(|component| self.conflict_targets(component))
            .collect::<Result<Vec<_>>>()?;

        let Some(selection) = self.selections.get_mut(package.id()) else {
            return Err(Error::NotSelected(package.id().to_string()));
        };
        for component in &removed {
            selection.unselect_component(component)?;
        }
        if selection.is_empty() {
            debug!("Selection of {} is empty, dropping it", package.id());
            self.selections.remove(package.id());
        }

        for (component, targets) in removed.iter().zip(targets) {
            for target in targets {
                target.remove_conflict();
                debug!(
                    "{} releases {} (count {})",
                    component.full_id(),
                    target.full_id(),
                    target.conflict_count()
                );
            }
        }
        info!("Unselected {} components in {}", removed.len(), package.id());
        Ok(())
    }

    /// Select components by global id, grouped by package
    ///
    /// Every group is checked and every conflict target resolved before
    /// anything is selected. Conflicts are checked against the counters as
    /// they were before the call, so two requested components that conflict
    /// with each other are both selected regardless of their order.
    pub fn select_by_id<S: AsRef<str>>(&mut self, ids: &[S], enforce_conflicts: bool) -> Result<()> {
        let groups = self.group_by_package(ids)?;
        let pending = groups
            .iter()
            .map(|(package, components)| self.prepare(package, components))
            .collect::<Result<Vec<_>>>()?;
        if enforce_conflicts {
            check_blocked(groups.iter().map(|(p, c)| (p, c.as_slice())))?;
        }

        for ((package, _), pending) in groups.iter().zip(pending) {
            self.apply(package, pending)?;
        }
        Ok(())
    }

    /// Unselect components by global id, grouped by package
    pub fn unselect_by_id<S: AsRef<str>>(&mut self, ids: &[S]) -> Result<()> {
        for (package, components) in self.group_by_package(ids)? {
            self.unselect(&package, &components)?;
        }
        Ok(())
    }

    /// Install actions of every active selection, concatenated
    pub fn generate_install_actions(&self) -> Result<Vec<InstallAction>> {
        let mut actions = Vec::new();
        for selection in self.selections.values() {
            let generated = selection
                .package()
                .generate_install_actions(selection.components())?;
            debug!(
                "Package {} contributed {} actions",
                selection.package().id(),
                generated.len()
            );
            actions.extend(generated);
        }
        Ok(actions)
    }

    /// Ordering constraints from the `before`/`after` relations of selected components
    pub fn ordering_constraints(&self) -> Vec<OrderingConstraint> {
        let mut constraints = BTreeSet::new();
        for component in self.selected_components() {
            let full_id = component.full_id();
            let deps = component.effective_dependencies();
            for target in deps.after.iter().filter(|t| **t != full_id) {
                constraints.insert(OrderingConstraint::new(target.clone(), full_id.clone()));
            }
            for target in deps.before.iter().filter(|t| **t != full_id) {
                constraints.insert(OrderingConstraint::new(full_id.clone(), target.clone()));
            }
        }
        constraints.into_iter().collect()
    }

    /// Generate, link and sort the install actions of every selection
    pub fn plan(&self) -> Result<InstallPlan> {
        let actions = self.generate_install_actions()?;
        let constraints = self.ordering_constraints();
        InstallPlan::with_ordering(actions, &constraints)
    }

    /// Requirements of selected components that nothing selected satisfies
    ///
    /// A requirement is met by a selected component with that id, by one
    /// below it, or by one of its ancestors. Pairs are
    /// `(selected full id, requirement)`.
    pub fn unmet_requirements(&self) -> Vec<(String, String)> {
        let selected: Vec<String> = self.selected_components().map(Component::full_id).collect();
        let mut unmet = Vec::new();
        for component in self.selected_components() {
            for requirement in component.effective_dependencies().requires {
                let met = selected
                    .iter()
                    .any(|s| is_within(s, &requirement) || is_within(&requirement, s));
                if !met {
                    unmet.push((component.full_id(), requirement));
                }
            }
        }
        unmet
    }

    /// Dependency ids declared anywhere in the registry that do not resolve
    ///
    /// Pairs are `(declaring full id, referenced id)`.
    pub fn unresolved_references(&self) -> Vec<(String, String)> {
        let mut unresolved = Vec::new();
        for package in self.available.values() {
            for node in std::iter::once(package.root().clone()).chain(package.descendants()) {
                for id in node.depends().referenced_ids() {
                    if self.component(id).is_err() {
                        unresolved.push((node.full_id(), id.to_string()));
                    }
                }
            }
        }
        unresolved
    }

    fn selected_components(&self) -> impl Iterator<Item = &Component> {
        self.selections.values().flat_map(|s| s.components().iter())
    }

    fn check_registered(&self, package: &Package) -> Result<()> {
        let registered = self
            .available
            .get(package.id())
            .ok_or_else(|| Error::UnknownPackage(package.id().to_string()))?;
        if !registered.same_instance(package) {
            return Err(Error::UninitializedPackage(package.id().to_string()));
        }
        Ok(())
    }

    /// Validate a request against `package` without changing anything
    ///
    /// Returns the components not yet selected, each paired with its
    /// resolved conflict targets.
    fn prepare(&self, package: &Package, components: &[Component]) -> Result<Vec<(Component, Vec<Component>)>> {
        self.check_registered(package)?;

        for component in components {
            if !package.contains(component) {
                return Err(Error::ForeignComponent {
                    component: component.full_id(),
                    package: package.id().to_string(),
                });
            }
        }

        let existing = self.selections.get(package.id());
        let mut pending: Vec<(Component, Vec<Component>)> = Vec::new();
        for component in components {
            if existing.is_some_and(|s| s.contains(component))
                || pending.iter().any(|(c, _)| c == component)
            {
                debug!("{} is already selected", component.full_id());
                continue;
            }
            let targets = self.conflict_targets(component)?;
            pending.push((component.clone(), targets));
        }
        Ok(pending)
    }

    /// Add prepared components to the selection and count their conflicts
    fn apply(&mut self, package: &Package, pending: Vec<(Component, Vec<Component>)>) -> Result<()> {
        if pending.is_empty() {
            return Ok(());
        }

        match self.selections.get_mut(package.id()) {
            Some(selection) => {
                for (component, _) in &pending {
                    selection.select_component(component.clone())?;
                }
            }
            None => {
                let selection = Selection::new(package.clone(), pending.iter().map(|(c, _)| c.clone()))?;
                self.selections.insert(package.id().to_string(), selection);
            }
        }

        for (component, targets) in &pending {
            for target in targets {
                target.add_conflict();
                debug!(
                    "{} blocks {} (count {})",
                    component.full_id(),
                    target.full_id(),
                    target.conflict_count()
                );
            }
        }
        info!("Selected {} components in {}", pending.len(), package.id());
        Ok(())
    }

    /// Components named as conflicts by `component` or its ancestors
    fn conflict_targets(&self, component: &Component) -> Result<Vec<Component>> {
        component
            .effective_dependencies()
            .conflicts
            .iter()
            .map(|id| self.component(id))
            .collect()
    }

    fn group_by_package<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<(Package, Vec<Component>)>> {
        let mut groups: Vec<(Package, Vec<Component>)> = Vec::new();
        for id in ids {
            let component = self.component(id.as_ref())?;
            let root = component.root();
            match groups.iter_mut().find(|(p, _)| *p.root() == root) {
                Some((_, components)) => components.push(component),
                None => {
                    let package = self
                        .available
                        .get(root.id())
                        .cloned()
                        .ok_or_else(|| Error::UnknownPackage(root.id().to_string()))?;
                    groups.push((package, vec![component]));
                }
            }
        }
        Ok(groups)
    }
}

/// Full ids of the requested components that are blocked, package first
fn blocked_components(package: &Package, components: &[Component]) -> Vec<String> {
    let mut blocked = Vec::new();
    if package.root().is_blocked() {
        blocked.push(package.id().to_string());
    }
    for component in components {
        if component.is_blocked() {
            let full_id = component.full_id();
            if !blocked.contains(&full_id) {
                blocked.push(full_id);
            }
        }
    }
    blocked
}

fn check_blocked<'a>(groups: impl IntoIterator<Item = (&'a Package, &'a [Component])>) -> Result<()> {
    let blocked: Vec<String> = groups
        .into_iter()
        .flat_map(|(package, components)| blocked_components(package, components))
        .collect();
    if blocked.is_empty() {
        return Ok(());
    }
    warn!("Cannot select: blocked by conflicts {:?}", blocked);
    Err(Error::Conflict(blocked))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dependencies;
    use crate::mods::{ArchiveMod, ModMetadata};
    use crate::tools::InstallEnv;
    use std::rc::Rc;

    struct Fixture {
        manager: Manager,
        p1: Package,
        p2: Package,
        p3: Package,
        p4: Package,
    }

    /// pid01{cid01}, pid02{cid02}, pid03{cid05 !pid02 {cid04 {cid03 -> pid01.cid01}}},
    /// pid04{a !pid04.b, b, c}
    fn fixture() -> Fixture {
        let p1 = Package::unsourced(
            "pid01",
            "namep01",
            Dependencies::new(),
            vec![Component::leaf("cid01", "namec01")],
        )
        .unwrap();
        let p2 = Package::unsourced(
            "pid02",
            "namep02",
            Dependencies::new(),
            vec![Component::leaf("cid02", "namec02")],
        )
        .unwrap();
        let c3 = Component::new(
            "cid03",
            "namec03",
            Dependencies::new().with_requires(["pid01.cid01"]),
            vec![],
        )
        .unwrap();
        let c4 = Component::new("cid04", "namec04", Dependencies::new(), vec![c3]).unwrap();
        let c5 = Component::new(
            "cid05",
            "namec05",
            Dependencies::new().with_conflicts(["pid02"]),
            vec![c4],
        )
        .unwrap();
        let p3 = Package::unsourced("pid03", "namep03", Dependencies::new(), vec![c5]).unwrap();
        let a = Component::new(
            "a",
            "A",
            Dependencies::new().with_conflicts(["pid04.b"]),
            vec![],
        )
        .unwrap();
        let p4 = Package::unsourced(
            "pid04",
            "namep04",
            Dependencies::new(),
            vec![a, Component::leaf("b", "B"), Component::leaf("c", "C")],
        )
        .unwrap();

        let mut manager = Manager::new();
        for p in [&p1, &p2, &p3, &p4] {
            manager.register_package(p.clone()).unwrap();
        }
        Fixture { manager, p1, p2, p3, p4 }
    }

    fn c(manager: &Manager, id: &str) -> Component {
        manager.component(id).unwrap()
    }

    #[test]
    fn test_register_duplicate() {
        let mut f = fixture();
        let err = f.manager.register_package(f.p1.clone()).unwrap_err();
        assert!(matches!(err, Error::DuplicatePackage(ref id) if id == "pid01"));
        assert_eq!(f.manager.available_packages().len(), 4);
    }

    #[test]
    fn test_registration_resets_counters() {
        let f = fixture();
        f.p2.root().add_conflict();
        let mut other = Manager::new();
        other.register_package(f.p2.clone()).unwrap();
        assert_eq!(f.p2.root().conflict_count(), 0);
    }

    #[test]
    fn test_getcomp() {
        let f = fixture();
        assert_eq!(c(&f.manager, "pid03.cid05.cid04").full_id(), "pid03.cid05.cid04");
        assert_eq!(c(&f.manager, "pid01"), *f.p1.root());

        for bad in ["", "pid09", "pid03.cid04", "pid03..cid05", "pid03.cid05.nope"] {
            let err = f.manager.component(bad).unwrap_err();
            assert!(matches!(err, Error::UnknownComponent(ref id) if id == bad));
        }
    }

    #[test]
    fn test_select_unknown_and_uninitialized() {
        let mut f = fixture();
        let stray = Package::unsourced("pid09", "n", Dependencies::new(), vec![]).unwrap();
        assert!(matches!(
            f.manager.select(&stray, &[], true),
            Err(Error::UnknownPackage(_))
        ));

        let twin = Package::unsourced(
            "pid01",
            "namep01",
            Dependencies::new(),
            vec![Component::leaf("cid01", "namec01")],
        )
        .unwrap();
        let comp = twin.resolve("cid01").unwrap();
        assert!(matches!(
            f.manager.select(&twin, &[comp], true),
            Err(Error::UninitializedPackage(_))
        ));
    }

    #[test]
    fn test_select_foreign_component() {
        let mut f = fixture();
        let foreign = c(&f.manager, "pid03.cid05");
        let err = f.manager.select(&f.p1, &[foreign], true).unwrap_err();
        assert!(matches!(err, Error::ForeignComponent { .. }));
        assert!(f.manager.selections().is_empty());
    }

    #[test]
    fn test_conflict_blocks_package() {
        let mut f = fixture();
        let c5 = c(&f.manager, "pid03.cid05");
        let c2 = c(&f.manager, "pid02.cid02");
        f.manager.select(&f.p3, &[c5], true).unwrap();
        assert_eq!(f.p2.root().conflict_count(), 1);

        let err = f.manager.select(&f.p2, &[c2.clone()], true).unwrap_err();
        assert!(matches!(err, Error::Conflict(ref ids) if ids == &vec!["pid02".to_string()]));
        assert!(f.manager.selection("pid02").is_none());

        // not enforced
        f.manager.select(&f.p2, &[c2], false).unwrap();
        assert_eq!(f.manager.selection("pid02").unwrap().len(), 1);
    }

    #[test]
    fn test_unselect_restores_count() {
        let mut f = fixture();
        let before = f.p2.root().conflict_count();
        let c5 = c(&f.manager, "pid03.cid05");
        f.manager.select(&f.p3, &[c5.clone()], true).unwrap();
        f.manager.unselect(&f.p3, &[c5]).unwrap();
        assert_eq!(f.p2.root().conflict_count(), before);
        assert!(f.manager.selection("pid03").is_none());
    }

    #[test]
    fn test_two_selectors_keep_target_blocked() {
        let mut f = fixture();
        let c5 = c(&f.manager, "pid03.cid05");
        // cid04 inherits the conflict of cid05
        let c4 = c(&f.manager, "pid03.cid05.cid04");
        f.manager.select(&f.p3, &[c5.clone(), c4.clone()], true).unwrap();
        assert_eq!(f.p2.root().conflict_count(), 2);

        f.manager.unselect(&f.p3, &[c5]).unwrap();
        assert!(f.p2.root().is_blocked());
        f.manager.unselect(&f.p3, &[c4]).unwrap();
        assert!(!f.p2.root().is_blocked());
    }

    #[test]
    fn test_select_is_all_or_nothing() {
        let mut f = fixture();
        let a = c(&f.manager, "pid04.a");
        let b = c(&f.manager, "pid04.b");
        let cc = c(&f.manager, "pid04.c");
        f.manager.select(&f.p4, &[a], true).unwrap();

        let err = f.manager.select(&f.p4, &[cc.clone(), b], true).unwrap_err();
        assert!(matches!(err, Error::Conflict(ref ids) if ids == &vec!["pid04.b".to_string()]));
        assert!(!f.manager.selection("pid04").unwrap().contains(&cc));
    }

    #[test]
    fn test_reselect_does_not_double_count() {
        let mut f = fixture();
        let c5 = c(&f.manager, "pid03.cid05");
        f.manager.select(&f.p3, &[c5.clone(), c5.clone()], true).unwrap();
        f.manager.select(&f.p3, &[c5], true).unwrap();
        assert_eq!(f.p2.root().conflict_count(), 1);
        assert_eq!(f.manager.selection("pid03").unwrap().len(), 1);
    }

    #[test]
    fn test_unselect_errors() {
        let mut f = fixture();
        let c1 = c(&f.manager, "pid01.cid01");
        assert!(matches!(
            f.manager.unselect(&f.p1, &[c1]),
            Err(Error::NotSelected(_))
        ));
        let stray = Package::unsourced("pid09", "n", Dependencies::new(), vec![]).unwrap();
        assert!(matches!(
            f.manager.unselect(&stray, &[]),
            Err(Error::UnknownPackage(_))
        ));
    }

    #[test]
    fn test_unknown_conflict_target_changes_nothing() {
        let mut manager = Manager::new();
        let bad = Component::new(
            "bad",
            "Bad",
            Dependencies::new().with_conflicts(["ghost.x"]),
            vec![],
        )
        .unwrap();
        let pkg = Package::unsourced("pkg", "Pkg", Dependencies::new(), vec![bad.clone()]).unwrap();
        manager.register_package(pkg.clone()).unwrap();

        let err = manager.select(&pkg, &[bad], true).unwrap_err();
        assert!(matches!(err, Error::UnknownComponent(ref id) if id == "ghost.x"));
        assert!(manager.selections().is_empty());
    }

    #[test]
    fn test_select_by_id() {
        let mut f = fixture();
        f.manager
            .select_by_id(&["pid01.cid01", "pid03.cid05.cid04"], true)
            .unwrap();
        assert_eq!(f.manager.selections().len(), 2);
        assert!(f.p2.root().is_blocked());

        let err = f.manager.select_by_id(&["pid04.c", "pid02.cid02"], true).unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
        assert!(f.manager.selection("pid04").is_none());

        f.manager.unselect_by_id(&["pid03.cid05.cid04"]).unwrap();
        assert!(!f.p2.root().is_blocked());
    }

    #[test]
    fn test_select_by_id_conflict_inside_request_ignores_order() {
        for ids in [["pid03.cid05", "pid02.cid02"], ["pid02.cid02", "pid03.cid05"]] {
            let mut f = fixture();
            f.manager.select_by_id(&ids, true).unwrap();
            assert_eq!(f.manager.selections().len(), 2, "{ids:?}");
            assert_eq!(f.p2.root().conflict_count(), 1, "{ids:?}");

            // the counter now blocks later requests
            f.manager.unselect_by_id(&["pid02.cid02"]).unwrap();
            assert!(matches!(
                f.manager.select_by_id(&["pid02.cid02"], true),
                Err(Error::Conflict(_))
            ));
        }
    }

    #[test]
    fn test_select_by_id_unknown_target_in_later_group() {
        let mut f = fixture();
        let bad = Component::new(
            "bad",
            "Bad",
            Dependencies::new().with_conflicts(["ghost.x"]),
            vec![],
        )
        .unwrap();
        let pkg = Package::unsourced("pkg", "Pkg", Dependencies::new(), vec![bad]).unwrap();
        f.manager.register_package(pkg).unwrap();

        let err = f
            .manager
            .select_by_id(&["pid03.cid05", "pkg.bad"], true)
            .unwrap_err();
        assert!(matches!(err, Error::UnknownComponent(ref id) if id == "ghost.x"));
        assert!(f.manager.selections().is_empty());
        assert_eq!(f.p2.root().conflict_count(), 0);
    }

    #[test]
    fn test_unmet_requirements() {
        let mut f = fixture();
        f.manager.select_by_id(&["pid03.cid05.cid04.cid03"], true).unwrap();
        assert_eq!(
            f.manager.unmet_requirements(),
            vec![("pid03.cid05.cid04.cid03".to_string(), "pid01.cid01".to_string())]
        );

        // selecting the whole package satisfies it
        f.manager.select_by_id(&["pid01"], true).unwrap();
        assert!(f.manager.unmet_requirements().is_empty());
    }

    #[test]
    fn test_unresolved_references() {
        let mut f = fixture();
        assert!(f.manager.unresolved_references().is_empty());

        let lost = Package::unsourced(
            "lost",
            "Lost",
            Dependencies::new().with_before(["nowhere.x"]),
            vec![],
        )
        .unwrap();
        f.manager.register_package(lost).unwrap();
        assert_eq!(
            f.manager.unresolved_references(),
            vec![("lost".to_string(), "nowhere.x".to_string())]
        );
    }

    #[test]
    fn test_unsourced_packages_have_no_actions() {
        let mut f = fixture();
        f.manager.select_by_id(&["pid01.cid01"], true).unwrap();
        assert!(matches!(
            f.manager.generate_install_actions(),
            Err(Error::MissingSource(_))
        ));
    }

    #[test]
    fn test_plan_respects_after() {
        let archive = |url: &str| Rc::new(ArchiveMod::new(ModMetadata::new(url), InstallEnv::dry_run()));
        let base = Package::new(
            "base",
            "Base",
            Dependencies::new(),
            vec![Component::leaf("core", "Core")],
            archive("https://example.org/base.zip"),
        )
        .unwrap();
        let addon = Package::new(
            "addon",
            "Addon",
            Dependencies::new().with_after(["base.core"]),
            vec![Component::leaf("core", "Core")],
            archive("https://example.org/addon.zip"),
        )
        .unwrap();

        let mut manager = Manager::new();
        // "addon" sorts first, so its actions are generated first
        manager.register_package(addon).unwrap();
        manager.register_package(base).unwrap();
        manager.select_by_id(&["addon.core", "base.core"], true).unwrap();

        assert_eq!(
            manager.ordering_constraints(),
            vec![OrderingConstraint::new("base.core", "addon.core")]
        );
        let plan = manager.plan().unwrap();
        let ids = plan.action_ids();
        assert_eq!(ids.len(), 8);
        let pos = |id: &str| ids.iter().position(|a| *a == id).unwrap();
        assert!(pos("base.core:merge") < pos("addon.core:merge"));
        assert!(pos("addon:extract") < pos("addon.core:merge"));
    }
}
