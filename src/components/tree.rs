// src/components/tree.rs

//! Component tree nodes
//!
//! A [`Component`] is a cheap, clonable handle to a node in a package's
//! component tree. Children are owned by their parent; the parent link is a
//! weak back-reference, so dropping the package root drops the whole tree.
//!
//! Trees are built bottom-up: a parent is created together with its already
//! built children and never changes shape afterwards. Every walk (ancestors,
//! full id, effective dependencies, descendants) is iterative, so deep chains
//! cannot overflow the stack.

use crate::dependencies::Dependencies;
use crate::error::{Error, Result};
use std::cell::{Cell, Ref, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{error, warn};

/// Full ids join local ids with '.', so a local id must not contain one
fn check_id(id: &str) -> Result<()> {
    if id.is_empty() || id.contains('.') {
        error!("Invalid component id '{}'", id);
        return Err(Error::InvalidId(id.to_string()));
    }
    Ok(())
}

/// Role of a node in its tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    /// Root of a tree, registered with the manager
    Package,
    /// Selectable part nested under a package or another component
    SubComponent,
}

struct Node {
    id: String,
    name: String,
    kind: ComponentKind,
    depends: Dependencies,
    children: RefCell<Vec<Component>>,
    /// child id -> index into `children`
    child_index: RefCell<HashMap<String, usize>>,
    parent: RefCell<Weak<Node>>,
    /// Number of selected components that list this node as a conflict
    conflicts: Cell<usize>,
}

impl Drop for Node {
    // Unlinks subtrees one level at a time instead of recursing through Rc drops
    fn drop(&mut self) {
        let mut pending = std::mem::take(self.children.get_mut());
        while let Some(Component(rc)) = pending.pop() {
            if let Ok(mut node) = Rc::try_unwrap(rc) {
                pending.append(node.children.get_mut());
            }
        }
    }
}

/// Handle to a node in a component tree
///
/// Equality is identity: two handles are equal when they point at the same
/// node, not when their ids match.
#[derive(Clone)]
pub struct Component(Rc<Node>);

impl Component {
    /// Create a component with its children
    ///
    /// Fails with [`Error::InvalidId`] if an id is empty or contains `.`, with
    /// [`Error::DuplicateId`] if two children share an id and with
    /// [`Error::AlreadyParented`] if a child already belongs to another
    /// component.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        depends: Dependencies,
        children: Vec<Component>,
    ) -> Result<Self> {
        Self::with_kind(id, name, ComponentKind::SubComponent, depends, children)
    }

    /// Create a childless component without dependencies
    pub fn leaf(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::detached(id.into(), name.into(), ComponentKind::SubComponent, Dependencies::new())
    }

    pub(crate) fn with_kind(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: ComponentKind,
        depends: Dependencies,
        children: Vec<Component>,
    ) -> Result<Self> {
        let id = id.into();
        check_id(&id)?;
        let component = Self::detached(id, name.into(), kind, depends);
        for child in children {
            component.attach_child(child)?;
        }
        Ok(component)
    }

    fn detached(id: String, name: String, kind: ComponentKind, depends: Dependencies) -> Self {
        Component(Rc::new(Node {
            id,
            name,
            kind,
            depends,
            children: RefCell::new(Vec::new()),
            child_index: RefCell::new(HashMap::new()),
            parent: RefCell::new(Weak::new()),
            conflicts: Cell::new(0),
        }))
    }

    /// Append `child` and make `self` its parent
    ///
    /// Only reachable from the constructors, where `self` is freshly created
    /// and therefore cannot be a descendant of `child`.
    fn attach_child(&self, child: Component) -> Result<()> {
        check_id(child.id())?;
        if self.0.child_index.borrow().contains_key(child.id()) {
            error!(
                "Non unique id encountered, component {} already exists in {}",
                child.id(),
                self.id()
            );
            return Err(Error::DuplicateId {
                parent: self.id().to_string(),
                id: child.id().to_string(),
            });
        }
        if child.kind() == ComponentKind::Package {
            return Err(Error::NestedPackage(child.id().to_string()));
        }
        if let Some(parent) = child.parent() {
            error!(
                "Non unique parent encountered, component {} already has {} as a parent before {}",
                child.id(),
                parent.id(),
                self.id()
            );
            return Err(Error::AlreadyParented {
                id: child.id().to_string(),
                parent: parent.id().to_string(),
            });
        }

        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        let mut children = self.0.children.borrow_mut();
        self.0
            .child_index
            .borrow_mut()
            .insert(child.id().to_string(), children.len());
        children.push(child);
        Ok(())
    }

    /// Local id, unique among siblings only
    pub fn id(&self) -> &str {
        &self.0.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn kind(&self) -> ComponentKind {
        self.0.kind
    }

    /// Dependencies declared on this node alone
    pub fn depends(&self) -> &Dependencies {
        &self.0.depends
    }

    pub fn parent(&self) -> Option<Component> {
        self.0.parent.borrow().upgrade().map(Component)
    }

    /// Direct children in insertion order
    pub fn children(&self) -> Ref<'_, [Component]> {
        Ref::map(self.0.children.borrow(), |children| children.as_slice())
    }

    /// Look up a direct child by local id
    pub fn resolve(&self, id: &str) -> Result<Component> {
        let index = self.0.child_index.borrow().get(id).copied();
        index
            .map(|i| self.0.children.borrow()[i].clone())
            .ok_or_else(|| Error::NoSuchComponent {
                parent: self.full_id(),
                id: id.to_string(),
            })
    }

    /// Ancestors from the outermost root down to the immediate parent
    pub fn ancestors(&self) -> Vec<Component> {
        let mut ancestors = Vec::new();
        let mut current = self.parent();
        while let Some(node) = current {
            current = node.parent();
            ancestors.push(node);
        }
        ancestors.reverse();
        ancestors
    }

    /// Number of ancestors; zero for a root
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.parent();
        while let Some(node) = current {
            depth += 1;
            current = node.parent();
        }
        depth
    }

    /// Outermost ancestor, or `self` for a root
    pub fn root(&self) -> Component {
        let mut root = self.clone();
        while let Some(parent) = root.parent() {
            root = parent;
        }
        root
    }

    /// Dot-joined ids from the root down to this node
    pub fn full_id(&self) -> String {
        let mut ids: Vec<String> = self
            .ancestors()
            .iter()
            .map(|ancestor| ancestor.id().to_string())
            .collect();
        ids.push(self.id().to_string());
        ids.join(".")
    }

    /// Local dependencies merged with those of every ancestor
    pub fn effective_dependencies(&self) -> Dependencies {
        let mut deps = self.depends().clone();
        let mut current = self.parent();
        while let Some(node) = current {
            deps = deps.union(node.depends());
            current = node.parent();
        }
        deps
    }

    /// Pre-order walk over the whole subtree, excluding `self`
    pub fn descendants(&self) -> Descendants {
        Descendants {
            stack: self.children().iter().rev().cloned().collect(),
        }
    }

    /// True when this node sits in the tree rooted at `root`
    pub fn belongs_to(&self, root: &Component) -> bool {
        self.root() == *root
    }

    /// Number of selected components currently conflicting with this one
    pub fn conflict_count(&self) -> usize {
        self.0.conflicts.get()
    }

    pub fn is_blocked(&self) -> bool {
        self.conflict_count() > 0
    }

    pub(crate) fn reset_conflicts(&self) {
        self.0.conflicts.set(0);
    }

    pub(crate) fn add_conflict(&self) {
        self.0.conflicts.set(self.0.conflicts.get() + 1);
    }

    /// Decrement the conflict counter; an unbalanced release is logged and ignored
    pub(crate) fn remove_conflict(&self) {
        match self.0.conflicts.get().checked_sub(1) {
            Some(count) => self.0.conflicts.set(count),
            None => warn!("Conflict count of {} released below zero", self.full_id()),
        }
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Component {}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("id", &self.full_id())
            .field("name", &self.name())
            .field("kind", &self.kind())
            .field("children", &self.children().len())
            .finish()
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_id())
    }
}

/// Iterator returned by [`Component::descendants`]
pub struct Descendants {
    stack: Vec<Component>,
}

impl Iterator for Descendants {
    type Item = Component;

    fn next(&mut self) -> Option<Component> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children().iter().rev().cloned());
        Some(next)
    }
}
