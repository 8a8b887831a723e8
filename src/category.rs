// SPDX-FileCopyrightText: The category-tree authors
// SPDX-License-Identifier: MPL-2.0

use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

use thiserror::Error;

use crate::{CategoryChange, CategoryEvent, CategoryListener, ListenerId};

/// Category names must be non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("category name must not be empty")]
pub struct EmptyNameError;

/// A named, observable node of a category tree.
///
/// A category holds elements (opaque, caller-defined values) and child
/// categories. Both sequences preserve insertion order. Elements are
/// de-duplicated by value equality when they are added, and child names
/// are unique among the direct children of one category.
///
/// `Category` is a cheap handle to shared state: cloning it yields a
/// second handle to the *same* node, not a copy of the tree. Handle
/// identity can be checked with [`Category::ptr_eq`], while `==`
/// compares the tree structure itself.
///
/// All mutation happens through the methods of this type. Each mutation
/// that actually changes observable state fires one [`CategoryEvent`]
/// that is delivered to the listeners of this category and of every
/// category it is (transitively) attached to.
pub struct Category<T> {
    inner: Rc<CategoryInner<T>>,
}

struct CategoryInner<T> {
    name: String,
    elements: RefCell<Vec<T>>,
    children: RefCell<Vec<Category<T>>>,
    listeners: RefCell<Vec<RegisteredListener<T>>>,
    /// Forwarding link to the parent, present iff this node is attached.
    parent: RefCell<Weak<CategoryInner<T>>>,
}

impl<T> CategoryInner<T> {
    const fn new(name: String) -> Self {
        Self {
            name,
            elements: RefCell::new(Vec::new()),
            children: RefCell::new(Vec::new()),
            listeners: RefCell::new(Vec::new()),
            parent: RefCell::new(Weak::new()),
        }
    }
}

struct RegisteredListener<T> {
    id: ListenerId,
    listener: Rc<dyn CategoryListener<T>>,
}

impl<T> RegisteredListener<T> {
    fn notify(&self, event: &CategoryEvent<T>) {
        match event.change() {
            CategoryChange::ElementsAdded(_) => self.listener.elements_added(event),
            CategoryChange::ElementsRemoved(_) => self.listener.elements_removed(event),
            CategoryChange::ChildAdded(_) => self.listener.child_added(event),
            CategoryChange::ChildRemoved(_) => self.listener.child_removed(event),
        }
    }
}

impl<T> Clone for RegisteredListener<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            listener: Rc::clone(&self.listener),
        }
    }
}

impl<T> Clone for Category<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Category<T> {
    /// Create a new, empty root category.
    ///
    /// # Errors
    ///
    /// Fails if `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, EmptyNameError> {
        let name = name.into();
        if name.is_empty() {
            return Err(EmptyNameError);
        }
        Ok(Self {
            inner: Rc::new(CategoryInner::new(name)),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Check whether two handles refer to the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// A category is empty if it has neither children nor elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.children.borrow().is_empty() && self.inner.elements.borrow().is_empty()
    }

    /// Returns a snapshot of the direct children.
    ///
    /// The returned handles alias the live child nodes, but the sequence
    /// itself is detached from the tree: modifying it does not affect
    /// this category.
    #[must_use]
    pub fn children(&self) -> Vec<Self> {
        self.inner.children.borrow().clone()
    }

    /// Returns the direct child with the given name, if any.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<Self> {
        self.inner
            .children
            .borrow()
            .iter()
            .find(|child| child.name() == name)
            .cloned()
    }

    /// Returns the child with the given name, creating it if necessary.
    ///
    /// When a child with this name already exists it is returned
    /// unchanged and no event is fired. Otherwise a new, empty child is
    /// attached, and one [`CategoryChange::ChildAdded`] event fires with
    /// this category as the source.
    ///
    /// # Errors
    ///
    /// Fails if `name` is empty, before any state change.
    pub fn add_child(&self, name: impl Into<String>) -> Result<Self, EmptyNameError> {
        let name = name.into();
        if name.is_empty() {
            return Err(EmptyNameError);
        }
        if let Some(present) = self.child(&name) {
            return Ok(present);
        }
        log::debug!(
            "Adding child category {name:?} to {parent:?}",
            parent = self.inner.name
        );
        let child = Self {
            inner: Rc::new(CategoryInner::new(name)),
        };
        *child.inner.parent.borrow_mut() = Rc::downgrade(&self.inner);
        self.inner.children.borrow_mut().push(child.clone());
        debug_assert!(child
            .inner
            .parent
            .borrow()
            .upgrade()
            .is_some_and(|parent| Rc::ptr_eq(&parent, &self.inner)));
        self.emit(CategoryChange::ChildAdded(child.clone()));
        Ok(child)
    }

    /// Detach and return the child with the given name.
    ///
    /// The removed child stays fully usable as a standalone tree, but
    /// its changes no longer propagate to this category's listeners.
    /// Fires one [`CategoryChange::ChildRemoved`] event. Returns `None`
    /// without firing anything if no such child exists.
    pub fn remove_child(&self, name: &str) -> Option<Self> {
        let removed = {
            let mut children = self.inner.children.borrow_mut();
            let index = children.iter().position(|child| child.name() == name)?;
            children.remove(index)
        };
        *removed.inner.parent.borrow_mut() = Weak::new();
        log::debug!(
            "Removed child category {name:?} from {parent:?}",
            parent = self.inner.name
        );
        self.emit(CategoryChange::ChildRemoved(removed.clone()));
        Some(removed)
    }

    /// Detach all children, firing one event per removed child.
    ///
    /// The elements of this category are not touched.
    pub fn remove_all_children(&self) {
        for child in self.children() {
            self.remove_child(child.name());
        }
    }

    /// Register a listener on this category.
    ///
    /// The listener receives every event whose source is this category
    /// or any of its descendants, for as long as the descendant
    /// relationship holds at the time of the mutation.
    ///
    /// Returns the id to pass to [`Category::remove_listener`].
    pub fn add_listener(&self, listener: Rc<dyn CategoryListener<T>>) -> ListenerId {
        let id = ListenerId::new();
        self.inner
            .listeners
            .borrow_mut()
            .push(RegisteredListener { id, listener });
        id
    }

    /// Unregister a listener, returning whether it was registered here.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let listener_count = listeners.len();
        listeners.retain(|registered| registered.id != id);
        listeners.len() != listener_count
    }

    fn emit(&self, change: CategoryChange<T>) {
        let event = CategoryEvent::new(self.clone(), change);
        self.dispatch(&event);
    }

    /// Deliver the event to this node's listeners and to the listeners
    /// of every ancestor reachable through the forwarding links.
    ///
    /// The registry snapshot and the next hop are captured when the
    /// event reaches each level, so callbacks may add or remove
    /// listeners, or detach this subtree, without disturbing the
    /// in-flight notification.
    fn dispatch(&self, event: &CategoryEvent<T>) {
        let mut node = Rc::clone(&self.inner);
        loop {
            let (listeners, parent) = {
                (node.listeners.borrow().clone(), node.parent.borrow().upgrade())
            };
            for registered in &listeners {
                registered.notify(event);
            }
            let Some(parent) = parent else {
                break;
            };
            node = parent;
        }
    }
}

impl<T: Clone> Category<T> {
    /// Returns a snapshot of the elements, in insertion order.
    #[must_use]
    pub fn elements(&self) -> Vec<T> {
        self.inner.elements.borrow().clone()
    }
}

impl<T: Clone + PartialEq> Category<T> {
    /// Add the given elements to this category.
    ///
    /// Each element is appended only if it is not already present, so
    /// the stored sequence stays free of duplicates while preserving
    /// first-occurrence order. Returns whether at least one element was
    /// newly added. If so, exactly one [`CategoryChange::ElementsAdded`]
    /// event fires, carrying the de-duplicated input batch. An empty
    /// input is a no-op that fires nothing.
    pub fn add_elements(&self, elements: impl IntoIterator<Item = T>) -> bool {
        let batch = deduplicate(elements);
        let mut changed = false;
        {
            let mut present = self.inner.elements.borrow_mut();
            for element in &batch {
                if !present.contains(element) {
                    present.push(element.clone());
                    changed = true;
                }
            }
        }
        if changed {
            log::debug!(
                "Added elements to category {name:?}",
                name = self.inner.name
            );
            self.emit(CategoryChange::ElementsAdded(batch));
        }
        changed
    }

    /// Remove the given elements from this category.
    ///
    /// Returns whether at least one element was actually present and
    /// removed. If so, exactly one [`CategoryChange::ElementsRemoved`]
    /// event fires, carrying the de-duplicated input batch. An empty
    /// input is a no-op that fires nothing.
    pub fn remove_elements(&self, elements: impl IntoIterator<Item = T>) -> bool {
        let batch = deduplicate(elements);
        let mut changed = false;
        {
            let mut present = self.inner.elements.borrow_mut();
            for element in &batch {
                if let Some(index) = present.iter().position(|existing| existing == element) {
                    present.remove(index);
                    changed = true;
                }
            }
        }
        if changed {
            log::debug!(
                "Removed elements from category {name:?}",
                name = self.inner.name
            );
            self.emit(CategoryChange::ElementsRemoved(batch));
        }
        changed
    }

    /// Remove all elements, firing at most one event.
    ///
    /// The children of this category are not touched.
    pub fn remove_all_elements(&self) {
        let elements = self.elements();
        self.remove_elements(elements);
    }
}

fn deduplicate<T: PartialEq>(elements: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut batch = Vec::new();
    for element in elements {
        if !batch.contains(&element) {
            batch.push(element);
        }
    }
    batch
}

/// Structural equality: name, elements and children (recursively), all
/// order-sensitive. Attached listeners do not participate.
impl<T: PartialEq> PartialEq for Category<T> {
    fn eq(&self, other: &Self) -> bool {
        if Rc::ptr_eq(&self.inner, &other.inner) {
            return true;
        }
        self.inner.name == other.inner.name
            && *self.inner.elements.borrow() == *other.inner.elements.borrow()
            && *self.inner.children.borrow() == *other.inner.children.borrow()
    }
}

impl<T: Eq> Eq for Category<T> {}

impl<T: fmt::Debug> fmt::Debug for Category<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Category")
            .field("name", &self.inner.name)
            .field("elements", &self.inner.elements.borrow())
            .field("children", &self.inner.children.borrow())
            .finish_non_exhaustive()
    }
}

/// Displays the category name.
impl<T> fmt::Display for Category<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.name)
    }
}
