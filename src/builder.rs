// SPDX-FileCopyrightText: The category-tree authors
// SPDX-License-Identifier: MPL-2.0

use crate::{all_elements, merge_recursively, Category, EmptyNameError};

/// A convenience façade for assembling [`Category`] hierarchies.
///
/// The builder wraps the category under construction and creates child
/// categories on demand, so a nested tree can be written as a chain of
/// path-style calls (see the crate-level example). All mutation is
/// delegated to [`Category`]; anything the builder does is observable
/// through listeners registered on the tree being built.
#[derive(Debug)]
pub struct CategoryBuilder<T> {
    category: Category<T>,
}

impl<T> CategoryBuilder<T> {
    /// Create a builder rooted at a new category with the given name.
    ///
    /// # Errors
    ///
    /// Fails if `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, EmptyNameError> {
        Ok(Self {
            category: Category::new(name)?,
        })
    }

    /// Returns a builder for the child category with the given name,
    /// creating the child if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Fails if `name` is empty.
    pub fn child(&self, name: impl Into<String>) -> Result<Self, EmptyNameError> {
        Ok(Self {
            category: self.category.add_child(name)?,
        })
    }

    /// The category under construction.
    ///
    /// The builder stays usable afterwards; further builder calls keep
    /// mutating the returned tree.
    #[must_use]
    pub fn build(&self) -> Category<T> {
        self.category.clone()
    }
}

impl<T: Clone + PartialEq> CategoryBuilder<T> {
    /// Add one element to the category represented by this builder.
    pub fn add(&self, element: T) -> &Self {
        self.category.add_elements(std::iter::once(element));
        self
    }

    /// Add the given elements to the category represented by this builder.
    pub fn add_all(&self, elements: impl IntoIterator<Item = T>) -> &Self {
        self.category.add_elements(elements);
        self
    }

    /// Add each candidate to the child with the given name, unless it is
    /// already contained anywhere in the tree built so far.
    ///
    /// Candidates are de-duplicated among themselves and against the
    /// element set of the whole current tree. The child is only created
    /// when at least one candidate is actually left to add.
    ///
    /// # Errors
    ///
    /// Fails if `name` is empty, before any state change.
    pub fn add_if_uncategorized(
        &self,
        name: impl Into<String>,
        candidates: impl IntoIterator<Item = T>,
    ) -> Result<&Self, EmptyNameError> {
        let name = name.into();
        if name.is_empty() {
            return Err(EmptyNameError);
        }
        let categorized = all_elements(&self.category);
        let mut uncategorized = Vec::new();
        for candidate in candidates {
            if !categorized.contains(&candidate) && !uncategorized.contains(&candidate) {
                uncategorized.push(candidate);
            }
        }
        if !uncategorized.is_empty() {
            self.child(name)?.add_all(uncategorized);
        }
        Ok(self)
    }

    /// Merge another tree into the category represented by this builder.
    ///
    /// See [`merge_recursively`].
    pub fn merge_recursively(&self, other: &Category<T>) -> &Self {
        merge_recursively(&self.category, other);
        self
    }
}
