// SPDX-FileCopyrightText: The category-tree authors
// SPDX-License-Identifier: MPL-2.0

//! Free functions operating on any [`Category`] through its public
//! contract.

use std::fmt;

use termtree::Tree;

use crate::Category;

/// Collects the elements of the given category and all of its
/// descendants into one de-duplicated sequence.
///
/// Encounter order is preserved: a category's own elements come before
/// those of its children, children in insertion order.
#[must_use]
pub fn all_elements<T>(category: &Category<T>) -> Vec<T>
where
    T: Clone + PartialEq,
{
    let mut collected = Vec::new();
    collect_all_elements(category, &mut collected);
    collected
}

fn collect_all_elements<T>(category: &Category<T>, collected: &mut Vec<T>)
where
    T: Clone + PartialEq,
{
    for element in category.elements() {
        if !collected.contains(&element) {
            collected.push(element);
        }
    }
    for child in category.children() {
        collect_all_elements(&child, collected);
    }
}

/// Recursively removes all descendants of the given category that have
/// neither children nor elements.
///
/// Children are pruned before their parent is examined, so a subtree
/// that is empty all the way down collapses completely. Each removal
/// goes through [`Category::remove_child`] and fires its event. The
/// category this is called on is never removed itself.
pub fn remove_empty_categories<T>(category: &Category<T>) {
    let children = category.children();
    for child in &children {
        remove_empty_categories(child);
    }
    for child in &children {
        if child.is_empty() {
            category.remove_child(child.name());
        }
    }
}

/// Merges `source` into `target`, recursively.
///
/// The elements of `source` are added to `target`, then each child of
/// `source` is merged into the same-named child of `target`, creating
/// it when missing. `source` is not modified.
#[allow(clippy::missing_panics_doc)] // Never panics
pub fn merge_recursively<T>(target: &Category<T>, source: &Category<T>)
where
    T: Clone + PartialEq,
{
    target.add_elements(source.elements());
    for source_child in source.children() {
        let target_child = target
            .add_child(source_child.name())
            .expect("names of existing categories are never empty");
        merge_recursively(&target_child, &source_child);
    }
}

/// Creates a multi-line, tree-drawing rendering of the given category.
///
/// Elements are listed before child categories. The exact format is
/// unspecified; this is intended for diagnostics.
#[must_use]
pub fn to_formatted_string<T>(category: &Category<T>) -> String
where
    T: Clone + fmt::Display,
{
    render(category).to_string()
}

fn render<T>(category: &Category<T>) -> Tree<String>
where
    T: Clone + fmt::Display,
{
    let mut tree = Tree::new(category.name().to_owned());
    for element in category.elements() {
        tree.push(Tree::new(element.to_string()));
    }
    for child in category.children() {
        tree.push(render(&child));
    }
    tree
}
