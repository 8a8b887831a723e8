// SPDX-FileCopyrightText: The category-tree authors
// SPDX-License-Identifier: MPL-2.0

//! Observable, hierarchical category tree data structure.
//!
//! A [`Category`] is a named node that holds elements and child
//! categories. Listeners registered on a node observe every change in
//! the subtree below it, with the event naming the node where the
//! mutation actually happened.
//!
//! Hierarchies are conveniently assembled with a [`CategoryBuilder`]:
//!
//! ```
//! use category_tree::CategoryBuilder;
//!
//! # fn main() -> Result<(), category_tree::EmptyNameError> {
//! let builder = CategoryBuilder::new("Root")?;
//! builder.add("element for the root");
//! builder.child("First")?.add("an element for the first child");
//! builder.child("First")?.add("another element for the first child");
//! builder.child("Second")?.child("Grandchild")?.add("the last element");
//!
//! let root = builder.build();
//! assert_eq!(1, root.elements().len());
//! assert_eq!(2, root.children().len());
//! # Ok(())
//! # }
//! ```

mod builder;
pub use self::builder::CategoryBuilder;

mod category;
pub use self::category::{Category, EmptyNameError};

mod event;
pub use self::event::{CategoryChange, CategoryEvent};

mod listener;
pub use self::listener::{CategoryListener, ListenerId};

mod util;
pub use self::util::{
    all_elements, merge_recursively, remove_empty_categories, to_formatted_string,
};
