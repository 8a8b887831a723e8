// SPDX-FileCopyrightText: The category-tree authors
// SPDX-License-Identifier: MPL-2.0

use std::{
    num::NonZeroUsize,
    sync::atomic::{AtomicUsize, Ordering},
};

use crate::CategoryEvent;

/// The callbacks invoked when an observed [`Category`] changes.
///
/// Each method corresponds to one [`CategoryChange`] shape and defaults
/// to doing nothing, so implementations only override what they need.
/// A listener registered on a category receives the events of the whole
/// subtree below it; [`CategoryEvent::source`] names the node that was
/// actually mutated.
///
/// Callbacks are expected not to panic. A panicking callback unwinds
/// through the notification and aborts the remaining deliveries for
/// that event.
///
/// [`Category`]: crate::Category
/// [`CategoryChange`]: crate::CategoryChange
pub trait CategoryListener<T> {
    fn elements_added(&self, _event: &CategoryEvent<T>) {}

    fn elements_removed(&self, _event: &CategoryEvent<T>) {}

    fn child_added(&self, _event: &CategoryEvent<T>) {}

    fn child_removed(&self, _event: &CategoryEvent<T>) {}
}

const ZERO_LISTENER_ID_VALUE: usize = 0;

static LAST_LISTENER_ID_VALUE: AtomicUsize = AtomicUsize::new(ZERO_LISTENER_ID_VALUE);

/// Handle of one listener registration.
///
/// Returned by [`Category::add_listener`] and consumed by
/// [`Category::remove_listener`]. Unique across all registrations
/// within a single process; ids are ephemeral and must not be stored
/// permanently.
///
/// [`Category::add_listener`]: crate::Category::add_listener
/// [`Category::remove_listener`]: crate::Category::remove_listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub struct ListenerId(NonZeroUsize);

impl ListenerId {
    pub(crate) fn new() -> Self {
        loop {
            // No memory ordering guarantees are needed, only uniqueness
            // of the next value.
            let last_value = LAST_LISTENER_ID_VALUE.fetch_add(1, Ordering::Relaxed);
            // fetch_add() performs a wrapping add, so we need to do the same
            let next_value = last_value.wrapping_add(1);
            if let Some(next_value) = NonZeroUsize::new(next_value) {
                return Self(next_value);
            }
            // Looping happens only on overflow and at most once per call.
        }
    }
}
