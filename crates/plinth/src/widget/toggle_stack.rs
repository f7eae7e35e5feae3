//! ToggleStack container implementation.
//!
//! This module provides [`ToggleStack`], a container that arranges child
//! views in order and shows exactly one of them, the *active* child.
//!
//! # Example
//!
//! ```
//! use plinth::widget::ToggleStack;
//! use plinth_core::SharedViewRegistry;
//!
//! let registry = SharedViewRegistry::new();
//! let summary = registry.register("Summary");
//! let details = registry.register("Details");
//!
//! let mut stack = ToggleStack::new(&registry);
//! stack.add_arranged_child(summary);
//! stack.add_arranged_child(details);
//! assert_eq!(stack.active_child(), Some(summary));
//!
//! stack.set_active(details);
//! assert_eq!(registry.is_visible(summary), Some(false));
//!
//! // Removing the active child falls back to the one active before it.
//! stack.remove_arranged_child(details);
//! assert_eq!(stack.active_child(), Some(summary));
//! ```

use plinth_core::logging::targets;
use plinth_core::{SharedViewRegistry, Signal, View, ViewId};

/// A container showing one arranged child at a time.
///
/// The first child added becomes active. Later children are added hidden.
/// When the active child is removed, the container activates the child that
/// was active before it if that one is still arranged, otherwise the first
/// remaining child. Removing the last child leaves the container with no
/// active child.
///
/// # Signals
///
/// - `active_changed(Option<ViewId>)`: Emitted when the active child changes
pub struct ToggleStack {
    id: ViewId,
    registry: SharedViewRegistry,

    /// Arranged children, in order.
    arranged: Vec<ViewId>,

    /// The visible child.
    active: Option<ViewId>,

    /// The child most recently deactivated.
    last_deactivated: Option<ViewId>,

    /// Signal emitted when the active child changes.
    pub active_changed: Signal<Option<ViewId>>,
}

impl ToggleStack {
    /// Create a new, empty toggle stack.
    pub fn new(registry: &SharedViewRegistry) -> Self {
        Self {
            id: registry.register("ToggleStack"),
            registry: registry.clone(),
            arranged: Vec::new(),
            active: None,
            last_deactivated: None,
            active_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Arrangement
    // =========================================================================

    /// Append a child.
    ///
    /// Returns `false` if the child is already arranged.
    pub fn add_arranged_child(&mut self, child: ViewId) -> bool {
        self.insert_arranged_child(self.arranged.len(), child)
    }

    /// Insert a child at `index`, clamped to the arrangement length.
    ///
    /// A child arranged in another stack moves to this one. Returns `false`
    /// if the child is already arranged, or cannot become a subview of the
    /// stack (a destroyed view, the stack itself or one of its ancestors).
    pub fn insert_arranged_child(&mut self, index: usize, child: ViewId) -> bool {
        self.prune_departed();
        if self.contains(child) {
            return false;
        }
        if let Err(err) = self.registry.set_parent(child, Some(self.id)) {
            tracing::warn!(target: targets::TOGGLE_STACK, ?child, %err, "cannot arrange child");
            return false;
        }

        let index = index.min(self.arranged.len());
        self.arranged.insert(index, child);
        tracing::trace!(target: targets::TOGGLE_STACK, ?child, index, "child arranged");

        if self.active.is_none() {
            self.activate(Some(child));
        } else {
            self.set_child_visible(child, false);
        }
        true
    }

    /// Remove a child from the arrangement.
    ///
    /// The child is detached from the stack and keeps its current visibility.
    /// Returns `false` if the child was not arranged.
    pub fn remove_arranged_child(&mut self, child: ViewId) -> bool {
        self.prune_departed();
        if !self.contains(child) {
            return false;
        }

        if let Err(err) = self.registry.set_parent(child, None) {
            tracing::warn!(target: targets::TOGGLE_STACK, ?child, %err, "cannot detach arranged child");
        }
        self.forget(&[child]);
        true
    }

    /// Remove every child.
    pub fn clear(&mut self) {
        self.prune_departed();
        for child in std::mem::take(&mut self.arranged) {
            if let Err(err) = self.registry.set_parent(child, None) {
                tracing::warn!(target: targets::TOGGLE_STACK, ?child, %err, "cannot detach arranged child");
            }
        }
        self.last_deactivated = None;
        if self.active.take().is_some() {
            self.active_changed.emit(None);
        }
    }

    /// The arranged children, in order.
    pub fn arranged_children(&self) -> &[ViewId] {
        &self.arranged
    }

    /// Get the number of arranged children.
    pub fn count(&self) -> usize {
        self.arranged.len()
    }

    /// Check if the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.arranged.is_empty()
    }

    /// Returns `true` if `child` is arranged in this stack.
    pub fn contains(&self, child: ViewId) -> bool {
        self.arranged.contains(&child)
    }

    /// Get the position of `child` in the arrangement.
    pub fn index_of(&self, child: ViewId) -> Option<usize> {
        self.arranged.iter().position(|&c| c == child)
    }

    // =========================================================================
    // Active Child
    // =========================================================================

    /// The visible child, if any.
    pub fn active_child(&self) -> Option<ViewId> {
        self.active
    }

    /// The position of the active child.
    pub fn active_index(&self) -> Option<usize> {
        self.active.and_then(|child| self.index_of(child))
    }

    /// Returns `true` if `child` is the active child.
    pub fn is_active(&self, child: ViewId) -> bool {
        self.active == Some(child)
    }

    /// The child most recently deactivated, if any.
    pub fn last_deactivated(&self) -> Option<ViewId> {
        self.last_deactivated
    }

    /// Make `child` the visible child.
    ///
    /// Returns `true` if the active child changed.
    pub fn set_active(&mut self, child: ViewId) -> bool {
        self.prune_departed();
        if !self.contains(child) || self.is_active(child) {
            return false;
        }
        self.activate(Some(child));
        true
    }

    /// Make the child at `index` the visible child.
    ///
    /// Returns `true` if the active child changed.
    pub fn set_active_index(&mut self, index: usize) -> bool {
        self.prune_departed();
        match self.arranged.get(index).copied() {
            Some(child) => self.set_active(child),
            None => false,
        }
    }

    /// Drops children that are no longer subviews of the stack, such as a
    /// child arranged in another stack since, or a destroyed one.
    fn prune_departed(&mut self) {
        let departed: Vec<ViewId> = self
            .arranged
            .iter()
            .copied()
            .filter(|&child| self.registry.parent(child) != Ok(Some(self.id)))
            .collect();
        if !departed.is_empty() {
            tracing::debug!(target: targets::TOGGLE_STACK, ?departed, "arranged children left the stack");
            self.forget(&departed);
        }
    }

    fn forget(&mut self, gone: &[ViewId]) {
        self.arranged.retain(|child| !gone.contains(child));

        if self.active.is_some_and(|active| gone.contains(&active)) {
            let fallback = self
                .last_deactivated
                .filter(|previous| self.contains(*previous))
                .or_else(|| self.arranged.first().copied());
            tracing::debug!(target: targets::TOGGLE_STACK, removed = ?self.active, ?fallback, "active child removed");
            // Only arranged children are ever recorded as deactivated.
            self.active = None;
            self.last_deactivated = None;
            self.activate(fallback);
        } else if self.last_deactivated.is_some_and(|previous| gone.contains(&previous)) {
            self.last_deactivated = None;
        }
    }

    fn activate(&mut self, child: Option<ViewId>) {
        if let Some(previous) = self.active {
            self.last_deactivated = Some(previous);
        }
        self.active = child;

        for &arranged in &self.arranged {
            self.set_child_visible(arranged, Some(arranged) == child);
        }
        tracing::trace!(target: targets::TOGGLE_STACK, active = ?child, "active child changed");
        self.active_changed.emit(child);
    }

    fn set_child_visible(&self, child: ViewId, visible: bool) {
        if let Err(err) = self.registry.set_visible(child, visible) {
            tracing::warn!(target: targets::TOGGLE_STACK, ?child, visible, %err, "child visibility not applied");
        }
    }
}

impl View for ToggleStack {
    fn view_id(&self) -> ViewId {
        self.id
    }
}

impl Drop for ToggleStack {
    fn drop(&mut self) {
        // Arranged children outlive the stack as root views.
        let _ = self.registry.unregister(self.id);
    }
}

impl std::fmt::Debug for ToggleStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToggleStack")
            .field("id", &self.id)
            .field("arranged", &self.arranged)
            .field("active", &self.active)
            .field("last_deactivated", &self.last_deactivated)
            .finish()
    }
}

static_assertions::assert_impl_all!(ToggleStack: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn setup(names: &[&'static str]) -> (SharedViewRegistry, ToggleStack, Vec<ViewId>) {
        let registry = SharedViewRegistry::new();
        let stack = ToggleStack::new(&registry);
        let views = names.iter().map(|&name| registry.register(name)).collect();
        (registry, stack, views)
    }

    fn visible_children(registry: &SharedViewRegistry, stack: &ToggleStack) -> Vec<ViewId> {
        stack
            .arranged_children()
            .iter()
            .copied()
            .filter(|&c| registry.is_visible(c) == Some(true))
            .collect()
    }

    #[test]
    fn test_first_child_becomes_active() {
        let (registry, mut stack, v) = setup(&["A", "B", "C"]);
        for &child in &v {
            assert!(stack.add_arranged_child(child));
        }
        assert_eq!(stack.active_child(), Some(v[0]));
        assert_eq!(stack.active_index(), Some(0));
        assert_eq!(visible_children(&registry, &stack), vec![v[0]]);
        assert_eq!(registry.parent(v[2]), Ok(Some(stack.view_id())));
    }

    #[test]
    fn test_duplicate_add_is_noop() {
        let (_registry, mut stack, v) = setup(&["A"]);
        assert!(stack.add_arranged_child(v[0]));
        assert!(!stack.add_arranged_child(v[0]));
        assert_eq!(stack.count(), 1);
    }

    #[test]
    fn test_insert_clamps_index() {
        let (registry, mut stack, v) = setup(&["A", "B", "C"]);
        stack.add_arranged_child(v[0]);
        stack.insert_arranged_child(0, v[1]);
        stack.insert_arranged_child(99, v[2]);
        assert_eq!(stack.arranged_children(), &[v[1], v[0], v[2]]);
        assert_eq!(stack.active_index(), Some(1));
        assert_eq!(visible_children(&registry, &stack), vec![v[0]]);
    }

    #[test]
    fn test_set_active_records_last_deactivated() {
        let (registry, mut stack, v) = setup(&["A", "B"]);
        stack.add_arranged_child(v[0]);
        stack.add_arranged_child(v[1]);

        assert!(stack.set_active(v[1]));
        assert!(!stack.set_active(v[1]));
        assert_eq!(stack.last_deactivated(), Some(v[0]));
        assert_eq!(visible_children(&registry, &stack), vec![v[1]]);
        assert!(stack.set_active_index(0));
        assert!(!stack.set_active_index(5));
        assert_eq!(stack.last_deactivated(), Some(v[1]));
    }

    #[test]
    fn test_removing_inactive_child_keeps_active() {
        let (registry, mut stack, v) = setup(&["A", "B", "C"]);
        for &child in &v {
            stack.add_arranged_child(child);
        }
        assert!(stack.remove_arranged_child(v[1]));
        assert_eq!(stack.active_child(), Some(v[0]));
        assert_eq!(registry.parent(v[1]), Ok(None));
        assert_eq!(registry.is_visible(v[1]), Some(false));
        assert!(!stack.remove_arranged_child(v[1]));
    }

    #[test]
    fn test_removed_last_deactivated_is_forgotten() {
        let (_registry, mut stack, v) = setup(&["A", "B", "C"]);
        for &child in &v {
            stack.add_arranged_child(child);
        }
        stack.set_active(v[2]);
        stack.remove_arranged_child(v[0]);
        assert_eq!(stack.last_deactivated(), None);

        stack.remove_arranged_child(v[2]);
        assert_eq!(stack.active_child(), Some(v[1]));
        assert_eq!(stack.last_deactivated(), None);
    }

    #[test]
    fn test_remove_only_child_empties() {
        let (registry, mut stack, v) = setup(&["X"]);
        stack.add_arranged_child(v[0]);
        assert!(stack.remove_arranged_child(v[0]));
        assert!(stack.is_empty());
        assert_eq!(stack.active_child(), None);
        assert_eq!(stack.active_index(), None);
        assert_eq!(registry.is_visible(v[0]), Some(true));
    }

    #[test]
    fn test_clear() {
        let (registry, mut stack, v) = setup(&["A", "B"]);
        stack.add_arranged_child(v[0]);
        stack.add_arranged_child(v[1]);
        stack.clear();
        assert!(stack.is_empty());
        assert_eq!(stack.active_child(), None);
        assert_eq!(registry.children(stack.view_id()), Ok(vec![]));
    }

    #[test]
    fn test_active_changed_signal() {
        let (_registry, mut stack, v) = setup(&["A", "B"]);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        stack.active_changed.connect(move |&active| s.lock().push(active));

        stack.add_arranged_child(v[0]);
        stack.add_arranged_child(v[1]);
        stack.set_active(v[1]);
        stack.remove_arranged_child(v[1]);
        stack.remove_arranged_child(v[0]);
        assert_eq!(
            *seen.lock(),
            vec![Some(v[0]), Some(v[1]), Some(v[0]), None]
        );
    }

    #[test]
    fn test_destroyed_child_is_tolerated() {
        let (registry, mut stack, v) = setup(&["A", "B"]);
        stack.add_arranged_child(v[0]);
        stack.add_arranged_child(v[1]);
        stack.set_active(v[1]);
        registry.destroy(v[1]).unwrap();

        assert!(!stack.set_active(v[1]));
        assert!(!stack.contains(v[1]));
        assert_eq!(stack.active_child(), Some(v[0]));
        assert_eq!(registry.is_visible(v[0]), Some(true));
        assert!(!stack.add_arranged_child(v[1]));
    }

    #[test]
    fn test_child_moved_to_another_stack() {
        let (registry, mut first, v) = setup(&["A", "B", "C"]);
        let mut second = ToggleStack::new(&registry);
        first.add_arranged_child(v[0]);
        first.add_arranged_child(v[1]);
        second.add_arranged_child(v[2]);
        second.add_arranged_child(v[0]);
        second.set_active(v[0]);

        // The old stack no longer manages A and leaves its visibility alone.
        first.set_active(v[1]);
        assert!(!first.contains(v[0]));
        assert_eq!(first.active_child(), Some(v[1]));
        assert_eq!(visible_children(&registry, &first), vec![v[1]]);
        assert_eq!(visible_children(&registry, &second), vec![v[0]]);
        assert_eq!(registry.parent(v[0]), Ok(Some(second.view_id())));

        assert!(!first.remove_arranged_child(v[0]));
        assert_eq!(registry.parent(v[0]), Ok(Some(second.view_id())));
    }

    #[test]
    fn test_stack_cannot_arrange_itself_or_ancestors() {
        let (registry, mut stack, v) = setup(&["Root"]);
        registry.set_parent(stack.view_id(), Some(v[0])).unwrap();

        assert!(!stack.add_arranged_child(stack.view_id()));
        assert!(!stack.add_arranged_child(v[0]));
        assert!(stack.is_empty());
        assert_eq!(stack.active_child(), None);
        assert_eq!(registry.is_visible(stack.view_id()), Some(true));
    }

    #[test]
    fn test_drop_releases_record() {
        let (registry, mut stack, v) = setup(&["A", "B"]);
        stack.add_arranged_child(v[0]);
        stack.add_arranged_child(v[1]);
        let id = stack.view_id();
        assert_eq!(registry.view_count(), 3);

        drop(stack);
        assert!(!registry.contains(id));
        assert_eq!(registry.view_count(), 2);
        assert_eq!(registry.parent(v[0]), Ok(None));
        assert_eq!(registry.is_visible(v[1]), Some(false));
    }
}
