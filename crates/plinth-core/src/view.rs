//! View arena for Plinth.
//!
//! Every view a container manages is a record in a [`ViewRegistry`] and is
//! addressed by a [`ViewId`] handle. Containers never hold references to
//! views, only handles, so a destroyed view turns into a failed lookup
//! instead of a dangling pointer.
//!
//! # Key Types
//!
//! - [`View`] - Trait for types backed by a registry record
//! - [`ViewId`] - Stable, copyable handle for each view
//! - [`ViewRegistry`] - Arena owning view records and their hierarchy
//! - [`SharedViewRegistry`] - Cloneable, lockable handle to a registry
//!
//! # Example
//!
//! ```
//! use plinth_core::view::SharedViewRegistry;
//!
//! let registry = SharedViewRegistry::new();
//! let id = registry.register("Label");
//!
//! assert_eq!(registry.is_visible(id), Some(true));
//! registry.set_visible(id, false).unwrap();
//! assert_eq!(registry.is_visible(id), Some(false));
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use slotmap::{new_key_type, SlotMap};

use crate::error::{ViewError, ViewResult};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a view in a [`ViewRegistry`].
    ///
    /// `ViewId`s stay valid while the view exists. Once the view is destroyed,
    /// every lookup through the id fails instead of reaching freed data.
    pub struct ViewId;
}

/// Types backed by a record in a [`ViewRegistry`].
pub trait View {
    /// The handle of this view's registry record.
    fn view_id(&self) -> ViewId;
}

/// Internal data stored in the registry for each view.
struct ViewData {
    /// Human-readable name for debugging and lookup.
    name: String,
    /// The kind of view, for debugging.
    type_name: &'static str,
    /// Whether the view is visible (its own state, not considering ancestors).
    visible: bool,
    /// Superview (if any).
    parent: Option<ViewId>,
    /// Subviews, in insertion order.
    children: Vec<ViewId>,
}

impl ViewData {
    fn new(type_name: &'static str) -> Self {
        Self {
            name: String::new(),
            type_name,
            visible: true,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// The arena that owns all view records and their relationships.
pub struct ViewRegistry {
    views: SlotMap<ViewId, ViewData>,
}

impl ViewRegistry {
    /// Create a new empty view registry.
    pub fn new() -> Self {
        Self {
            views: SlotMap::with_key(),
        }
    }

    /// Register a new, visible, parentless view and return its ID.
    pub fn register(&mut self, type_name: &'static str) -> ViewId {
        let id = self.views.insert(ViewData::new(type_name));
        tracing::trace!(target: targets::VIEW, ?id, type_name, "registered view");
        id
    }

    /// Remove a view and all its subviews from the registry.
    pub fn destroy(&mut self, id: ViewId) -> ViewResult<()> {
        let descendants = self.collect_descendants(id)?;
        tracing::trace!(target: targets::VIEW, ?id, descendant_count = descendants.len(), "destroying view tree");

        if let Some(parent_id) = self.views.get(id).and_then(|d| d.parent) {
            if let Some(parent) = self.views.get_mut(parent_id) {
                parent.children.retain(|&child| child != id);
            }
        }

        for child in descendants {
            self.views.remove(child);
        }
        self.views.remove(id);
        Ok(())
    }

    /// Remove a single view. Its subviews are detached and become root views.
    pub fn unregister(&mut self, id: ViewId) -> ViewResult<()> {
        let data = self.views.remove(id).ok_or(ViewError::InvalidViewId)?;
        if let Some(parent) = data.parent.and_then(|parent| self.views.get_mut(parent)) {
            parent.children.retain(|&child| child != id);
        }
        for &child in &data.children {
            if let Some(child) = self.views.get_mut(child) {
                child.parent = None;
            }
        }
        tracing::trace!(target: targets::VIEW, ?id, released = data.children.len(), "unregistered view");
        Ok(())
    }

    /// Collect all descendant IDs, children before parents.
    fn collect_descendants(&self, id: ViewId) -> ViewResult<Vec<ViewId>> {
        let mut result = Vec::new();
        self.collect_descendants_into(id, &mut result)?;
        Ok(result)
    }

    fn collect_descendants_into(&self, id: ViewId, result: &mut Vec<ViewId>) -> ViewResult<()> {
        let data = self.views.get(id).ok_or(ViewError::InvalidViewId)?;
        for &child in &data.children {
            self.collect_descendants_into(child, result)?;
            result.push(child);
        }
        Ok(())
    }

    /// Check if a view exists in the registry.
    pub fn contains(&self, id: ViewId) -> bool {
        self.views.contains_key(id)
    }

    /// Get the number of live views.
    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Check whether a view is visible. `None` if the view does not exist.
    pub fn is_visible(&self, id: ViewId) -> Option<bool> {
        self.views.get(id).map(|d| d.visible)
    }

    /// Set whether a view is visible.
    ///
    /// Returns `true` if the visibility actually changed.
    pub fn set_visible(&mut self, id: ViewId, visible: bool) -> ViewResult<bool> {
        let data = self.views.get_mut(id).ok_or(ViewError::InvalidViewId)?;
        if data.visible == visible {
            return Ok(false);
        }
        data.visible = visible;
        tracing::trace!(target: targets::VIEW, ?id, visible, "visibility changed");
        Ok(true)
    }

    /// Check whether a view and all of its ancestors are visible.
    pub fn is_effectively_visible(&self, id: ViewId) -> ViewResult<bool> {
        let mut current = Some(id);
        while let Some(current_id) = current {
            let data = self.views.get(current_id).ok_or(ViewError::InvalidViewId)?;
            if !data.visible {
                return Ok(false);
            }
            current = data.parent;
        }
        Ok(true)
    }

    // =========================================================================
    // Hierarchy
    // =========================================================================

    /// Set the superview of a view. Passing `None` detaches it.
    pub fn set_parent(&mut self, id: ViewId, new_parent: Option<ViewId>) -> ViewResult<()> {
        if !self.views.contains_key(id) {
            return Err(ViewError::InvalidViewId);
        }
        if let Some(parent_id) = new_parent {
            if !self.views.contains_key(parent_id) {
                return Err(ViewError::InvalidViewId);
            }
            if self.is_ancestor_of(id, parent_id) {
                return Err(ViewError::CircularParentage);
            }
        }

        let old_parent = self.views.get(id).and_then(|d| d.parent);
        if let Some(old_parent_id) = old_parent {
            if let Some(parent) = self.views.get_mut(old_parent_id) {
                parent.children.retain(|&child| child != id);
            }
        }
        if let Some(data) = self.views.get_mut(id) {
            data.parent = new_parent;
        }
        if let Some(parent_id) = new_parent {
            if let Some(parent) = self.views.get_mut(parent_id) {
                parent.children.push(id);
            }
        }
        Ok(())
    }

    fn is_ancestor_of(&self, potential_ancestor: ViewId, id: ViewId) -> bool {
        let mut current = Some(id);
        while let Some(current_id) = current {
            if current_id == potential_ancestor {
                return true;
            }
            current = self.views.get(current_id).and_then(|d| d.parent);
        }
        false
    }

    /// Get the superview of a view.
    pub fn parent(&self, id: ViewId) -> ViewResult<Option<ViewId>> {
        self.views
            .get(id)
            .map(|d| d.parent)
            .ok_or(ViewError::InvalidViewId)
    }

    /// Get the subviews of a view.
    pub fn children(&self, id: ViewId) -> ViewResult<&[ViewId]> {
        self.views
            .get(id)
            .map(|d| d.children.as_slice())
            .ok_or(ViewError::InvalidViewId)
    }

    /// Get root views (views without a superview).
    pub fn root_views(&self) -> impl Iterator<Item = ViewId> + '_ {
        self.views
            .iter()
            .filter(|(_, d)| d.parent.is_none())
            .map(|(id, _)| id)
    }

    // =========================================================================
    // Naming
    // =========================================================================

    /// Get a view's name.
    pub fn name(&self, id: ViewId) -> ViewResult<&str> {
        self.views
            .get(id)
            .map(|d| d.name.as_str())
            .ok_or(ViewError::InvalidViewId)
    }

    /// Set a view's name.
    pub fn set_name(&mut self, id: ViewId, name: impl Into<String>) -> ViewResult<()> {
        let data = self.views.get_mut(id).ok_or(ViewError::InvalidViewId)?;
        data.name = name.into();
        Ok(())
    }

    /// Get a view's type name.
    pub fn type_name(&self, id: ViewId) -> ViewResult<&'static str> {
        self.views
            .get(id)
            .map(|d| d.type_name)
            .ok_or(ViewError::InvalidViewId)
    }
}

impl Default for ViewRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ViewRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewRegistry")
            .field("view_count", &self.views.len())
            .finish()
    }
}

/// A cloneable, thread-safe handle to a [`ViewRegistry`].
///
/// Containers keep a clone of this handle and mutate visibility through it.
/// Cloning shares the same underlying arena.
#[derive(Clone, Default)]
pub struct SharedViewRegistry {
    inner: Arc<RwLock<ViewRegistry>>,
}

impl SharedViewRegistry {
    /// Create a handle to a new, empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new view.
    pub fn register(&self, type_name: &'static str) -> ViewId {
        self.inner.write().register(type_name)
    }

    /// Destroy a view and its subviews.
    pub fn destroy(&self, id: ViewId) -> ViewResult<()> {
        self.inner.write().destroy(id)
    }

    /// Remove a single view, detaching its subviews.
    pub fn unregister(&self, id: ViewId) -> ViewResult<()> {
        self.inner.write().unregister(id)
    }

    /// Check if a view exists.
    pub fn contains(&self, id: ViewId) -> bool {
        self.inner.read().contains(id)
    }

    /// Get the number of live views.
    pub fn view_count(&self) -> usize {
        self.inner.read().view_count()
    }

    /// Check whether a view is visible.
    pub fn is_visible(&self, id: ViewId) -> Option<bool> {
        self.inner.read().is_visible(id)
    }

    /// Set whether a view is visible.
    pub fn set_visible(&self, id: ViewId, visible: bool) -> ViewResult<bool> {
        self.inner.write().set_visible(id, visible)
    }

    /// Check whether a view and all of its ancestors are visible.
    pub fn is_effectively_visible(&self, id: ViewId) -> ViewResult<bool> {
        self.inner.read().is_effectively_visible(id)
    }

    /// Set the superview of a view.
    pub fn set_parent(&self, id: ViewId, parent: Option<ViewId>) -> ViewResult<()> {
        self.inner.write().set_parent(id, parent)
    }

    /// Get the superview of a view.
    pub fn parent(&self, id: ViewId) -> ViewResult<Option<ViewId>> {
        self.inner.read().parent(id)
    }

    /// Get the subviews of a view (owned for thread safety).
    pub fn children(&self, id: ViewId) -> ViewResult<Vec<ViewId>> {
        self.inner.read().children(id).map(|c| c.to_vec())
    }

    /// Get root views.
    pub fn root_views(&self) -> Vec<ViewId> {
        self.inner.read().root_views().collect()
    }

    /// Get a view's name.
    pub fn name(&self, id: ViewId) -> ViewResult<String> {
        self.inner.read().name(id).map(str::to_owned)
    }

    /// Set a view's name.
    pub fn set_name(&self, id: ViewId, name: impl Into<String>) -> ViewResult<()> {
        self.inner.write().set_name(id, name)
    }

    /// Get a view's type name.
    pub fn type_name(&self, id: ViewId) -> ViewResult<&'static str> {
        self.inner.read().type_name(id)
    }

    /// Run a closure with read access to the underlying registry.
    pub fn read<R>(&self, f: impl FnOnce(&ViewRegistry) -> R) -> R {
        f(&self.inner.read())
    }
}

impl fmt::Debug for SharedViewRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedViewRegistry")
            .field(&*self.inner.read())
            .finish()
    }
}

static_assertions::assert_impl_all!(SharedViewRegistry: Send, Sync, Clone);
