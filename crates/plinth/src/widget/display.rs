//! Display: the root view a controller presents.
//!
//! A [`Display`] owns one view record and may be wired to a
//! [`NavigationItem`] that carries its title. The navigation item is owned by
//! the controller; the display only holds a weak handle to it.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use plinth_core::{Property, SharedViewRegistry, Signal, View, ViewId, ViewResult};

/// Title bar content for a presented display.
pub struct NavigationItem {
    title: Property<Option<String>>,
    /// Emitted when the title changes.
    pub title_changed: Signal<Option<String>>,
}

impl NavigationItem {
    /// Creates a navigation item with no title.
    pub fn new() -> Self {
        Self {
            title: Property::new(None),
            title_changed: Signal::new(),
        }
    }

    /// Sets the initial title using builder pattern.
    pub fn with_title(self, title: impl Into<String>) -> Self {
        self.title.set_silent(Some(title.into()));
        self
    }

    /// The current title.
    pub fn title(&self) -> Option<String> {
        self.title.get()
    }

    /// Sets the title, returning `true` if it changed.
    pub fn set_title(&self, title: Option<String>) -> bool {
        if self.title.set(title.clone()) {
            self.title_changed.emit(title);
            true
        } else {
            false
        }
    }
}

impl Default for NavigationItem {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NavigationItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationItem")
            .field("title", &self.title())
            .finish()
    }
}

/// A view that a controller presents, optionally titled through a
/// [`NavigationItem`].
pub struct Display {
    id: ViewId,
    registry: SharedViewRegistry,
    navigation_item: Mutex<Weak<NavigationItem>>,
}

impl Display {
    /// Creates a display registered under the type name `"Display"`.
    pub fn new(registry: &SharedViewRegistry) -> Self {
        Self::with_type_name(registry, "Display")
    }

    /// Creates a display registered under `type_name`.
    ///
    /// Views that embed a display use this so the tree shows their own name.
    pub fn with_type_name(registry: &SharedViewRegistry, type_name: &'static str) -> Self {
        Self {
            id: registry.register(type_name),
            registry: registry.clone(),
            navigation_item: Mutex::new(Weak::new()),
        }
    }

    /// The registry this display lives in.
    pub fn registry(&self) -> &SharedViewRegistry {
        &self.registry
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Wires the navigation item. Only a weak handle is kept.
    pub fn set_navigation_item(&self, item: &Arc<NavigationItem>) {
        *self.navigation_item.lock() = Arc::downgrade(item);
    }

    /// The wired navigation item, if it is still alive.
    pub fn navigation_item(&self) -> Option<Arc<NavigationItem>> {
        self.navigation_item.lock().upgrade()
    }

    /// The navigation title, if a navigation item is wired and titled.
    pub fn title(&self) -> Option<String> {
        self.navigation_item().and_then(|item| item.title())
    }

    /// Sets the navigation title.
    ///
    /// Returns `false` if no navigation item is wired or the title is unchanged.
    pub fn set_title(&self, title: impl Into<String>) -> bool {
        match self.navigation_item() {
            Some(item) => item.set_title(Some(title.into())),
            None => false,
        }
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Returns `true` if the display's view is visible.
    pub fn is_visible(&self) -> bool {
        self.registry.is_visible(self.id).unwrap_or(false)
    }

    /// Shows the display.
    pub fn show(&self) -> ViewResult<bool> {
        self.registry.set_visible(self.id, true)
    }

    /// Hides the display.
    pub fn hide(&self) -> ViewResult<bool> {
        self.registry.set_visible(self.id, false)
    }
}

impl View for Display {
    fn view_id(&self) -> ViewId {
        self.id
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        // Surfaces and labels shown in the display are released, not destroyed.
        let _ = self.registry.unregister(self.id);
    }
}

impl std::fmt::Debug for Display {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Display")
            .field("id", &self.id)
            .field("title", &self.title())
            .finish()
    }
}

/// Types that are, or embed, a [`Display`].
pub trait AsDisplay {
    /// The underlying display.
    fn as_display(&self) -> &Display;
}

impl AsDisplay for Display {
    fn as_display(&self) -> &Display {
        self
    }
}

static_assertions::assert_impl_all!(Display: Send, Sync);
static_assertions::assert_impl_all!(NavigationItem: Send, Sync);
