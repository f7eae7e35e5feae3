//! Dual-surface switch container.
//!
//! [`DualSurfaceDisplay`] holds up to two list surfaces, one grid and one
//! row list, and keeps exactly one attached surface visible at a time. The
//! visible one is the *foreground* surface. Hosts flip it explicitly with
//! [`toggle_foreground_view`](DualSurfaceDisplay::toggle_foreground_view) or
//! report size class changes and let the [`ForegroundPolicy`] pick.
//!
//! # Example
//!
//! ```
//! use plinth::list::Surface;
//! use plinth::widget::{DualSurfaceDisplay, ForegroundMode, SizeClass};
//! use plinth_core::{SharedViewRegistry, View};
//!
//! let registry = SharedViewRegistry::new();
//! let grid = Surface::grid(&registry);
//! let rows = Surface::rows(&registry);
//!
//! let mut display = DualSurfaceDisplay::builder(&registry)
//!     .grid(grid.view_id())
//!     .row(rows.view_id())
//!     .initial_size_class(SizeClass::Compact)
//!     .build()
//!     .unwrap();
//! assert_eq!(display.foreground_mode(), ForegroundMode::Row);
//!
//! display.size_class_changed(SizeClass::Regular);
//! assert_eq!(display.visible_surface(), Some(grid.view_id()));
//! assert_eq!(registry.is_visible(rows.view_id()), Some(false));
//! ```

use std::fmt;

use plinth_core::logging::targets;
use plinth_core::{SharedViewRegistry, Signal, View, ViewError, ViewId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::display::{AsDisplay, Display};
use crate::config::{DEFAULT_BREAKPOINT, PresenterConfig};
use crate::list::SurfaceKind;

// ============================================================================
// Modes and Policy
// ============================================================================

/// Which surface is in the foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForegroundMode {
    /// The grid surface is visible.
    #[default]
    Grid,
    /// The row surface is visible.
    Row,
}

impl ForegroundMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Grid => Self::Row,
            Self::Row => Self::Grid,
        }
    }

    /// The kind of surface this mode puts in the foreground.
    pub fn surface_kind(self) -> SurfaceKind {
        match self {
            Self::Grid => SurfaceKind::Grid,
            Self::Row => SurfaceKind::Row,
        }
    }
}

impl From<SurfaceKind> for ForegroundMode {
    fn from(kind: SurfaceKind) -> Self {
        match kind {
            SurfaceKind::Grid => Self::Grid,
            SurfaceKind::Row => Self::Row,
        }
    }
}

impl fmt::Display for ForegroundMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.surface_kind(), f)
    }
}

/// Horizontal size class reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    /// Narrow layouts, such as a phone in portrait.
    Compact,
    /// Wide layouts.
    Regular,
}

impl SizeClass {
    /// Classifies `width`: anything narrower than `breakpoint` is compact.
    pub fn for_width(width: f32, breakpoint: f32) -> Self {
        if width < breakpoint {
            Self::Compact
        } else {
            Self::Regular
        }
    }
}

/// Maps size classes to foreground modes.
///
/// The default shows rows in compact layouts and the grid in regular ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForegroundPolicy {
    /// Mode for [`SizeClass::Compact`].
    pub compact: ForegroundMode,
    /// Mode for [`SizeClass::Regular`].
    pub regular: ForegroundMode,
}

impl Default for ForegroundPolicy {
    fn default() -> Self {
        Self {
            compact: ForegroundMode::Row,
            regular: ForegroundMode::Grid,
        }
    }
}

impl ForegroundPolicy {
    /// The mode to use for `class`.
    pub fn mode_for(&self, class: SizeClass) -> ForegroundMode {
        match class {
            SizeClass::Compact => self.compact,
            SizeClass::Regular => self.regular,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors produced while assembling a [`DualSurfaceDisplay`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SwitchError {
    /// A surface of this kind was attached more than once.
    #[error("{0} surface attached more than once")]
    DuplicateSurface(SurfaceKind),

    /// The same view was attached as both the grid and the row surface.
    #[error("the grid and row surfaces must be different views")]
    SameView,

    /// The breakpoint is not a finite, positive width.
    #[error("breakpoint must be a finite positive width, got {0}")]
    InvalidBreakpoint(f32),

    /// A surface view could not be attached.
    #[error(transparent)]
    View(#[from] ViewError),
}

// ============================================================================
// Builder
// ============================================================================

/// Assembles a [`DualSurfaceDisplay`].
///
/// Each surface may be attached at most once. Attachment is fixed once the
/// display is built.
#[derive(Debug)]
pub struct DualSurfaceBuilder {
    registry: SharedViewRegistry,
    grid: Option<ViewId>,
    row: Option<ViewId>,
    duplicate: Option<SurfaceKind>,
    policy: ForegroundPolicy,
    size_class: Option<SizeClass>,
    initial_mode: Option<ForegroundMode>,
    breakpoint: f32,
}

impl DualSurfaceBuilder {
    fn new(registry: &SharedViewRegistry) -> Self {
        Self {
            registry: registry.clone(),
            grid: None,
            row: None,
            duplicate: None,
            policy: ForegroundPolicy::default(),
            size_class: None,
            initial_mode: None,
            breakpoint: DEFAULT_BREAKPOINT,
        }
    }

    /// Attaches the grid surface.
    pub fn grid(mut self, surface: ViewId) -> Self {
        if self.grid.replace(surface).is_some() {
            self.duplicate = self.duplicate.or(Some(SurfaceKind::Grid));
        }
        self
    }

    /// Attaches the row surface.
    pub fn row(mut self, surface: ViewId) -> Self {
        if self.row.replace(surface).is_some() {
            self.duplicate = self.duplicate.or(Some(SurfaceKind::Row));
        }
        self
    }

    /// Sets the size class to foreground mode mapping.
    pub fn policy(mut self, policy: ForegroundPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the size class the display starts in.
    pub fn initial_size_class(mut self, class: SizeClass) -> Self {
        self.size_class = Some(class);
        self
    }

    /// Sets the starting mode, overriding the policy.
    ///
    /// Ignored when only one surface is attached.
    pub fn initial_mode(mut self, mode: ForegroundMode) -> Self {
        self.initial_mode = Some(mode);
        self
    }

    /// Sets the width below which [`DualSurfaceDisplay::resized`] reports a
    /// compact size class.
    pub fn breakpoint(mut self, breakpoint: f32) -> Self {
        self.breakpoint = breakpoint;
        self
    }

    /// Applies a loaded configuration.
    pub fn config(mut self, config: &PresenterConfig) -> Self {
        self.breakpoint = config.breakpoint;
        self.policy = config.policy;
        if let Some(mode) = config.initial_mode {
            self.initial_mode = Some(mode);
        }
        self
    }

    /// Builds the display, parenting the surfaces to it and showing the
    /// foreground surface.
    pub fn build(self) -> Result<DualSurfaceDisplay, SwitchError> {
        if let Some(kind) = self.duplicate {
            return Err(SwitchError::DuplicateSurface(kind));
        }
        if self.grid.is_some() && self.grid == self.row {
            return Err(SwitchError::SameView);
        }
        if !(self.breakpoint.is_finite() && self.breakpoint > 0.0) {
            return Err(SwitchError::InvalidBreakpoint(self.breakpoint));
        }
        for surface in self.grid.iter().chain(self.row.iter()) {
            if !self.registry.contains(*surface) {
                return Err(ViewError::InvalidViewId.into());
            }
        }

        let mode = match (self.grid, self.row) {
            (Some(_), None) => ForegroundMode::Grid,
            (None, Some(_)) => ForegroundMode::Row,
            _ => self
                .initial_mode
                .or_else(|| self.size_class.map(|class| self.policy.mode_for(class)))
                .unwrap_or_default(),
        };

        let display = Display::with_type_name(&self.registry, "DualSurfaceDisplay");
        for surface in self.grid.iter().chain(self.row.iter()) {
            self.registry.set_parent(*surface, Some(display.view_id()))?;
        }

        let switch = DualSurfaceDisplay {
            display,
            grid: self.grid,
            row: self.row,
            mode,
            size_class: self.size_class,
            policy: self.policy,
            breakpoint: self.breakpoint,
            foreground_changed: Signal::new(),
        };
        switch.apply_visibility();
        tracing::debug!(
            target: targets::SWITCH,
            %mode,
            grid = switch.grid.is_some(),
            row = switch.row.is_some(),
            "dual surface display built"
        );
        Ok(switch)
    }
}

// ============================================================================
// DualSurfaceDisplay
// ============================================================================

/// A display presenting one of two list surfaces at a time.
///
/// With both surfaces attached, exactly one is visible. With one attached,
/// that one is always visible and the mode is pinned to it.
///
/// # Signals
///
/// - `foreground_changed(ForegroundMode)`: emitted after the foreground
///   surface changes
pub struct DualSurfaceDisplay {
    display: Display,
    grid: Option<ViewId>,
    row: Option<ViewId>,
    mode: ForegroundMode,
    size_class: Option<SizeClass>,
    policy: ForegroundPolicy,
    breakpoint: f32,

    /// Signal emitted when the foreground surface changes.
    pub foreground_changed: Signal<ForegroundMode>,
}

impl DualSurfaceDisplay {
    /// Starts assembling a display in `registry`.
    pub fn builder(registry: &SharedViewRegistry) -> DualSurfaceBuilder {
        DualSurfaceBuilder::new(registry)
    }

    // =========================================================================
    // Surfaces
    // =========================================================================

    /// The attached grid surface.
    pub fn grid_surface(&self) -> Option<ViewId> {
        self.grid
    }

    /// The attached row surface.
    pub fn row_surface(&self) -> Option<ViewId> {
        self.row
    }

    /// The surface attached for `mode`.
    pub fn surface(&self, mode: ForegroundMode) -> Option<ViewId> {
        match mode {
            ForegroundMode::Grid => self.grid,
            ForegroundMode::Row => self.row,
        }
    }

    /// The foreground surface, if any surface is attached.
    pub fn visible_surface(&self) -> Option<ViewId> {
        self.surface(self.mode)
    }

    /// Returns `true` if both surfaces are attached.
    pub fn can_toggle(&self) -> bool {
        self.grid.is_some() && self.row.is_some()
    }

    // =========================================================================
    // Foreground Mode
    // =========================================================================

    /// The current foreground mode.
    pub fn foreground_mode(&self) -> ForegroundMode {
        self.mode
    }

    /// Flips the foreground surface.
    ///
    /// Returns `false` without doing anything unless both surfaces are attached.
    pub fn toggle_foreground_view(&mut self) -> bool {
        if !self.can_toggle() {
            tracing::trace!(target: targets::SWITCH, mode = %self.mode, "toggle ignored, one surface attached");
            return false;
        }
        self.set_foreground_mode(self.mode.toggled())
    }

    /// Brings the surface for `mode` to the foreground.
    ///
    /// Returns `true` if the foreground changed. Requesting the current mode,
    /// or a mode whose surface is not attached, changes nothing.
    pub fn set_foreground_mode(&mut self, mode: ForegroundMode) -> bool {
        if mode == self.mode {
            return false;
        }
        if self.surface(mode).is_none() {
            tracing::trace!(target: targets::SWITCH, %mode, "no surface attached for mode");
            return false;
        }

        self.mode = mode;
        self.apply_visibility();
        tracing::debug!(target: targets::SWITCH, %mode, "foreground surface changed");
        self.foreground_changed.emit(mode);
        true
    }

    // =========================================================================
    // Size Classes
    // =========================================================================

    /// The last size class reported, if any.
    pub fn size_class(&self) -> Option<SizeClass> {
        self.size_class
    }

    /// The size class to mode mapping in use.
    pub fn policy(&self) -> ForegroundPolicy {
        self.policy
    }

    /// The compact/regular width breakpoint in use.
    pub fn breakpoint(&self) -> f32 {
        self.breakpoint
    }

    /// Host hook for size class changes.
    ///
    /// Applies the policy's mode for `class`. Returns `true` if the foreground
    /// changed; reporting the class the display is already laid out for
    /// changes nothing.
    pub fn size_class_changed(&mut self, class: SizeClass) -> bool {
        self.size_class = Some(class);
        let mode = self.policy.mode_for(class);
        tracing::trace!(target: targets::SWITCH, ?class, %mode, "size class changed");
        self.set_foreground_mode(mode)
    }

    /// Host hook for layout size changes.
    ///
    /// Derives the size class from `width` and the breakpoint.
    pub fn resized(&mut self, width: f32) -> bool {
        self.size_class_changed(SizeClass::for_width(width, self.breakpoint))
    }

    fn apply_visibility(&self) {
        let registry = self.display.registry();
        for (mode, surface) in [(ForegroundMode::Grid, self.grid), (ForegroundMode::Row, self.row)] {
            let Some(surface) = surface else { continue };
            if let Err(err) = registry.set_visible(surface, mode == self.mode) {
                tracing::warn!(target: targets::SWITCH, ?surface, %err, "surface visibility not applied");
            }
        }
    }
}

impl View for DualSurfaceDisplay {
    fn view_id(&self) -> ViewId {
        self.display.view_id()
    }
}

impl AsDisplay for DualSurfaceDisplay {
    fn as_display(&self) -> &Display {
        &self.display
    }
}

impl fmt::Debug for DualSurfaceDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DualSurfaceDisplay")
            .field("id", &self.view_id())
            .field("mode", &self.mode)
            .field("grid", &self.grid)
            .field("row", &self.row)
            .field("size_class", &self.size_class)
            .finish()
    }
}

static_assertions::assert_impl_all!(DualSurfaceDisplay: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixture {
        registry: SharedViewRegistry,
        grid: ViewId,
        row: ViewId,
    }

    fn fixture() -> Fixture {
        let registry = SharedViewRegistry::new();
        let grid = registry.register("GridSurface");
        let row = registry.register("RowSurface");
        Fixture { registry, grid, row }
    }

    fn visible(f: &Fixture, id: ViewId) -> bool {
        f.registry.is_visible(id).unwrap()
    }

    #[test]
    fn test_mode_helpers() {
        assert_eq!(ForegroundMode::Grid.toggled(), ForegroundMode::Row);
        assert_eq!(ForegroundMode::Row.toggled().toggled(), ForegroundMode::Row);
        assert_eq!(ForegroundMode::from(SurfaceKind::Row), ForegroundMode::Row);
        assert_eq!(ForegroundMode::Row.to_string(), "row");
        assert_eq!(SizeClass::for_width(599.0, 600.0), SizeClass::Compact);
        assert_eq!(SizeClass::for_width(600.0, 600.0), SizeClass::Regular);
    }

    #[test]
    fn test_default_mode_with_both_surfaces() {
        let f = fixture();
        let display = DualSurfaceDisplay::builder(&f.registry)
            .grid(f.grid)
            .row(f.row)
            .build()
            .unwrap();
        assert_eq!(display.foreground_mode(), ForegroundMode::Grid);
        assert!(visible(&f, f.grid));
        assert!(!visible(&f, f.row));
    }

    #[test]
    fn test_initial_mode_overrides_policy() {
        let f = fixture();
        let display = DualSurfaceDisplay::builder(&f.registry)
            .grid(f.grid)
            .row(f.row)
            .initial_size_class(SizeClass::Regular)
            .initial_mode(ForegroundMode::Row)
            .build()
            .unwrap();
        assert_eq!(display.visible_surface(), Some(f.row));
    }

    #[test]
    fn test_single_surface_is_pinned() {
        let f = fixture();
        f.registry.set_visible(f.row, false).unwrap();
        let mut display = DualSurfaceDisplay::builder(&f.registry)
            .row(f.row)
            .initial_size_class(SizeClass::Regular)
            .build()
            .unwrap();

        assert_eq!(display.foreground_mode(), ForegroundMode::Row);
        assert!(visible(&f, f.row));
        assert!(!display.can_toggle());
        assert!(!display.toggle_foreground_view());
        assert!(!display.size_class_changed(SizeClass::Regular));
        assert!(!display.set_foreground_mode(ForegroundMode::Grid));
        assert_eq!(display.size_class(), Some(SizeClass::Regular));
        assert!(visible(&f, f.row));
    }

    #[test]
    fn test_no_surfaces() {
        let f = fixture();
        let mut display = DualSurfaceDisplay::builder(&f.registry).build().unwrap();
        assert_eq!(display.visible_surface(), None);
        assert!(!display.toggle_foreground_view());
    }

    #[test]
    fn test_surfaces_are_parented() {
        let f = fixture();
        let display = DualSurfaceDisplay::builder(&f.registry)
            .grid(f.grid)
            .row(f.row)
            .build()
            .unwrap();
        assert_eq!(f.registry.parent(f.grid), Ok(Some(display.view_id())));
        assert_eq!(f.registry.children(display.view_id()), Ok(vec![f.grid, f.row]));
    }

    #[test]
    fn test_toggle_flips_and_emits() {
        let f = fixture();
        let mut display = DualSurfaceDisplay::builder(&f.registry)
            .grid(f.grid)
            .row(f.row)
            .build()
            .unwrap();
        let emitted = Arc::new(AtomicUsize::new(0));
        let e = emitted.clone();
        display.foreground_changed.connect(move |_| {
            e.fetch_add(1, Ordering::SeqCst);
        });

        assert!(display.toggle_foreground_view());
        assert_eq!(display.foreground_mode(), ForegroundMode::Row);
        assert!(visible(&f, f.row));
        assert!(!visible(&f, f.grid));

        assert!(display.toggle_foreground_view());
        assert!(visible(&f, f.grid));
        assert_eq!(emitted.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_size_class_change_is_idempotent() {
        let f = fixture();
        let mut display = DualSurfaceDisplay::builder(&f.registry)
            .grid(f.grid)
            .row(f.row)
            .initial_size_class(SizeClass::Compact)
            .build()
            .unwrap();
        let emitted = Arc::new(AtomicUsize::new(0));
        let e = emitted.clone();
        display.foreground_changed.connect(move |_| {
            e.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!display.size_class_changed(SizeClass::Compact));
        assert!(display.size_class_changed(SizeClass::Regular));
        assert!(!display.size_class_changed(SizeClass::Regular));
        assert_eq!(emitted.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_resized_uses_breakpoint() {
        let f = fixture();
        let mut display = DualSurfaceDisplay::builder(&f.registry)
            .grid(f.grid)
            .row(f.row)
            .breakpoint(400.0)
            .build()
            .unwrap();
        assert!(!display.resized(500.0));
        assert!(display.resized(320.0));
        assert_eq!(display.visible_surface(), Some(f.row));
        assert_eq!(display.size_class(), Some(SizeClass::Compact));
    }

    #[test]
    fn test_config_applies() {
        let f = fixture();
        let config = PresenterConfig {
            breakpoint: 1000.0,
            initial_mode: None,
            policy: ForegroundPolicy {
                compact: ForegroundMode::Grid,
                regular: ForegroundMode::Row,
            },
        };
        let mut display = DualSurfaceDisplay::builder(&f.registry)
            .grid(f.grid)
            .row(f.row)
            .config(&config)
            .initial_size_class(SizeClass::Regular)
            .build()
            .unwrap();
        assert_eq!(display.foreground_mode(), ForegroundMode::Row);
        assert!(display.resized(800.0));
        assert_eq!(display.foreground_mode(), ForegroundMode::Grid);
    }

    #[test]
    fn test_build_errors() {
        let f = fixture();
        assert_eq!(
            DualSurfaceDisplay::builder(&f.registry)
                .grid(f.grid)
                .grid(f.row)
                .build()
                .unwrap_err(),
            SwitchError::DuplicateSurface(SurfaceKind::Grid)
        );
        assert_eq!(
            DualSurfaceDisplay::builder(&f.registry)
                .grid(f.grid)
                .row(f.grid)
                .build()
                .unwrap_err(),
            SwitchError::SameView
        );
        assert_eq!(
            DualSurfaceDisplay::builder(&f.registry)
                .breakpoint(f32::INFINITY)
                .build()
                .unwrap_err(),
            SwitchError::InvalidBreakpoint(f32::INFINITY)
        );

        f.registry.destroy(f.row).unwrap();
        assert_eq!(
            DualSurfaceDisplay::builder(&f.registry)
                .grid(f.grid)
                .row(f.row)
                .build()
                .unwrap_err(),
            SwitchError::View(ViewError::InvalidViewId)
        );
    }
}
