//! Prelude module for Plinth.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```ignore
//! use plinth::prelude::*;
//! ```

// ============================================================================
// View Arena, Signals and Properties
// ============================================================================

pub use plinth_core::{Property, SharedViewRegistry, Signal, View, ViewId};

// ============================================================================
// Content Model
// ============================================================================

pub use crate::model::{Dataset, IndexPath, Section, SectionedDataset};

// ============================================================================
// List Presentation
// ============================================================================

pub use crate::list::{
    Cell, CellDequeue, DatasetSource, GridQuery, ListAdapter, ListSource, ReuseKey, RowQuery,
    Surface, SurfaceKind,
};

// ============================================================================
// Views
// ============================================================================

pub use crate::widget::{
    AsDisplay, Display, DualSurfaceDisplay, ForegroundMode, ForegroundPolicy, FormattedLabel,
    SizeClass, ToggleStack,
};

// ============================================================================
// Controllers and Configuration
// ============================================================================

pub use crate::config::PresenterConfig;
pub use crate::controller::{Model, OutlettedController};
