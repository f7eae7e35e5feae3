//! Dual-backend list presentation.
//!
//! This module provides the pieces that let one content source feed both a
//! grid surface and a row surface:
//!
//! - [`ListSource`]: counts, reuse keys and cell configuration for a dataset
//! - [`ListAdapter`]: answers [`GridQuery`] and [`RowQuery`] from one source
//! - [`CellProvider`]: resolves cell requests, substituting placeholders
//! - [`Surface`]: a grid or row list with its registered cell types
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use plinth::list::{DatasetSource, ListAdapter, Surface};
//! use plinth::model::SectionedDataset;
//! use plinth_core::SharedViewRegistry;
//!
//! let registry = SharedViewRegistry::new();
//! let grid = Surface::grid(&registry);
//! let rows = Surface::rows(&registry);
//! grid.register_cell("tile");
//! rows.register_cell("row");
//!
//! let data = Arc::new(SectionedDataset::single_section(vec!["a", "b", "c"]));
//! let adapter = ListAdapter::new(DatasetSource::new(data, "tile", "row"));
//!
//! assert_eq!(grid.load(&adapter).cell_count(), 3);
//! assert_eq!(rows.load(&adapter).cell_count(), 3);
//! ```

mod adapter;
mod cell;
mod provider;
mod surface;

pub use adapter::{
    DEFAULT_SECTION_COUNT, DatasetSource, GridQuery, ListAdapter, ListSource, RowQuery,
    TextExtractor,
};
pub use cell::{Cell, CellStyle, ReuseKey, SurfaceKind};
pub use provider::{CellProvider, CellRequest};
pub use surface::{CellDequeue, DequeueMiss, Surface, SurfaceContents};
