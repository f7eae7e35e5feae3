//! Dual-backend list adapter.
//!
//! One [`ListAdapter`] answers both the grid protocol ([`GridQuery`]) and the
//! row protocol ([`RowQuery`]) for a single [`ListSource`]. Both facades are
//! thin: section counts, item counts and cell dispatch each go through one
//! shared computation, so a grid surface and a row surface showing the same
//! adapter always agree on the shape of the content.
//!
//! # Example
//!
//! ```
//! use plinth::list::{GridQuery, ListAdapter, ListSource, ReuseKey, RowQuery};
//! use plinth::model::IndexPath;
//!
//! struct Albums {
//!     per_year: Vec<usize>,
//! }
//!
//! impl ListSource for Albums {
//!     fn section_count(&self) -> usize {
//!         self.per_year.len()
//!     }
//!
//!     fn item_count(&self, section: usize) -> usize {
//!         self.per_year[section]
//!     }
//!
//!     fn grid_cell_key(&self, _position: IndexPath) -> Option<ReuseKey> {
//!         Some("cover".into())
//!     }
//!
//!     fn row_cell_key(&self, _position: IndexPath) -> Option<ReuseKey> {
//!         Some("album".into())
//!     }
//! }
//!
//! let adapter = ListAdapter::new(Albums { per_year: vec![3, 1] });
//! let grid: &dyn GridQuery = &adapter;
//! let rows: &dyn RowQuery = &adapter;
//! assert_eq!(grid.number_of_items(0), rows.number_of_rows(0));
//! ```

use std::fmt;
use std::sync::Arc;

use plinth_core::logging::targets;

use super::cell::{Cell, ReuseKey, SurfaceKind};
use super::provider::{CellProvider, CellRequest};
use super::surface::CellDequeue;
use crate::model::{Dataset, IndexPath};

/// Section count reported by sources that do not override it.
pub const DEFAULT_SECTION_COUNT: usize = 1;

/// Content and cell-type policy behind a [`ListAdapter`].
///
/// Implementors must provide item counts and reuse keys for both surface
/// kinds. The adapter never renders a default cell: when a key is missing or
/// unknown to the surface, a placeholder is substituted.
pub trait ListSource: Send + Sync {
    /// Number of sections. Defaults to [`DEFAULT_SECTION_COUNT`].
    fn section_count(&self) -> usize {
        DEFAULT_SECTION_COUNT
    }

    /// Number of items in `section`.
    ///
    /// Only called for sections below [`section_count`](ListSource::section_count).
    fn item_count(&self, section: usize) -> usize;

    /// Reuse key for the grid cell at `position`.
    fn grid_cell_key(&self, position: IndexPath) -> Option<ReuseKey>;

    /// Reuse key for the row cell at `position`.
    fn row_cell_key(&self, position: IndexPath) -> Option<ReuseKey>;

    /// Fills in a dequeued grid cell.
    fn configure_grid_cell(&self, _cell: &mut Cell, _position: IndexPath) {}

    /// Fills in a dequeued row cell.
    fn configure_row_cell(&self, _cell: &mut Cell, _position: IndexPath) {}

    /// Header title for `section`. Defaults to none.
    fn header_title(&self, _section: usize) -> Option<String> {
        None
    }
}

/// The grid-surface query protocol.
pub trait GridQuery {
    /// Number of sections on the grid.
    fn number_of_sections(&self) -> usize;

    /// Number of items in `section`.
    fn number_of_items(&self, section: usize) -> usize;

    /// The cell for the item at `position`, dequeued from `surface`.
    fn cell_for_item(&self, surface: &dyn CellDequeue, position: IndexPath) -> Cell;
}

/// The row-surface query protocol.
pub trait RowQuery {
    /// Number of sections in the row list.
    fn number_of_sections(&self) -> usize;

    /// Number of rows in `section`.
    fn number_of_rows(&self, section: usize) -> usize;

    /// The cell for the row at `position`, dequeued from `surface`.
    fn cell_for_row(&self, surface: &dyn CellDequeue, position: IndexPath) -> Cell;

    /// Header title for `section`.
    fn title_for_header(&self, section: usize) -> Option<String>;
}

/// Feeds one [`ListSource`] to both surface protocols.
pub struct ListAdapter<S> {
    source: S,
    provider: CellProvider,
}

impl<S: ListSource> ListAdapter<S> {
    /// Creates an adapter over `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            provider: CellProvider::new(),
        }
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The cell provider, for substitution statistics.
    pub fn provider(&self) -> &CellProvider {
        &self.provider
    }

    fn sections(&self) -> usize {
        self.source.section_count()
    }

    fn items_in(&self, section: usize) -> usize {
        if section < self.sections() {
            self.source.item_count(section)
        } else {
            0
        }
    }

    fn contains(&self, position: IndexPath) -> bool {
        position.item < self.items_in(position.section)
    }

    fn header(&self, section: usize) -> Option<String> {
        if section < self.sections() {
            self.source.header_title(section)
        } else {
            None
        }
    }

    fn cell(&self, kind: SurfaceKind, surface: &dyn CellDequeue, position: IndexPath) -> Cell {
        let in_bounds = self.contains(position);
        let key = if in_bounds {
            match kind {
                SurfaceKind::Grid => self.source.grid_cell_key(position),
                SurfaceKind::Row => self.source.row_cell_key(position),
            }
        } else {
            None
        };
        tracing::trace!(target: targets::ADAPTER, %kind, %position, in_bounds, "cell requested");

        let mut cell = self.provider.provide_cell(
            surface,
            CellRequest {
                kind,
                position,
                key,
                in_bounds,
            },
        );
        if !cell.is_placeholder() {
            match kind {
                SurfaceKind::Grid => self.source.configure_grid_cell(&mut cell, position),
                SurfaceKind::Row => self.source.configure_row_cell(&mut cell, position),
            }
        }
        cell
    }
}

impl<S: ListSource> GridQuery for ListAdapter<S> {
    fn number_of_sections(&self) -> usize {
        self.sections()
    }

    fn number_of_items(&self, section: usize) -> usize {
        self.items_in(section)
    }

    fn cell_for_item(&self, surface: &dyn CellDequeue, position: IndexPath) -> Cell {
        self.cell(SurfaceKind::Grid, surface, position)
    }
}

impl<S: ListSource> RowQuery for ListAdapter<S> {
    fn number_of_sections(&self) -> usize {
        self.sections()
    }

    fn number_of_rows(&self, section: usize) -> usize {
        self.items_in(section)
    }

    fn cell_for_row(&self, surface: &dyn CellDequeue, position: IndexPath) -> Cell {
        self.cell(SurfaceKind::Row, surface, position)
    }

    fn title_for_header(&self, section: usize) -> Option<String> {
        self.header(section)
    }
}

impl<S> fmt::Debug for ListAdapter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListAdapter")
            .field("source", &std::any::type_name::<S>())
            .field("provider", &self.provider)
            .finish()
    }
}

/// Text extractor used by [`DatasetSource`].
pub type TextExtractor<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// A [`ListSource`] over any [`Dataset`], with fixed reuse keys.
///
/// Counts and header titles come straight from the dataset on every call.
/// When a text extractor is set, dequeued cells of both kinds get the
/// extracted text.
pub struct DatasetSource<D: Dataset> {
    dataset: Arc<D>,
    grid_key: ReuseKey,
    row_key: ReuseKey,
    text: Option<TextExtractor<D::Item>>,
}

impl<D: Dataset> DatasetSource<D> {
    /// Creates a source that uses `grid_key` and `row_key` for every item.
    pub fn new(dataset: Arc<D>, grid_key: impl Into<ReuseKey>, row_key: impl Into<ReuseKey>) -> Self {
        Self {
            dataset,
            grid_key: grid_key.into(),
            row_key: row_key.into(),
            text: None,
        }
    }

    /// Sets the text extractor using builder pattern.
    pub fn with_text<F>(mut self, extractor: F) -> Self
    where
        F: Fn(&D::Item) -> String + Send + Sync + 'static,
    {
        self.text = Some(Arc::new(extractor));
        self
    }

    /// The underlying dataset.
    pub fn dataset(&self) -> &Arc<D> {
        &self.dataset
    }

    fn fill(&self, cell: &mut Cell, position: IndexPath) {
        if let Some(extract) = &self.text {
            if let Some(item) = self.dataset.item(position.section, position.item) {
                cell.text = Some(extract(&item));
            }
        }
    }
}

impl<D: Dataset> ListSource for DatasetSource<D> {
    fn section_count(&self) -> usize {
        self.dataset.section_count()
    }

    fn item_count(&self, section: usize) -> usize {
        self.dataset.item_count(section)
    }

    fn grid_cell_key(&self, _position: IndexPath) -> Option<ReuseKey> {
        Some(self.grid_key.clone())
    }

    fn row_cell_key(&self, _position: IndexPath) -> Option<ReuseKey> {
        Some(self.row_key.clone())
    }

    fn configure_grid_cell(&self, cell: &mut Cell, position: IndexPath) {
        self.fill(cell, position);
    }

    fn configure_row_cell(&self, cell: &mut Cell, position: IndexPath) {
        self.fill(cell, position);
    }

    fn header_title(&self, section: usize) -> Option<String> {
        self.dataset.section_title(section)
    }
}
