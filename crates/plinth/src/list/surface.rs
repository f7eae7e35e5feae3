//! List surfaces and the cell reuse mechanism.
//!
//! A [`Surface`] is one renderable list view, either a grid or a row list.
//! It owns the registry of cell types that may be dequeued from it; the
//! [`CellDequeue`] trait is the seam a host toolkit implements to hand out
//! live cells.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;
use plinth_core::{SharedViewRegistry, View, ViewId};
use thiserror::Error;

use super::adapter::{GridQuery, RowQuery};
use super::cell::{Cell, CellStyle, ReuseKey, SurfaceKind};
use crate::model::IndexPath;

/// Why a surface could not hand out a cell.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DequeueMiss {
    /// No cell type is registered under the requested key.
    #[error("no cell registered for reuse key '{0}'")]
    UnregisteredKey(ReuseKey),

    /// The host could not produce a cell right now.
    #[error("no cell available")]
    Unavailable,
}

/// The host reuse/dequeue mechanism.
///
/// Given a key and a position, returns a live cell or reports why it could
/// not. Implementations must not panic on unknown keys.
pub trait CellDequeue {
    /// The kind of surface cells are dequeued from.
    fn surface_kind(&self) -> SurfaceKind;

    /// Dequeues a cell for `key` at `position`.
    fn dequeue(&self, key: &ReuseKey, position: IndexPath) -> Result<Cell, DequeueMiss>;
}

/// What a surface shows after loading its content from an adapter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SurfaceContents {
    /// Header title per section. Grid surfaces have no headers.
    pub headers: Vec<Option<String>>,
    /// Cells per section, in display order.
    pub sections: Vec<Vec<Cell>>,
}

impl SurfaceContents {
    /// Total number of cells across all sections.
    pub fn cell_count(&self) -> usize {
        self.sections.iter().map(Vec::len).sum()
    }

    /// Iterates over all cells in display order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.sections.iter().flatten()
    }
}

/// A grid or row list surface.
pub struct Surface {
    id: ViewId,
    registry: SharedViewRegistry,
    kind: SurfaceKind,
    registrations: RwLock<HashMap<ReuseKey, CellStyle>>,
    dequeue_count: AtomicUsize,
}

impl Surface {
    /// Creates a surface and registers its view record.
    pub fn new(registry: &SharedViewRegistry, kind: SurfaceKind) -> Self {
        Self {
            id: registry.register(kind.type_name()),
            registry: registry.clone(),
            kind,
            registrations: RwLock::new(HashMap::new()),
            dequeue_count: AtomicUsize::new(0),
        }
    }

    /// Creates a grid surface.
    pub fn grid(registry: &SharedViewRegistry) -> Self {
        Self::new(registry, SurfaceKind::Grid)
    }

    /// Creates a row surface.
    pub fn rows(registry: &SharedViewRegistry) -> Self {
        Self::new(registry, SurfaceKind::Row)
    }

    /// The kind of this surface.
    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    /// Registers a cell type under `key` with the default style.
    pub fn register_cell(&self, key: impl Into<ReuseKey>) {
        self.register_cell_with_style(key, CellStyle::Default);
    }

    /// Registers a cell type under `key` with the given style.
    ///
    /// Registering an existing key replaces its style.
    pub fn register_cell_with_style(&self, key: impl Into<ReuseKey>, style: CellStyle) {
        self.registrations.write().insert(key.into(), style);
    }

    /// Returns `true` if a cell type is registered under `key`.
    pub fn is_registered(&self, key: &ReuseKey) -> bool {
        self.registrations.read().contains_key(key)
    }

    /// Number of successful dequeues so far.
    pub fn dequeue_count(&self) -> usize {
        self.dequeue_count.load(Ordering::Relaxed)
    }

    /// Loads the whole content of this surface from `query`.
    ///
    /// Grid surfaces go through the grid protocol and row surfaces through
    /// the row protocol, the same way a host would during a layout pass.
    pub fn load<Q>(&self, query: &Q) -> SurfaceContents
    where
        Q: GridQuery + RowQuery + ?Sized,
    {
        let mut contents = SurfaceContents::default();
        match self.kind {
            SurfaceKind::Grid => {
                for section in 0..GridQuery::number_of_sections(query) {
                    let cells = (0..query.number_of_items(section))
                        .map(|item| query.cell_for_item(self, IndexPath::new(section, item)))
                        .collect();
                    contents.headers.push(None);
                    contents.sections.push(cells);
                }
            }
            SurfaceKind::Row => {
                for section in 0..RowQuery::number_of_sections(query) {
                    let cells = (0..query.number_of_rows(section))
                        .map(|row| query.cell_for_row(self, IndexPath::new(section, row)))
                        .collect();
                    contents.headers.push(query.title_for_header(section));
                    contents.sections.push(cells);
                }
            }
        }
        contents
    }
}

impl CellDequeue for Surface {
    fn surface_kind(&self) -> SurfaceKind {
        self.kind
    }

    fn dequeue(&self, key: &ReuseKey, position: IndexPath) -> Result<Cell, DequeueMiss> {
        let style = self
            .registrations
            .read()
            .get(key)
            .copied()
            .ok_or_else(|| DequeueMiss::UnregisteredKey(key.clone()))?;
        self.dequeue_count.fetch_add(1, Ordering::Relaxed);
        Ok(Cell::dequeued(self.kind, key.clone(), position, style))
    }
}

impl View for Surface {
    fn view_id(&self) -> ViewId {
        self.id
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        let _ = self.registry.unregister(self.id);
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("registered", &self.registrations.read().len())
            .finish()
    }
}

static_assertions::assert_impl_all!(Surface: Send, Sync);
