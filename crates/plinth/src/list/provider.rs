//! Lookup-backed cell provider.
//!
//! The provider turns a cell request into a cell, always. When the request
//! cannot be satisfied (position out of range, no key, a key the surface
//! does not know, or a request routed to the wrong kind of surface) it
//! substitutes a blank placeholder cell so the host never receives an error
//! from a data source callback.

use std::sync::atomic::{AtomicUsize, Ordering};

use plinth_core::logging::targets;

use super::cell::{Cell, ReuseKey, SurfaceKind};
use super::surface::CellDequeue;
use crate::model::IndexPath;

/// One cell request, as computed by an adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct CellRequest {
    /// The protocol the request came through.
    pub kind: SurfaceKind,
    /// The requested position.
    pub position: IndexPath,
    /// The reuse key chosen by the cell-type policy, if any.
    pub key: Option<ReuseKey>,
    /// Whether `position` exists in the dataset at request time.
    pub in_bounds: bool,
}

/// Resolves cell requests against a surface's dequeue mechanism.
#[derive(Debug, Default)]
pub struct CellProvider {
    placeholders_served: AtomicUsize,
}

impl CellProvider {
    /// Creates a provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a cell for `request`, substituting a placeholder on any miss.
    pub fn provide_cell(&self, dequeue: &dyn CellDequeue, request: CellRequest) -> Cell {
        let CellRequest {
            kind,
            position,
            key,
            in_bounds,
        } = request;

        if !in_bounds {
            return self.placeholder(kind, position, "position out of range");
        }
        if dequeue.surface_kind() != kind {
            return self.placeholder(kind, position, "request routed to the other surface kind");
        }
        let Some(key) = key else {
            return self.placeholder(kind, position, "no reuse key for position");
        };

        match dequeue.dequeue(&key, position) {
            Ok(cell) => cell,
            Err(miss) => {
                tracing::debug!(target: targets::CELL, %key, %miss, "dequeue failed");
                self.placeholder(kind, position, "dequeue failed")
            }
        }
    }

    /// Number of placeholder cells handed out so far.
    pub fn placeholders_served(&self) -> usize {
        self.placeholders_served.load(Ordering::Relaxed)
    }

    fn placeholder(&self, kind: SurfaceKind, position: IndexPath, reason: &'static str) -> Cell {
        self.placeholders_served.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(target: targets::CELL, %kind, %position, reason, "substituting placeholder cell");
        Cell::placeholder(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::surface::{DequeueMiss, Surface};
    use plinth_core::SharedViewRegistry;

    struct ExhaustedHost;

    impl CellDequeue for ExhaustedHost {
        fn surface_kind(&self) -> SurfaceKind {
            SurfaceKind::Grid
        }

        fn dequeue(&self, _key: &ReuseKey, _position: IndexPath) -> Result<Cell, DequeueMiss> {
            Err(DequeueMiss::Unavailable)
        }
    }

    fn request(kind: SurfaceKind, key: Option<&str>, in_bounds: bool) -> CellRequest {
        CellRequest {
            kind,
            position: IndexPath::new(0, 0),
            key: key.map(ReuseKey::from),
            in_bounds,
        }
    }

    #[test]
    fn test_registered_key_dequeues() {
        let registry = SharedViewRegistry::new();
        let surface = Surface::grid(&registry);
        surface.register_cell("tile");
        let provider = CellProvider::new();

        let cell = provider.provide_cell(&surface, request(SurfaceKind::Grid, Some("tile"), true));
        assert!(!cell.is_placeholder());
        assert_eq!(provider.placeholders_served(), 0);
    }

    #[test]
    fn test_unregistered_key_substitutes() {
        let registry = SharedViewRegistry::new();
        let surface = Surface::rows(&registry);
        let provider = CellProvider::new();

        let cell = provider.provide_cell(&surface, request(SurfaceKind::Row, Some("nope"), true));
        assert!(cell.is_placeholder());
        assert_eq!(cell.kind(), SurfaceKind::Row);
        assert_eq!(provider.placeholders_served(), 1);
    }

    #[test]
    fn test_out_of_range_substitutes_without_dequeue() {
        let registry = SharedViewRegistry::new();
        let surface = Surface::grid(&registry);
        surface.register_cell("tile");
        let provider = CellProvider::new();

        let cell = provider.provide_cell(&surface, request(SurfaceKind::Grid, Some("tile"), false));
        assert!(cell.is_placeholder());
        assert_eq!(surface.dequeue_count(), 0);
    }

    #[test]
    fn test_missing_key_substitutes() {
        let registry = SharedViewRegistry::new();
        let surface = Surface::grid(&registry);
        let provider = CellProvider::new();

        let cell = provider.provide_cell(&surface, request(SurfaceKind::Grid, None, true));
        assert!(cell.is_placeholder());
    }

    #[test]
    fn test_wrong_surface_kind_substitutes() {
        let registry = SharedViewRegistry::new();
        let surface = Surface::rows(&registry);
        surface.register_cell("tile");
        let provider = CellProvider::new();

        let cell = provider.provide_cell(&surface, request(SurfaceKind::Grid, Some("tile"), true));
        assert!(cell.is_placeholder());
        assert_eq!(cell.kind(), SurfaceKind::Grid);
    }

    #[test]
    fn test_host_unavailable_substitutes() {
        let provider = CellProvider::new();
        let cell = provider.provide_cell(&ExhaustedHost, request(SurfaceKind::Grid, Some("tile"), true));
        assert!(cell.is_placeholder());
        assert_eq!(provider.placeholders_served(), 1);
    }
}
