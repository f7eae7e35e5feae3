//! Cells: the renderable units list surfaces display per item.

use std::fmt;

use crate::model::IndexPath;

/// The two list-rendering surfaces Plinth can present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// A grid of items, laid out in flowing cells.
    Grid,
    /// A single column of rows, with optional section headers.
    Row,
}

impl SurfaceKind {
    /// The type name the surface's view record is registered under.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Grid => "GridSurface",
            Self::Row => "RowSurface",
        }
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid => f.write_str("grid"),
            Self::Row => f.write_str("row"),
        }
    }
}

/// Identifies a registered cell type on a surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReuseKey(String);

impl ReuseKey {
    /// Creates a reuse key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ReuseKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for ReuseKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Display for ReuseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Layout style of a cell's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellStyle {
    /// A single text line.
    #[default]
    Default,
    /// Text with a smaller detail line beneath it.
    Subtitle,
    /// Text on the leading edge, detail on the trailing edge.
    Value,
}

/// A renderable unit produced for one item position.
///
/// Surfaces may recycle cells, so callers must not rely on a cell keeping
/// its identity across requests.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    kind: SurfaceKind,
    reuse_key: Option<ReuseKey>,
    position: Option<IndexPath>,
    style: CellStyle,
    /// Primary text.
    pub text: Option<String>,
    /// Secondary text, shown according to the style.
    pub detail: Option<String>,
}

impl Cell {
    /// Creates a cell dequeued for `key` at `position`.
    pub fn dequeued(kind: SurfaceKind, key: ReuseKey, position: IndexPath, style: CellStyle) -> Self {
        Self {
            kind,
            reuse_key: Some(key),
            position: Some(position),
            style,
            text: None,
            detail: None,
        }
    }

    /// Creates a blank stand-in cell for a position that could not be resolved.
    ///
    /// Placeholders have no reuse key and no position, so they are never
    /// recycled. Row placeholders use the default style.
    pub fn placeholder(kind: SurfaceKind) -> Self {
        Self {
            kind,
            reuse_key: None,
            position: None,
            style: CellStyle::Default,
            text: None,
            detail: None,
        }
    }

    /// Returns `true` if this is a placeholder cell.
    pub fn is_placeholder(&self) -> bool {
        self.reuse_key.is_none()
    }

    /// The surface this cell renders on.
    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    /// The reuse key the cell was dequeued with.
    pub fn reuse_key(&self) -> Option<&ReuseKey> {
        self.reuse_key.as_ref()
    }

    /// The position the cell was dequeued for.
    pub fn position(&self) -> Option<IndexPath> {
        self.position
    }

    /// The cell's text style.
    pub fn style(&self) -> CellStyle {
        self.style
    }

    /// Sets the primary text using builder pattern.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the detail text using builder pattern.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_has_no_identity() {
        let cell = Cell::placeholder(SurfaceKind::Row);
        assert!(cell.is_placeholder());
        assert_eq!(cell.reuse_key(), None);
        assert_eq!(cell.position(), None);
        assert_eq!(cell.style(), CellStyle::Default);
        assert_eq!(cell.kind(), SurfaceKind::Row);
        assert_eq!(cell.text, None);
    }

    #[test]
    fn test_dequeued_cell_keeps_key() {
        let cell = Cell::dequeued(
            SurfaceKind::Grid,
            ReuseKey::from("photo"),
            IndexPath::new(0, 3),
            CellStyle::Subtitle,
        )
        .with_text("Harbor")
        .with_detail("2019");
        assert!(!cell.is_placeholder());
        assert_eq!(cell.reuse_key().map(ReuseKey::as_str), Some("photo"));
        assert_eq!(cell.position(), Some(IndexPath::new(0, 3)));
        assert_eq!(cell.text.as_deref(), Some("Harbor"));
        assert_eq!(cell.detail.as_deref(), Some("2019"));
    }

    #[test]
    fn test_surface_kind_names() {
        assert_eq!(SurfaceKind::Grid.type_name(), "GridSurface");
        assert_eq!(SurfaceKind::Row.to_string(), "row");
    }
}
