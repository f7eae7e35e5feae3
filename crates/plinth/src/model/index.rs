//! Index paths for addressing items in sectioned datasets.

use std::fmt;

/// The position of an item: a section, and an item within that section.
///
/// Both list surfaces address content the same way. A grid surface calls
/// the second component an item, a row surface calls it a row.
///
/// Index paths order section-first, so sorting a set of paths yields
/// display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct IndexPath {
    /// The section index.
    pub section: usize,
    /// The item (or row) index within the section.
    pub item: usize,
}

impl IndexPath {
    /// Creates an index path.
    #[inline]
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }

    /// The row index, for row-surface callers.
    #[inline]
    pub const fn row(&self) -> usize {
        self.item
    }
}

impl From<(usize, usize)> for IndexPath {
    fn from((section, item): (usize, usize)) -> Self {
        Self::new(section, item)
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.item)
    }
}
