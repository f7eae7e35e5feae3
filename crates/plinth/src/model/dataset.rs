//! Sectioned datasets that feed list surfaces.
//!
//! A [`Dataset`] is an ordered collection of sections, each an ordered
//! collection of items. List adapters read it through this trait on every
//! query and never cache counts between calls, so both surfaces always see
//! the same snapshot.

use parking_lot::RwLock;
use plinth_core::Signal;

use super::index::IndexPath;

/// Read access to sectioned content.
///
/// # Example
///
/// ```
/// use plinth::model::{Dataset, IndexPath};
///
/// struct Weekdays;
///
/// impl Dataset for Weekdays {
///     type Item = &'static str;
///
///     fn section_count(&self) -> usize {
///         1
///     }
///
///     fn item_count(&self, section: usize) -> usize {
///         if section == 0 { 5 } else { 0 }
///     }
///
///     fn item(&self, section: usize, index: usize) -> Option<&'static str> {
///         let days = ["Mon", "Tue", "Wed", "Thu", "Fri"];
///         (section == 0).then(|| days.get(index).copied()).flatten()
///     }
/// }
///
/// assert!(Weekdays.contains(IndexPath::new(0, 4)));
/// assert!(!Weekdays.contains(IndexPath::new(0, 5)));
/// ```
pub trait Dataset: Send + Sync {
    /// The item type handed out by [`item`](Dataset::item).
    type Item;

    /// Returns the number of sections.
    fn section_count(&self) -> usize;

    /// Returns the number of items in `section`, or 0 if it does not exist.
    fn item_count(&self, section: usize) -> usize;

    /// Returns the item at `(section, index)`, or `None` if out of range.
    fn item(&self, section: usize, index: usize) -> Option<Self::Item>;

    /// Returns the title of `section`, if it has one.
    fn section_title(&self, _section: usize) -> Option<String> {
        None
    }

    /// Returns `true` if `position` addresses an existing item.
    fn contains(&self, position: IndexPath) -> bool {
        position.section < self.section_count() && position.item < self.item_count(position.section)
    }
}

/// Signals emitted by [`SectionedDataset`] when its content changes.
#[derive(Default)]
pub struct DatasetSignals {
    /// Emitted after the whole dataset was replaced or cleared.
    pub reset: Signal<()>,
    /// Emitted after a section was appended, with its index.
    pub section_inserted: Signal<usize>,
    /// Emitted after an item was inserted, with its position.
    pub item_inserted: Signal<IndexPath>,
    /// Emitted after an item was removed, with its former position.
    pub item_removed: Signal<IndexPath>,
}

impl DatasetSignals {
    /// Creates a new set of dataset signals.
    pub fn new() -> Self {
        Self::default()
    }
}

/// One section of a [`SectionedDataset`].
#[derive(Debug, Clone, PartialEq)]
pub struct Section<T> {
    /// Optional header title.
    pub title: Option<String>,
    /// The items in display order.
    pub items: Vec<T>,
}

impl<T> Section<T> {
    /// Creates an untitled section.
    pub fn new(items: Vec<T>) -> Self {
        Self { title: None, items }
    }

    /// Creates a titled section.
    pub fn titled(title: impl Into<String>, items: Vec<T>) -> Self {
        Self {
            title: Some(title.into()),
            items,
        }
    }
}

/// A concrete, mutable dataset of sections.
///
/// Mutations take `&self` and emit [`DatasetSignals`] after the change, so a
/// dataset can be shared between an adapter and whatever produces content.
pub struct SectionedDataset<T> {
    sections: RwLock<Vec<Section<T>>>,
    signals: DatasetSignals,
}

impl<T: Clone + Send + Sync> SectionedDataset<T> {
    /// Creates a dataset from prebuilt sections.
    pub fn new(sections: Vec<Section<T>>) -> Self {
        Self {
            sections: RwLock::new(sections),
            signals: DatasetSignals::new(),
        }
    }

    /// Creates a dataset with no sections.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Creates a dataset with one untitled section.
    pub fn single_section(items: Vec<T>) -> Self {
        Self::new(vec![Section::new(items)])
    }

    /// Returns the change signals.
    pub fn signals(&self) -> &DatasetSignals {
        &self.signals
    }

    /// Appends a section, returning its index.
    pub fn push_section(&self, section: Section<T>) -> usize {
        let index = {
            let mut sections = self.sections.write();
            sections.push(section);
            sections.len() - 1
        };
        self.signals.section_inserted.emit(index);
        index
    }

    /// Appends an item to `section`.
    ///
    /// Returns the new item's position, or `None` if the section does not exist.
    pub fn push_item(&self, section: usize, item: T) -> Option<IndexPath> {
        let position = {
            let mut sections = self.sections.write();
            let target = sections.get_mut(section)?;
            target.items.push(item);
            IndexPath::new(section, target.items.len() - 1)
        };
        self.signals.item_inserted.emit(position);
        Some(position)
    }

    /// Removes and returns the item at `position`, if it exists.
    pub fn remove_item(&self, position: IndexPath) -> Option<T> {
        let removed = {
            let mut sections = self.sections.write();
            let target = sections.get_mut(position.section)?;
            if position.item >= target.items.len() {
                return None;
            }
            target.items.remove(position.item)
        };
        self.signals.item_removed.emit(position);
        Some(removed)
    }

    /// Replaces all sections.
    pub fn set_sections(&self, sections: Vec<Section<T>>) {
        *self.sections.write() = sections;
        self.signals.reset.emit(());
    }

    /// Removes all sections.
    pub fn clear(&self) {
        self.sections.write().clear();
        self.signals.reset.emit(());
    }

    /// Provides read access to the sections.
    pub fn sections(&self) -> impl std::ops::Deref<Target = Vec<Section<T>>> + '_ {
        self.sections.read()
    }
}

impl<T: Clone + Send + Sync> Dataset for SectionedDataset<T> {
    type Item = T;

    fn section_count(&self) -> usize {
        self.sections.read().len()
    }

    fn item_count(&self, section: usize) -> usize {
        self.sections
            .read()
            .get(section)
            .map_or(0, |s| s.items.len())
    }

    fn item(&self, section: usize, index: usize) -> Option<T> {
        self.sections
            .read()
            .get(section)
            .and_then(|s| s.items.get(index).cloned())
    }

    fn section_title(&self, section: usize) -> Option<String> {
        self.sections
            .read()
            .get(section)
            .and_then(|s| s.title.clone())
    }
}

impl<T: Clone + Send + Sync> Default for SectionedDataset<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn sample() -> SectionedDataset<String> {
        SectionedDataset::new(vec![
            Section::titled("Fruit", vec!["Apple".into(), "Banana".into(), "Cherry".into()]),
            Section::new(vec!["Carrot".into()]),
        ])
    }

    #[test]
    fn test_counts_and_items() {
        let data = sample();
        assert_eq!(data.section_count(), 2);
        assert_eq!(data.item_count(0), 3);
        assert_eq!(data.item_count(1), 1);
        assert_eq!(data.item_count(7), 0);
        assert_eq!(data.item(0, 1).as_deref(), Some("Banana"));
        assert_eq!(data.item(1, 1), None);
        assert_eq!(data.section_title(0).as_deref(), Some("Fruit"));
        assert_eq!(data.section_title(1), None);
    }

    #[test]
    fn test_contains() {
        let data = sample();
        assert!(data.contains(IndexPath::new(0, 2)));
        assert!(!data.contains(IndexPath::new(0, 3)));
        assert!(!data.contains(IndexPath::new(2, 0)));
    }

    #[test]
    fn test_push_item_emits_position() {
        let data = sample();
        let inserted = Arc::new(Mutex::new(Vec::new()));
        let recv = inserted.clone();
        data.signals().item_inserted.connect(move |&path| recv.lock().push(path));

        assert_eq!(data.push_item(1, "Leek".into()), Some(IndexPath::new(1, 1)));
        assert_eq!(data.push_item(5, "Nope".into()), None);
        assert_eq!(*inserted.lock(), vec![IndexPath::new(1, 1)]);
    }

    #[test]
    fn test_remove_item() {
        let data = sample();
        let removed = Arc::new(Mutex::new(Vec::new()));
        let recv = removed.clone();
        data.signals().item_removed.connect(move |&path| recv.lock().push(path));

        assert_eq!(data.remove_item(IndexPath::new(0, 0)).as_deref(), Some("Apple"));
        assert_eq!(data.remove_item(IndexPath::new(0, 9)), None);
        assert_eq!(data.item_count(0), 2);
        assert_eq!(*removed.lock(), vec![IndexPath::new(0, 0)]);
    }

    #[test]
    fn test_reset_on_clear_and_replace() {
        let data = sample();
        let resets = Arc::new(Mutex::new(0));
        let recv = resets.clone();
        data.signals().reset.connect(move |_| *recv.lock() += 1);

        data.set_sections(vec![Section::new(vec!["Only".into()])]);
        assert_eq!(data.section_count(), 1);
        data.clear();
        assert_eq!(data.section_count(), 0);
        assert_eq!(*resets.lock(), 2);
    }

    #[test]
    fn test_push_section() {
        let data = SectionedDataset::<u32>::empty();
        assert_eq!(data.push_section(Section::new(vec![1, 2])), 0);
        assert_eq!(data.push_section(Section::new(vec![])), 1);
        assert_eq!(data.item_count(0), 2);
        assert_eq!(data.sections().len(), 2);
    }
}
