//! Outletted controller.
//!
//! An [`OutlettedController`] pairs a model with the display that presents
//! it. Both outlets are supplied through a builder and checked once, by
//! [`load`](OutlettedController::load), before the controller is used. A
//! controller missing either outlet is misconfigured and refuses to load.
//!
//! The controller holds its model weakly; whoever created the model keeps it
//! alive.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use plinth::controller::{Model, OutlettedController};
//! use plinth::widget::Display;
//! use plinth_core::SharedViewRegistry;
//!
//! struct Inbox;
//! impl Model for Inbox {}
//!
//! let registry = SharedViewRegistry::new();
//! let model = Arc::new(Inbox);
//! let mut controller = OutlettedController::builder()
//!     .model(&model)
//!     .display(Display::new(&registry))
//!     .title("Inbox")
//!     .build();
//!
//! controller.load().unwrap();
//! assert_eq!(controller.display().and_then(|d| d.title()).as_deref(), Some("Inbox"));
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use plinth_core::Signal;
use plinth_core::logging::targets;
use thiserror::Error;

use crate::list::{ListAdapter, ListSource};
use crate::model::SectionedDataset;
use crate::widget::{AsDisplay, Display, NavigationItem};

/// Marker for anything a controller can present.
///
/// There are no required members.
pub trait Model: Send + Sync {}

impl<S: ListSource> Model for ListAdapter<S> {}

impl<T: Clone + Send + Sync> Model for SectionedDataset<T> {}

/// Why a controller could not load.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerError {
    /// No model was supplied, or it has been dropped.
    #[error("controller has no model outlet")]
    MissingModel,

    /// No display was supplied.
    #[error("controller has no display outlet")]
    MissingDisplay,

    /// `load` was already called successfully.
    #[error("controller is already loaded")]
    AlreadyLoaded,
}

/// Collects the outlets of an [`OutlettedController`].
pub struct OutlettedControllerBuilder<M: ?Sized + Model, D: AsDisplay = Display> {
    model: Option<Weak<M>>,
    display: Option<D>,
    title: Option<String>,
}

impl<M: ?Sized + Model, D: AsDisplay> OutlettedControllerBuilder<M, D> {
    /// Connects the model outlet. Only a weak handle is kept.
    pub fn model(mut self, model: &Arc<M>) -> Self {
        self.model = Some(Arc::downgrade(model));
        self
    }

    /// Connects the display outlet.
    pub fn display(mut self, display: D) -> Self {
        self.display = Some(display);
        self
    }

    /// Sets the navigation title shown once loaded.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builds the controller. Outlets are checked by [`OutlettedController::load`].
    pub fn build(self) -> OutlettedController<M, D> {
        let navigation_item = NavigationItem::new();
        if let Some(title) = self.title {
            navigation_item.set_title(Some(title));
        }
        OutlettedController {
            model: self.model,
            display: self.display,
            navigation_item: Arc::new(navigation_item),
            loaded: false,
            did_load: Signal::new(),
        }
    }
}

/// A controller with model and display outlets.
///
/// # Signals
///
/// - `did_load()`: Emitted once, after a successful [`load`](Self::load)
pub struct OutlettedController<M: ?Sized + Model, D: AsDisplay = Display> {
    model: Option<Weak<M>>,
    display: Option<D>,
    navigation_item: Arc<NavigationItem>,
    loaded: bool,

    /// Signal emitted after the controller loads.
    pub did_load: Signal<()>,
}

impl<M: ?Sized + Model, D: AsDisplay> OutlettedController<M, D> {
    /// Starts collecting outlets.
    pub fn builder() -> OutlettedControllerBuilder<M, D> {
        OutlettedControllerBuilder {
            model: None,
            display: None,
            title: None,
        }
    }

    /// Checks the outlets and wires the display to the navigation item.
    ///
    /// Fails without side effects if an outlet is missing or the controller
    /// is already loaded.
    pub fn load(&mut self) -> Result<(), ControllerError> {
        if self.loaded {
            return Err(ControllerError::AlreadyLoaded);
        }
        if self.model().is_none() {
            tracing::error!(target: targets::CONTROLLER, "model outlet is not connected");
            return Err(ControllerError::MissingModel);
        }
        let Some(display) = &self.display else {
            tracing::error!(target: targets::CONTROLLER, "display outlet is not connected");
            return Err(ControllerError::MissingDisplay);
        };

        display.as_display().set_navigation_item(&self.navigation_item);
        self.loaded = true;
        tracing::debug!(target: targets::CONTROLLER, title = ?self.navigation_item.title(), "controller loaded");
        self.did_load.emit(());
        Ok(())
    }

    /// Returns `true` after a successful [`load`](Self::load).
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// The model, if connected and still alive.
    pub fn model(&self) -> Option<Arc<M>> {
        self.model.as_ref().and_then(Weak::upgrade)
    }

    /// The display, if connected.
    pub fn display(&self) -> Option<&D> {
        self.display.as_ref()
    }

    /// Mutable access to the display, if connected.
    pub fn display_mut(&mut self) -> Option<&mut D> {
        self.display.as_mut()
    }

    /// The navigation item the display is wired to on load.
    pub fn navigation_item(&self) -> &Arc<NavigationItem> {
        &self.navigation_item
    }
}

impl<M: ?Sized + Model, D: AsDisplay> fmt::Debug for OutlettedController<M, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutlettedController")
            .field("model", &self.model().is_some())
            .field("display", &self.display.is_some())
            .field("loaded", &self.loaded)
            .field("navigation_item", &self.navigation_item)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Dataset;
    use plinth_core::SharedViewRegistry;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Notes;
    impl Model for Notes {}

    #[test]
    fn test_load_wires_navigation_item() {
        let registry = SharedViewRegistry::new();
        let model = Arc::new(Notes);
        let mut controller = OutlettedController::builder()
            .model(&model)
            .display(Display::new(&registry))
            .title("Notes")
            .build();

        let loads = Arc::new(AtomicUsize::new(0));
        let l = loads.clone();
        controller.did_load.connect(move |_| {
            l.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!controller.is_loaded());
        assert_eq!(controller.load(), Ok(()));
        assert!(controller.is_loaded());
        assert_eq!(loads.load(Ordering::SeqCst), 1);

        let display = controller.display().unwrap();
        assert_eq!(display.title().as_deref(), Some("Notes"));
        controller.navigation_item().set_title(Some("Archive".into()));
        assert_eq!(controller.display().unwrap().title().as_deref(), Some("Archive"));
    }

    #[test]
    fn test_missing_model() {
        let registry = SharedViewRegistry::new();
        let mut controller: OutlettedController<Notes> = OutlettedController::builder()
            .display(Display::new(&registry))
            .build();
        assert_eq!(controller.load(), Err(ControllerError::MissingModel));
        assert!(!controller.is_loaded());
    }

    #[test]
    fn test_dropped_model_is_missing() {
        let registry = SharedViewRegistry::new();
        let model = Arc::new(Notes);
        let mut controller = OutlettedController::builder()
            .model(&model)
            .display(Display::new(&registry))
            .build();
        drop(model);
        assert!(controller.model().is_none());
        assert_eq!(controller.load(), Err(ControllerError::MissingModel));
    }

    #[test]
    fn test_missing_display() {
        let model = Arc::new(Notes);
        let mut controller: OutlettedController<Notes> =
            OutlettedController::builder().model(&model).build();
        assert_eq!(controller.load(), Err(ControllerError::MissingDisplay));
    }

    #[test]
    fn test_second_load_fails() {
        let registry = SharedViewRegistry::new();
        let model = Arc::new(Notes);
        let mut controller = OutlettedController::builder()
            .model(&model)
            .display(Display::new(&registry))
            .build();
        controller.load().unwrap();
        assert_eq!(controller.load(), Err(ControllerError::AlreadyLoaded));
    }

    #[test]
    fn test_trait_object_model() {
        let registry = SharedViewRegistry::new();
        let model: Arc<dyn Model> = Arc::new(Notes);
        let mut controller: OutlettedController<dyn Model> = OutlettedController::builder()
            .model(&model)
            .display(Display::new(&registry))
            .build();
        assert!(controller.load().is_ok());
        assert!(controller.model().is_some());
    }

    #[test]
    fn test_dataset_is_a_model() {
        let registry = SharedViewRegistry::new();
        let data = Arc::new(SectionedDataset::single_section(vec![1, 2, 3]));
        let mut controller = OutlettedController::builder()
            .model(&data)
            .display(Display::new(&registry))
            .build();
        controller.load().unwrap();
        assert_eq!(controller.model().map(|m| m.section_count()), Some(1));
    }
}
