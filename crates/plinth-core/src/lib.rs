//! Core systems for Plinth.
//!
//! This crate provides the foundation the Plinth view primitives are built on:
//!
//! - **View Arena**: views addressed by stable [`ViewId`] handles, with
//!   visibility and superview/subview relationships
//! - **Signal/Slot System**: synchronous change notification
//! - **Property System**: values with change detection
//! - **Logging**: `tracing` targets and view tree diagnostics
//!
//! # Example
//!
//! ```
//! use plinth_core::{SharedViewRegistry, Signal};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//!
//! let registry = SharedViewRegistry::new();
//! let grid = registry.register("GridSurface");
//!
//! let hidden = Arc::new(AtomicBool::new(false));
//! let visibility_changed = Signal::<bool>::new();
//! let flag = hidden.clone();
//! visibility_changed.connect(move |&visible| flag.store(!visible, Ordering::SeqCst));
//!
//! if registry.set_visible(grid, false).unwrap() {
//!     visibility_changed.emit(false);
//! }
//! assert!(hidden.load(Ordering::SeqCst));
//! ```

mod error;
pub mod logging;
pub mod property;
pub mod signal;
pub mod view;

pub use error::{ViewError, ViewResult};
pub use logging::{TreeFormatOptions, TreeStyle, ViewTreeDebug};
pub use property::Property;
pub use signal::{ConnectionId, Signal};
pub use view::{SharedViewRegistry, View, ViewId, ViewRegistry};
