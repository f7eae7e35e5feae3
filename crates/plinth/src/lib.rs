//! Plinth - view primitives for presenting one dataset on two list surfaces.
//!
//! This is the main crate. It re-exports the core view arena, signals and
//! properties from `plinth-core` and adds:
//!
//! - [`model`]: sectioned datasets and index paths
//! - [`list`]: cells, surfaces, the cell provider and the dual-backend adapter
//! - [`widget`]: the dual-surface switch, the toggle stack, displays and
//!   formatted labels
//! - [`controller`]: a controller that checks its outlets before loading
//! - [`config`]: presenter configuration loaded from TOML
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use plinth::prelude::*;
//!
//! let registry = SharedViewRegistry::new();
//! let grid = Surface::grid(&registry);
//! let rows = Surface::rows(&registry);
//! grid.register_cell("cover");
//! rows.register_cell("track");
//!
//! let data = Arc::new(SectionedDataset::new(vec![
//!     Section::titled("Side A", vec!["Intro", "Runway", "Drift"]),
//!     Section::titled("Side B", vec!["Outro"]),
//! ]));
//! let adapter = ListAdapter::new(
//!     DatasetSource::new(data, "cover", "track").with_text(|name| name.to_string()),
//! );
//!
//! let mut display = DualSurfaceDisplay::builder(&registry)
//!     .grid(grid.view_id())
//!     .row(rows.view_id())
//!     .initial_size_class(SizeClass::Compact)
//!     .build()
//!     .unwrap();
//! assert_eq!(display.visible_surface(), Some(rows.view_id()));
//!
//! let contents = rows.load(&adapter);
//! assert_eq!(contents.headers[1].as_deref(), Some("Side B"));
//! assert_eq!(contents.sections[0][1].text.as_deref(), Some("Runway"));
//!
//! display.toggle_foreground_view();
//! assert_eq!(grid.load(&adapter).cell_count(), 4);
//! ```

pub use plinth_core::*;

pub mod config;
pub mod controller;
pub mod list;
pub mod model;
pub mod prelude;
pub mod widget;
