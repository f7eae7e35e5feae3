//! Content model for Plinth list surfaces.
//!
//! - `IndexPath`: addresses an item by section and position
//! - `Dataset`: the read interface adapters query
//! - `SectionedDataset`: a ready-made, mutable dataset with change signals
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────┐
//! │   Dataset   │────>│ ListAdapter │────>│ Grid surface │
//! │             │     │             │────>│ Row surface  │
//! └─────────────┘     └─────────────┘     └──────────────┘
//! ```

mod dataset;
mod index;

pub use dataset::{Dataset, DatasetSignals, Section, SectionedDataset};
pub use index::IndexPath;
