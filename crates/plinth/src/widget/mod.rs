//! Views for Plinth.
//!
//! - [`Display`]: the root view a controller presents, with an optional
//!   [`NavigationItem`] title
//! - [`DualSurfaceDisplay`]: shows either a grid or a row surface, switching
//!   on request or on size class changes
//! - [`ToggleStack`]: arranges children and shows exactly one of them
//! - [`FormattedLabel`]: renders assigned text through a template captured on
//!   first attachment
//!
//! Every view is a record in a [`SharedViewRegistry`](plinth_core::SharedViewRegistry)
//! and is addressed by its [`ViewId`](plinth_core::ViewId). Containers refer to
//! their children by handle, so a destroyed child never leaves a dangling
//! reference behind; operations on it are logged and skipped.

mod display;
mod dual_surface;
mod formatted_label;
mod toggle_stack;

pub use display::{AsDisplay, Display, NavigationItem};
pub use dual_surface::{
    DualSurfaceBuilder, DualSurfaceDisplay, ForegroundMode, ForegroundPolicy, SizeClass,
    SwitchError,
};
pub use formatted_label::{
    FormattedLabel, LabelFormat, LabelText, MAX_FIELD_WIDTH, SpanStyle, StyleSpan, StyledText,
    has_placeholders, render_template,
};
pub use toggle_stack::ToggleStack;
