//! Logging and debugging facilities for Plinth.
//!
//! Plinth instruments its containers with the `tracing` crate. Nothing is
//! printed unless the application installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("plinth::switch=trace,plinth::cell=debug")
//!     .init();
//! ```
//!
//! Placeholder cell substitution is logged at `debug`, visibility
//! transitions at `trace`, and configuration failures at `error`.
//!
//! [`ViewTreeDebug`] renders a view arena as an indented tree:
//!
//! ```
//! use plinth_core::logging::ViewTreeDebug;
//! use plinth_core::view::SharedViewRegistry;
//!
//! let registry = SharedViewRegistry::new();
//! let stack = registry.register("ToggleStack");
//! let label = registry.register("Label");
//! registry.set_parent(label, Some(stack)).unwrap();
//!
//! let tree = ViewTreeDebug::minimal().format_all(&registry);
//! assert!(tree.contains("ToggleStack"));
//! ```

use std::fmt::Write as FmtWrite;

use crate::error::ViewResult;
use crate::view::{SharedViewRegistry, ViewId, ViewRegistry};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// View arena target.
    pub const VIEW: &str = "plinth_core::view";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "plinth_core::signal";
    /// Dual-backend list adapter target.
    pub const ADAPTER: &str = "plinth::adapter";
    /// Cell provider and placeholder substitution target.
    pub const CELL: &str = "plinth::cell";
    /// Dual-surface switch container target.
    pub const SWITCH: &str = "plinth::switch";
    /// Single-visible-child container target.
    pub const TOGGLE_STACK: &str = "plinth::toggle_stack";
    /// Formatted label target.
    pub const LABEL: &str = "plinth::label";
    /// Controller lifecycle target.
    pub const CONTROLLER: &str = "plinth::controller";
    /// Presenter configuration target.
    pub const CONFIG: &str = "plinth::config";
}

/// Style options for view tree visualization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
}

/// Configuration for view tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show view IDs.
    pub show_ids: bool,
    /// Whether to mark hidden views.
    pub show_visibility: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_visibility: true,
            max_depth: None,
        }
    }
}

/// Debug utility for visualizing a view arena.
#[derive(Debug, Clone, Default)]
pub struct ViewTreeDebug {
    options: TreeFormatOptions,
}

impl ViewTreeDebug {
    /// Create a visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Create a visualizer that prints only names, types and visibility.
    pub fn minimal() -> Self {
        Self::with_options(TreeFormatOptions {
            show_ids: false,
            ..Default::default()
        })
    }

    /// Format every tree in the registry, one per root view.
    pub fn format_all(&self, registry: &SharedViewRegistry) -> String {
        registry.read(|r| {
            let mut output = String::new();
            let _ = writeln!(output, "View Tree ({} total views):", r.view_count());
            let roots: Vec<ViewId> = r.root_views().collect();
            if roots.is_empty() {
                output.push_str("  (empty)\n");
            }
            for root in roots {
                // Roots come from the registry itself, so they are valid.
                let _ = self.format_subtree_into(r, root, 0, true, &mut output);
            }
            output
        })
    }

    /// Format the subtree rooted at `root`.
    pub fn format_subtree(&self, registry: &SharedViewRegistry, root: ViewId) -> ViewResult<String> {
        registry.read(|r| {
            let mut output = String::new();
            self.format_subtree_into(r, root, 0, true, &mut output)?;
            Ok(output)
        })
    }

    fn format_subtree_into(
        &self,
        registry: &ViewRegistry,
        id: ViewId,
        depth: usize,
        is_last: bool,
        output: &mut String,
    ) -> ViewResult<()> {
        if let Some(max) = self.options.max_depth {
            if depth > max {
                return Ok(());
            }
        }

        let name = registry.name(id)?;
        let type_name = registry.type_name(id)?;
        let children = registry.children(id)?;

        output.push_str(&self.build_prefix(depth, is_last));
        output.push_str(if name.is_empty() { "(unnamed)" } else { name });
        if self.options.show_ids {
            let _ = write!(output, " [{:?}]", id);
        }
        let _ = write!(output, " ({})", type_name);
        if self.options.show_visibility && registry.is_visible(id) == Some(false) {
            output.push_str(" hidden");
        }
        output.push('\n');

        let child_count = children.len();
        for (i, &child) in children.iter().enumerate() {
            self.format_subtree_into(registry, child, depth + 1, i + 1 == child_count, output)?;
        }
        Ok(())
    }

    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, tee, corner) = match self.options.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            prefix.push_str("  ");
        }
        prefix.push_str(if is_last { corner } else { tee });
        prefix.push(' ');
        prefix
    }
}
