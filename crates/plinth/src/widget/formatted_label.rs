//! A label that renders assigned text through a format template.
//!
//! A [`FormattedLabel`] decides how to treat text the first time it is
//! attached to a superview. If the text it holds at that moment contains
//! printf-style placeholders, that text becomes the label's template and
//! every later plain-text assignment is rendered through it. Otherwise the
//! label is literal and shows assigned text as-is. Styled text always
//! bypasses the template.
//!
//! # Example
//!
//! ```
//! use plinth::widget::FormattedLabel;
//! use plinth_core::SharedViewRegistry;
//!
//! let registry = SharedViewRegistry::new();
//! let header = registry.register("Header");
//!
//! let mut label = FormattedLabel::new(&registry).with_text("%@ tracks");
//! label.attach(header).unwrap();
//!
//! label.set_text(Some("12".to_string()));
//! assert_eq!(label.text().as_deref(), Some("12 tracks"));
//! ```

use std::ops::Range;
use std::sync::LazyLock;

use plinth_core::logging::targets;
use plinth_core::{Property, SharedViewRegistry, Signal, View, ViewId, ViewResult};
use regex::{Captures, Regex};

/// Matches one printf-style conversion, or an escaped percent sign.
static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"%%|%(?:\d+\$)?(?P<flags>[-+ 0#]*)(?P<width>\d+)?(?:\.(?P<precision>\d+))?(?:hh|h|ll|l|q|z|t|j|L)?(?P<conv>[@sdiuxXofFeEgGc])",
    )
    .unwrap()
});

/// Largest field width or precision honored in a placeholder.
pub const MAX_FIELD_WIDTH: usize = 256;

// ============================================================================
// Label Format
// ============================================================================

/// How a label treats plain text assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelFormat {
    /// Assigned text is substituted into every placeholder of the template.
    Template(String),
    /// Assigned text is shown verbatim.
    Literal,
}

impl LabelFormat {
    /// Picks the format for `text`: a template iff it contains placeholders.
    pub fn detect(text: Option<&str>) -> Self {
        match text {
            Some(text) if has_placeholders(text) => Self::Template(text.to_string()),
            _ => Self::Literal,
        }
    }

    /// Returns `true` for a template format.
    pub fn is_template(&self) -> bool {
        matches!(self, Self::Template(_))
    }

    /// Renders `value` according to this format.
    pub fn render(&self, value: &str) -> String {
        match self {
            Self::Template(template) => render_template(template, value),
            Self::Literal => value.to_string(),
        }
    }
}

/// Returns `true` if `text` contains at least one placeholder.
///
/// An escaped percent sign (`%%`) is not a placeholder.
pub fn has_placeholders(text: &str) -> bool {
    PLACEHOLDER_REGEX
        .captures_iter(text)
        .any(|caps| caps.name("conv").is_some())
}

/// Substitutes `value` into every placeholder of `template`.
pub fn render_template(template: &str, value: &str) -> String {
    PLACEHOLDER_REGEX
        .replace_all(template, |caps: &Captures<'_>| render_placeholder(caps, value))
        .into_owned()
}

fn render_placeholder(caps: &Captures<'_>, value: &str) -> String {
    let Some(conv) = caps.name("conv").map(|m| m.as_str()) else {
        return "%".to_string();
    };
    let flags = caps.name("flags").map_or("", |m| m.as_str());
    let width = caps
        .name("width")
        .map_or(0, |m| m.as_str().parse::<usize>().unwrap_or(usize::MAX))
        .min(MAX_FIELD_WIDTH);
    let precision = caps
        .name("precision")
        .map(|m| m.as_str().parse::<usize>().unwrap_or(usize::MAX).min(MAX_FIELD_WIDTH));

    let body = match conv {
        "d" | "i" | "u" => value.trim().parse::<i64>().ok().map(|n| {
            if flags.contains('+') && n >= 0 {
                format!("+{n}")
            } else {
                n.to_string()
            }
        }),
        "x" => value.trim().parse::<i64>().ok().map(|n| format!("{n:x}")),
        "X" => value.trim().parse::<i64>().ok().map(|n| format!("{n:X}")),
        "o" => value.trim().parse::<i64>().ok().map(|n| format!("{n:o}")),
        "f" | "F" => value
            .trim()
            .parse::<f64>()
            .ok()
            .map(|n| format!("{:.*}", precision.unwrap_or(6), n)),
        "e" | "E" => value.trim().parse::<f64>().ok().map(|n| {
            let s = format!("{:.*e}", precision.unwrap_or(6), n);
            if conv == "E" { s.to_uppercase() } else { s }
        }),
        "g" | "G" => value.trim().parse::<f64>().ok().map(|n| n.to_string()),
        "c" => Some(value.chars().next().map(String::from).unwrap_or_default()),
        _ => Some(match precision {
            Some(max) => value.chars().take(max).collect(),
            None => value.to_string(),
        }),
    };
    let numeric = body.is_some() && !matches!(conv, "@" | "s" | "c");
    // Values that do not parse as the requested number are shown as given.
    let body = body.unwrap_or_else(|| value.to_string());

    pad(&body, width, flags.contains('-'), numeric && flags.contains('0'))
}

fn pad(body: &str, width: usize, left_align: bool, zero_fill: bool) -> String {
    let len = body.chars().count();
    if len >= width {
        return body.to_string();
    }
    let fill = width - len;
    let mut out = String::with_capacity(body.len() + fill);
    if left_align {
        out.push_str(body);
        out.extend(std::iter::repeat_n(' ', fill));
    } else if zero_fill {
        let (sign, digits) = match body.strip_prefix(['-', '+']) {
            Some(rest) => (&body[..1], rest),
            None => ("", body),
        };
        out.push_str(sign);
        out.extend(std::iter::repeat_n('0', fill));
        out.push_str(digits);
    } else {
        out.extend(std::iter::repeat_n(' ', fill));
        out.push_str(body);
    }
    out
}

// ============================================================================
// Styled Text
// ============================================================================

/// Visual attributes of a run of styled text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpanStyle {
    /// Bold weight.
    pub bold: bool,
    /// Italic slant.
    pub italic: bool,
    /// Underlined.
    pub underline: bool,
}

/// A styled run within [`StyledText`], addressed by byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSpan {
    /// Byte range of the run.
    pub range: Range<usize>,
    /// The run's attributes.
    pub style: SpanStyle,
}

/// Text carrying its own styling. Never passed through a template.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledText {
    text: String,
    spans: Vec<StyleSpan>,
}

impl StyledText {
    /// Creates unstyled text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spans: Vec::new(),
        }
    }

    /// Adds a styled run using builder pattern.
    ///
    /// Ranges past the end of the text, or not on character boundaries, are
    /// ignored.
    pub fn with_span(mut self, range: Range<usize>, style: SpanStyle) -> Self {
        if range.start <= range.end
            && self.text.is_char_boundary(range.start)
            && self.text.is_char_boundary(range.end)
        {
            self.spans.push(StyleSpan { range, style });
        }
        self
    }

    /// The plain text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The styled runs.
    pub fn spans(&self) -> &[StyleSpan] {
        &self.spans
    }
}

/// What a label currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelText {
    /// Plain text.
    Plain(String),
    /// Styled text.
    Styled(StyledText),
}

impl LabelText {
    /// The plain text, without styling.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(text) => text,
            Self::Styled(styled) => styled.as_str(),
        }
    }
}

// ============================================================================
// FormattedLabel
// ============================================================================

/// A label that formats assigned text through a template captured on first
/// attachment.
///
/// # Signals
///
/// - `text_changed(Option<String>)`: Emitted when the shown text changes
pub struct FormattedLabel {
    id: ViewId,
    registry: SharedViewRegistry,
    format: Option<LabelFormat>,
    text: Property<Option<LabelText>>,

    /// Signal emitted when the shown text changes.
    pub text_changed: Signal<Option<String>>,
}

impl FormattedLabel {
    /// Creates an empty, unattached label.
    pub fn new(registry: &SharedViewRegistry) -> Self {
        Self {
            id: registry.register("FormattedLabel"),
            registry: registry.clone(),
            format: None,
            text: Property::new(None),
            text_changed: Signal::new(),
        }
    }

    /// Sets the initial text using builder pattern.
    ///
    /// Text present when the label is first attached decides its format.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.text.set_silent(Some(LabelText::Plain(text.into())));
        self
    }

    /// Attaches the label to `superview`.
    ///
    /// The first attachment fixes the label's [`LabelFormat`]; later
    /// attachments only move the label.
    pub fn attach(&mut self, superview: ViewId) -> ViewResult<()> {
        self.registry.set_parent(self.id, Some(superview))?;
        if self.format.is_none() {
            let format = self.text.with(|text| match text {
                Some(LabelText::Plain(text)) => LabelFormat::detect(Some(text)),
                _ => LabelFormat::Literal,
            });
            tracing::trace!(target: targets::LABEL, id = ?self.id, template = format.is_template(), "label format fixed");
            self.format = Some(format);
        }
        Ok(())
    }

    /// Detaches the label from its superview. The format is kept.
    pub fn detach(&mut self) -> ViewResult<()> {
        self.registry.set_parent(self.id, None)
    }

    /// Returns `true` once the label has been attached at least once.
    pub fn is_format_fixed(&self) -> bool {
        self.format.is_some()
    }

    /// The format chosen at first attachment.
    pub fn format(&self) -> Option<&LabelFormat> {
        self.format.as_ref()
    }

    /// Assigns plain text.
    ///
    /// Renders `text` through the template if the label has one; otherwise
    /// shows it verbatim. `None` clears the label.
    pub fn set_text(&self, text: Option<String>) -> bool {
        let shown = text.map(|value| match &self.format {
            Some(format) => format.render(&value),
            None => value,
        });
        self.update(shown.map(LabelText::Plain))
    }

    /// Assigns styled text, bypassing any template.
    pub fn set_attributed_text(&self, text: StyledText) -> bool {
        self.update(Some(LabelText::Styled(text)))
    }

    /// The shown text, without styling.
    pub fn text(&self) -> Option<String> {
        self.text.with(|text| text.as_ref().map(|t| t.as_str().to_string()))
    }

    /// The shown text, with styling if any.
    pub fn label_text(&self) -> Option<LabelText> {
        self.text.get()
    }

    fn update(&self, text: Option<LabelText>) -> bool {
        let plain = text.as_ref().map(|t| t.as_str().to_string());
        if self.text.set(text) {
            self.text_changed.emit(plain);
            true
        } else {
            false
        }
    }
}

impl View for FormattedLabel {
    fn view_id(&self) -> ViewId {
        self.id
    }
}

impl Drop for FormattedLabel {
    fn drop(&mut self) {
        let _ = self.registry.unregister(self.id);
    }
}

impl std::fmt::Debug for FormattedLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormattedLabel")
            .field("id", &self.id)
            .field("format", &self.format)
            .field("text", &self.text())
            .finish()
    }
}

static_assertions::assert_impl_all!(FormattedLabel: Send, Sync);
