//! Text styles used to pre-shape row content for measurement.
//!
//! Styles here carry only what measurement needs (advance width and line
//! height). Colors and font faces belong to the rendering host.

// ===== TextStyle =====

/// Metrics of a text style.
///
/// # Invariants
/// - `char_width > 0` and `line_height > 0` (enforced by [`TextStyle::new`],
///   which falls back to 1.0 for non-positive input)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Nominal font size in points.
    pub font_size: f64,
    /// Height of one rendered line.
    pub line_height: f64,
    /// Advance width of a single-column character.
    pub char_width: f64,
}

impl TextStyle {
    /// Create a style, replacing non-positive metrics with 1.0.
    pub fn new(font_size: f64, line_height: f64, char_width: f64) -> Self {
        let positive = |v: f64| if v.is_finite() && v > 0.0 { v } else { 1.0 };
        Self {
            font_size: positive(font_size),
            line_height: positive(line_height),
            char_width: positive(char_width),
        }
    }

    /// Derive a style from a font size using typical proportions
    /// (line height 1.2x, average advance 0.5x).
    pub fn from_font_size(font_size: f64) -> Self {
        Self::new(font_size, font_size * 1.2, font_size * 0.5)
    }
}

// ===== StyledText =====

/// Text paired with the style it will be rendered in.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledText {
    text: String,
    style: TextStyle,
}

impl StyledText {
    /// Attach a style to text.
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Raw text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Style metrics.
    pub fn style(&self) -> TextStyle {
        self.style
    }

    /// Line height of the style.
    pub fn line_height(&self) -> f64 {
        self.style.line_height
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

// ===== Typography =====

/// Styles for every text element of the review list.
#[derive(Debug, Clone, PartialEq)]
pub struct Typography {
    /// Author name.
    pub username: TextStyle,
    /// Review body.
    pub body: TextStyle,
    /// Creation timestamp.
    pub created: TextStyle,
    /// "Show more" / "Hide" toggle labels.
    pub toggle: TextStyle,
    /// Footer "N reviews" label.
    pub review_count: TextStyle,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            username: TextStyle::from_font_size(17.0),
            body: TextStyle::from_font_size(16.0),
            created: TextStyle::from_font_size(14.0),
            toggle: TextStyle::from_font_size(16.0),
            review_count: TextStyle::from_font_size(15.0),
        }
    }
}

/// Label of the toggle affordance while a review is collapsed.
pub const SHOW_MORE_LABEL: &str = "Show more...";
/// Label of the toggle affordance while a review is expanded.
pub const HIDE_LABEL: &str = "Hide";

/// Render the footer label for a total review count.
pub fn review_count_label(count: usize) -> String {
    if count == 1 {
        "1 review".to_string()
    } else {
        format!("{count} reviews")
    }
}
