//! Text measurement.
//!
//! The layout engine never inspects glyphs itself; it asks a [`TextMeasurer`]
//! for bounding boxes. [`MonospaceMeasurer`] is the reference implementation:
//! greedy word wrapping over Unicode display columns, one column being
//! `style.char_width` points wide.

use super::styles::StyledText;
use crate::view_state::types::Size;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Tolerance used when converting extents into whole lines/columns.
const EPSILON: f64 = 1e-6;

/// Text-measurement collaborator.
///
/// # Contract
/// - MUST be deterministic (same inputs, same output)
/// - MUST return [`Size::ZERO`] for empty text or non-positive `max_width`
/// - A `max_height` cap only ever reduces the returned height
pub trait TextMeasurer: Send + Sync {
    /// Bounding box of `text` wrapped within `max_width`, optionally capped
    /// to the whole lines that fit in `max_height`.
    fn bounding_size(&self, text: &StyledText, max_width: f64, max_height: Option<f64>) -> Size;

    /// Natural size of `text` with no width constraint (explicit line
    /// breaks only).
    fn natural_size(&self, text: &StyledText) -> Size;
}

/// Unicode-aware fixed-advance measurer.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonospaceMeasurer;

impl MonospaceMeasurer {
    /// Create a measurer.
    pub fn new() -> Self {
        Self
    }

    /// Wrap `text` to `columns` display columns.
    ///
    /// Returns the width (in columns) of every resulting line. Explicit
    /// newlines always break; words longer than a line are split by
    /// character.
    pub fn wrap_columns(text: &str, columns: usize) -> Vec<usize> {
        let columns = columns.max(1);
        let mut lines = Vec::new();

        for paragraph in text.split('\n') {
            let mut current = 0usize;
            let mut line_has_content = false;

            for word in paragraph.split_whitespace() {
                let word_width = UnicodeWidthStr::width(word);

                if word_width > columns {
                    if line_has_content {
                        lines.push(current);
                    }
                    current = 0;
                    for ch in word.chars() {
                        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
                        if current > 0 && current + w > columns {
                            lines.push(current);
                            current = 0;
                        }
                        current += w;
                    }
                    line_has_content = current > 0;
                    continue;
                }

                if !line_has_content {
                    current = word_width;
                    line_has_content = true;
                } else if current + 1 + word_width <= columns {
                    current += 1 + word_width;
                } else {
                    lines.push(current);
                    current = word_width;
                }
            }

            lines.push(current);
        }

        lines
    }

    fn columns_for(max_width: f64, char_width: f64) -> usize {
        ((max_width / char_width) + EPSILON).floor().max(1.0) as usize
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn bounding_size(&self, text: &StyledText, max_width: f64, max_height: Option<f64>) -> Size {
        if text.is_empty() || !(max_width.is_finite() && max_width > 0.0) {
            return Size::ZERO;
        }

        let style = text.style();
        let columns = Self::columns_for(max_width, style.char_width);
        let lines = Self::wrap_columns(text.text(), columns);

        let visible = match max_height {
            Some(cap) => {
                let fit = ((cap.max(0.0) / style.line_height) + EPSILON).floor() as usize;
                lines.len().min(fit)
            }
            None => lines.len(),
        };

        let widest = lines[..visible].iter().copied().max().unwrap_or(0);
        let width = (widest as f64 * style.char_width).min(max_width);
        let height = visible as f64 * style.line_height;

        Size::new(width, height)
    }

    fn natural_size(&self, text: &StyledText) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }

        let style = text.style();
        let lines: Vec<usize> = text
            .text()
            .split('\n')
            .map(UnicodeWidthStr::width)
            .collect();
        let widest = lines.iter().copied().max().unwrap_or(0);

        Size::new(
            widest as f64 * style.char_width,
            lines.len() as f64 * style.line_height,
        )
    }
}
