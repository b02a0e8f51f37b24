//! Core geometry newtypes.
//!
//! All values are in layout points. Nothing here clamps implicitly; callers
//! that accept untrusted sizes (widths from the host) sanitize them first via
//! [`sanitize_extent`].

/// Clamp a host-provided extent to a finite, non-negative value.
///
/// NaN and negative values become `0.0`; infinity is kept out as well so
/// every derived frame stays finite.
pub fn sanitize_extent(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// A point in layout space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Size {
    /// The empty size.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either extent is zero (nothing would be drawn).
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// An axis-aligned rectangle.
///
/// # Invariants
/// - `size.width >= 0` and `size.height >= 0` for rectangles produced by the
///   layout engine
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Point,
    /// Extent.
    pub size: Size,
}

impl Rect {
    /// The zero rectangle, used for sections that are not shown.
    pub const ZERO: Self = Self {
        origin: Point::new(0.0, 0.0),
        size: Size::ZERO,
    };

    /// Create a rectangle from origin and size.
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Create a rectangle from raw components.
    pub const fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(Point::new(x, y), Size::new(width, height))
    }

    /// Left edge.
    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    /// Top edge.
    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    /// Right edge.
    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    /// Bottom edge.
    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    /// Width.
    pub fn width(&self) -> f64 {
        self.size.width
    }

    /// Height.
    pub fn height(&self) -> f64 {
        self.size.height
    }

    /// True when the rectangle has zero area.
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }
}

/// Insets from each edge of a container to its content.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeInsets {
    /// Top inset.
    pub top: f64,
    /// Left inset.
    pub left: f64,
    /// Bottom inset.
    pub bottom: f64,
    /// Right inset.
    pub right: f64,
}

impl EdgeInsets {
    /// Create insets.
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Sum of left and right insets.
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Sum of top and bottom insets.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod sanitize {
        use super::*;

        #[test]
        fn keeps_positive_values() {
            assert_eq!(sanitize_extent(375.0), 375.0);
        }

        #[test]
        fn clamps_negative_to_zero() {
            assert_eq!(sanitize_extent(-10.0), 0.0);
        }

        #[test]
        fn clamps_nan_and_infinity() {
            assert_eq!(sanitize_extent(f64::NAN), 0.0);
            assert_eq!(sanitize_extent(f64::INFINITY), 0.0);
        }
    }

    mod rect {
        use super::*;

        #[test]
        fn edges_follow_origin_and_size() {
            let r = Rect::from_xywh(12.0, 9.0, 36.0, 40.0);
            assert_eq!(r.min_x(), 12.0);
            assert_eq!(r.min_y(), 9.0);
            assert_eq!(r.max_x(), 48.0);
            assert_eq!(r.max_y(), 49.0);
        }

        #[test]
        fn zero_is_empty() {
            assert!(Rect::ZERO.is_empty());
            assert_eq!(Rect::default(), Rect::ZERO);
        }

        #[test]
        fn zero_width_is_empty() {
            assert!(Rect::from_xywh(5.0, 5.0, 0.0, 10.0).is_empty());
        }

        #[test]
        fn non_zero_is_not_empty() {
            assert!(!Rect::from_xywh(0.0, 0.0, 1.0, 1.0).is_empty());
        }
    }

    #[test]
    fn insets_sum_per_axis() {
        let insets = EdgeInsets::new(9.0, 12.0, 9.0, 12.0);
        assert_eq!(insets.horizontal(), 24.0);
        assert_eq!(insets.vertical(), 18.0);
    }
}
