//! Sizes, rects, edge insets, and aspect-ratio fitting math.
//!
//! All values are in UI points (`f64`). Pure geometry — no pixel
//! operations, no allocations.
//!
//! # Example
//!
//! ```
//! use fitkit::geometry::{FitMode, Size, draw_rect};
//!
//! // 1000×500 source into a 400×300 box, letterboxed.
//! let rect = draw_rect(Size::new(1000.0, 500.0), Size::new(400.0, 300.0), FitMode::Fill);
//! assert_eq!(rect.width, 400.0);
//! assert_eq!(rect.height, 200.0);
//! assert_eq!(rect.y, 50.0);
//! ```

use num_traits::ToPrimitive;

/// Width × height extent in UI points.
///
/// Constructors clamp negative components to zero, so a constructed
/// size always has `width >= 0` and `height >= 0`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in points.
    pub width: f64,
    /// Height in points.
    pub height: f64,
}

impl Size {
    /// Create a new size. Negative components clamp to zero.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Create a square size from any numeric side length.
    ///
    /// Guarantees `width == height`. Values that cannot be represented
    /// as `f64` (or are negative) clamp to zero.
    ///
    /// ```
    /// use fitkit::geometry::Size;
    ///
    /// assert_eq!(Size::square(8), Size::new(8.0, 8.0));
    /// assert_eq!(Size::square(2.5f32), Size::new(2.5, 2.5));
    /// ```
    pub fn square<T: ToPrimitive>(side: T) -> Self {
        let side = side.to_f64().unwrap_or(0.0).max(0.0);
        Self {
            width: side,
            height: side,
        }
    }

    /// Whether either dimension is zero (no drawable area).
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Multiply both dimensions by a factor.
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }
}

/// Axis-aligned rectangle in UI points.
///
/// Unlike [`Size`], the origin may be negative — a draw rect centered on a
/// smaller destination overflows symmetrically into negative coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect of the given size with origin `(0, 0)`.
    pub const fn from_size(size: Size) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: size.width,
            height: size.height,
        }
    }

    /// Square rect with origin `(0, 0)`.
    pub fn square<T: ToPrimitive>(side: T) -> Self {
        Self::from_size(Size::square(side))
    }

    /// The rect's extent, negative dimensions clamped to zero.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Insets from the edges of a rectangle, in UI points.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EdgeInsets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl EdgeInsets {
    /// All edges zero.
    pub const ZERO: Self = Self {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    /// Create insets with each edge given explicitly.
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// The same inset on all four edges.
    pub const fn uniform(edge: f64) -> Self {
        Self {
            top: edge,
            left: edge,
            bottom: edge,
            right: edge,
        }
    }

    /// Combined vertical inset (`top + bottom`).
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    /// Combined horizontal inset (`left + right`).
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }
}

/// How to scale a source into a destination while preserving aspect ratio.
///
/// The labels are kept compatible with the API this crate replaces, and
/// they are **inverted** relative to common UI convention:
///
/// - [`Fill`](Self::Fill) selects `min(width_ratio, height_ratio)` — the
///   source is fully contained in the destination, possibly letterboxed
///   (what CSS calls `contain`).
/// - [`Fit`](Self::Fit) selects `max(width_ratio, height_ratio)` — the
///   source fully covers the destination, possibly cropped (what CSS calls
///   `cover`).
///
/// Callers depend on this exact mapping; do not "fix" the names.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FitMode {
    /// Cover the destination, cropping overflow (`max` ratio).
    Fit,
    /// Contain within the destination, leaving margins (`min` ratio).
    #[default]
    Fill,
}

/// Scale factor that maps `source` into `destination` under `mode`.
///
/// Both sizes must be non-empty; an empty source yields a non-finite ratio
/// that the rendering layer rejects before use.
pub fn scale_ratio(source: Size, destination: Size, mode: FitMode) -> f64 {
    let width_ratio = destination.width / source.width;
    let height_ratio = destination.height / source.height;
    match mode {
        FitMode::Fill => width_ratio.min(height_ratio),
        FitMode::Fit => width_ratio.max(height_ratio),
    }
}

/// Source size scaled by the [`scale_ratio`], each dimension floored.
pub fn fitted_size(source: Size, destination: Size, mode: FitMode) -> Size {
    let ratio = scale_ratio(source, destination, mode);
    Size::new(
        (source.width * ratio).floor(),
        (source.height * ratio).floor(),
    )
}

/// Rectangle the source should be drawn into, centered on the destination.
///
/// Overflow (under [`FitMode::Fit`]) and underflow (under
/// [`FitMode::Fill`]) are split evenly between the two sides of each axis,
/// so the origin may be negative.
pub fn draw_rect(source: Size, destination: Size, mode: FitMode) -> Rect {
    let scaled = fitted_size(source, destination, mode);
    Rect::new(
        -(scaled.width - destination.width) / 2.0,
        -(scaled.height - destination.height) / 2.0,
        scaled.width,
        scaled.height,
    )
}
