//! Aspect-ratio-preserving image resizing onto an offscreen canvas.
//!
//! Renders a source image into a destination extent at a device pixel
//! scale, preserving aspect ratio under a [`FitMode`] policy, with
//! optional circular masking. The offscreen surface is an in-memory
//! [`RgbaImage`]; the output pixel buffer is always
//! `destination × scale` pixels with an alpha-capable backing, so
//! letterbox margins come out transparent.
//!
//! # Example
//!
//! ```
//! use fitkit::geometry::{FitMode, Size};
//! use fitkit::resize::{ResizeRequest, solid};
//! use image::Rgba;
//!
//! let source = solid(Rgba([40, 80, 120, 255]), Size::new(100.0, 50.0));
//! let output = ResizeRequest::new(Size::new(60.0, 60.0))
//!     .mode(FitMode::Fit)
//!     .scale(2.0)
//!     .render(&source)
//!     .unwrap();
//! assert_eq!(output.dimensions(), (120, 120));
//! ```

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use thiserror::Error;

use crate::geometry::{FitMode, Size, draw_rect};

/// Resize failure. A failed resize yields no image; callers fall back to
/// the original image or a placeholder.
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum ResizeError {
    /// Destination extent has zero area (in points or after scaling).
    #[error("destination size has no drawable area")]
    ZeroDestination,
    /// Source image has zero-area bounds.
    #[error("source image has zero-area bounds")]
    ZeroSource,
    /// Device pixel scale was not a finite positive number.
    #[error("device pixel scale must be finite and positive, got {0}")]
    InvalidScale(f64),
}

/// An aspect-preserving resize of a source image into a destination
/// extent.
///
/// Builder-style: construct with the destination, adjust the policy, then
/// [`render`](Self::render). Defaults: [`FitMode::Fill`] (contain), no
/// circular mask, device pixel scale 1.0.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResizeRequest {
    destination: Size,
    mode: FitMode,
    circular_mask: bool,
    scale: f64,
}

impl ResizeRequest {
    /// Resize into `destination` (in points) with default policy.
    pub fn new(destination: Size) -> Self {
        Self {
            destination,
            mode: FitMode::Fill,
            circular_mask: false,
            scale: 1.0,
        }
    }

    /// Set the fit/fill policy. See [`FitMode`] for the label mapping.
    pub fn mode(mut self, mode: FitMode) -> Self {
        self.mode = mode;
        self
    }

    /// Clip the output to the ellipse inscribed in the destination rect.
    pub fn circular_mask(mut self, mask: bool) -> Self {
        self.circular_mask = mask;
        self
    }

    /// Set the device pixel scale (2.0 or 3.0 on high-density displays).
    /// The output buffer is `destination × scale` pixels.
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Render `source` into a fresh canvas under this request.
    ///
    /// The source is resampled to the centered [`draw_rect`] and
    /// composited onto a transparent canvas; overflow under
    /// [`FitMode::Fit`] is cropped by the canvas bounds.
    pub fn render(&self, source: &RgbaImage) -> Result<RgbaImage, ResizeError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ResizeError::InvalidScale(self.scale));
        }
        if self.destination.is_empty() {
            return Err(ResizeError::ZeroDestination);
        }
        if source.width() == 0 || source.height() == 0 {
            return Err(ResizeError::ZeroSource);
        }

        let source_size = Size::new(f64::from(source.width()), f64::from(source.height()));
        let target = draw_rect(source_size, self.destination, self.mode);

        let canvas_w = pixel_extent(self.destination.width, self.scale);
        let canvas_h = pixel_extent(self.destination.height, self.scale);
        if canvas_w == 0 || canvas_h == 0 {
            return Err(ResizeError::ZeroDestination);
        }

        // Sub-point draw extents still resample to at least one pixel.
        let drawn_w = pixel_extent(target.width, self.scale).max(1);
        let drawn_h = pixel_extent(target.height, self.scale).max(1);
        let resampled = imageops::resize(source, drawn_w, drawn_h, FilterType::Triangle);

        let mut canvas = RgbaImage::new(canvas_w, canvas_h);
        let x = (target.x * self.scale).round() as i64;
        let y = (target.y * self.scale).round() as i64;
        imageops::overlay(&mut canvas, &resampled, x, y);

        if self.circular_mask {
            apply_ellipse_mask(&mut canvas);
        }
        Ok(canvas)
    }
}

/// A filled rectangle of `color` at `size` (in points, 1:1 pixel scale).
///
/// Extents are clamped to at least one pixel, so valid input has no
/// failure path.
pub fn solid(color: Rgba<u8>, size: Size) -> RgbaImage {
    let w = (size.width.round() as u32).max(1);
    let h = (size.height.round() as u32).max(1);
    RgbaImage::from_pixel(w, h, color)
}

/// A 1×1 image of `color`, for tiling and placeholder backgrounds.
pub fn solid_pixel(color: Rgba<u8>) -> RgbaImage {
    solid(color, Size::square(1))
}

/// Points to pixels at the given scale, rounded to nearest.
fn pixel_extent(points: f64, scale: f64) -> u32 {
    (points * scale).round().max(0.0) as u32
}

/// Clear alpha outside the ellipse inscribed in the canvas bounds.
/// Pixel centers decide membership.
fn apply_ellipse_mask(canvas: &mut RgbaImage) {
    let (w, h) = canvas.dimensions();
    let rx = f64::from(w) / 2.0;
    let ry = f64::from(h) / 2.0;
    for (x, y, pixel) in canvas.enumerate_pixels_mut() {
        let dx = (f64::from(x) + 0.5 - rx) / rx;
        let dy = (f64::from(y) + 0.5 - ry) / ry;
        if dx * dx + dy * dy > 1.0 {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }
}
