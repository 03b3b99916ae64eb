//! UI-layer helper components: decimal-accurate rounding, aspect-ratio
//! image fitting, and content-size auto-height.
//!
//! Three independent components with no shared state:
//!
//! - [`rounding`] — decimal-accurate rounding of binary floats under four
//!   rounding policies, plus clean display formatting
//! - [`resize`] — aspect-preserving image resizing with fit/fill policies,
//!   device pixel scaling, and circular masking
//! - [`autofit`] — reactive height-constraint fitting driven by a
//!   container's content-size notifications
//!
//! [`geometry`] carries the shared size/rect/inset value types and the
//! pure fitting math the resizer builds on.

#![forbid(unsafe_code)]

pub mod autofit;
pub mod geometry;
pub mod resize;
pub mod rounding;

// Re-exports: core types from each component
pub use autofit::{
    AutoFitConfig, ContainerId, ContentSizeAutoFitter, LayoutAttribute, LayoutConstraint,
    LayoutRelation, ObservationToken, ScrollContainer,
};
pub use geometry::{EdgeInsets, FitMode, Rect, Size, draw_rect, fitted_size, scale_ratio};
pub use resize::{ResizeError, ResizeRequest, solid, solid_pixel};
pub use rounding::{
    RoundingError, RoundingMode, ceil_to, clean_decimal, floor_to, round_to, round_to_places,
};
