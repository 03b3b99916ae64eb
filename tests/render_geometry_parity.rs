//! Rendered pixels vs pure geometry.
//!
//! The geometry module predicts where the source lands on the canvas;
//! the resizer actually resamples and composites pixels. For a grid of
//! source sizes, destinations, scales, and both fit modes, the opaque
//! bounding box of the rendered output must equal the predicted draw
//! rect (converted to pixels and clipped to the canvas). A wrong ratio,
//! a wrong floor, or an off-center placement all show up as a mismatched
//! bounding box.

use fitkit::geometry::{FitMode, Size, draw_rect};
use fitkit::resize::{ResizeRequest, solid};
use image::{Rgba, RgbaImage};

const OPAQUE: Rgba<u8> = Rgba([200, 30, 30, 255]);

/// Pixel-space bounding box of all pixels with non-zero alpha.
fn opaque_bounds(image: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] == 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    bounds
}

/// Predicted opaque bounding box: the draw rect in pixels, clipped to
/// the canvas. Mirrors the point→pixel conversion the renderer uses.
fn predicted_bounds(
    source: Size,
    destination: Size,
    mode: FitMode,
    scale: f64,
) -> (u32, u32, u32, u32) {
    let target = draw_rect(source, destination, mode);
    let canvas_w = (destination.width * scale).round() as i64;
    let canvas_h = (destination.height * scale).round() as i64;
    let x = (target.x * scale).round() as i64;
    let y = (target.y * scale).round() as i64;
    let w = ((target.width * scale).round() as i64).max(1);
    let h = ((target.height * scale).round() as i64).max(1);

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + w - 1).min(canvas_w - 1);
    let y1 = (y + h - 1).min(canvas_h - 1);
    (x0 as u32, y0 as u32, x1 as u32, y1 as u32)
}

#[test]
fn rendered_bounds_match_predicted_draw_rect() {
    let sources = [
        Size::new(100.0, 50.0),
        Size::new(50.0, 100.0),
        Size::new(64.0, 64.0),
        Size::new(30.0, 70.0),
    ];
    let destinations = [
        Size::new(40.0, 40.0),
        Size::new(80.0, 20.0),
        Size::new(25.0, 75.0),
    ];
    let scales = [1.0, 2.0];
    let modes = [FitMode::Fill, FitMode::Fit];

    for source_size in sources {
        let source = solid(OPAQUE, source_size);
        for destination in destinations {
            for scale in scales {
                for mode in modes {
                    let output = ResizeRequest::new(destination)
                        .mode(mode)
                        .scale(scale)
                        .render(&source)
                        .unwrap();

                    let canvas_w = (destination.width * scale).round() as u32;
                    let canvas_h = (destination.height * scale).round() as u32;
                    assert_eq!(
                        output.dimensions(),
                        (canvas_w, canvas_h),
                        "canvas dimensions for {source_size:?} -> {destination:?} \
                         at {scale}x under {mode:?}"
                    );

                    let expected = predicted_bounds(source_size, destination, mode, scale);
                    let actual = opaque_bounds(&output).expect("output fully transparent");
                    assert_eq!(
                        actual, expected,
                        "opaque bounds for {source_size:?} -> {destination:?} \
                         at {scale}x under {mode:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn fit_always_covers_fill_never_overflows() {
    // The label mapping: Fit covers (max ratio), Fill contains (min ratio).
    let source = solid(OPAQUE, Size::new(90.0, 30.0));

    // 90×30 into 45×60 under Fit: ratio max(0.5, 2.0) = 2 → 180×60,
    // overflowing horizontally; every canvas pixel is covered.
    let covered = ResizeRequest::new(Size::new(45.0, 60.0))
        .mode(FitMode::Fit)
        .render(&source)
        .unwrap();
    assert!(covered.pixels().all(|p| p[3] != 0), "Fit left a gap");

    // 80×30 into 40×50 under Fill: ratio min(0.5, 5/3) = 0.5 → 40×15,
    // letterboxed vertically with the overflow split at y = 17.5 → 18.
    let contained = ResizeRequest::new(Size::new(40.0, 50.0))
        .mode(FitMode::Fill)
        .render(&solid(OPAQUE, Size::new(80.0, 30.0)))
        .unwrap();
    let (x0, y0, x1, y1) = opaque_bounds(&contained).expect("nothing drawn");
    assert_eq!((x0, x1), (0, 39));
    assert_eq!((y0, y1), (18, 32));
}

#[test]
fn circular_mask_is_inscribed_in_the_destination() {
    let source = solid(OPAQUE, Size::new(60.0, 60.0));
    let destination = Size::new(30.0, 30.0);
    let output = ResizeRequest::new(destination)
        .circular_mask(true)
        .scale(2.0)
        .render(&source)
        .unwrap();
    assert_eq!(output.dimensions(), (60, 60));

    let (w, h) = output.dimensions();
    let rx = f64::from(w) / 2.0;
    let ry = f64::from(h) / 2.0;
    for (x, y, pixel) in output.enumerate_pixels() {
        let dx = (f64::from(x) + 0.5 - rx) / rx;
        let dy = (f64::from(y) + 0.5 - ry) / ry;
        let inside = dx * dx + dy * dy <= 1.0;
        assert_eq!(
            pixel[3] != 0,
            inside,
            "pixel ({x},{y}) {} the ellipse but alpha is {}",
            if inside { "inside" } else { "outside" },
            pixel[3]
        );
    }
}
