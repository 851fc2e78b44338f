use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::encoded_image::{EncodedImage, ImageSubtype};

/// Backing-store pixels per logical pixel, so exports stay sharp on dense
/// displays.
const SCALE: u32 = 2;
/// Logical stroke width in surface units.
const LINE_WIDTH: f32 = 2.0;
const BACKGROUND: Rgba<u8> = Rgba([0x1a, 0x1a, 0x2e, 0xff]);
const INK: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);

/// A point in surface-local logical coordinates. Callers translate from
/// whatever event space they receive before handing points in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum StrokeState {
    Idle,
    Stroking { last: Point },
}

/// Fixed-size raster surface accumulating freehand strokes.
///
/// The raster is the only record of what has been drawn; there is no vector
/// model and no undo. Strokes are round-capped white lines on a dark
/// background, committed segment by segment as the pointer moves.
///
/// # Example
/// ```
/// use scrawled::surface::{DrawingSurface, Point};
///
/// let mut surface = DrawingSurface::new(320, 120);
/// surface.start(Point { x: 10.0, y: 10.0 });
/// surface.extend(Point { x: 60.0, y: 40.0 });
/// surface.end();
/// assert!(surface.has_content());
/// let bitmap = surface.export_bitmap();
/// assert!(bitmap.to_uri().starts_with("data:image/png;base64,"));
/// ```
pub struct DrawingSurface {
    raster: RgbaImage,
    state: StrokeState,
    has_content: bool,
}

impl DrawingSurface {
    /// Create a blank surface of the given logical size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            raster: RgbaImage::from_pixel(width * SCALE, height * SCALE, BACKGROUND),
            state: StrokeState::Idle,
            has_content: false,
        }
    }

    /// Begin a new stroke at `point`. Nothing is drawn yet and no segment
    /// connects to any previous stroke.
    pub fn start(&mut self, point: Point) {
        self.state = StrokeState::Stroking { last: point };
    }

    /// Extend the active stroke to `point`, committing one straight segment
    /// to the raster. A no-op unless a stroke is active.
    pub fn extend(&mut self, point: Point) {
        let StrokeState::Stroking { last } = self.state else {
            return;
        };
        self.stamp_segment(last, point);
        self.state = StrokeState::Stroking { last: point };
        self.has_content = true;
    }

    /// Finalize the current stroke.
    pub fn end(&mut self) {
        self.state = StrokeState::Idle;
    }

    /// Repaint the whole surface with the background color and forget that
    /// anything was drawn. The surface keeps its size.
    pub fn reset(&mut self) {
        for px in self.raster.pixels_mut() {
            *px = BACKGROUND;
        }
        self.state = StrokeState::Idle;
        self.has_content = false;
    }

    /// Whether any pixels have been committed since the last reset.
    pub fn has_content(&self) -> bool {
        self.has_content
    }

    /// Rasterize the surface to a PNG data URI at backing resolution.
    ///
    /// Callers must gate on [`has_content`](Self::has_content); exporting an
    /// empty surface yields a valid but blank bitmap.
    pub fn export_bitmap(&self) -> EncodedImage {
        let mut png = Vec::new();
        self.raster
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .expect("in-memory png encode");
        EncodedImage::from_bytes(ImageSubtype::Png, &png)
    }

    /// Logical width and height.
    pub fn size(&self) -> (u32, u32) {
        (self.raster.width() / SCALE, self.raster.height() / SCALE)
    }

    fn stamp_segment(&mut self, a: Point, b: Point) {
        let scale = SCALE as f32;
        let (ax, ay) = (a.x * scale, a.y * scale);
        let (bx, by) = (b.x * scale, b.y * scale);
        let radius = LINE_WIDTH * scale / 2.0;

        let (w, h) = (self.raster.width() as f32, self.raster.height() as f32);
        let x0 = (ax.min(bx) - radius).floor().max(0.0) as u32;
        let y0 = (ay.min(by) - radius).floor().max(0.0) as u32;
        let x1 = (ax.max(bx) + radius).ceil().min(w - 1.0).max(0.0) as u32;
        let y1 = (ay.max(by) + radius).ceil().min(h - 1.0).max(0.0) as u32;

        let r2 = radius * radius;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
                if dist_sq_to_segment(px, py, ax, ay, bx, by) <= r2 {
                    self.raster.put_pixel(x, y, INK);
                }
            }
        }
    }
}

/// Squared distance from `(px, py)` to the segment `(ax, ay)-(bx, by)`.
/// Degenerate segments collapse to a point, which gives round caps for free.
fn dist_sq_to_segment(px: f32, py: f32, ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let (dx, dy) = (bx - ax, by - ay);
    let len2 = dx * dx + dy * dy;
    let t = if len2 == 0.0 {
        0.0
    } else {
        (((px - ax) * dx + (py - ay) * dy) / len2).clamp(0.0, 1.0)
    };
    let (cx, cy) = (ax + t * dx, ay + t * dy);
    let (ex, ey) = (px - cx, py - cy);
    ex * ex + ey * ey
}
