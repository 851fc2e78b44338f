use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use scrawled::surface::{DrawingSurface, Point};

const BACKGROUND: [u8; 4] = [0x1a, 0x1a, 0x2e, 0xff];
const INK: [u8; 4] = [0xff, 0xff, 0xff, 0xff];

fn decode_export(surface: &DrawingSurface) -> image::RgbaImage {
    let bitmap = surface.export_bitmap();
    assert!(bitmap.to_uri().starts_with("data:image/png;base64,"));
    let bytes = B64.decode(bitmap.payload()).expect("valid base64");
    image::load_from_memory(&bytes)
        .expect("decodable png")
        .to_rgba8()
}

#[test]
fn export_is_a_png_at_backing_resolution() {
    let mut surface = DrawingSurface::new(80, 40);
    surface.start(Point { x: 10.0, y: 10.0 });
    surface.extend(Point { x: 50.0, y: 30.0 });
    surface.end();
    let raster = decode_export(&surface);
    assert_eq!((raster.width(), raster.height()), (160, 80));
}

#[test]
fn strokes_leave_ink_on_a_dark_background() {
    let mut surface = DrawingSurface::new(80, 40);
    surface.start(Point { x: 10.0, y: 20.0 });
    surface.extend(Point { x: 50.0, y: 20.0 });
    surface.end();
    let raster = decode_export(&surface);
    // Midpoint of the stroke, in backing coordinates.
    assert_eq!(raster.get_pixel(60, 40).0, INK);
    assert_eq!(raster.get_pixel(2, 2).0, BACKGROUND);
}

#[test]
fn reset_repaints_and_clears_content() {
    let mut surface = DrawingSurface::new(80, 40);
    surface.start(Point { x: 10.0, y: 20.0 });
    surface.extend(Point { x: 50.0, y: 20.0 });
    surface.end();
    assert!(surface.has_content());

    surface.reset();
    assert!(!surface.has_content());
    assert_eq!(surface.size(), (80, 40));
    let raster = decode_export(&surface);
    assert_eq!(raster.get_pixel(60, 40).0, BACKGROUND);
}

#[test]
fn disjoint_strokes_are_not_connected() {
    let mut surface = DrawingSurface::new(80, 40);
    surface.start(Point { x: 10.0, y: 20.0 });
    surface.extend(Point { x: 20.0, y: 20.0 });
    surface.end();
    surface.start(Point { x: 60.0, y: 20.0 });
    surface.extend(Point { x: 70.0, y: 20.0 });
    surface.end();
    let raster = decode_export(&surface);
    // The gap between the two strokes stays untouched.
    assert_eq!(raster.get_pixel(80, 40).0, BACKGROUND);
    assert_eq!(raster.get_pixel(30, 40).0, INK);
    assert_eq!(raster.get_pixel(130, 40).0, INK);
}

#[test]
fn a_dot_is_enough_to_have_content() {
    let mut surface = DrawingSurface::new(80, 40);
    surface.start(Point { x: 40.0, y: 20.0 });
    surface.extend(Point { x: 40.0, y: 20.0 });
    surface.end();
    assert!(surface.has_content());
    let raster = decode_export(&surface);
    assert_eq!(raster.get_pixel(80, 40).0, INK);
}
