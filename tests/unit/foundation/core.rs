use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert!(Canvas::new(1, 1).is_ok());
}

#[test]
fn canvas_scaled_multiplies_both_axes() {
    let c = Canvas::new(1206, 2622).unwrap().scaled(4).unwrap();
    assert_eq!(c, Canvas { width: 4824, height: 10488 });
    assert_eq!(c.rgba_len().unwrap(), 4824 * 10488 * 4);
}

#[test]
fn canvas_scaled_overflow_is_an_error() {
    let c = Canvas::new(u32::MAX, 1).unwrap();
    assert!(c.scaled(2).is_err());
}

#[test]
fn premultiply_matches_rounding() {
    let p = Rgba8::rgba(180, 180, 180, 170).premultiplied();
    assert_eq!(p.a, 170);
    assert_eq!(p.r, ((180u16 * 170 + 127) / 255) as u8);

    let opaque = Rgba8::rgb(220, 40, 40).premultiplied();
    assert_eq!(opaque.to_array(), [220, 40, 40, 255]);
}

#[test]
fn lerp_hits_endpoints_and_midpoint() {
    let a = Rgba8::rgb(0, 100, 200);
    let b = Rgba8::rgb(200, 100, 0);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    assert_eq!(a.lerp(b, 0.5), Rgba8::rgb(100, 100, 100));
    assert_eq!(a.lerp(b, 7.0), b);
}
