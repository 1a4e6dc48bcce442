use super::*;
use crate::composite_cpu::fill;
use crate::layout::{DotSpec, GridSpec, Placement};

const GREEN: [u8; 4] = [108, 181, 128, 255];

fn green_canvas(w: u32, h: u32) -> (Canvas, Vec<u8>) {
    let canvas = Canvas::new(w, h).unwrap();
    let mut buf = vec![0u8; canvas.rgba_len().unwrap()];
    fill(&mut buf, Rgba8::rgb(108, 181, 128).premultiplied());
    (canvas, buf)
}

fn px(buf: &[u8], canvas: Canvas, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * canvas.width + x) * 4) as usize;
    [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
}

fn close(a: [u8; 4], b: [u8; 4], tol: u8) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| x.abs_diff(*y) <= tol)
}

fn paint(buf: &mut [u8], canvas: Canvas, radius: f64, dots: &[(Point, Rgba8)]) {
    let layer = dot_layer(canvas, radius, dots.iter().copied()).unwrap();
    composite_layer(buf, layer.data_as_u8_slice()).unwrap();
}

#[test]
fn dot_layer_is_transparent_outside_circles() {
    let canvas = Canvas::new(20, 20).unwrap();
    let layer = dot_layer(
        canvas,
        4.0,
        [(Point::new(10.0, 10.0), Rgba8::rgb(220, 40, 40))],
    )
    .unwrap();
    assert_eq!((layer.width(), layer.height()), (20, 20));

    let data = layer.data_as_u8_slice();
    assert_eq!(px(data, canvas, 0, 0), [0, 0, 0, 0]);
    assert!(close(px(data, canvas, 10, 10), [220, 40, 40, 255], 1));
}

#[test]
fn circle_interior_is_solid_and_outside_untouched() {
    let (canvas, mut buf) = green_canvas(20, 20);
    paint(
        &mut buf,
        canvas,
        4.0,
        &[(Point::new(10.0, 10.0), Rgba8::rgb(220, 40, 40))],
    );

    assert!(close(px(&buf, canvas, 10, 10), [220, 40, 40, 255], 1));
    assert!(close(px(&buf, canvas, 9, 9), [220, 40, 40, 255], 1));
    assert_eq!(px(&buf, canvas, 0, 0), GREEN);
    assert_eq!(px(&buf, canvas, 10, 16), GREEN);
}

#[test]
fn circle_edge_is_blended() {
    let (canvas, mut buf) = green_canvas(20, 20);
    paint(
        &mut buf,
        canvas,
        4.0,
        &[(Point::new(10.0, 10.0), Rgba8::rgb(255, 255, 255))],
    );

    // The outline crosses pixel (13, 12) near its middle: partial coverage.
    let edge = px(&buf, canvas, 13, 12);
    assert!(edge[0] > GREEN[0] && edge[0] < 255, "edge {edge:?}");
    assert_eq!(edge[3], 255);
}

#[test]
fn circle_partly_off_canvas_is_clipped() {
    let (canvas, mut buf) = green_canvas(8, 8);
    let white = Rgba8::rgb(255, 255, 255);
    paint(
        &mut buf,
        canvas,
        3.0,
        &[
            (Point::new(-1.0, 7.0), white),
            (Point::new(-50.0, -50.0), white),
        ],
    );

    assert!(close(px(&buf, canvas, 0, 7), [255, 255, 255, 255], 1));
    assert_eq!(px(&buf, canvas, 7, 0), GREEN);
}

#[test]
fn translucent_future_color_keeps_canvas_opaque() {
    let (canvas, mut buf) = green_canvas(10, 10);
    paint(
        &mut buf,
        canvas,
        3.0,
        &[(Point::new(5.0, 5.0), Palette::default().future)],
    );
    let p = px(&buf, canvas, 5, 5);
    assert_eq!(p[3], 255);
    assert!(close(p, [156, 180, 163, 255], 2), "future over green {p:?}");
}

#[test]
fn transparent_colors_and_zero_radius_draw_nothing() {
    let (canvas, mut buf) = green_canvas(10, 10);
    paint(
        &mut buf,
        canvas,
        3.0,
        &[(Point::new(5.0, 5.0), Rgba8::rgba(255, 0, 0, 0))],
    );
    paint(
        &mut buf,
        canvas,
        0.0,
        &[(Point::new(5.0, 5.0), Rgba8::rgb(255, 0, 0))],
    );
    assert!(buf.chunks_exact(4).all(|p| p == GREEN));
}

#[test]
fn oversized_canvas_is_rejected() {
    let canvas = Canvas::new(70_000, 1).unwrap();
    let err = dot_layer(canvas, 1.0, std::iter::empty()).unwrap_err();
    assert!(err.to_string().contains("exceeds u16"), "{err}");
}

#[test]
fn composite_layer_rejects_mismatched_sizes() {
    let mut dst = vec![0u8; 16];
    assert!(composite_layer(&mut dst, &[0u8; 12]).is_err());
}

#[test]
fn draw_dots_colors_by_state() {
    let canvas = Canvas::new(60, 20).unwrap();
    let layout = GridLayout::compute(
        canvas,
        1,
        5,
        GridSpec {
            rows: Some(1),
            columns: None,
        },
        DotSpec {
            radius: 3,
            edge_gap: 4,
        },
        Placement::Center,
    )
    .unwrap();
    let mut buf = vec![0u8; layout.canvas.rgba_len().unwrap()];
    fill(&mut buf, Rgba8::rgb(0, 0, 0).premultiplied());

    let progress = YearProgress::new(3, 5);
    let stats = draw_dots(&mut buf, &layout, &progress, &Palette::default()).unwrap();
    assert_eq!(
        stats,
        DotStats {
            past: 2,
            today: 1,
            future: 2
        }
    );

    let at = |i: u32| {
        let c = layout.cell(i).unwrap().center;
        px(&buf, layout.canvas, c.x as u32, c.y as u32)
    };
    assert!(close(at(0), [255, 255, 255, 255], 1));
    assert!(close(at(2), [220, 40, 40, 255], 1));
    let future = at(4);
    assert!(future[0] > 0 && future[0] < 180, "future {future:?}");
    assert_eq!(future[3], 255);
}

#[test]
fn draw_dots_counts_states_even_when_transparent() {
    let canvas = Canvas::new(40, 10).unwrap();
    let layout = GridLayout::compute(
        canvas,
        1,
        4,
        GridSpec {
            rows: Some(1),
            columns: None,
        },
        DotSpec {
            radius: 2,
            edge_gap: 2,
        },
        Placement::Center,
    )
    .unwrap();
    let mut buf = vec![0u8; layout.canvas.rgba_len().unwrap()];
    let palette = Palette {
        future: Rgba8::rgba(0, 0, 0, 0),
        ..Palette::default()
    };
    let stats = draw_dots(&mut buf, &layout, &YearProgress::new(2, 4), &palette).unwrap();
    assert_eq!(stats.future, 2);
}

#[test]
fn draw_dots_rejects_wrong_buffer() {
    let canvas = Canvas::new(10, 10).unwrap();
    let layout = GridLayout::compute(
        canvas,
        2,
        4,
        GridSpec::default(),
        DotSpec::default(),
        Placement::Center,
    )
    .unwrap();
    let mut buf = vec![0u8; canvas.rgba_len().unwrap()];
    let progress = YearProgress::new(1, 4);
    assert!(draw_dots(&mut buf, &layout, &progress, &Palette::default()).is_err());
}
