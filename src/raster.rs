use serde::{Deserialize, Serialize};

use crate::calendar::{DayState, YearProgress};
use crate::composite_cpu::over;
use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::foundation::error::{YeargridError, YeargridResult};
use crate::layout::GridLayout;

/// Flattening tolerance for circle outlines, in scaled pixels.
const CIRCLE_TOLERANCE: f64 = 0.1;

/// Dot colors, straight alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    pub past: Rgba8,
    pub today: Rgba8,
    pub future: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            past: Rgba8::rgba(255, 255, 255, 255),
            today: Rgba8::rgba(220, 40, 40, 255),
            future: Rgba8::rgba(180, 180, 180, 170),
        }
    }
}

impl Palette {
    pub fn color(&self, state: DayState) -> Rgba8 {
        match state {
            DayState::Past => self.past,
            DayState::Today => self.today,
            DayState::Future => self.future,
        }
    }
}

/// Per-state dot counts from one rasterization pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DotStats {
    pub past: u32,
    pub today: u32,
    pub future: u32,
}

/// Draw every dot of `layout` onto `buf`, which must cover `layout.canvas`.
pub fn draw_dots(
    buf: &mut [u8],
    layout: &GridLayout,
    progress: &YearProgress,
    palette: &Palette,
) -> YeargridResult<DotStats> {
    if buf.len() != layout.canvas.rgba_len()? {
        return Err(YeargridError::render(
            "draw_dots expects a buffer matching the layout canvas",
        ));
    }

    let mut stats = DotStats::default();
    let dots = layout.cells().map(|cell| {
        let state = progress.state(cell.day);
        match state {
            DayState::Past => stats.past += 1,
            DayState::Today => stats.today += 1,
            DayState::Future => stats.future += 1,
        }
        (cell.center, palette.color(state))
    });
    let layer = dot_layer(layout.canvas, f64::from(layout.radius), dots)?;
    composite_layer(buf, layer.data_as_u8_slice())?;
    Ok(stats)
}

/// Rasterize filled circles of one radius into a transparent premultiplied pixmap.
pub fn dot_layer(
    canvas: Canvas,
    radius: f64,
    dots: impl IntoIterator<Item = (Point, Rgba8)>,
) -> YeargridResult<vello_cpu::Pixmap> {
    let width: u16 = canvas
        .width
        .try_into()
        .map_err(|_| YeargridError::render("scaled canvas width exceeds u16"))?;
    let height: u16 = canvas
        .height
        .try_into()
        .map_err(|_| YeargridError::render("scaled canvas height exceeds u16"))?;

    let mut ctx = vello_cpu::RenderContext::new(width, height);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    for (center, color) in dots {
        if radius <= 0.0 || color.a == 0 {
            continue;
        }
        fill_dot(&mut ctx, center, radius, color);
    }
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    ctx.render_to_pixmap(&mut pixmap);
    Ok(pixmap)
}

fn fill_dot(ctx: &mut vello_cpu::RenderContext, center: Point, radius: f64, color: Rgba8) {
    use vello_cpu::kurbo::Shape as _;

    let circle =
        vello_cpu::kurbo::Circle::new(vello_cpu::kurbo::Point::new(center.x, center.y), radius);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color.r, color.g, color.b, color.a,
    ));
    ctx.fill_path(&circle.to_path(CIRCLE_TOLERANCE));
}

/// Source-over a premultiplied RGBA8 layer onto `dst` of the same size.
pub fn composite_layer(dst: &mut [u8], layer: &[u8]) -> YeargridResult<()> {
    if dst.len() != layer.len() || !dst.len().is_multiple_of(4) {
        return Err(YeargridError::render(
            "composite_layer expects rgba8 buffers of equal size",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(layer.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], 1.0);
        d.copy_from_slice(&out);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/raster.rs"]
mod tests;
