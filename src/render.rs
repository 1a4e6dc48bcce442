use std::path::Path;

use chrono::{Datelike, NaiveDate};
use image::imageops::FilterType;

use crate::calendar::{YearProgress, days_in_year, fixed_offset, today_in};
use crate::config::WallpaperConfig;
use crate::foundation::core::Canvas;
use crate::foundation::error::{YeargridError, YeargridResult};
use crate::layout::GridLayout;
use crate::raster::{DotStats, draw_dots};

/// Final image, RGBA8. Always opaque, so straight and premultiplied agree.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Resolved inputs of one render, before any pixel is touched.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderPlan {
    pub date: NaiveDate,
    pub progress: YearProgress,
    pub layout: GridLayout,
    /// Target (non-supersampled) size.
    pub output: Canvas,
}

#[derive(Clone, Debug)]
pub struct Rendered {
    pub frame: FrameRGBA,
    pub stats: DotStats,
}

/// The date to render: `date` when given, otherwise today at the configured offset.
pub fn resolve_date(cfg: &WallpaperConfig, date: Option<NaiveDate>) -> YeargridResult<NaiveDate> {
    match date {
        Some(d) => Ok(d),
        None => Ok(today_in(fixed_offset(cfg.utc_offset_minutes)?)),
    }
}

#[tracing::instrument(skip(cfg))]
pub fn plan(cfg: &WallpaperConfig, date: NaiveDate) -> YeargridResult<RenderPlan> {
    cfg.validate()?;
    let dots = cfg.dots.unwrap_or_else(|| days_in_year(date.year()));
    let progress = YearProgress::for_date(date, dots);
    let output = Canvas::new(cfg.canvas.width, cfg.canvas.height)?;
    let layout = GridLayout::compute(output, cfg.scale, dots, cfg.grid, cfg.dot, cfg.placement)?;
    Ok(RenderPlan {
        date,
        progress,
        layout,
        output,
    })
}

/// Background, dots, then the supersample downscale.
#[tracing::instrument(skip_all, fields(date = %plan.date, scale = plan.layout.scale))]
pub fn render(
    cfg: &WallpaperConfig,
    plan: &RenderPlan,
    assets_root: &Path,
) -> YeargridResult<Rendered> {
    let scaled = plan.layout.canvas;
    let mut buf = cfg.background.build(scaled, assets_root)?;
    let stats = draw_dots(&mut buf, &plan.layout, &plan.progress, &cfg.colors)?;
    tracing::debug!(
        past = stats.past,
        today = stats.today,
        future = stats.future,
        "rasterized dots"
    );

    let frame = downscale(buf, scaled, plan.output)?;
    Ok(Rendered { frame, stats })
}

/// Lanczos3 resize from the supersampled canvas to the target size.
pub fn downscale(buf: Vec<u8>, from: Canvas, to: Canvas) -> YeargridResult<FrameRGBA> {
    if from == to {
        return Ok(FrameRGBA {
            width: to.width,
            height: to.height,
            data: buf,
        });
    }
    let img = image::RgbaImage::from_raw(from.width, from.height, buf)
        .ok_or_else(|| YeargridError::render("supersampled buffer does not match its canvas"))?;
    let out = image::imageops::resize(&img, to.width, to.height, FilterType::Lanczos3);
    Ok(FrameRGBA {
        width: out.width(),
        height: out.height(),
        data: out.into_raw(),
    })
}

/// One-line summary of a finished render.
pub fn summary(plan: &RenderPlan, cfg: &WallpaperConfig, out: &Path) -> String {
    let today = plan
        .progress
        .today
        .map_or_else(|| "None".to_owned(), |d| d.to_string());
    format!(
        "Generated {} | DOY={} | past={} | today={} | grid={}x{} | dot_radius={}px | edge_gap={}px",
        out.display(),
        plan.progress.day_of_year,
        plan.progress.past_count,
        today,
        plan.layout.rows,
        plan.layout.columns,
        cfg.dot.radius,
        cfg.dot.edge_gap,
    )
}
