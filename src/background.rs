use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use crate::blur_cpu::gaussian_blur_in_place;
use crate::composite_cpu::{fill, over_color_in_place};
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{YeargridError, YeargridResult};

/// Full-canvas backdrop painted beneath the dots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Background {
    /// Flat color, lightly blurred to avoid banding on device panels.
    Solid {
        color: Rgba8,
        #[serde(default = "default_blur_sigma")]
        blur_sigma: f32,
    },
    /// Linear gradient from the first row to the last.
    Gradient { top: Rgba8, bottom: Rgba8 },
    /// Photograph scaled to cover the canvas, center-cropped, then darkened.
    Photo {
        path: PathBuf,
        #[serde(default = "default_overlay")]
        overlay: Rgba8,
        /// Solid color used when `path` does not exist.
        #[serde(default)]
        fallback: Option<Rgba8>,
    },
}

fn default_blur_sigma() -> f32 {
    0.4
}

fn default_overlay() -> Rgba8 {
    Rgba8::rgba(0, 0, 0, 89)
}

impl Default for Background {
    fn default() -> Self {
        Self::Solid {
            color: Rgba8::rgb(108, 181, 128),
            blur_sigma: default_blur_sigma(),
        }
    }
}

impl Background {
    pub fn validate(&self) -> YeargridResult<()> {
        match self {
            Self::Solid { blur_sigma, .. } => {
                if !blur_sigma.is_finite() || *blur_sigma < 0.0 {
                    return Err(YeargridError::validation(
                        "background blur_sigma must be finite and >= 0",
                    ));
                }
            }
            Self::Gradient { .. } => {}
            Self::Photo { path, .. } => {
                if path.as_os_str().is_empty() {
                    return Err(YeargridError::validation("background photo path is empty"));
                }
            }
        }
        Ok(())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Solid { .. } => "solid",
            Self::Gradient { .. } => "gradient",
            Self::Photo { .. } => "photo",
        }
    }

    /// Build an opaque premultiplied RGBA8 buffer covering `canvas`.
    ///
    /// Relative photo paths resolve against `assets_root`.
    #[tracing::instrument(skip(self, assets_root), fields(kind = self.kind()))]
    pub fn build(&self, canvas: Canvas, assets_root: &Path) -> YeargridResult<Vec<u8>> {
        let blank = || canvas.rgba_len().map(|len| vec![0u8; len]);
        match self {
            Self::Solid { color, blur_sigma } => {
                let mut buf = blank()?;
                fill(&mut buf, opaque(*color).premultiplied());
                gaussian_blur_in_place(&mut buf, canvas, *blur_sigma)?;
                Ok(buf)
            }
            Self::Gradient { top, bottom } => {
                let mut buf = blank()?;
                paint_vertical_gradient(&mut buf, canvas, opaque(*top), opaque(*bottom));
                Ok(buf)
            }
            Self::Photo {
                path,
                overlay,
                fallback,
            } => {
                let full = assets_root.join(path);
                if let (false, Some(color)) = (full.exists(), fallback) {
                    tracing::warn!(
                        path = %full.display(),
                        "background photo missing, using fallback color"
                    );
                    let mut buf = blank()?;
                    fill(&mut buf, opaque(*color).premultiplied());
                    return Ok(buf);
                }
                let mut buf = cover_fit_photo(&full, canvas)?;
                over_color_in_place(&mut buf, overlay.premultiplied())?;
                Ok(buf)
            }
        }
    }
}

/// The canvas must stay opaque; configured alpha on a base color is ignored.
fn opaque(c: Rgba8) -> Rgba8 {
    Rgba8 { a: 255, ..c }
}

fn paint_vertical_gradient(buf: &mut [u8], canvas: Canvas, top: Rgba8, bottom: Rgba8) {
    let row_len = canvas.width as usize * 4;
    let last = canvas.height.saturating_sub(1);
    for (y, row) in buf.chunks_exact_mut(row_len).enumerate() {
        let t = if last == 0 {
            0.0
        } else {
            y as f64 / f64::from(last)
        };
        fill(row, top.lerp(bottom, t).premultiplied());
    }
}

fn cover_fit_photo(path: &Path, canvas: Canvas) -> YeargridResult<Vec<u8>> {
    let img = image::open(path)
        .with_context(|| format!("open background photo '{}'", path.display()))?;
    tracing::debug!(
        src_width = img.width(),
        src_height = img.height(),
        "decoded background photo"
    );
    let rgb = image::DynamicImage::ImageRgb8(img.to_rgb8());
    let fitted = rgb.resize_to_fill(canvas.width, canvas.height, FilterType::Lanczos3);
    let rgba = fitted.to_rgba8();
    if rgba.dimensions() != (canvas.width, canvas.height) {
        return Err(YeargridError::render(format!(
            "cover-fit produced {}x{}, expected {}x{}",
            rgba.width(),
            rgba.height(),
            canvas.width,
            canvas.height
        )));
    }
    Ok(rgba.into_raw())
}

#[cfg(test)]
#[path = "../tests/unit/background.rs"]
mod tests;
