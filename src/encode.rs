use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{YeargridError, YeargridResult};
use crate::render::FrameRGBA;

/// Write `frame` as a PNG, creating missing parent directories.
pub fn write_png(frame: &FrameRGBA, out: &Path) -> YeargridResult<()> {
    let expected = (frame.width as usize)
        .checked_mul(frame.height as usize)
        .and_then(|v| v.checked_mul(4));
    if expected != Some(frame.data.len()) {
        return Err(YeargridError::render(
            "frame data length does not match width*height*4",
        ));
    }

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))?;

    tracing::debug!(path = %out.display(), "wrote png");
    Ok(())
}
