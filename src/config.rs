use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::background::Background;
use crate::calendar::fixed_offset;
use crate::foundation::core::Canvas;
use crate::foundation::error::{YeargridError, YeargridResult};
use crate::layout::{DotSpec, GridSpec, Placement};
use crate::raster::Palette;

pub const MAX_SCALE: u32 = 16;

/// Everything a render needs. Defaults reproduce a 1206x2622 portrait phone
/// wallpaper for Asia/Bangkok with a 25-row grid on a green background.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WallpaperConfig {
    pub canvas: Canvas,
    /// Supersampling factor; 1 disables the downscale pass.
    pub scale: u32,
    /// Minutes east of UTC used to decide which day "today" is.
    pub utc_offset_minutes: i32,
    /// Number of dots; `null` means the length of the current year.
    /// With `null` the grid is validated against 366 cells, so it must fit a leap year.
    pub dots: Option<u32>,
    pub grid: GridSpec,
    pub dot: DotSpec,
    pub colors: Palette,
    pub background: Background,
    pub placement: Placement,
    pub out: PathBuf,
}

impl Default for WallpaperConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 1206,
                height: 2622,
            },
            scale: 4,
            utc_offset_minutes: 7 * 60,
            dots: Some(365),
            grid: GridSpec::default(),
            dot: DotSpec::default(),
            colors: Palette::default(),
            background: Background::default(),
            placement: Placement::default(),
            out: PathBuf::from("docs/wallpaper.png"),
        }
    }
}

impl WallpaperConfig {
    pub fn from_path(path: &Path) -> YeargridResult<Self> {
        let f = File::open(path)
            .with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| YeargridError::serde(format!("{}: {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(s: &str) -> YeargridResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| YeargridError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> YeargridResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        if self.scale == 0 || self.scale > MAX_SCALE {
            return Err(YeargridError::validation(format!(
                "scale must be within 1..={MAX_SCALE}, got {}",
                self.scale
            )));
        }
        let scaled = self.canvas.scaled(self.scale)?;
        if scaled.width > u32::from(u16::MAX) || scaled.height > u32::from(u16::MAX) {
            return Err(YeargridError::validation(format!(
                "supersampled canvas {}x{} exceeds {} px per side",
                scaled.width,
                scaled.height,
                u16::MAX
            )));
        }
        fixed_offset(self.utc_offset_minutes)?;
        self.grid.resolve(self.dots.unwrap_or(366))?;
        if self.dot.radius == 0 {
            return Err(YeargridError::validation("dot radius must be > 0"));
        }
        self.dot
            .pitch()
            .and_then(|p| p.checked_mul(self.scale))
            .ok_or_else(|| YeargridError::validation("scaled dot pitch overflows u32"))?;
        self.placement.validate()?;
        self.background.validate()?;
        if self.out.as_os_str().is_empty() {
            return Err(YeargridError::validation("output path is empty"));
        }
        Ok(())
    }
}
