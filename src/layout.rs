//! Dot-grid sizing and placement.
//!
//! Every value produced here is in supersampled pixel units: a layout for a
//! `1206x2622` canvas at scale 4 addresses a `4824x10488` buffer.

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{YeargridError, YeargridResult};

/// Requested grid shape; whichever side is missing is derived from the dot count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridSpec {
    pub rows: Option<u32>,
    pub columns: Option<u32>,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            rows: Some(25),
            columns: None,
        }
    }
}

impl GridSpec {
    /// Resolve to concrete `(rows, columns)` able to hold `dots` cells.
    pub fn resolve(self, dots: u32) -> YeargridResult<(u32, u32)> {
        if dots == 0 {
            return Err(YeargridError::validation("dot count must be > 0"));
        }
        let (rows, columns) = match (self.rows, self.columns) {
            (Some(0), _) | (_, Some(0)) => {
                return Err(YeargridError::validation("grid rows/columns must be > 0"));
            }
            (Some(rows), Some(columns)) => (rows, columns),
            (Some(rows), None) => (rows, dots.div_ceil(rows)),
            (None, Some(columns)) => (dots.div_ceil(columns), columns),
            (None, None) => {
                return Err(YeargridError::validation(
                    "grid needs at least one of rows or columns",
                ));
            }
        };
        if u64::from(rows) * u64::from(columns) < u64::from(dots) {
            return Err(YeargridError::validation(format!(
                "grid {rows}x{columns} cannot hold {dots} dots"
            )));
        }
        Ok((rows, columns))
    }
}

/// Dot size in target (non-supersampled) pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DotSpec {
    pub radius: u32,
    /// Distance between the edges of neighbouring dots.
    pub edge_gap: u32,
}

impl Default for DotSpec {
    fn default() -> Self {
        Self {
            radius: 10,
            edge_gap: 4,
        }
    }
}

impl DotSpec {
    /// Center-to-center distance, `None` when it does not fit in `u32`.
    pub fn pitch(self) -> Option<u32> {
        self.radius.checked_mul(2)?.checked_add(self.edge_gap)
    }
}

/// Vertical placement of the grid on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    /// Centered on both axes.
    Center,
    /// Pushed below a lock-screen clock: the grid is centered in the area under
    /// `top_safe * height`, then moved down a further `extra_offset * height`.
    LockScreen { top_safe: f64, extra_offset: f64 },
}

impl Default for Placement {
    fn default() -> Self {
        Self::LockScreen {
            top_safe: 0.24,
            extra_offset: 0.10,
        }
    }
}

impl Placement {
    pub fn validate(self) -> YeargridResult<()> {
        if let Self::LockScreen {
            top_safe,
            extra_offset,
        } = self
        {
            for (name, v) in [("top_safe", top_safe), ("extra_offset", extra_offset)] {
                if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                    return Err(YeargridError::validation(format!(
                        "placement {name} must be within [0, 1], got {v}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// One dot position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    /// 1-based day index.
    pub day: u32,
    pub row: u32,
    pub column: u32,
    /// Center in continuous pixel coordinates of the scaled canvas.
    pub center: Point,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GridLayout {
    pub rows: u32,
    pub columns: u32,
    pub dots: u32,
    pub scale: u32,
    /// Scaled dot radius.
    pub radius: u32,
    /// Scaled center-to-center distance.
    pub gap: u32,
    /// Pixel holding the center of the first dot.
    pub start_x: i64,
    pub start_y: i64,
    /// Size of the supersampled canvas the layout addresses.
    pub canvas: Canvas,
}

impl GridLayout {
    pub fn compute(
        target: Canvas,
        scale: u32,
        dots: u32,
        grid: GridSpec,
        dot: DotSpec,
        placement: Placement,
    ) -> YeargridResult<Self> {
        if scale == 0 {
            return Err(YeargridError::validation("supersample scale must be > 0"));
        }
        placement.validate()?;
        let (rows, columns) = grid.resolve(dots)?;
        let canvas = target.scaled(scale)?;

        let radius = dot
            .radius
            .checked_mul(scale)
            .ok_or_else(|| YeargridError::validation("scaled dot radius overflows u32"))?;
        let gap = dot
            .pitch()
            .and_then(|p| p.checked_mul(scale))
            .ok_or_else(|| YeargridError::validation("scaled dot pitch overflows u32"))?;

        let w = i64::from(canvas.width);
        let h = i64::from(canvas.height);
        let s = i64::from(scale);
        let total_w = i64::from(columns - 1) * i64::from(gap);
        let total_h = i64::from(rows - 1) * i64::from(gap);

        let start_x = (w - total_w).div_euclid(2);
        let start_y = match placement {
            Placement::Center => (h - total_h).div_euclid(2),
            Placement::LockScreen {
                top_safe,
                extra_offset,
            } => {
                let target_h = f64::from(target.height);
                let top = (target_h * top_safe).floor() as i64 * s;
                let extra = (target_h * extra_offset).floor() as i64 * s;
                top + (h - top - total_h).div_euclid(2) + extra
            }
        };

        tracing::debug!(
            rows,
            columns,
            gap,
            radius,
            start_x,
            start_y,
            "computed dot grid"
        );

        Ok(Self {
            rows,
            columns,
            dots,
            scale,
            radius,
            gap,
            start_x,
            start_y,
            canvas,
        })
    }

    /// Cell for the 0-based dot `i`, row-major.
    pub fn cell(&self, i: u32) -> Option<Cell> {
        if i >= self.dots {
            return None;
        }
        let row = i / self.columns;
        let column = i % self.columns;
        let x = self.start_x + i64::from(column) * i64::from(self.gap);
        let y = self.start_y + i64::from(row) * i64::from(self.gap);
        Some(Cell {
            day: i + 1,
            row,
            column,
            center: Point::new(x as f64 + 0.5, y as f64 + 0.5),
        })
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.dots).filter_map(|i| self.cell(i))
    }
}

#[cfg(test)]
#[path = "../tests/unit/layout.rs"]
mod tests;
