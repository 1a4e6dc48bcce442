//! Year-progress wallpaper renderer.
//!
//! One dot per day of the year, colored past / today / future, drawn over a solid,
//! gradient or photo background:
//!
//! - Load and validate a [`WallpaperConfig`]
//! - Resolve a [`RenderPlan`] for a date with [`plan`]
//! - Rasterize it with [`render`] and write the PNG with [`write_png`]
#![forbid(unsafe_code)]

pub mod background;
pub mod blur_cpu;
pub mod calendar;
pub mod color;
pub mod composite_cpu;
pub mod config;
pub mod encode;
pub mod foundation;
pub mod layout;
pub mod raster;
pub mod render;

pub use background::Background;
pub use calendar::{DayState, YearProgress};
pub use config::WallpaperConfig;
pub use encode::write_png;
pub use foundation::core::{Canvas, Rgba8, Rgba8Premul};
pub use foundation::error::{YeargridError, YeargridResult};
pub use layout::{Cell, DotSpec, GridLayout, GridSpec, Placement};
pub use raster::{DotStats, Palette};
pub use render::{FrameRGBA, RenderPlan, Rendered, plan, render, resolve_date, summary};
