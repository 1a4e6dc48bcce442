use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{YeargridError, YeargridResult};

pub type PremulRgba8 = [u8; 4];

/// Source-over with `src` scaled by `coverage` in `[0, 1]`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, coverage: f32) -> PremulRgba8 {
    let coverage = coverage.clamp(0.0, 1.0);
    if coverage <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((coverage * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

/// Composite a single flat color over every pixel of an RGBA8 buffer.
pub fn over_color_in_place(dst: &mut [u8], color: Rgba8Premul) -> YeargridResult<()> {
    if !dst.len().is_multiple_of(4) {
        return Err(YeargridError::render(
            "over_color_in_place expects an rgba8 buffer",
        ));
    }
    if color.a == 0 {
        return Ok(());
    }
    let src = color.to_array();
    for d in dst.chunks_exact_mut(4) {
        let out = over([d[0], d[1], d[2], d[3]], src, 1.0);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Fill every pixel of an RGBA8 buffer with `color`.
pub fn fill(dst: &mut [u8], color: Rgba8Premul) {
    let px = color.to_array();
    for d in dst.chunks_exact_mut(4) {
        d.copy_from_slice(&px);
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}
