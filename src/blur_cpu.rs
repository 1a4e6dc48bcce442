use crate::foundation::core::Canvas;
use crate::foundation::error::{YeargridError, YeargridResult};

/// Kernel radius covering three standard deviations.
pub fn kernel_radius(sigma: f32) -> u32 {
    (3.0 * sigma).ceil().max(0.0) as u32
}

/// Separable Gaussian blur of a premultiplied RGBA8 buffer, edges clamped.
///
/// `sigma == 0` leaves the buffer untouched.
pub fn gaussian_blur_in_place(buf: &mut [u8], canvas: Canvas, sigma: f32) -> YeargridResult<()> {
    if buf.len() != canvas.rgba_len()? {
        return Err(YeargridError::render(
            "gaussian_blur_in_place expects a buffer matching width*height*4",
        ));
    }
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(YeargridError::validation("blur sigma must be finite and >= 0"));
    }
    let radius = kernel_radius(sigma);
    if radius == 0 {
        return Ok(());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; buf.len()];
    convolve(buf, &mut tmp, canvas, &kernel, Axis::Horizontal);
    convolve(&tmp, buf, canvas, &kernel, Axis::Vertical);
    Ok(())
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> YeargridResult<Vec<u32>> {
    let r = radius as i32;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 || !sum.is_finite() {
        return Err(YeargridError::render("gaussian kernel sum is zero"));
    }

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|wf| ((wf / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();

    // Push rounding drift into the center tap so the kernel sums to exactly 1.0 in Q16.
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }
    Ok(weights)
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

fn convolve(src: &[u8], dst: &mut [u8], canvas: Canvas, k: &[u32], axis: Axis) {
    let radius = (k.len() / 2) as i64;
    let w = i64::from(canvas.width);
    let h = i64::from(canvas.height);
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let d = ki as i64 - radius;
                let (sx, sy) = match axis {
                    Axis::Horizontal => ((x + d).clamp(0, w - 1), y),
                    Axis::Vertical => (x, (y + d).clamp(0, h - 1)),
                };
                let idx = ((sy * w + sx) as usize) * 4;
                for (c, a) in acc.iter_mut().enumerate() {
                    *a += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for (c, a) in acc.iter().enumerate() {
                dst[out_idx + c] = q16_to_u8(*a);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}
