//! Color metrics shared by the pool builder and the assignment engine

use image::{Pixel, Rgb, Rgba};

/// Euclidean distance between two colors in RGB space
pub fn color_distance(a: Rgb<u8>, b: Rgb<u8>) -> f64 {
    a.0.iter()
        .zip(b.0.iter())
        .map(|(&x, &y)| {
            let d = f64::from(x) - f64::from(y);
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Mean of the three color channels, in `0.0..=255.0`
pub fn brightness(color: Rgb<u8>) -> f64 {
    color.0.iter().map(|&c| f64::from(c)).sum::<f64>() / 3.0
}

/// Alpha channel normalized to `0.0..=1.0`
pub fn alpha_factor(color: Rgba<u8>) -> f64 {
    f64::from(color.0[3]) / 255.0
}

/// Drop the alpha channel
pub fn opaque_part(color: Rgba<u8>) -> Rgb<u8> {
    color.to_rgb()
}

/// Attach an alpha channel to an RGB color
pub const fn with_alpha(color: Rgb<u8>, alpha: u8) -> Rgba<u8> {
    Rgba([color.0[0], color.0[1], color.0[2], alpha])
}

/// Linear blend of `top` over `base` with opacity `alpha`
pub fn blend(base: Rgba<u8>, top: Rgba<u8>, alpha: f64) -> Rgba<u8> {
    let alpha = alpha.clamp(0.0, 1.0);
    let mut out = base;
    for (o, (&b, &t)) in out.0.iter_mut().zip(base.0.iter().zip(top.0.iter())) {
        let mixed = f64::from(t).mul_add(alpha, f64::from(b) * (1.0 - alpha));
        *o = mixed.round().clamp(0.0, 255.0) as u8;
    }
    out
}
