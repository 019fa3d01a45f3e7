//! Per-frame image operations: grayscale, blur, differencing, median, ROI count.
//!
//! Neighborhood filters use reflect-101 borders (`dcb|abcd|cba`), so a
//! uniform image stays uniform after filtering.

use image::{GrayImage, Luma, RgbImage};

use crate::params::Roi;

/// Mask value for a changed pixel
pub const MASK_ON: u8 = 255;

/// Mask value for an unchanged pixel
pub const MASK_OFF: u8 = 0;

/// BT.601 luma weights in 14-bit fixed point (sum = 1 << 14)
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

/// Convert a color frame to 8-bit BT.601 luma (`0.299 R + 0.587 G + 0.114 B`)
pub fn to_grayscale(frame: &RgbImage) -> GrayImage {
    GrayImage::from_fn(frame.width(), frame.height(), |x, y| {
        let [r, g, b] = frame.get_pixel(x, y).0;
        let weighted = LUMA_R * r as u32 + LUMA_G * g as u32 + LUMA_B * b as u32;
        Luma([((weighted + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8])
    })
}

/// Separable Gaussian blur with an odd `kernel_size` (1 returns a copy)
pub fn gaussian_blur(image: &GrayImage, kernel_size: u32) -> GrayImage {
    if kernel_size <= 1 || image.width() == 0 || image.height() == 0 {
        return image.clone();
    }

    let weights = gaussian_kernel(kernel_size as usize);
    let radius = (weights.len() / 2) as i64;
    let (width, height) = image.dimensions();

    // Horizontal pass into a float buffer
    let mut horizontal = vec![0f32; (width * height) as usize];
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0f32;
            for (k, w) in weights.iter().enumerate() {
                let sx = reflect_101(x as i64 + k as i64 - radius, width);
                acc += w * image.get_pixel(sx, y)[0] as f32;
            }
            horizontal[(y * width + x) as usize] = acc;
        }
    }

    // Vertical pass, rounding back to u8
    GrayImage::from_fn(width, height, |x, y| {
        let mut acc = 0f32;
        for (k, w) in weights.iter().enumerate() {
            let sy = reflect_101(y as i64 + k as i64 - radius, height);
            acc += w * horizontal[(sy * width + x) as usize];
        }
        Luma([acc.round().clamp(0.0, 255.0) as u8])
    })
}

/// Normalized 1D Gaussian weights.
///
/// Sizes up to 7 use the binomial tables (5 → `[1 4 6 4 1] / 16`); larger
/// sizes derive sigma from the kernel size.
pub fn gaussian_kernel(size: usize) -> Vec<f32> {
    match size {
        0 | 1 => vec![1.0],
        3 => vec![0.25, 0.5, 0.25],
        5 => vec![0.0625, 0.25, 0.375, 0.25, 0.0625],
        7 => vec![
            0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125,
        ],
        _ => {
            let sigma = 0.3 * ((size as f64 - 1.0) * 0.5 - 1.0) + 0.8;
            let center = (size / 2) as f64;
            let raw: Vec<f64> = (0..size)
                .map(|i| {
                    let d = i as f64 - center;
                    (-(d * d) / (2.0 * sigma * sigma)).exp()
                })
                .collect();
            let sum: f64 = raw.iter().sum();
            raw.iter().map(|w| (w / sum) as f32).collect()
        }
    }
}

/// Binary change mask: `MASK_ON` where `|current - previous| > threshold`
///
/// Both images must share dimensions.
pub fn difference_mask(current: &GrayImage, previous: &GrayImage, threshold: u8) -> GrayImage {
    debug_assert_eq!(current.dimensions(), previous.dimensions());
    GrayImage::from_fn(current.width(), current.height(), |x, y| {
        let a = current.get_pixel(x, y)[0];
        let b = previous.get_pixel(x, y)[0];
        if a.abs_diff(b) > threshold {
            Luma([MASK_ON])
        } else {
            Luma([MASK_OFF])
        }
    })
}

/// Median filter with an odd square `kernel_size` (1 returns a copy)
pub fn median_filter(image: &GrayImage, kernel_size: u32) -> GrayImage {
    if kernel_size <= 1 || image.width() == 0 || image.height() == 0 {
        return image.clone();
    }

    let radius = (kernel_size / 2) as i64;
    let (width, height) = image.dimensions();
    let mut window = Vec::with_capacity((kernel_size * kernel_size) as usize);

    GrayImage::from_fn(width, height, |x, y| {
        window.clear();
        for dy in -radius..=radius {
            let sy = reflect_101(y as i64 + dy, height);
            for dx in -radius..=radius {
                let sx = reflect_101(x as i64 + dx, width);
                window.push(image.get_pixel(sx, sy)[0]);
            }
        }
        let mid = window.len() / 2;
        let (_, median, _) = window.select_nth_unstable(mid);
        Luma([*median])
    })
}

/// Count non-zero mask pixels inside `roi` (the motion score).
///
/// Pixels of the ROI falling outside the mask are ignored, so the result is
/// always within `[0, roi.area()]`.
pub fn count_nonzero_in_roi(mask: &GrayImage, roi: &Roi) -> u32 {
    let x_end = roi.right().min(mask.width());
    let y_end = roi.bottom().min(mask.height());
    let mut count = 0u32;
    for y in roi.y..y_end {
        for x in roi.x..x_end {
            if mask.get_pixel(x, y)[0] != 0 {
                count += 1;
            }
        }
    }
    count
}

/// Map an out-of-range coordinate back inside `[0, len)` mirroring around the
/// edge pixels
fn reflect_101(mut i: i64, len: u32) -> u32 {
    let n = len as i64;
    if n == 1 {
        return 0;
    }
    loop {
        if i < 0 {
            i = -i;
        } else if i >= n {
            i = 2 * n - 2 - i;
        } else {
            return i as u32;
        }
    }
}
