//! Drawing helpers for the annotated output frame.

use fontdue::{Font, FontSettings};
use image::{Rgb, RgbImage};

use crate::error::{Error, Result};
use crate::params::Roi;

pub const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
pub const RED: Rgb<u8> = Rgb([255, 0, 0]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Draw a rectangle outline `thickness` pixels wide, growing inward from the
/// ROI edges. Parts outside the frame are clipped.
pub fn draw_outline(frame: &mut RgbImage, roi: &Roi, color: Rgb<u8>, thickness: u32) {
    let thickness = thickness.max(1);
    let x_end = roi.right().min(frame.width());
    let y_end = roi.bottom().min(frame.height());

    for y in roi.y..y_end {
        for x in roi.x..x_end {
            let on_edge = x < roi.x + thickness
                || y < roi.y + thickness
                || x + thickness >= roi.right()
                || y + thickness >= roi.bottom();
            if on_edge {
                frame.put_pixel(x, y, color);
            }
        }
    }
}

/// Fill the ROI with `color` blended at `alpha` opacity over the frame:
/// `out = alpha * color + (1 - alpha) * frame`
pub fn blend_fill(frame: &mut RgbImage, roi: &Roi, color: Rgb<u8>, alpha: f32) {
    let alpha = alpha.clamp(0.0, 1.0);
    let x_end = roi.right().min(frame.width());
    let y_end = roi.bottom().min(frame.height());

    for y in roi.y..y_end {
        for x in roi.x..x_end {
            let pixel = frame.get_pixel_mut(x, y);
            for c in 0..3 {
                let blended = alpha * color[c] as f32 + (1.0 - alpha) * pixel[c] as f32;
                pixel[c] = blended.round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

/// Font used for frame labels
const FONT_DATA: &[u8] = include_bytes!("../../assets/fonts/DejaVuSansMono.ttf");

/// Rasterizes label text straight into annotated frames
pub struct TextOverlay {
    font: Font,
    font_size: f32,
}

impl TextOverlay {
    /// Load the embedded font at `font_size` pixels per em
    pub fn new(font_size: f32) -> Result<Self> {
        let font = Font::from_bytes(FONT_DATA, FontSettings::default())
            .map_err(|e| Error::Font(e.to_string()))?;
        Ok(Self { font, font_size })
    }

    /// Alpha-composite `text` with its baseline-left corner at `(x, baseline_y)`.
    /// Glyph parts outside the frame are clipped.
    pub fn draw(
        &self,
        frame: &mut RgbImage,
        text: &str,
        x: u32,
        baseline_y: u32,
        color: Rgb<u8>,
    ) {
        let (width, height) = (frame.width() as i32, frame.height() as i32);
        let mut cursor_x = x as f32;

        for ch in text.chars() {
            let (metrics, bitmap) = self.font.rasterize(ch, self.font_size);
            let glyph_x = cursor_x.round() as i32 + metrics.xmin;
            let glyph_y = baseline_y as i32 - metrics.height as i32 - metrics.ymin;

            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let coverage = bitmap[gy * metrics.width + gx];
                    if coverage == 0 {
                        continue;
                    }
                    let (px, py) = (glyph_x + gx as i32, glyph_y + gy as i32);
                    if px < 0 || py < 0 || px >= width || py >= height {
                        continue;
                    }

                    let a = coverage as f32 / 255.0;
                    let pixel = frame.get_pixel_mut(px as u32, py as u32);
                    for c in 0..3 {
                        let blended = a * color[c] as f32 + (1.0 - a) * pixel[c] as f32;
                        pixel[c] = blended.round().clamp(0.0, 255.0) as u8;
                    }
                }
            }

            cursor_x += metrics.advance_width;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([0, 0, 0]))
    }

    #[test]
    fn test_outline_leaves_interior() {
        let mut frame = black(40, 40);
        let roi = Roi::new(10, 10, 20, 20);
        draw_outline(&mut frame, &roi, GREEN, 2);

        assert_eq!(*frame.get_pixel(10, 10), GREEN);
        assert_eq!(*frame.get_pixel(11, 20), GREEN);
        assert_eq!(*frame.get_pixel(29, 29), GREEN);
        assert_eq!(*frame.get_pixel(20, 20), Rgb([0, 0, 0]));
        assert_eq!(*frame.get_pixel(5, 5), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_blend_fill_alpha() {
        let mut frame = black(10, 10);
        let roi = Roi::new(2, 2, 4, 4);
        blend_fill(&mut frame, &roi, RED, 0.35);

        // 0.35 * 255 = 89.25
        assert_eq!(*frame.get_pixel(3, 3), Rgb([89, 0, 0]));
        assert_eq!(*frame.get_pixel(0, 0), Rgb([0, 0, 0]));
    }

    fn lit_pixels(frame: &RgbImage) -> Vec<(u32, u32)> {
        frame
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0 != [0, 0, 0])
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn test_label_drawn_around_baseline() {
        let overlay = TextOverlay::new(24.0).unwrap();
        let mut frame = black(400, 60);
        overlay.draw(&mut frame, "motion_pixels=801", 10, 30, WHITE);

        let lit = lit_pixels(&frame);
        assert!(!lit.is_empty());
        // Ascenders stay within one em above the baseline, descenders
        // within 10 px below it
        assert!(lit.iter().all(|&(_, y)| (6..40).contains(&y)));
        assert!(lit.iter().any(|&(_, y)| y < 30));
    }

    #[test]
    fn test_any_printable_character_renders() {
        let overlay = TextOverlay::new(24.0).unwrap();
        for ch in ['Q', 'W', '#', '%', 'z', 'K'] {
            let mut frame = black(40, 40);
            overlay.draw(&mut frame, &ch.to_string(), 5, 30, WHITE);
            assert!(!lit_pixels(&frame).is_empty(), "{} drew nothing", ch);
        }
    }

    #[test]
    fn test_text_clipped_at_edge() {
        let overlay = TextOverlay::new(24.0).unwrap();
        let mut frame = black(12, 8);
        overlay.draw(&mut frame, "8888", 0, 7, WHITE);
        overlay.draw(&mut frame, "8888", 10, 200, WHITE);
        assert!(!lit_pixels(&frame).is_empty());
    }
}
