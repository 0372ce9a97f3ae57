//! Pure layout math for the raster producers.
//!
//! No I/O and no pixels: everything here is unit-testable arithmetic that the
//! backend turns into drawing calls.

/// Left edge that centers a run of `text_width` pixels on the canvas.
///
/// Negative when the text is wider than the canvas; drawing clips it.
pub fn centered_x(canvas_width: u32, text_width: u32) -> i32 {
    (canvas_width as i32 - text_width as i32) / 2
}

/// Top edge of each body line.
///
/// The first line starts at `top`; each following line starts below the
/// previous one by its height plus `gap`.
pub fn line_tops(top: u32, gap: u32, heights: &[u32]) -> Vec<i32> {
    let mut y = top as i32;
    heights
        .iter()
        .map(|height| {
            let current = y;
            y += *height as i32 + gap as i32;
            current
        })
        .collect()
}

/// Top edge of the caption, `offset` pixels above the bottom of the canvas.
pub fn caption_top(canvas_height: u32, offset: u32) -> i32 {
    canvas_height as i32 - offset as i32
}

/// Side length in pixels of a rendered QR symbol with its border.
pub fn qr_image_side(modules: u32, module_size: u32, border: u32) -> u32 {
    (modules + 2 * border) * module_size
}

/// Integer magnification of the 8×8 built-in glyphs for a requested pixel
/// size. Never below 1.
pub fn bitmap_scale(size: f32) -> u32 {
    (size / 14.0).round().max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_text() {
        assert_eq!(centered_x(600, 200), 200);
        assert_eq!(centered_x(600, 201), 199);
    }

    #[test]
    fn text_wider_than_canvas() {
        assert_eq!(centered_x(100, 140), -20);
    }

    #[test]
    fn line_tops_accumulate_height_and_gap() {
        assert_eq!(line_tops(100, 20, &[30, 25, 30]), vec![100, 150, 195]);
    }

    #[test]
    fn line_tops_empty() {
        assert!(line_tops(100, 20, &[]).is_empty());
    }

    #[test]
    fn caption_near_bottom() {
        assert_eq!(caption_top(400, 40), 360);
    }

    #[test]
    fn qr_side_includes_border() {
        // Version 3 symbol: 29 modules
        assert_eq!(qr_image_side(29, 10, 2), 330);
        assert_eq!(qr_image_side(21, 1, 0), 21);
    }

    #[test]
    fn bitmap_scale_for_card_sizes() {
        assert_eq!(bitmap_scale(28.0), 2);
        assert_eq!(bitmap_scale(16.0), 1);
        assert_eq!(bitmap_scale(4.0), 1);
    }
}
