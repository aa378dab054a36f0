//! Item height model and letterbox policy

use crate::Rect;

/// An image that can be shown in the list.
pub trait Picture {
    /// Natural size in pixels as (width, height).
    fn pixel_size(&self) -> (i32, i32);

    /// Text shown above the large preview.
    fn caption(&self) -> String;
}

/// Height that shows an image of natural size `natural_w` x `natural_h` at
/// `width` pixels wide without distortion.
///
/// Layout and rendering both go through here so they agree on every item's
/// footprint.
pub fn height_for_width(natural_w: i32, natural_h: i32, width: i32) -> i32 {
    if natural_w <= 0 {
        return 0;
    }
    (natural_h as f32 * width as f32 / natural_w as f32).ceil() as i32
}

/// Where to put the image and the background bars inside a destination box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Letterbox {
    /// Destination of the stretched image, `None` for an empty source.
    pub image: Option<Rect>,
    /// Background bars on either side (left/right or top/bottom).
    pub bars: [Option<Rect>; 2],
}

/// Fit a `src_w` x `src_h` image into `dest` preserving its aspect ratio.
///
/// Returns `None` when `dest` is empty, meaning nothing should be drawn at
/// all. An empty source fills the whole box with background.
pub fn letterbox(src_w: i32, src_h: i32, dest: Rect) -> Option<Letterbox> {
    if dest.is_empty() {
        return None;
    }

    if src_w <= 0 || src_h <= 0 {
        return Some(Letterbox {
            image: None,
            bars: [Some(dest), None],
        });
    }

    let src_ar = src_w as f32 / src_h as f32;
    let dest_ar = dest.w as f32 / dest.h as f32;
    let Rect { x, y, w, h } = dest;

    let layout = if src_ar < dest_ar {
        // Narrower source: bars left and right.
        let proper_w = (h as f32 * src_ar) as i32;
        let excess = w - proper_w;
        let left = excess / 2;
        let right = excess - left;

        Letterbox {
            image: Some(Rect::new(x + left, y, proper_w, h)),
            bars: [
                Some(Rect::new(x, y, left, h)),
                Some(Rect::new(x + left + proper_w, y, right, h)),
            ],
        }
    } else if src_ar > dest_ar {
        // Wider source: bars top and bottom.
        let proper_h = (w as f32 / src_ar) as i32;
        let excess = h - proper_h;
        let top = excess / 2;
        let bottom = excess - top;

        Letterbox {
            image: Some(Rect::new(x, y + top, w, proper_h)),
            bars: [
                Some(Rect::new(x, y, w, top)),
                Some(Rect::new(x, y + top + proper_h, w, bottom)),
            ],
        }
    } else {
        Letterbox {
            image: Some(dest),
            bars: [None, None],
        }
    };

    Some(layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(rect: &Rect) -> i64 {
        rect.w.max(0) as i64 * rect.h.max(0) as i64
    }

    #[test]
    fn height_keeps_aspect_ratio() {
        assert_eq!(height_for_width(1920, 1080, 390), 220);
        assert_eq!(height_for_width(100, 80, 100), 80);
        assert_eq!(height_for_width(3, 1, 10), 4);
    }

    #[test]
    fn height_is_zero_without_width() {
        assert_eq!(height_for_width(0, 1080, 390), 0);
        assert_eq!(height_for_width(-4, 1080, 390), 0);
        assert_eq!(height_for_width(1920, 1080, 0), 0);
    }

    #[test]
    fn height_is_monotonic_in_width() {
        let mut previous = 0;
        for width in 0..600 {
            let h = height_for_width(1366, 768, width);
            assert!(h >= previous, "width {width} gave {h} after {previous}");

            let exact = 768.0 * width as f64 / 1366.0;
            assert!((h as f64 - exact).abs() <= 1.0);
            previous = h;
        }
    }

    #[test]
    fn empty_destination_draws_nothing() {
        assert_eq!(letterbox(10, 10, Rect::new(0, 0, 0, 50)), None);
        assert_eq!(letterbox(10, 10, Rect::new(0, 0, 50, -1)), None);
    }

    #[test]
    fn empty_source_is_all_background() {
        let dest = Rect::new(3, 4, 50, 60);
        let layout = letterbox(0, 0, dest).unwrap();

        assert_eq!(layout.image, None);
        assert_eq!(layout.bars, [Some(dest), None]);
    }

    #[test]
    fn wide_source_gets_top_and_bottom_bars() {
        let layout = letterbox(200, 100, Rect::new(10, 10, 100, 101)).unwrap();

        assert_eq!(layout.image, Some(Rect::new(10, 35, 100, 50)));
        assert_eq!(
            layout.bars,
            [
                Some(Rect::new(10, 10, 100, 25)),
                Some(Rect::new(10, 85, 100, 26)),
            ]
        );
    }

    #[test]
    fn matching_ratio_has_no_bars() {
        let dest = Rect::new(0, 0, 160, 90);
        let layout = letterbox(1920, 1080, dest).unwrap();

        assert_eq!(layout.image, Some(dest));
        assert_eq!(layout.bars, [None, None]);
    }

    #[test]
    fn pieces_tile_the_destination() {
        let dest = Rect::new(7, 9, 333, 217);
        for (src_w, src_h) in [(1920, 1080), (1080, 1920), (640, 480), (1, 1000)] {
            let layout = letterbox(src_w, src_h, dest).unwrap();
            let total: i64 = layout
                .bars
                .iter()
                .flatten()
                .chain(layout.image.iter())
                .map(area)
                .sum();
            assert_eq!(total, area(&dest), "source {src_w}x{src_h}");
        }
    }
}
