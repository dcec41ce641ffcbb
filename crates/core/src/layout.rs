//! Slide geometry.
//!
//! All lengths are EMUs (English Metric Units): 914400 per inch, 12700 per
//! point. Content slides split the usable width into a text zone and an image
//! zone separated by a gutter.

use serde::Serialize;

/// EMUs per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// EMUs per typographic point.
pub const EMU_PER_POINT: i64 = 12_700;

/// Convert inches to EMUs.
pub fn inches(value: f64) -> i64 {
    (value * EMU_PER_INCH as f64).round() as i64
}

/// Convert points to EMUs.
pub fn points(value: f64) -> i64 {
    (value * EMU_PER_POINT as f64).round() as i64
}

/// A positioned rectangle on a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Rect {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Fixed margins, zones and ratios for every slide in a deck.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub slide_width: i64,
    pub slide_height: i64,
    pub margin_left: i64,
    pub margin_right: i64,
    pub margin_top: i64,
    pub margin_bottom: i64,
    /// Top edge of the bullet body, below the title.
    pub content_top: i64,
    /// Height of the content-slide title box.
    pub title_height: i64,
    /// Space between the text zone and the image zone.
    pub gutter: i64,
    pub image_max_height: i64,
    /// Share of `usable_width - gutter` given to text when an image is present.
    pub text_zone_ratio: f64,
    /// Share of `usable_width - gutter` given to the image.
    pub image_zone_ratio: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            slide_width: inches(10.0),
            slide_height: inches(7.5),
            margin_left: inches(0.5),
            margin_right: inches(0.5),
            margin_top: inches(0.5),
            margin_bottom: inches(0.5),
            content_top: inches(1.5),
            title_height: inches(0.8),
            gutter: inches(0.4),
            image_max_height: inches(4.5),
            text_zone_ratio: 0.5,
            image_zone_ratio: 0.5,
        }
    }
}

impl LayoutConfig {
    /// Create the default 10in x 7.5in layout with a 50/50 text/image split.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text share of the split; the image gets the remainder.
    ///
    /// Clamped to `0.1..=0.9`. A NaN ratio leaves the split unchanged.
    pub fn with_text_zone_ratio(mut self, ratio: f64) -> Self {
        if ratio.is_nan() {
            return self;
        }
        let ratio = ratio.clamp(0.1, 0.9);
        self.text_zone_ratio = ratio;
        self.image_zone_ratio = 1.0 - ratio;
        self
    }

    /// Slide width minus the left and right margins.
    pub fn usable_width(&self) -> i64 {
        self.slide_width - self.margin_left - self.margin_right
    }

    /// Width of the bullet body.
    pub fn text_zone_width(&self, has_image: bool) -> i64 {
        if has_image {
            ((self.usable_width() - self.gutter) as f64 * self.text_zone_ratio) as i64
        } else {
            self.usable_width()
        }
    }

    /// Width available to a picture.
    pub fn image_zone_width(&self) -> i64 {
        ((self.usable_width() - self.gutter) as f64 * self.image_zone_ratio) as i64
    }

    /// Frame of the content-slide title box.
    pub fn title_frame(&self) -> Rect {
        Rect::new(
            self.margin_left,
            self.margin_top,
            self.usable_width(),
            self.title_height,
        )
    }

    /// Frame of the bullet body.
    pub fn body_frame(&self, has_image: bool) -> Rect {
        Rect::new(
            self.margin_left,
            self.content_top,
            self.text_zone_width(has_image),
            self.slide_height - self.content_top - self.margin_bottom,
        )
    }

    /// Frame of a picture with the given pixel size.
    ///
    /// The picture is scaled to the image-zone width. If that makes it taller
    /// than `image_max_height`, the height is clamped and the width recomputed
    /// from it so the aspect ratio holds.
    pub fn picture_frame(&self, pixel_width: u32, pixel_height: u32) -> Rect {
        let left = self.margin_left + self.text_zone_width(true) + self.gutter;
        let mut width = self.image_zone_width();

        let aspect = if pixel_width == 0 {
            1.0
        } else {
            pixel_height as f64 / pixel_width as f64
        };
        let mut height = (width as f64 * aspect).round() as i64;

        if height > self.image_max_height {
            width = (width as f64 * (self.image_max_height as f64 / height as f64)).round() as i64;
            height = self.image_max_height;
        }

        Rect::new(left, self.content_top, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversion() {
        assert_eq!(inches(1.0), 914_400);
        assert_eq!(points(18.0), 228_600);
        assert_eq!(inches(10.0), 9_144_000);
    }

    #[test]
    fn test_text_zone_ratio_clamped() {
        assert_eq!(LayoutConfig::new().with_text_zone_ratio(2.0).text_zone_ratio, 0.9);
        let nan = LayoutConfig::new().with_text_zone_ratio(f64::NAN);
        assert_eq!(nan.text_zone_ratio, 0.5);
        assert!(nan.text_zone_width(true) > 0);
    }

    #[test]
    fn test_zone_widths() {
        let layout = LayoutConfig::new();
        assert_eq!(layout.usable_width(), inches(9.0));
        assert_eq!(layout.text_zone_width(false), inches(9.0));
        assert_eq!(layout.text_zone_width(true), inches(4.3));
        assert_eq!(layout.image_zone_width(), inches(4.3));
    }

    #[test]
    fn test_body_frame() {
        let layout = LayoutConfig::new();
        let frame = layout.body_frame(true);
        assert_eq!(frame.x, inches(0.5));
        assert_eq!(frame.y, inches(1.5));
        assert_eq!(frame.height, inches(5.5));
    }

    #[test]
    fn test_landscape_picture_not_clamped() {
        let layout = LayoutConfig::new();
        let frame = layout.picture_frame(1200, 800);
        assert_eq!(frame.x, inches(0.5) + inches(4.3) + inches(0.4));
        assert_eq!(frame.y, inches(1.5));
        assert_eq!(frame.width, inches(4.3));
        assert!(frame.height <= layout.image_max_height);
    }

    #[test]
    fn test_portrait_picture_clamped_keeps_aspect() {
        let layout = LayoutConfig::new();
        let frame = layout.picture_frame(600, 1200);
        assert_eq!(frame.height, layout.image_max_height);
        // 1:2 aspect ratio survives the clamp
        assert_eq!(frame.width, inches(2.25));
    }

    #[test]
    fn test_text_ratio_override() {
        let layout = LayoutConfig::new().with_text_zone_ratio(0.6);
        assert!(layout.text_zone_width(true) > layout.image_zone_width());
        assert!((layout.image_zone_ratio - 0.4).abs() < 1e-9);
    }
}
