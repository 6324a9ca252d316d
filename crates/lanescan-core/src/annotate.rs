use crate::consts::{LINE_COLOR_BGR, LINE_THICKNESS};
use crate::frame::{BgrFrame, LineSegment, Point};

/// Draws detected segments onto a frame with a fixed color and stroke.
#[derive(Clone, Debug)]
pub struct Annotator {
    color: [u8; 3],
    thickness: u32,
}

impl Annotator {
    pub fn new() -> Self {
        Self {
            color: LINE_COLOR_BGR,
            thickness: LINE_THICKNESS,
        }
    }

    pub fn color(&self) -> [u8; 3] {
        self.color
    }

    pub fn thickness(&self) -> u32 {
        self.thickness
    }

    pub fn annotate(&self, frame: &mut BgrFrame, segments: &[LineSegment]) {
        for segment in segments {
            draw_thick_line(frame, segment, self.color, self.thickness);
        }
    }
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new()
    }
}

/// True if the center of pixel `p` lies within `thickness / 2` of `segment`.
///
/// This is the stroke footprint: a capsule with rounded ends.
pub fn stroke_contains(segment: &LineSegment, thickness: u32, p: Point) -> bool {
    let radius = thickness as f64 / 2.0;
    distance_sq_to_segment(segment, p) <= radius * radius
}

/// Paint every pixel of the stroke footprint, clipped to the frame.
pub fn draw_thick_line(frame: &mut BgrFrame, segment: &LineSegment, bgr: [u8; 3], thickness: u32) {
    if frame.is_empty() {
        return;
    }
    let reach = (thickness as i32 + 1) / 2;
    let (w, h) = (frame.width() as i32, frame.height() as i32);

    let x_lo = (segment.start.x.min(segment.end.x) - reach).max(0);
    let x_hi = (segment.start.x.max(segment.end.x) + reach).min(w - 1);
    let y_lo = (segment.start.y.min(segment.end.y) - reach).max(0);
    let y_hi = (segment.start.y.max(segment.end.y) + reach).min(h - 1);

    for y in y_lo..=y_hi {
        for x in x_lo..=x_hi {
            if stroke_contains(segment, thickness, Point::new(x, y)) {
                frame.set_pixel(x as usize, y as usize, bgr);
            }
        }
    }
}

fn distance_sq_to_segment(segment: &LineSegment, p: Point) -> f64 {
    let (ax, ay) = (segment.start.x as f64, segment.start.y as f64);
    let (bx, by) = (segment.end.x as f64, segment.end.y as f64);
    let (px, py) = (p.x as f64, p.y as f64);

    let (dx, dy) = (bx - ax, by - ay);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (ax + t * dx, ay + t * dy);
    (px - cx).powi(2) + (py - cy).powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_stroke_is_seven_pixels_tall() {
        let mut frame = BgrFrame::filled(40, 40, [0, 0, 0]);
        let seg = LineSegment::new(10, 20, 30, 20);
        Annotator::new().annotate(&mut frame, &[seg]);

        for y in 17..=23 {
            assert_eq!(frame.pixel(20, y), LINE_COLOR_BGR, "row {y}");
        }
        assert_eq!(frame.pixel(20, 16), [0, 0, 0]);
        assert_eq!(frame.pixel(20, 24), [0, 0, 0]);
    }

    #[test]
    fn stroke_has_round_caps() {
        let seg = LineSegment::new(10, 20, 30, 20);
        assert!(stroke_contains(&seg, 7, Point::new(7, 20)));
        assert!(!stroke_contains(&seg, 7, Point::new(6, 20)));
        // Corner of the bounding box lies outside the round cap.
        assert!(!stroke_contains(&seg, 7, Point::new(7, 17)));
    }

    #[test]
    fn stroke_is_clipped_to_frame() {
        let mut frame = BgrFrame::filled(10, 10, [0, 0, 0]);
        let seg = LineSegment::new(-5, -5, 20, 20);
        draw_thick_line(&mut frame, &seg, [1, 2, 3], 7);
        assert_eq!(frame.pixel(0, 0), [1, 2, 3]);
        assert_eq!(frame.pixel(9, 9), [1, 2, 3]);
        assert_eq!(frame.pixel(9, 0), [0, 0, 0]);
    }
}
