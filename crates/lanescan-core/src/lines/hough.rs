use ndarray::ArrayView2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::consts::{
    HOUGH_MAX_LINE_GAP, HOUGH_MIN_LINE_LENGTH, HOUGH_RHO, HOUGH_RNG_SEED, HOUGH_THETA,
    HOUGH_VOTE_THRESHOLD,
};
use crate::frame::{LineSegment, Point};

/// Fixed-point shift used when stepping along a candidate line.
const STEP_SHIFT: u32 = 16;

/// Parameters of the progressive probabilistic Hough transform.
#[derive(Clone, Debug, PartialEq)]
pub struct HoughParams {
    /// Distance resolution of the accumulator, in pixels.
    pub rho: f32,
    /// Angle resolution of the accumulator, in radians.
    pub theta: f32,
    /// Votes a (rho, theta) cell needs before the line through it is traced.
    pub threshold: i32,
    /// Segments shorter than this along both axes are discarded.
    pub min_line_length: i32,
    /// Longest run of background pixels bridged while tracing.
    pub max_line_gap: i32,
    pub max_lines: usize,
    /// Seed of the random point-visiting order.
    pub seed: u64,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            rho: HOUGH_RHO,
            theta: HOUGH_THETA,
            threshold: HOUGH_VOTE_THRESHOLD,
            min_line_length: HOUGH_MIN_LINE_LENGTH,
            max_line_gap: HOUGH_MAX_LINE_GAP,
            max_lines: usize::MAX,
            seed: HOUGH_RNG_SEED,
        }
    }
}

struct Accumulator {
    votes: Vec<i32>,
    num_angle: usize,
    num_rho: usize,
    /// Interleaved (cos, sin) per angle, pre-divided by rho.
    trig: Vec<(f32, f32)>,
}

impl Accumulator {
    fn new(width: usize, height: usize, params: &HoughParams) -> Self {
        let irho = 1.0 / params.rho;
        let theta = params.theta as f64;
        let num_angle = ((std::f64::consts::PI / theta).round() as usize).max(1);
        let num_rho = (((width + height) * 2 + 1) as f32 / params.rho).round() as usize;

        let trig = (0..num_angle)
            .map(|n| {
                let angle = n as f64 * theta;
                ((angle.cos() as f32) * irho, (angle.sin() as f32) * irho)
            })
            .collect();

        Self {
            votes: vec![0; num_angle * num_rho],
            num_angle,
            num_rho,
            trig,
        }
    }

    #[inline]
    fn rho_index(&self, n: usize, x: i32, y: i32) -> usize {
        let (c, s) = self.trig[n];
        let r = (x as f32 * c + y as f32 * s).round_ties_even() as i64;
        (r + (self.num_rho as i64 - 1) / 2) as usize
    }

    /// Add one point's votes; returns the strongest angle and its vote count.
    fn vote(&mut self, x: i32, y: i32, threshold: i32) -> (usize, i32) {
        let mut max_val = threshold - 1;
        let mut max_n = 0;
        for n in 0..self.num_angle {
            let idx = n * self.num_rho + self.rho_index(n, x, y);
            self.votes[idx] += 1;
            if self.votes[idx] > max_val {
                max_val = self.votes[idx];
                max_n = n;
            }
        }
        (max_n, max_val)
    }

    fn unvote(&mut self, x: i32, y: i32) {
        for n in 0..self.num_angle {
            let idx = n * self.num_rho + self.rho_index(n, x, y);
            self.votes[idx] -= 1;
        }
    }
}

/// Fixed-point walker along a line direction, one pixel per step on the
/// major axis.
#[derive(Clone, Copy)]
struct Walk {
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
    x_major: bool,
}

impl Walk {
    fn start(x: i32, y: i32, a: f32, b: f32) -> Self {
        let one = (1i64 << STEP_SHIFT) as f32;
        let half = 1 << (STEP_SHIFT - 1);
        if a.abs() > b.abs() {
            Self {
                x,
                y: (y << STEP_SHIFT) + half,
                dx: if a > 0.0 { 1 } else { -1 },
                dy: (b * one / a.abs()).round_ties_even() as i32,
                x_major: true,
            }
        } else {
            Self {
                x: (x << STEP_SHIFT) + half,
                y,
                dx: (a * one / b.abs()).round_ties_even() as i32,
                dy: if b > 0.0 { 1 } else { -1 },
                x_major: false,
            }
        }
    }

    fn reversed(self) -> Self {
        Self {
            dx: -self.dx,
            dy: -self.dy,
            ..self
        }
    }

    #[inline]
    fn pixel(&self) -> Point {
        if self.x_major {
            Point::new(self.x, self.y >> STEP_SHIFT)
        } else {
            Point::new(self.x >> STEP_SHIFT, self.y)
        }
    }

    #[inline]
    fn step(&mut self) {
        self.x += self.dx;
        self.y += self.dy;
    }
}

/// Progressive probabilistic Hough transform over a binary image.
///
/// Foreground points are visited in random order. Each point votes in the
/// accumulator; once a cell reaches `threshold` the line through it is
/// traced in both directions, bridging gaps of up to `max_line_gap`
/// background pixels. Traced pixels are removed from further voting, and
/// when the segment is long enough their votes are withdrawn too.
///
/// Segments are returned in emission order, in the coordinates of `image`.
pub fn hough_lines_p(image: ArrayView2<'_, u8>, params: &HoughParams) -> Vec<LineSegment> {
    let (height, width) = image.dim();
    let mut lines = Vec::new();
    if height == 0 || width == 0 || params.max_lines == 0 {
        return lines;
    }

    let mut acc = Accumulator::new(width, height, params);
    let mut rng = StdRng::seed_from_u64(params.seed);

    // Stage 1: collect foreground points.
    let mut live = vec![false; height * width];
    let mut points: Vec<Point> = Vec::new();
    for ((row, col), &v) in image.indexed_iter() {
        if v != 0 {
            live[row * width + col] = true;
            points.push(Point::new(col as i32, row as i32));
        }
    }

    let in_bounds =
        |p: Point| p.x >= 0 && p.y >= 0 && (p.x as usize) < width && (p.y as usize) < height;
    let at = |p: Point| p.y as usize * width + p.x as usize;

    // Stage 2: visit points in random order.
    let mut count = points.len();
    while count > 0 {
        let idx = rng.gen_range(0..count);
        let point = points[idx];
        points[idx] = points[count - 1];
        count -= 1;

        if !live[at(point)] {
            continue;
        }

        let (max_n, max_val) = acc.vote(point.x, point.y, params.threshold);
        if max_val < params.threshold {
            continue;
        }

        let (cos_n, sin_n) = acc.trig[max_n];
        let origin = Walk::start(point.x, point.y, -sin_n, cos_n);

        // Find both ends of the segment.
        let mut ends = [point; 2];
        for (k, end) in ends.iter_mut().enumerate() {
            let mut walk = if k == 0 { origin } else { origin.reversed() };
            let mut gap = 0;
            loop {
                let p = walk.pixel();
                if !in_bounds(p) {
                    break;
                }
                if live[at(p)] {
                    gap = 0;
                    *end = p;
                } else {
                    gap += 1;
                    if gap > params.max_line_gap {
                        break;
                    }
                }
                walk.step();
            }
        }

        let good_line = (ends[1].x - ends[0].x).abs() >= params.min_line_length
            || (ends[1].y - ends[0].y).abs() >= params.min_line_length;

        // Consume the traced pixels.
        for (k, end) in ends.iter().enumerate() {
            let mut walk = if k == 0 { origin } else { origin.reversed() };
            loop {
                let p = walk.pixel();
                if !in_bounds(p) {
                    break;
                }
                if live[at(p)] {
                    if good_line {
                        acc.unvote(p.x, p.y);
                    }
                    live[at(p)] = false;
                }
                if p == *end {
                    break;
                }
                walk.step();
            }
        }

        if good_line {
            lines.push(LineSegment {
                start: ends[0],
                end: ends[1],
            });
            if lines.len() >= params.max_lines {
                break;
            }
        }
    }

    lines
}
