use serde::{Deserialize, Serialize};

use crate::noise_generator::fractal_noise;

const MIN_SAMPLES: usize = 40;
const SAMPLE_SPACING: usize = 4;
const BASELINE_FRACTION: f64 = 0.35;

const NOISE_STRETCH: f64 = 0.6;
const NOISE_WEIGHT: f64 = 0.8;
const SINE_FREQUENCY: f64 = 0.01;
const SINE_SPEED: f64 = 0.4;
const SINE_WEIGHT: f64 = 0.6;

pub const RIDGE_HEIGHT: f64 = 200.0;
pub const RIDGE_COLOR: Rgba = [0.0, 0.0, 0.0, 0.95];

pub const GLOW_HEIGHT_FRACTION: f64 = 0.35;
pub const GLOW_CENTER_FRACTION: f64 = 0.85;
pub const GLOW_BLUR: f64 = 40.0;
pub const GLOW_COLORS: [Rgba; 2] = [[0.0, 0.0, 0.0, 0.0], [0.2, 0.8, 0.3, 0.15]];

pub const OUTLINE_COLOR: Rgba = [1.0, 1.0, 1.0, 0.03];
pub const OUTLINE_WIDTH: f64 = 1.0;

pub type Rgba = [f32; 4];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Closed polygon: the wavy top edge followed by the two bottom corners
#[derive(Debug, Clone, PartialEq)]
pub struct AuroraPath {
    pub points: Vec<Point>,
}

impl AuroraPath {
    /// The wavy edge only, without the starting baseline point or the bottom corners
    pub fn crest(&self) -> &[Point] {
        let len = self.points.len();
        if len < 3 {
            return &[];
        }
        &self.points[1..len - 2]
    }
}

/// One curtain of the aurora.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuroraLayer {
    pub amplitude: f64,
    pub speed: f64,

    /// Cycles per pixel
    pub frequency: f64,

    pub blur: f64,
    pub vertical_offset: f64,

    /// Gradient from the top-left corner to the bottom-right one
    pub colors: [Rgba; 2],
}

impl Default for AuroraLayer {
    fn default() -> Self {
        Self {
            amplitude: 140.0,
            speed: 0.18,
            frequency: 0.0035,
            blur: 40.0,
            vertical_offset: -80.0,
            colors: [[0.5, 0.0, 0.5, 0.95], [0.0, 1.0, 1.0, 0.8]],
        }
    }
}

impl AuroraLayer {
    pub fn sample_count(width: f64) -> usize {
        if !width.is_finite() {
            return MIN_SAMPLES;
        }
        MIN_SAMPLES.max(width.max(0.0) as usize / SAMPLE_SPACING)
    }

    pub fn baseline(&self, size: Size) -> f64 {
        size.height * BASELINE_FRACTION + self.vertical_offset
    }

    pub fn crest_height(&self, baseline: f64, x: f64, t: f64) -> f64 {
        let n = fractal_noise(x * NOISE_STRETCH * self.frequency, t * NOISE_STRETCH);
        let sine = (x * SINE_FREQUENCY + t * SINE_SPEED).sin() * SINE_WEIGHT;
        baseline + sine * self.amplitude + n * self.amplitude * NOISE_WEIGHT
    }

    pub fn build_path(&self, size: Size, time: f64) -> AuroraPath {
        let t = time * self.speed;
        let samples = Self::sample_count(size.width);
        let baseline = self.baseline(size);

        let mut points = Vec::with_capacity(samples + 4);
        points.push(Point::new(0.0, baseline));

        for i in 0..=samples {
            let x = i as f64 / samples as f64 * size.width;
            points.push(Point::new(x, self.crest_height(baseline, x, t)));
        }

        points.push(Point::new(size.width, size.height));
        points.push(Point::new(0.0, size.height));

        AuroraPath { points }
    }

    pub fn stacked_opacity(index: usize) -> f64 {
        0.9 - index as f64 * 0.12
    }

    pub fn stacked_offset(index: usize) -> Point {
        Point::new(index as f64 * 6.0, index as f64 * -8.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub control1: Point,
    pub control2: Point,
    pub to: Point,
}

impl CubicSegment {
    pub fn point_at(&self, from: Point, t: f64) -> Point {
        let u = 1.0 - t;
        let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
        Point::new(
            a * from.x + b * self.control1.x + c * self.control2.x + d * self.to.x,
            a * from.y + b * self.control1.y + c * self.control2.y + d * self.to.y,
        )
    }
}

/// Hill silhouette along the bottom edge, `RIDGE_HEIGHT` tall.
#[derive(Debug, Clone, PartialEq)]
pub struct Ridge {
    pub start: Point,
    pub curves: [CubicSegment; 3],

    /// Straight edges closing the shape after the last curve
    pub lines: [Point; 3],
}

impl Ridge {
    pub fn new(size: Size) -> Self {
        let w = size.width;
        let top = size.height - RIDGE_HEIGHT;
        let p = |x: f64, y: f64| Point::new(x, top + y);

        Self {
            start: p(0.0, 120.0),
            curves: [
                CubicSegment {
                    control1: p(w * 0.06, 100.0),
                    control2: p(w * 0.2, 20.0),
                    to: p(w * 0.25, 40.0),
                },
                CubicSegment {
                    control1: p(w * 0.33, 60.0),
                    control2: p(w * 0.45, 110.0),
                    to: p(w * 0.55, 90.0),
                },
                CubicSegment {
                    control1: p(w * 0.66, 60.0),
                    control2: p(w * 0.75, 10.0),
                    to: p(w * 0.78, 40.0),
                },
            ],
            lines: [p(w, 120.0), p(w, RIDGE_HEIGHT), p(0.0, RIDGE_HEIGHT)],
        }
    }

    /// Polygon with each curve cut into `steps` straight pieces
    pub fn flatten(&self, steps: usize) -> Vec<Point> {
        let steps = steps.max(1);
        let mut points = Vec::with_capacity(1 + steps * self.curves.len() + self.lines.len());
        points.push(self.start);

        let mut from = self.start;
        for curve in &self.curves {
            for i in 1..=steps {
                points.push(curve.point_at(from, i as f64 / steps as f64));
            }
            from = curve.to;
        }

        points.extend_from_slice(&self.lines);
        points
    }
}

/// Soft band of light just above the horizon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizonGlow {
    pub top: f64,
    pub bottom: f64,
    pub colors: [Rgba; 2],
    pub blur: f64,
}

impl HorizonGlow {
    pub fn new(size: Size) -> Self {
        let center = size.height * GLOW_CENTER_FRACTION;
        let half = size.height * GLOW_HEIGHT_FRACTION / 2.0;
        Self {
            top: center - half,
            bottom: center + half,
            colors: GLOW_COLORS,
            blur: GLOW_BLUR,
        }
    }

    /// 0 at the top edge, 1 at the bottom edge, `None` outside the band
    pub fn position(&self, y: f64) -> Option<f64> {
        if y < self.top || y > self.bottom || self.bottom <= self.top {
            return None;
        }
        Some((y - self.top) / (self.bottom - self.top))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise_generator::FractalNoise;

    #[test]
    fn sample_count_has_a_floor() {
        assert_eq!(AuroraLayer::sample_count(0.0), 40);
        assert_eq!(AuroraLayer::sample_count(100.0), 40);
        assert_eq!(AuroraLayer::sample_count(400.0), 100);
        assert_eq!(AuroraLayer::sample_count(1_001.0), 250);
    }

    #[test]
    fn path_is_closed_along_the_bottom() {
        let layer = AuroraLayer::default();
        let size = Size::new(400.0, 800.0);
        let path = layer.build_path(size, 12.0);

        assert_eq!(path.points.len(), 1 + 101 + 2);
        assert_eq!(path.points[0], Point::new(0.0, layer.baseline(size)));
        assert_eq!(path.points[path.points.len() - 2], Point::new(400.0, 800.0));
        assert_eq!(path.points[path.points.len() - 1], Point::new(0.0, 800.0));

        let crest = path.crest();
        assert_eq!(crest.len(), 101);
        assert_eq!(crest[0].x, 0.0);
        assert_eq!(crest[100].x, 400.0);
    }

    #[test]
    fn baseline_uses_the_layer_offset() {
        let layer = AuroraLayer {
            vertical_offset: 60.0,
            ..AuroraLayer::default()
        };
        assert_eq!(layer.baseline(Size::new(10.0, 1_000.0)), 410.0);
    }

    #[test]
    fn crest_matches_sine_plus_noise() {
        let layer = AuroraLayer::default();
        let size = Size::new(320.0, 640.0);
        let time = 50.0;
        let path = layer.build_path(size, time);

        let t = time * layer.speed;
        let x = path.crest()[10].x;
        let n = FractalNoise::default().sample(x * 0.6 * layer.frequency, t * 0.6);
        let sine = (x * 0.01 + t * 0.4).sin() * 0.6;
        let expected = layer.baseline(size) + sine * layer.amplitude + n * layer.amplitude * 0.8;

        assert!((path.crest()[10].y - expected).abs() < 1e-9);
    }

    #[test]
    fn path_changes_between_frames() {
        let layer = AuroraLayer::default();
        let size = Size::new(200.0, 300.0);
        assert_ne!(layer.build_path(size, 1.0), layer.build_path(size, 2.0));
        assert_eq!(layer.build_path(size, 2.0), layer.build_path(size, 2.0));
    }

    #[test]
    fn stacking_fades_and_drifts() {
        assert!((AuroraLayer::stacked_opacity(0) - 0.9).abs() < 1e-12);
        assert!((AuroraLayer::stacked_opacity(2) - 0.66).abs() < 1e-12);
        assert_eq!(AuroraLayer::stacked_offset(2), Point::new(12.0, -16.0));
    }
    #[test]
    fn non_finite_width_falls_back_to_the_floor() {
        assert_eq!(AuroraLayer::sample_count(f64::INFINITY), 40);
        assert_eq!(AuroraLayer::sample_count(f64::NAN), 40);

        let path = AuroraLayer::default().build_path(Size::new(f64::INFINITY, 500.0), 3.0);
        assert_eq!(path.crest().len(), 41);
    }

    fn assert_near(actual: Point, expected: Point) {
        assert!(
            (actual.x - expected.x).abs() < 1e-9 && (actual.y - expected.y).abs() < 1e-9,
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn ridge_sits_on_the_bottom_edge() {
        let ridge = Ridge::new(Size::new(400.0, 1_000.0));

        assert_near(ridge.start, Point::new(0.0, 920.0));
        assert_near(ridge.curves[0].control1, Point::new(24.0, 900.0));
        assert_near(ridge.curves[0].control2, Point::new(80.0, 820.0));
        assert_near(ridge.curves[0].to, Point::new(100.0, 840.0));
        assert_near(ridge.curves[1].control1, Point::new(132.0, 860.0));
        assert_near(ridge.curves[1].to, Point::new(220.0, 890.0));
        assert_near(ridge.curves[2].control2, Point::new(300.0, 810.0));
        assert_near(ridge.curves[2].to, Point::new(312.0, 840.0));
        assert_near(ridge.lines[0], Point::new(400.0, 920.0));
        assert_near(ridge.lines[1], Point::new(400.0, 1_000.0));
        assert_near(ridge.lines[2], Point::new(0.0, 1_000.0));
    }

    #[test]
    fn flattened_ridge_passes_through_curve_ends() {
        let ridge = Ridge::new(Size::new(400.0, 1_000.0));
        let points = ridge.flatten(8);

        assert_eq!(points.len(), 1 + 3 * 8 + 3);
        assert_eq!(points[0], ridge.start);
        for (i, curve) in ridge.curves.iter().enumerate() {
            assert_near(points[(i + 1) * 8], curve.to);
        }
        assert_eq!(points[points.len() - 1], Point::new(0.0, 1_000.0));
    }

    #[test]
    fn glow_band_is_centered_low() {
        let glow = HorizonGlow::new(Size::new(300.0, 1_000.0));
        assert!((glow.top - 675.0).abs() < 1e-9);
        assert!((glow.bottom - 1_025.0).abs() < 1e-9);
        assert_eq!(glow.position(600.0), None);
        assert_eq!(glow.position(glow.top), Some(0.0));
        assert_eq!(glow.position(glow.bottom + 1.0), None);
        assert!((glow.position(850.0).unwrap_or(-1.0) - 0.5).abs() < 1e-9);
        assert_eq!(glow.colors[1][3], 0.15);
    }
}
