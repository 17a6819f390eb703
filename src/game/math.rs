use super::types::Point;
use rand::Rng;
use std::f64::consts::{PI, TAU};

/// Uniform value in `[min, max)`. A degenerate range yields `min`.
pub fn random_between<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
  if max.is_nan() || max <= min {
    return min;
  }
  min + rng.gen::<f64>() * (max - min)
}

pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
  value.min(max).max(min)
}

pub fn dist2(a: Point, b: Point) -> f64 {
  let dx = a.x - b.x;
  let dy = a.y - b.y;
  dx * dx + dy * dy
}

/// Wraps an angle into `(-PI, PI]`.
pub fn wrap_angle(angle: f64) -> f64 {
  if !angle.is_finite() {
    return 0.0;
  }
  let wrapped = (angle + PI).rem_euclid(TAU) - PI;
  if wrapped <= -PI {
    wrapped + TAU
  } else {
    wrapped
  }
}

pub fn angle_to(from: Point, to: Point) -> f64 {
  (to.y - from.y).atan2(to.x - from.x)
}

pub fn random_point<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64, margin: f64) -> Point {
  Point {
    x: random_between(rng, margin, width - margin),
    y: random_between(rng, margin, height - margin),
  }
}
