use super::camera::Viewport;
use super::constants::{VIEWPORT_HEIGHT, VIEWPORT_MAX, VIEWPORT_MIN, VIEWPORT_WIDTH};
use super::math::clamp;
use super::types::Point;

/// One polled snapshot of the viewer's pointer, in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSample {
    pub pointer: Point,
    pub boosting: bool,
    pub viewport: Viewport,
}

impl Default for InputSample {
    fn default() -> Self {
        Self {
            pointer: Point {
                x: VIEWPORT_WIDTH / 2.0,
                y: VIEWPORT_HEIGHT / 2.0,
            },
            boosting: false,
            viewport: Viewport {
                width: VIEWPORT_WIDTH,
                height: VIEWPORT_HEIGHT,
            },
        }
    }
}

pub fn parse_pointer(x: f64, y: f64) -> Option<Point> {
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    Some(Point { x, y })
}

pub fn parse_viewport(width: f64, height: f64) -> Option<Viewport> {
    if !width.is_finite() || !height.is_finite() {
        return None;
    }
    Some(Viewport {
        width: clamp(width, VIEWPORT_MIN, VIEWPORT_MAX),
        height: clamp(height, VIEWPORT_MIN, VIEWPORT_MAX),
    })
}
