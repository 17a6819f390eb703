use super::math::clamp;
use super::types::{BoundaryPolicy, Point, World};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Top-left world offset of the viewport centered on `focus`.
pub fn camera_offset(focus: Point, viewport: Viewport, world: &World) -> Point {
    let x = focus.x - viewport.width / 2.0;
    let y = focus.y - viewport.height / 2.0;
    match world.boundary {
        BoundaryPolicy::Wrap => Point { x, y },
        BoundaryPolicy::Clamp => Point {
            x: clamp(x, 0.0, (world.width - viewport.width).max(0.0)),
            y: clamp(y, 0.0, (world.height - viewport.height).max(0.0)),
        },
    }
}

pub fn screen_to_world(screen: Point, camera: Point) -> Point {
    Point {
        x: camera.x + screen.x,
        y: camera.y + screen.y,
    }
}
