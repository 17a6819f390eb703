use super::config::SimConfig;
use super::constants::{
    BOT_SIZE, DEFAULT_LENGTH, DEFAULT_SPEED, PLAYER_TURN_RATE, REFERENCE_FRAME_MS, SEED_TRAIL_MIN,
    SEGMENT_FLOOR, SEGMENT_SPACING,
};
use super::math::{angle_to, clamp, dist2, wrap_angle};
use super::types::{BoundaryPolicy, Orb, Point, Role, Snake, World};
use std::collections::VecDeque;
use uuid::Uuid;

pub fn create_snake(role: Role, name: &str, color: &str, origin: Point) -> Snake {
    let mut snake = Snake {
        id: Uuid::new_v4(),
        name: name.to_string(),
        color: color.to_string(),
        role,
        x: origin.x,
        y: origin.y,
        heading: 0.0,
        speed: DEFAULT_SPEED,
        boost: 1.0,
        turn_rate: PLAYER_TURN_RATE,
        size: BOT_SIZE,
        segment_spacing: SEGMENT_SPACING,
        target_length: DEFAULT_LENGTH,
        segments: VecDeque::new(),
        alive: true,
        respawn_at: None,
        target: None,
    };
    seed_trail(&mut snake, SEED_TRAIL_MIN.max(DEFAULT_LENGTH as usize));
    snake
}

/// Lays `count` points in a straight line behind the head so a fresh snake renders at once.
pub fn seed_trail(snake: &mut Snake, count: usize) {
    snake.segments.clear();
    snake.segments.reserve(count);
    for index in 0..count {
        snake.segments.push_back(Point {
            x: snake.x - index as f64 * snake.segment_spacing,
            y: snake.y,
        });
    }
}

/// Most recent recorded segment, or the raw position when the trail is empty.
pub fn head_pos(snake: &Snake) -> Point {
    snake.segments.front().copied().unwrap_or(Point {
        x: snake.x,
        y: snake.y,
    })
}

pub fn length_budget(snake: &Snake) -> usize {
    SEGMENT_FLOOR.max(snake.target_length.floor() as usize)
}

pub fn frame_scale(dt_ms: f64) -> f64 {
    if !dt_ms.is_finite() {
        return 0.0;
    }
    dt_ms.max(0.0) / REFERENCE_FRAME_MS
}

pub fn advance(snake: &mut Snake, target: Point, dt_ms: f64) {
    if !snake.alive {
        return;
    }
    let scale = frame_scale(dt_ms);

    let position = Point {
        x: snake.x,
        y: snake.y,
    };
    let heading = wrap_angle(snake.heading);
    let delta = wrap_angle(angle_to(position, target) - heading);
    let max_turn = snake.turn_rate * scale;
    snake.heading = wrap_angle(heading + clamp(delta, -max_turn, max_turn));

    let step = snake.speed * snake.boost * scale;
    snake.x += snake.heading.cos() * step;
    snake.y += snake.heading.sin() * step;

    record_head(snake);
    trim_to_budget(snake);
}

fn record_head(snake: &mut Snake) {
    let head = head_pos(snake);
    let position = Point {
        x: snake.x,
        y: snake.y,
    };
    let spacing = snake.segment_spacing;
    if dist2(position, head) >= spacing * spacing {
        snake.segments.push_front(position);
    } else if let Some(front) = snake.segments.front_mut() {
        *front = position;
    } else {
        snake.segments.push_front(position);
    }
}

fn trim_to_budget(snake: &mut Snake) {
    let budget = length_budget(snake);
    snake.segments.truncate(budget);
}

pub fn grow(snake: &mut Snake, orb: &Orb, config: &SimConfig) {
    let amount = config.growth_for(orb.radius);
    if amount.is_finite() && amount > 0.0 {
        snake.target_length += amount;
    }
}

pub fn apply_bounds(snake: &mut Snake, world: &World) {
    match world.boundary {
        BoundaryPolicy::Wrap => {
            if snake.x < 0.0 || snake.x > world.width {
                snake.x = snake.x.rem_euclid(world.width);
            }
            if snake.y < 0.0 || snake.y > world.height {
                snake.y = snake.y.rem_euclid(world.height);
            }
        }
        BoundaryPolicy::Clamp => {
            snake.x = clamp(snake.x, 0.0, world.width);
            snake.y = clamp(snake.y, 0.0, world.height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn make_snake(x: f64, y: f64) -> Snake {
        create_snake(Role::Bot, "Test", "#ffffff", Point { x, y })
    }

    #[test]
    fn seeded_snake_has_straight_trail() {
        let snake = make_snake(100.0, 50.0);
        assert_eq!(snake.segments.len(), 40);
        assert_eq!(snake.segments[0], Point { x: 100.0, y: 50.0 });
        assert_eq!(snake.segments[39], Point { x: 100.0 - 39.0 * 6.0, y: 50.0 });
    }

    #[test]
    fn aimed_snake_keeps_heading_and_moves_forward() {
        let mut snake = make_snake(100.0, 100.0);
        snake.turn_rate = 0.06;
        snake.speed = 1.6;
        snake.boost = 1.0;

        advance(&mut snake, Point { x: 200.0, y: 100.0 }, REFERENCE_FRAME_MS);

        assert_eq!(snake.heading, 0.0);
        assert!((snake.x - (100.0 + 1.6)).abs() < 1e-9);
        assert_eq!(snake.y, 100.0);
    }

    #[test]
    fn turning_is_limited_to_turn_rate() {
        let mut snake = make_snake(100.0, 100.0);
        snake.turn_rate = 0.06;

        advance(&mut snake, Point { x: 100.0, y: 300.0 }, REFERENCE_FRAME_MS);

        assert!((snake.heading - 0.06).abs() < 1e-9);
    }

    #[test]
    fn long_frame_scales_turn_and_step() {
        let mut aimed = make_snake(100.0, 100.0);
        aimed.speed = 1.6;
        advance(&mut aimed, Point { x: 200.0, y: 100.0 }, 40.0);
        assert_eq!(aimed.heading, 0.0);
        assert!((aimed.x - (100.0 + 1.6 * 2.4)).abs() < 1e-9);

        let mut turning = make_snake(100.0, 100.0);
        turning.turn_rate = 0.06;
        advance(&mut turning, Point { x: 100.0, y: 300.0 }, 40.0);
        assert!((turning.heading - 0.06 * 2.4).abs() < 1e-9);
    }

    #[test]
    fn zero_frame_neither_turns_nor_moves() {
        let mut snake = make_snake(100.0, 100.0);
        advance(&mut snake, Point { x: 100.0, y: 300.0 }, 0.0);
        assert_eq!(snake.heading, 0.0);
        assert_eq!((snake.x, snake.y), (100.0, 100.0));
    }

    #[test]
    fn turning_takes_the_short_way_across_pi() {
        let mut snake = make_snake(100.0, 100.0);
        snake.heading = PI - 0.01;
        snake.turn_rate = 0.06;

        // Target lies just below the -x axis: the short way is to keep turning past PI.
        advance(&mut snake, Point { x: 0.0, y: 99.0 }, REFERENCE_FRAME_MS);

        assert!(snake.heading > -PI && snake.heading <= PI);
        assert!(snake.heading < 0.0 || snake.heading > PI - 0.01);
    }

    #[test]
    fn heading_stays_normalized_over_many_ticks() {
        let mut snake = make_snake(500.0, 500.0);
        snake.heading = 50.0;
        snake.turn_rate = 0.3;
        for step in 0..500 {
            let angle = step as f64 * 0.37;
            let target = Point {
                x: 500.0 + angle.cos() * 300.0,
                y: 500.0 + angle.sin() * 300.0,
            };
            advance(&mut snake, target, REFERENCE_FRAME_MS);
            assert!(snake.heading > -PI && snake.heading <= PI);
        }
    }

    #[test]
    fn segments_never_exceed_length_budget() {
        let mut snake = make_snake(500.0, 500.0);
        snake.target_length = 12.7;
        snake.speed = 7.0;
        for _ in 0..200 {
            advance(&mut snake, Point { x: 5000.0, y: 500.0 }, REFERENCE_FRAME_MS);
            assert!(snake.segments.len() <= SEGMENT_FLOOR.max(12));
        }
        assert_eq!(snake.segments.len(), 12);

        snake.target_length = 2.0;
        advance(&mut snake, Point { x: 5000.0, y: 500.0 }, REFERENCE_FRAME_MS);
        assert_eq!(snake.segments.len(), SEGMENT_FLOOR);
    }

    #[test]
    fn short_moves_overwrite_head_instead_of_recording() {
        let mut snake = make_snake(100.0, 100.0);
        snake.speed = 1.0;
        let before = snake.segments.len();

        advance(&mut snake, Point { x: 200.0, y: 100.0 }, REFERENCE_FRAME_MS);

        assert_eq!(snake.segments.len(), before);
        assert_eq!(snake.segments[0], Point { x: 101.0, y: 100.0 });
        assert_eq!(snake.segments[1], Point { x: 94.0, y: 100.0 });
    }

    #[test]
    fn long_moves_prepend_a_segment() {
        let mut snake = make_snake(100.0, 100.0);
        snake.target_length = 100.0;
        snake.speed = 6.5;
        let before = snake.segments.len();

        advance(&mut snake, Point { x: 200.0, y: 100.0 }, REFERENCE_FRAME_MS);

        assert_eq!(snake.segments.len(), before + 1);
        assert!((snake.segments[0].x - 106.5).abs() < 1e-9);
        assert_eq!(snake.segments[1], Point { x: 100.0, y: 100.0 });
    }

    #[test]
    fn empty_trail_synthesizes_head_from_position() {
        let mut snake = make_snake(10.0, 20.0);
        snake.segments.clear();
        assert_eq!(head_pos(&snake), Point { x: 10.0, y: 20.0 });

        advance(&mut snake, Point { x: 100.0, y: 20.0 }, REFERENCE_FRAME_MS);

        assert_eq!(snake.segments.len(), 1);
        assert_eq!(head_pos(&snake), Point { x: snake.x, y: snake.y });
    }

    #[test]
    fn dead_snake_does_not_move() {
        let mut snake = make_snake(10.0, 20.0);
        snake.alive = false;
        let segments = snake.segments.clone();

        advance(&mut snake, Point { x: 100.0, y: 20.0 }, REFERENCE_FRAME_MS);

        assert_eq!(snake.x, 10.0);
        assert_eq!(snake.segments, segments);
    }

    #[test]
    fn grow_adds_linear_amount() {
        let mut snake = make_snake(0.0, 0.0);
        let config = SimConfig::default();
        let orb = Orb {
            x: 0.0,
            y: 0.0,
            radius: 5.0,
            color: String::new(),
        };
        let before = snake.target_length;

        grow(&mut snake, &orb, &config);

        assert!((snake.target_length - (before + 5.0 * 1.2 + 2.0)).abs() < 1e-9);
    }

    #[test]
    fn wrap_bounds_teleport_to_opposite_edge() {
        let world = World {
            width: 300.0,
            height: 200.0,
            boundary: BoundaryPolicy::Wrap,
        };
        let mut snake = make_snake(-5.0, 205.0);
        apply_bounds(&mut snake, &world);
        assert!((snake.x - 295.0).abs() < 1e-9);
        assert!((snake.y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn clamp_bounds_hold_position_inside_world() {
        let world = World {
            width: 300.0,
            height: 200.0,
            boundary: BoundaryPolicy::Clamp,
        };
        let mut snake = make_snake(-5.0, 205.0);
        apply_bounds(&mut snake, &world);
        assert_eq!(snake.x, 0.0);
        assert_eq!(snake.y, 200.0);
    }
}
