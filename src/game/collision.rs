use super::config::SimConfig;
use super::math::dist2;
use super::population::spawn_orb;
use super::snake::{grow, head_pos};
use super::types::{Orb, Point, Snake};
use rand::Rng;

/// Lethal radius around the body point at `index`, tapering from head to tail.
pub fn hit_radius(body: &Snake, index: usize, config: &SimConfig) -> f64 {
    let len = body.segments.len().max(1) as f64;
    let taper = 1.0 - (index as f64 / len) * config.hit_taper;
    (body.size * taper).max(config.hit_radius_floor)
}

fn touches_orb(snake: &Snake, orb: &Orb) -> bool {
    let reach = snake.size + orb.radius;
    dist2(head_pos(snake), orb.center()) < reach * reach
}

/// Lets alive snakes eat the orbs their heads overlap.
///
/// Orbs are visited from the back of the list. The first alive snake in slice order that reaches
/// an orb eats it; the orb is removed and a replacement is appended at a fresh random spot, so a
/// replacement is never visited in the same pass. Returns how many orbs were eaten.
pub fn resolve_orb_pickups<R: Rng + ?Sized>(
    snakes: &mut [Snake],
    orbs: &mut Vec<Orb>,
    config: &SimConfig,
    rng: &mut R,
) -> usize {
    let world = config.world();
    let mut eaten = 0;
    let mut index = orbs.len();
    while index > 0 {
        index -= 1;
        let Some(eater) = snakes
            .iter()
            .position(|snake| snake.alive && touches_orb(snake, &orbs[index]))
        else {
            continue;
        };
        let orb = orbs.remove(index);
        grow(&mut snakes[eater], &orb, config);
        orbs.push(spawn_orb(rng, &world));
        eaten += 1;
    }
    eaten
}

fn body_hit(head: Point, body: &Snake, config: &SimConfig) -> bool {
    body.segments
        .iter()
        .enumerate()
        .skip(config.collision_skip)
        .step_by(config.collision_stride.max(1))
        .any(|(index, point)| {
            let radius = hit_radius(body, index, config);
            dist2(head, *point) < radius * radius
        })
}

/// Indices of alive snakes whose head touches another alive snake's sampled body.
///
/// Every test reads the positions and alive flags as they stood at the start of the scan, so
/// the result does not depend on slice order: two heads crossing each other's bodies in the same
/// tick both die.
pub fn find_lethal_hits(snakes: &[Snake], config: &SimConfig) -> Vec<usize> {
    let mut victims = Vec::new();
    for (index, snake) in snakes.iter().enumerate() {
        if !snake.alive {
            continue;
        }
        let head = head_pos(snake);
        let hit = snakes
            .iter()
            .filter(|other| other.alive && other.id != snake.id)
            .any(|other| body_hit(head, other, config));
        if hit {
            victims.push(index);
        }
    }
    victims
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::snake::create_snake;
    use crate::game::types::Role;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    fn make_snake(head: Point, size: f64) -> Snake {
        let mut snake = create_snake(Role::Bot, "Test", "#ffffff", head);
        snake.size = size;
        snake
    }

    fn horizontal_body(start_x: f64, y: f64, len: usize) -> VecDeque<Point> {
        (0..len)
            .map(|index| Point {
                x: start_x - index as f64 * 6.0,
                y,
            })
            .collect()
    }

    fn make_orb(x: f64, y: f64, radius: f64) -> Orb {
        Orb {
            x,
            y,
            radius,
            color: String::new(),
        }
    }

    #[test]
    fn head_touching_orb_eats_it_and_spawns_replacement() {
        let config = SimConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut snakes = vec![make_snake(Point { x: 52.0, y: 52.0 }, 12.0)];
        let before = snakes[0].target_length;
        let mut orbs = vec![make_orb(50.0, 50.0, 5.0)];

        let eaten = resolve_orb_pickups(&mut snakes, &mut orbs, &config, &mut rng);

        assert_eq!(eaten, 1);
        assert_eq!(orbs.len(), 1);
        assert_ne!(orbs[0].center(), Point { x: 50.0, y: 50.0 });
        assert!((snakes[0].target_length - (before + 5.0 * 1.2 + 2.0)).abs() < 1e-9);
    }

    #[test]
    fn contested_orb_is_eaten_once_by_first_snake() {
        let config = SimConfig::default();
        let mut rng = StdRng::seed_from_u64(2);
        let mut snakes = vec![
            make_snake(Point { x: 52.0, y: 52.0 }, 12.0),
            make_snake(Point { x: 48.0, y: 48.0 }, 12.0),
        ];
        let first_before = snakes[0].target_length;
        let second_before = snakes[1].target_length;
        let mut orbs = vec![make_orb(50.0, 50.0, 5.0)];

        let eaten = resolve_orb_pickups(&mut snakes, &mut orbs, &config, &mut rng);

        assert_eq!(eaten, 1);
        assert!(snakes[0].target_length > first_before);
        assert_eq!(snakes[1].target_length, second_before);
    }

    #[test]
    fn dead_snake_does_not_eat() {
        let config = SimConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut snakes = vec![make_snake(Point { x: 52.0, y: 52.0 }, 12.0)];
        snakes[0].alive = false;
        let mut orbs = vec![make_orb(50.0, 50.0, 5.0)];

        assert_eq!(resolve_orb_pickups(&mut snakes, &mut orbs, &config, &mut rng), 0);
        assert_eq!(orbs[0].center(), Point { x: 50.0, y: 50.0 });
    }

    #[test]
    fn distant_orb_is_left_alone() {
        let config = SimConfig::default();
        let mut rng = StdRng::seed_from_u64(4);
        let mut snakes = vec![make_snake(Point { x: 0.0, y: 0.0 }, 12.0)];
        let mut orbs = vec![make_orb(17.0, 0.0, 5.0)];

        assert_eq!(resolve_orb_pickups(&mut snakes, &mut orbs, &config, &mut rng), 0);
    }

    #[test]
    fn hit_radius_tapers_toward_floor() {
        let config = SimConfig::default();
        let mut body = make_snake(Point { x: 0.0, y: 0.0 }, 12.0);
        body.segments = horizontal_body(0.0, 0.0, 40);

        assert!((hit_radius(&body, 2, &config) - 12.0 * (1.0 - 2.0 / 40.0 * 0.9)).abs() < 1e-9);
        assert!(hit_radius(&body, 2, &config) > hit_radius(&body, 20, &config));
        assert_eq!(hit_radius(&body, 39, &config), 6.0);
    }

    #[test]
    fn head_on_rival_body_is_lethal() {
        let config = SimConfig::default();
        let mut rival = make_snake(Point { x: 300.0, y: 100.0 }, 12.0);
        rival.segments = horizontal_body(300.0, 100.0, 40);
        let mut hunter = make_snake(Point { x: 240.0, y: 103.0 }, 12.0);
        hunter.segments = horizontal_body(240.0, 103.0, 1);
        let snakes = vec![rival, hunter];

        assert_eq!(find_lethal_hits(&snakes, &config), vec![1]);
    }

    #[test]
    fn points_nearest_the_rival_head_are_skipped() {
        let config = SimConfig::default();
        let mut rival = make_snake(Point { x: 300.0, y: 100.0 }, 12.0);
        rival.segments = horizontal_body(300.0, 100.0, 40);
        // Sits on rival segment 0 and is out of reach of segment 2 at x = 288.
        let mut hunter = make_snake(Point { x: 300.0, y: 111.0 }, 12.0);
        hunter.segments = VecDeque::from(vec![Point { x: 300.0, y: 111.0 }]);
        let snakes = vec![rival, hunter];

        assert!(find_lethal_hits(&snakes, &config).is_empty());
    }

    #[test]
    fn own_body_and_dead_bodies_are_not_lethal() {
        let config = SimConfig::default();
        let mut coiled = make_snake(Point { x: 100.0, y: 100.0 }, 12.0);
        let mut body = horizontal_body(100.0, 100.0, 10);
        body[4] = Point { x: 100.0, y: 100.0 };
        coiled.segments = body;

        let mut corpse = make_snake(Point { x: 500.0, y: 100.0 }, 12.0);
        corpse.segments = horizontal_body(500.0, 100.0, 40);
        corpse.alive = false;
        let mut visitor = make_snake(Point { x: 440.0, y: 100.0 }, 12.0);
        visitor.segments = VecDeque::from(vec![Point { x: 440.0, y: 100.0 }]);

        let snakes = vec![coiled, corpse, visitor];
        assert!(find_lethal_hits(&snakes, &config).is_empty());
    }

    #[test]
    fn mutual_hits_kill_both_snakes() {
        let config = SimConfig::default();
        let mut a = make_snake(Point { x: 100.0, y: 100.0 }, 12.0);
        a.segments = horizontal_body(100.0, 100.0, 40);
        let mut b = make_snake(Point { x: 76.0, y: 100.0 }, 12.0);
        b.segments = VecDeque::from(vec![
            Point { x: 76.0, y: 100.0 },
            Point { x: 76.0, y: 94.0 },
            Point { x: 100.0, y: 97.0 },
            Point { x: 94.0, y: 97.0 },
        ]);
        let snakes = vec![a, b];

        assert_eq!(find_lethal_hits(&snakes, &config), vec![0, 1]);
    }
}
