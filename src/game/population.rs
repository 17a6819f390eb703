use super::config::SimConfig;
use super::constants::{
    BOT_LENGTH_MAX, BOT_LENGTH_MIN, BOT_RESPAWN_MARGIN, BOT_RESPAWN_TRAIL, BOT_SIZE,
    BOT_SPAWN_MARGIN, BOT_SPEED_MAX, BOT_SPEED_MIN, BOT_TURN_MAX, BOT_TURN_MIN, COLOR_POOL,
    DEATH_ORB_RADIUS_MAX, DEATH_ORB_RADIUS_MIN, ORB_RADIUS_MAX, ORB_RADIUS_MIN, PLAYER_COLOR,
    PLAYER_LENGTH, PLAYER_NAME, PLAYER_RESPAWN_TRAIL, PLAYER_SIZE, PLAYER_SPEED,
};
use super::math::{random_between, random_point};
use super::snake::{create_snake, seed_trail};
use super::types::{Orb, Role, Snake, World};
use rand::Rng;

fn orb_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    let hue = random_between(rng, 0.0, 360.0).floor() as u32;
    format!("hsl({hue} 80% 60%)")
}

pub fn spawn_orb<R: Rng + ?Sized>(rng: &mut R, world: &World) -> Orb {
    let center = random_point(rng, world.width, world.height, 0.0);
    Orb {
        x: center.x,
        y: center.y,
        radius: random_between(rng, ORB_RADIUS_MIN, ORB_RADIUS_MAX),
        color: orb_color(rng),
    }
}

pub fn spawn_orbs<R: Rng + ?Sized>(rng: &mut R, world: &World, count: usize) -> Vec<Orb> {
    (0..count).map(|_| spawn_orb(rng, world)).collect()
}

/// One jittered orb for every recorded segment of a dead snake.
pub fn death_orbs<R: Rng + ?Sized>(snake: &Snake, config: &SimConfig, rng: &mut R) -> Vec<Orb> {
    let jitter = config.death_jitter;
    snake
        .segments
        .iter()
        .map(|point| Orb {
            x: point.x + random_between(rng, -jitter, jitter),
            y: point.y + random_between(rng, -jitter, jitter),
            radius: random_between(rng, DEATH_ORB_RADIUS_MIN, DEATH_ORB_RADIUS_MAX),
            color: orb_color(rng),
        })
        .collect()
}

/// Appends a single orb when the arena is below its floor. Returns whether one was added.
pub fn ensure_orb_floor<R: Rng + ?Sized>(orbs: &mut Vec<Orb>, config: &SimConfig, rng: &mut R) -> bool {
    if orbs.len() >= config.orb_floor {
        return false;
    }
    orbs.push(spawn_orb(rng, &config.world()));
    true
}

/// Drops the oldest orbs once a death burst pushes the arena past `max_orbs`.
pub fn cap_orbs(orbs: &mut Vec<Orb>, config: &SimConfig) {
    if orbs.len() > config.max_orbs {
        let excess = orbs.len() - config.max_orbs;
        orbs.drain(0..excess);
    }
}

pub fn create_player(world: &World) -> Snake {
    let mut player = create_snake(Role::Player, PLAYER_NAME, PLAYER_COLOR, world.center());
    player.speed = PLAYER_SPEED;
    player.size = PLAYER_SIZE;
    player.target_length = PLAYER_LENGTH;
    player
}

pub fn create_bot<R: Rng + ?Sized>(index: usize, world: &World, rng: &mut R) -> Snake {
    let origin = random_point(rng, world.width, world.height, BOT_SPAWN_MARGIN);
    let name = format!("Bot{}", index + 1);
    let color = COLOR_POOL[index % COLOR_POOL.len()];
    let mut bot = create_snake(Role::Bot, &name, color, origin);
    bot.size = BOT_SIZE;
    bot.speed = random_between(rng, BOT_SPEED_MIN, BOT_SPEED_MAX);
    bot.turn_rate = random_between(rng, BOT_TURN_MIN, BOT_TURN_MAX);
    bot.target_length = random_between(rng, BOT_LENGTH_MIN, BOT_LENGTH_MAX);
    bot
}

pub fn respawn_delay_ms<R: Rng + ?Sized>(role: Role, config: &SimConfig, rng: &mut R) -> i64 {
    match role {
        Role::Player => config.player_respawn_ms,
        Role::Bot => random_between(
            rng,
            config.bot_respawn_min_ms as f64,
            config.bot_respawn_max_ms as f64,
        )
        .floor() as i64,
    }
}

/// Brings a dead snake back with its role's restart state.
///
/// Players restart at the world center with the fixed baseline; bots restart at a random
/// interior point with a randomized length budget. Speed and turn rate of a bot are its own and
/// survive the restart.
pub fn respawn_snake<R: Rng + ?Sized>(snake: &mut Snake, config: &SimConfig, rng: &mut R) {
    let world = config.world();
    snake.alive = true;
    snake.respawn_at = None;
    snake.heading = 0.0;
    snake.boost = 1.0;
    snake.target = None;
    match snake.role {
        Role::Player => {
            let center = world.center();
            snake.x = center.x;
            snake.y = center.y;
            snake.speed = PLAYER_SPEED;
            snake.target_length = PLAYER_LENGTH;
            seed_trail(snake, PLAYER_RESPAWN_TRAIL);
        }
        Role::Bot => {
            let origin = random_point(rng, world.width, world.height, BOT_RESPAWN_MARGIN);
            snake.x = origin.x;
            snake.y = origin.y;
            snake.target_length = random_between(
                rng,
                config.bot_respawn_length_min,
                config.bot_respawn_length_max,
            );
            seed_trail(snake, BOT_RESPAWN_TRAIL);
        }
    }
}
