use super::constants::{
    BOT_BOOST_CHANCE, BOT_BOOST_MULTIPLIER, BOT_HUNT_CHANCE, BOT_HUNT_LENGTH_RATIO,
    BOT_RETARGET_CHANCE,
};
use super::math::random_point;
use super::types::{Orb, Point, Snake, World};
use rand::Rng;

/// The player as seen by a bot deciding whether to give chase.
#[derive(Debug, Clone, Copy)]
pub struct Quarry {
    pub head: Point,
    pub length: f64,
}

/// Picks this tick's steering goal for a bot and rolls its boost.
///
/// A bot keeps its goal until it has none or a small per-tick re-roll fires; the new goal is a
/// random orb, or a random world point when the arena is empty. Independently it may lock onto
/// the player's current head when the player has outgrown it.
pub fn update_bot_target<R: Rng + ?Sized>(
    bot: &mut Snake,
    orbs: &[Orb],
    quarry: Option<Quarry>,
    world: &World,
    rng: &mut R,
) -> Point {
    if bot.target.is_none() || rng.gen::<f64>() < BOT_RETARGET_CHANCE {
        let next = if orbs.is_empty() {
            random_point(rng, world.width, world.height, 0.0)
        } else {
            orbs[rng.gen_range(0..orbs.len())].center()
        };
        bot.target = Some(next);
    }

    if let Some(quarry) = quarry {
        if rng.gen::<f64>() < BOT_HUNT_CHANCE
            && quarry.length > bot.target_length * BOT_HUNT_LENGTH_RATIO
        {
            bot.target = Some(quarry.head);
        }
    }

    bot.boost = if rng.gen::<f64>() < BOT_BOOST_CHANCE {
        BOT_BOOST_MULTIPLIER
    } else {
        1.0
    };

    bot.target.unwrap_or(Point {
        x: bot.x,
        y: bot.y,
    })
}
