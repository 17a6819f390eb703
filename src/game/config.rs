use super::constants::{
    BOT_COUNT, BOT_RESPAWN_LENGTH_MAX, BOT_RESPAWN_LENGTH_MIN, BOT_RESPAWN_MAX_MS,
    BOT_RESPAWN_MIN_MS, COLLISION_SKIP, COLLISION_STRIDE, DEATH_JITTER, DEATH_ORB_RADIUS_MAX,
    DEATH_ORB_RADIUS_MIN, GROWTH_BIAS, GROWTH_PER_RADIUS, HIT_RADIUS_FLOOR, HIT_TAPER,
    INITIAL_ORBS, MAX_FRAME_DT_MS, MAX_ORBS, ORB_FLOOR, ORB_FLOOR_INTERVAL_MS, ORB_RADIUS_MAX,
    ORB_RADIUS_MIN, PLAYER_RESPAWN_MS, WORLD_HEIGHT, WORLD_WIDTH,
};
use super::types::{BoundaryPolicy, World};
use anyhow::{bail, Context};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub world_width: f64,
    pub world_height: f64,
    pub boundary: BoundaryPolicy,
    pub initial_orbs: usize,
    pub bot_count: usize,
    pub orb_floor: usize,
    pub orb_floor_interval_ms: i64,
    pub max_orbs: usize,
    pub growth_per_radius: f64,
    pub growth_bias: f64,
    pub collision_stride: usize,
    pub collision_skip: usize,
    pub hit_radius_floor: f64,
    pub hit_taper: f64,
    pub death_jitter: f64,
    pub bot_respawn_min_ms: i64,
    pub bot_respawn_max_ms: i64,
    pub bot_respawn_length_min: f64,
    pub bot_respawn_length_max: f64,
    pub player_respawn_ms: i64,
    pub max_frame_dt_ms: f64,
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            boundary: BoundaryPolicy::Wrap,
            initial_orbs: INITIAL_ORBS,
            bot_count: BOT_COUNT,
            orb_floor: ORB_FLOOR,
            orb_floor_interval_ms: ORB_FLOOR_INTERVAL_MS,
            max_orbs: MAX_ORBS,
            growth_per_radius: GROWTH_PER_RADIUS,
            growth_bias: GROWTH_BIAS,
            collision_stride: COLLISION_STRIDE,
            collision_skip: COLLISION_SKIP,
            hit_radius_floor: HIT_RADIUS_FLOOR,
            hit_taper: HIT_TAPER,
            death_jitter: DEATH_JITTER,
            bot_respawn_min_ms: BOT_RESPAWN_MIN_MS,
            bot_respawn_max_ms: BOT_RESPAWN_MAX_MS,
            bot_respawn_length_min: BOT_RESPAWN_LENGTH_MIN,
            bot_respawn_length_max: BOT_RESPAWN_LENGTH_MAX,
            player_respawn_ms: PLAYER_RESPAWN_MS,
            max_frame_dt_ms: MAX_FRAME_DT_MS,
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();
        let boundary = match env::var("WORLD_BOUNDARY") {
            Ok(value) => BoundaryPolicy::parse(&value)
                .with_context(|| format!("invalid WORLD_BOUNDARY {value:?}"))?,
            Err(_) => defaults.boundary,
        };
        let config = Self {
            world_width: env_or("WORLD_WIDTH", defaults.world_width),
            world_height: env_or("WORLD_HEIGHT", defaults.world_height),
            boundary,
            initial_orbs: env_or("INITIAL_ORBS", defaults.initial_orbs),
            bot_count: env_or("BOT_COUNT", defaults.bot_count),
            orb_floor: env_or("ORB_FLOOR", defaults.orb_floor),
            orb_floor_interval_ms: env_or("ORB_FLOOR_INTERVAL_MS", defaults.orb_floor_interval_ms),
            growth_per_radius: env_or("GROWTH_PER_RADIUS", defaults.growth_per_radius),
            growth_bias: env_or("GROWTH_BIAS", defaults.growth_bias),
            collision_stride: env_or("COLLISION_STRIDE", defaults.collision_stride),
            bot_respawn_min_ms: env_or("BOT_RESPAWN_MIN_MS", defaults.bot_respawn_min_ms),
            bot_respawn_max_ms: env_or("BOT_RESPAWN_MAX_MS", defaults.bot_respawn_max_ms),
            player_respawn_ms: env_or("PLAYER_RESPAWN_MS", defaults.player_respawn_ms),
            seed: env::var("SIM_SEED")
                .ok()
                .and_then(|value| value.trim().parse::<u64>().ok()),
            ..defaults
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let finite = self.world_width.is_finite() && self.world_height.is_finite();
        if !(finite && self.world_width > 0.0 && self.world_height > 0.0) {
            bail!(
                "world dimensions must be positive and finite, got {}x{}",
                self.world_width,
                self.world_height
            );
        }
        // Linear in radius, so the range endpoints bound every orb.
        for radius in [
            ORB_RADIUS_MIN,
            ORB_RADIUS_MAX,
            DEATH_ORB_RADIUS_MIN,
            DEATH_ORB_RADIUS_MAX,
        ] {
            let growth = self.growth_for(radius);
            if !(growth.is_finite() && growth > 0.0) {
                bail!(
                    "growth {}*r+{} must be positive for orb radius {radius}",
                    self.growth_per_radius,
                    self.growth_bias
                );
            }
        }
        if self.collision_stride == 0 {
            bail!("collision stride must be at least 1");
        }
        if self.orb_floor_interval_ms <= 0 {
            bail!("orb floor interval must be positive");
        }
        if self.bot_respawn_min_ms > self.bot_respawn_max_ms {
            bail!(
                "bot respawn range is inverted: {}..{}",
                self.bot_respawn_min_ms,
                self.bot_respawn_max_ms
            );
        }
        if self.player_respawn_ms < 0 || self.bot_respawn_min_ms < 0 {
            bail!("respawn delays must not be negative");
        }
        Ok(())
    }

    pub fn world(&self) -> World {
        World {
            width: self.world_width,
            height: self.world_height,
            boundary: self.boundary,
        }
    }

    /// Length budget gained from eating an orb of `radius`.
    pub fn growth_for(&self, radius: f64) -> f64 {
        self.growth_per_radius * radius + self.growth_bias
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<T>().ok())
        .unwrap_or(default)
}
