pub const WORLD_WIDTH: f64 = 3000.0;
pub const WORLD_HEIGHT: f64 = 2000.0;

pub const FRAME_MS: u64 = 16;
pub const REFERENCE_FRAME_MS: f64 = 1000.0 / 60.0;
pub const MAX_FRAME_DT_MS: f64 = 40.0;

pub const SEGMENT_SPACING: f64 = 6.0;
pub const SEGMENT_FLOOR: usize = 10;
pub const SEED_TRAIL_MIN: usize = 20;

pub const BOT_COUNT: usize = 7;
pub const BOT_SIZE: f64 = 12.0;
pub const BOT_SPAWN_MARGIN: f64 = 200.0;
pub const BOT_RESPAWN_MARGIN: f64 = 100.0;
pub const BOT_SPEED_MIN: f64 = 1.0;
pub const BOT_SPEED_MAX: f64 = 1.9;
pub const BOT_TURN_MIN: f64 = 0.03;
pub const BOT_TURN_MAX: f64 = 0.09;
pub const BOT_LENGTH_MIN: f64 = 30.0;
pub const BOT_LENGTH_MAX: f64 = 90.0;
pub const BOT_RESPAWN_LENGTH_MIN: f64 = 20.0;
pub const BOT_RESPAWN_LENGTH_MAX: f64 = 70.0;
pub const BOT_RESPAWN_TRAIL: usize = 30;
pub const BOT_RESPAWN_MIN_MS: i64 = 1200;
pub const BOT_RESPAWN_MAX_MS: i64 = 3200;
pub const BOT_RETARGET_CHANCE: f64 = 0.01;
pub const BOT_HUNT_CHANCE: f64 = 0.002;
pub const BOT_HUNT_LENGTH_RATIO: f64 = 1.2;
pub const BOT_BOOST_CHANCE: f64 = 0.01;
pub const BOT_BOOST_MULTIPLIER: f64 = 2.0;

pub const PLAYER_NAME: &str = "You";
pub const PLAYER_NAME_FALLBACK: &str = "Player";
pub const PLAYER_SIZE: f64 = 14.0;
pub const PLAYER_SPEED: f64 = 1.9;
pub const PLAYER_TURN_RATE: f64 = 0.06;
pub const PLAYER_LENGTH: f64 = 60.0;
pub const PLAYER_RESPAWN_TRAIL: usize = 40;
pub const PLAYER_RESPAWN_MS: i64 = 900;
pub const PLAYER_BOOST_MULTIPLIER: f64 = 2.2;
pub const PLAYER_COLOR: &str = "#6be0a6";

pub const DEFAULT_SPEED: f64 = 1.6;
pub const DEFAULT_LENGTH: f64 = 40.0;

pub const INITIAL_ORBS: usize = 260;
pub const ORB_FLOOR: usize = 300;
pub const ORB_FLOOR_INTERVAL_MS: i64 = 700;
pub const MAX_ORBS: usize = u16::MAX as usize;
pub const ORB_RADIUS_MIN: f64 = 3.0;
pub const ORB_RADIUS_MAX: f64 = 6.0;
pub const DEATH_ORB_RADIUS_MIN: f64 = 2.0;
pub const DEATH_ORB_RADIUS_MAX: f64 = 6.0;
pub const DEATH_JITTER: f64 = 8.0;

pub const GROWTH_PER_RADIUS: f64 = 1.2;
pub const GROWTH_BIAS: f64 = 2.0;

pub const COLLISION_STRIDE: usize = 2;
pub const COLLISION_SKIP: usize = 2;
pub const HIT_RADIUS_FLOOR: f64 = 6.0;
pub const HIT_TAPER: f64 = 0.9;

pub const LEADERBOARD_SIZE: usize = 6;

pub const VIEWPORT_WIDTH: f64 = 1280.0;
pub const VIEWPORT_HEIGHT: f64 = 720.0;
pub const VIEWPORT_MIN: f64 = 64.0;
pub const VIEWPORT_MAX: f64 = 8192.0;

pub const COLOR_POOL: [&str; 8] = [
  "#ff6b6b",
  "#6bc3ff",
  "#ffd36b",
  "#b36bff",
  "#6bff9a",
  "#ff6bd6",
  "#86a3ff",
  "#ff8e6b",
];
