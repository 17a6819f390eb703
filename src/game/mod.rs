pub mod bots;
pub mod camera;
pub mod collision;
pub mod config;
pub mod constants;
pub mod input;
pub mod leaderboard;
pub mod math;
pub mod population;
pub mod room;
pub mod schedule;
pub mod snake;
pub mod types;
