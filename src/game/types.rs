use serde::Serialize;
use std::collections::VecDeque;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
  pub x: f64,
  pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
  /// Toroidal world: leaving one edge re-enters at the opposite edge.
  #[default]
  Wrap,
  /// Bounded world: positions and the camera are clamped to the world rect.
  Clamp,
}

impl BoundaryPolicy {
  pub fn parse(value: &str) -> Option<Self> {
    match value.trim().to_ascii_lowercase().as_str() {
      "wrap" | "torus" => Some(Self::Wrap),
      "clamp" | "clamp-camera" | "bounded" => Some(Self::Clamp),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct World {
  pub width: f64,
  pub height: f64,
  pub boundary: BoundaryPolicy,
}

impl World {
  pub fn center(&self) -> Point {
    Point {
      x: self.width / 2.0,
      y: self.height / 2.0,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Orb {
  pub x: f64,
  pub y: f64,
  #[serde(rename = "r")]
  pub radius: f64,
  pub color: String,
}

impl Orb {
  pub fn center(&self) -> Point {
    Point {
      x: self.x,
      y: self.y,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Player,
  Bot,
}

#[derive(Debug, Clone)]
pub struct Snake {
  pub id: Uuid,
  pub name: String,
  pub color: String,
  pub role: Role,
  pub x: f64,
  pub y: f64,
  pub heading: f64,
  pub speed: f64,
  pub boost: f64,
  pub turn_rate: f64,
  pub size: f64,
  pub segment_spacing: f64,
  pub target_length: f64,
  /// Index 0 is the most recent head position.
  pub segments: VecDeque<Point>,
  pub alive: bool,
  pub respawn_at: Option<i64>,
  /// Current wander goal for bots: a chosen orb location, a random point, or a rival head.
  pub target: Option<Point>,
}

impl Snake {
  pub fn is_player(&self) -> bool {
    self.role == Role::Player
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct SnakeSnapshot {
  pub id: Uuid,
  pub name: String,
  pub color: String,
  pub role: Role,
  pub alive: bool,
  pub size: f64,
  pub heading: f64,
  pub length: f64,
  pub segments: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
  pub name: String,
  pub length: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
  pub now: i64,
  pub world: World,
  pub camera: Point,
  pub orbs: Vec<Orb>,
  /// Sorted ascending by length for back-to-front drawing; dead snakes are included.
  pub snakes: Vec<SnakeSnapshot>,
  pub leaderboard: Vec<LeaderboardEntry>,
  pub score: i64,
}
