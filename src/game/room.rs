use super::bots::{update_bot_target, Quarry};
use super::camera::{camera_offset, screen_to_world, Viewport};
use super::collision::{find_lethal_hits, resolve_orb_pickups};
use super::config::SimConfig;
use super::constants::{
  FRAME_MS, PLAYER_BOOST_MULTIPLIER, PLAYER_NAME, PLAYER_NAME_FALLBACK, REFERENCE_FRAME_MS,
};
use super::input::InputSample;
use super::leaderboard::rank;
use super::population::{
  cap_orbs, create_bot, create_player, death_orbs, ensure_orb_floor, respawn_delay_ms,
  respawn_snake, spawn_orbs,
};
use super::schedule::{ScheduledEvent, Scheduler};
use super::snake::{advance, apply_bounds, head_pos};
use super::types::{
  FrameSnapshot, LeaderboardEntry, Orb, Point, Role, Snake, SnakeSnapshot, World,
};
use crate::protocol;
use crate::shared::names::sanitize_player_name;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use uuid::Uuid;

mod session;

pub use session::ViewerIo;
use session::{LatestFrame, ViewerInbound};

#[derive(Debug)]
pub struct Room {
  state: Mutex<RoomState>,
  running: AtomicBool,
  viewer_attached: AtomicBool,
  inbound: Arc<ViewerInbound>,
  frames: Arc<LatestFrame>,
  started: Instant,
}

#[derive(Debug, Clone, Copy)]
pub enum DebugKillTarget {
  Any,
  Bot,
  Player,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoomStats {
  #[serde(rename = "aliveSnakes")]
  pub alive_snakes: usize,
  #[serde(rename = "totalSnakes")]
  pub total_snakes: usize,
  pub orbs: usize,
  #[serde(rename = "pendingEvents")]
  pub pending_events: usize,
  #[serde(rename = "viewerAttached")]
  pub viewer_attached: bool,
}

#[derive(Debug)]
struct RoomState {
  config: SimConfig,
  world: World,
  snakes: Vec<Snake>,
  orbs: Vec<Orb>,
  scheduler: Scheduler,
  rng: StdRng,
  player_id: Uuid,
  viewer_name: String,
  viewport: Viewport,
  camera: Point,
  leaderboard: Vec<LeaderboardEntry>,
  last_tick_at: Option<i64>,
}

impl Room {
  pub fn new(config: SimConfig) -> Self {
    Self {
      state: Mutex::new(RoomState::new(config)),
      running: AtomicBool::new(false),
      viewer_attached: AtomicBool::new(false),
      inbound: Arc::new(ViewerInbound::new()),
      frames: Arc::new(LatestFrame::new()),
      started: Instant::now(),
    }
  }

  fn now_millis(&self) -> i64 {
    self.started.elapsed().as_millis() as i64
  }

  /// Claims the single viewer slot. `None` while another viewer holds it.
  pub fn attach_viewer(&self) -> Option<ViewerIo> {
    if self
      .viewer_attached
      .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
      .is_err()
    {
      return None;
    }
    tracing::debug!("viewer attached");
    Some(ViewerIo {
      inbound: Arc::clone(&self.inbound),
      frames: Arc::clone(&self.frames),
    })
  }

  pub fn detach_viewer(&self) {
    self.inbound.release();
    self.frames.take_latest();
    self.viewer_attached.store(false, Ordering::SeqCst);
    tracing::debug!("viewer detached");
  }

  pub async fn leaderboard(&self) -> Vec<LeaderboardEntry> {
    self.state.lock().await.leaderboard.clone()
  }

  pub async fn snapshot(&self) -> FrameSnapshot {
    let now = self.now_millis();
    self.state.lock().await.frame_snapshot(now)
  }

  pub async fn stats(&self) -> RoomStats {
    let state = self.state.lock().await;
    RoomStats {
      alive_snakes: state.snakes.iter().filter(|snake| snake.alive).count(),
      total_snakes: state.snakes.len(),
      orbs: state.orbs.len(),
      pending_events: state.scheduler.len(),
      viewer_attached: self.viewer_attached.load(Ordering::SeqCst),
    }
  }

  pub async fn debug_kill(&self, target: DebugKillTarget) -> Option<Uuid> {
    let now = self.now_millis();
    self.state.lock().await.debug_kill(target, now)
  }

  pub fn ensure_loop(self: &Arc<Self>) {
    if self
      .running
      .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
      .is_err()
    {
      return;
    }

    let room = Arc::clone(self);
    tokio::spawn(async move {
      let mut interval = tokio::time::interval(std::time::Duration::from_millis(FRAME_MS));
      interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
      loop {
        interval.tick().await;
        let now = room.now_millis();
        let input = room.inbound.snapshot();
        let pending_name = room.inbound.take_name();
        let mut state = room.state.lock().await;
        if let Some(name) = pending_name {
          state.set_viewer_name(&name);
        }
        state.tick(now, &input);
        if !room.viewer_attached.load(Ordering::SeqCst) {
          continue;
        }
        match protocol::encode_frame(&state.frame_snapshot(now)) {
          Ok(payload) => room.frames.store(payload),
          Err(error) => tracing::warn!(?error, "failed to encode frame"),
        }
      }
    });
  }
}

/// Next slot on the fixed orb-floor grid strictly after `now`. Missed slots are skipped, not replayed.
fn next_orb_floor_at(due_at: i64, now: i64, interval: i64) -> i64 {
  let next = due_at + interval;
  if next > now {
    return next;
  }
  let missed = (now - next) / interval + 1;
  next + missed * interval
}

impl RoomState {
  fn new(config: SimConfig) -> Self {
    let rng = match config.seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_entropy(),
    };
    Self::with_rng(config, rng)
  }

  #[cfg(test)]
  fn with_seed(config: SimConfig, seed: u64) -> Self {
    Self::with_rng(config, StdRng::seed_from_u64(seed))
  }

  fn with_rng(config: SimConfig, mut rng: StdRng) -> Self {
    let world = config.world();
    let orbs = spawn_orbs(&mut rng, &world, config.initial_orbs);
    let mut snakes: Vec<Snake> = (0..config.bot_count)
      .map(|index| create_bot(index, &world, &mut rng))
      .collect();
    let player = create_player(&world);
    let player_id = player.id;
    snakes.push(player);

    let mut scheduler = Scheduler::new();
    scheduler.schedule(config.orb_floor_interval_ms, ScheduledEvent::OrbFloor);

    let input = InputSample::default();
    let camera = camera_offset(world.center(), input.viewport, &world);
    let mut state = Self {
      config,
      world,
      snakes,
      orbs,
      scheduler,
      rng,
      player_id,
      viewer_name: PLAYER_NAME_FALLBACK.to_string(),
      viewport: input.viewport,
      camera,
      leaderboard: Vec::new(),
      last_tick_at: None,
    };
    state.leaderboard = rank(&state.snakes, &state.viewer_name);
    state
  }

  fn player_index(&self) -> Option<usize> {
    self
      .snakes
      .iter()
      .position(|snake| snake.id == self.player_id)
  }

  fn player(&self) -> Option<&Snake> {
    self.player_index().map(|index| &self.snakes[index])
  }

  fn set_viewer_name(&mut self, raw: &str) {
    self.viewer_name = sanitize_player_name(raw, PLAYER_NAME_FALLBACK);
    let label = sanitize_player_name(raw, PLAYER_NAME);
    if let Some(index) = self.player_index() {
      self.snakes[index].name = label;
    }
  }

  fn frame_dt(&mut self, now: i64) -> f64 {
    let dt = match self.last_tick_at {
      Some(last) => ((now - last) as f64).clamp(0.0, self.config.max_frame_dt_ms),
      None => REFERENCE_FRAME_MS.min(self.config.max_frame_dt_ms),
    };
    self.last_tick_at = Some(now);
    dt
  }

  /// One frame: steer everything, then collide, then run due timers, then rank.
  fn tick(&mut self, now: i64, input: &InputSample) {
    let dt = self.frame_dt(now);
    self.viewport = input.viewport;

    let player_target = self.player_target(input);
    self.steer(player_target, input.boosting, dt);
    self.resolve_collisions(now);
    self.run_due_events(now);

    self.leaderboard = rank(&self.snakes, &self.viewer_name);
    self.camera = self.current_camera();
  }

  fn current_camera(&self) -> Point {
    let focus = self
      .player()
      .map(|player| Point {
        x: player.x,
        y: player.y,
      })
      .unwrap_or_else(|| self.world.center());
    camera_offset(focus, self.viewport, &self.world)
  }

  fn player_target(&self, input: &InputSample) -> Point {
    let camera = self.current_camera();
    screen_to_world(input.pointer, camera)
  }

  fn steer(&mut self, player_target: Point, boosting: bool, dt: f64) {
    let quarry = self.player().filter(|player| player.alive).map(|player| Quarry {
      head: head_pos(player),
      length: player.target_length,
    });

    for snake in self.snakes.iter_mut() {
      if !snake.alive {
        continue;
      }
      let goal = match snake.role {
        Role::Player => {
          snake.boost = if boosting { PLAYER_BOOST_MULTIPLIER } else { 1.0 };
          player_target
        }
        Role::Bot => update_bot_target(snake, &self.orbs, quarry, &self.world, &mut self.rng),
      };
      advance(snake, goal, dt);
      apply_bounds(snake, &self.world);
    }
  }

  fn resolve_collisions(&mut self, now: i64) {
    resolve_orb_pickups(&mut self.snakes, &mut self.orbs, &self.config, &mut self.rng);
    for index in find_lethal_hits(&self.snakes, &self.config) {
      self.handle_death(index, now);
    }
  }

  fn handle_death(&mut self, index: usize, now: i64) {
    let Some(snake) = self.snakes.get_mut(index) else { return };
    if !snake.alive {
      return;
    }
    snake.alive = false;
    snake.boost = 1.0;
    snake.target = None;
    let delay = respawn_delay_ms(snake.role, &self.config, &mut self.rng);
    let respawn_at = now + delay;
    snake.respawn_at = Some(respawn_at);
    let snake_id = snake.id;
    tracing::debug!(%snake_id, name = %snake.name, respawn_at, "snake died");

    let burst = death_orbs(snake, &self.config, &mut self.rng);
    self.orbs.extend(burst);
    cap_orbs(&mut self.orbs, &self.config);
    self.scheduler.schedule(respawn_at, ScheduledEvent::Respawn { snake_id });
  }

  fn run_due_events(&mut self, now: i64) {
    for (due_at, event) in self.scheduler.pop_due(now) {
      match event {
        ScheduledEvent::Respawn { snake_id } => self.fire_respawn(snake_id),
        ScheduledEvent::OrbFloor => {
          ensure_orb_floor(&mut self.orbs, &self.config, &mut self.rng);
          let next = next_orb_floor_at(due_at, now, self.config.orb_floor_interval_ms);
          self.scheduler.schedule(next, ScheduledEvent::OrbFloor);
        }
      }
    }
  }

  fn fire_respawn(&mut self, snake_id: Uuid) {
    let Some(snake) = self.snakes.iter_mut().find(|snake| snake.id == snake_id) else {
      tracing::debug!(%snake_id, "respawn skipped, snake no longer in world");
      return;
    };
    if snake.alive || snake.respawn_at.is_none() {
      tracing::debug!(%snake_id, "respawn skipped, snake not pending");
      return;
    }
    respawn_snake(snake, &self.config, &mut self.rng);
    tracing::debug!(%snake_id, name = %snake.name, "snake respawned");
  }

  fn debug_kill(&mut self, target: DebugKillTarget, now: i64) -> Option<Uuid> {
    let index = self.snakes.iter().position(|snake| {
      snake.alive
        && match target {
          DebugKillTarget::Any => true,
          DebugKillTarget::Bot => snake.role == Role::Bot,
          DebugKillTarget::Player => snake.role == Role::Player,
        }
    })?;
    self.handle_death(index, now);
    Some(self.snakes[index].id)
  }

  fn frame_snapshot(&self, now: i64) -> FrameSnapshot {
    let mut snakes: Vec<&Snake> = self.snakes.iter().collect();
    snakes.sort_by(|a, b| a.target_length.total_cmp(&b.target_length));
    let snakes = snakes
      .into_iter()
      .map(|snake| SnakeSnapshot {
        id: snake.id,
        name: snake.name.clone(),
        color: snake.color.clone(),
        role: snake.role,
        alive: snake.alive,
        size: snake.size,
        heading: snake.heading,
        length: snake.target_length,
        segments: snake.segments.iter().copied().collect(),
      })
      .collect();

    FrameSnapshot {
      now,
      world: self.world,
      camera: self.camera,
      orbs: self.orbs.clone(),
      snakes,
      leaderboard: self.leaderboard.clone(),
      score: self
        .player()
        .map(|player| player.target_length.round() as i64)
        .unwrap_or(0),
    }
  }
}
