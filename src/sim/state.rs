//! World state and core simulation types
//!
//! Everything the presentation layer draws after a step lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::{LevelDescription, LevelGrid};
use super::rect::Rect;
use crate::consts::*;
use crate::settings::{Settings, Tuning};

/// Session outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Running,
    /// Reached the flag pole
    Won,
    /// Out of lives or out of time
    Lost,
}

/// Why a session was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    LivesExhausted,
    TimeUp,
}

/// Gameplay events raised during the most recent step
///
/// For the presentation layer (sounds, particles, HUD flashes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    BrickBroken { tile_id: u32 },
    CoinCollected { tile_id: u32 },
    PowerUpSpawned { id: u32 },
    PowerUpCollected { id: u32, grew: bool },
    EnemyStomped { id: u32 },
    PlayerShrunk,
    LifeLost { lives_left: u8 },
    Won,
    Lost { cause: LossCause },
}

/// Position, size and velocity shared by every moving actor
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Body {
    pub rect: Rect,
    pub vel: Vec2,
    /// Resting on top of a tile
    pub on_ground: bool,
}

impl Body {
    pub fn new(rect: Rect, vel: Vec2) -> Self {
        Self {
            rect,
            vel,
            on_ground: false,
        }
    }

    /// Accelerate downward while airborne, capped at the fall speed
    pub fn apply_gravity(&mut self, gravity: f32, max_fall_speed: f32) {
        if !self.on_ground {
            self.vel.y = (self.vel.y + gravity).min(max_fall_speed);
        }
    }

    /// Apply this frame's velocity to the position
    #[inline]
    pub fn integrate(&mut self) {
        self.rect.translate(self.vel);
    }
}

/// Direction the player faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Grown by a growth item; absorbs one hit
    pub big: bool,
    pub facing: Facing,
    /// Frames left during which enemy contact is ignored
    pub invulnerable_ticks: u32,
    pub tuning: Tuning,
}

impl Player {
    /// A small player standing at the spawn point
    pub fn new(tuning: Tuning) -> Self {
        let mut player = Self {
            body: Body::new(Rect::new(0.0, 0.0, PLAYER_WIDTH, SMALL_HEIGHT), Vec2::ZERO),
            big: false,
            facing: Facing::Right,
            invulnerable_ticks: 0,
            tuning,
        };
        player.place_at_spawn();
        player
    }

    pub fn move_left(&mut self) {
        self.facing = Facing::Left;
        self.body.vel.x = (self.body.vel.x - self.tuning.acceleration).max(-self.tuning.max_speed);
    }

    pub fn move_right(&mut self) {
        self.facing = Facing::Right;
        self.body.vel.x = (self.body.vel.x + self.tuning.acceleration).min(self.tuning.max_speed);
    }

    /// Bleed off horizontal speed, stopping outright once it is negligible
    pub fn decelerate_when_idle(&mut self) {
        self.body.vel.x *= self.tuning.friction;
        if self.body.vel.x.abs() < self.tuning.stop_threshold {
            self.body.vel.x = 0.0;
        }
    }

    /// Jump impulse; does nothing in mid-air
    pub fn jump(&mut self) {
        if self.body.on_ground {
            self.body.vel.y = -self.tuning.jump_power;
            self.body.on_ground = false;
        }
    }

    /// Keep the player inside the level horizontally
    pub fn clamp_to_level(&mut self, level_width: f32) {
        let max_x = (level_width - self.body.rect.width).max(0.0);
        self.body.rect.x = self.body.rect.x.clamp(0.0, max_x);
    }

    /// Grow taller with the feet kept in place. Returns false if already big.
    pub fn grow(&mut self) -> bool {
        if self.big {
            return false;
        }
        self.big = true;
        self.set_height(BIG_HEIGHT);
        true
    }

    /// Revert to small with the feet kept in place
    pub fn shrink(&mut self) {
        self.big = false;
        self.set_height(SMALL_HEIGHT);
    }

    /// Back to the spawn point: small, motionless, briefly immune
    pub fn respawn(&mut self) {
        self.shrink();
        self.place_at_spawn();
        self.invulnerable_ticks = self.tuning.hurt_invulnerability_frames;
    }

    fn place_at_spawn(&mut self) {
        self.body.rect.x = SPAWN_X;
        self.body.rect.y = SPAWN_FLOOR_Y - self.body.rect.height;
        self.body.vel = Vec2::ZERO;
        self.body.on_ground = false;
    }

    fn set_height(&mut self, height: f32) {
        let feet = self.body.rect.bottom();
        self.body.rect.height = height;
        self.body.rect.y = feet - height;
    }
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    /// Small walker
    GroundPatrol,
    /// Taller, faster walker
    ShellCapable,
}

impl EnemyKind {
    pub fn size(self) -> Vec2 {
        match self {
            EnemyKind::GroundPatrol => Vec2::new(32.0, 32.0),
            EnemyKind::ShellCapable => Vec2::new(32.0, 40.0),
        }
    }

    /// Initial patrol velocity (leftward)
    pub fn patrol_speed(self) -> f32 {
        match self {
            EnemyKind::GroundPatrol => -1.0,
            EnemyKind::ShellCapable => -1.5,
        }
    }
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub body: Body,
    /// Dead enemies stay in the list but take no part in physics
    pub dead: bool,
}

impl Enemy {
    /// Spawn standing on the bottom edge of its cell
    pub fn spawn(id: u32, kind: EnemyKind, col: i32, row: i32) -> Self {
        let size = kind.size();
        let rect = Rect::new(
            col as f32 * TILE_SIZE,
            (row + 1) as f32 * TILE_SIZE - size.y,
            size.x,
            size.y,
        );
        Self {
            id,
            kind,
            body: Body::new(rect, Vec2::new(kind.patrol_speed(), 0.0)),
            dead: false,
        }
    }

    /// Constant-velocity patrol; turning around is the tile pass's job
    pub fn update(&mut self) {
        if self.dead {
            return;
        }
        self.body.rect.x += self.body.vel.x;
    }

    pub fn kill(&mut self) {
        self.dead = true;
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Makes a small player big
    Growth,
}

/// A collectible power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub body: Body,
    pub collected: bool,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, x: f32, y: f32) -> Self {
        Self {
            id,
            kind,
            body: Body::new(
                Rect::new(x, y, TILE_SIZE, TILE_SIZE),
                Vec2::new(POWER_UP_SPEED, 0.0),
            ),
            collected: false,
        }
    }

    pub fn update(&mut self) {
        if self.collected {
            return;
        }
        self.body.rect.x += self.body.vel.x;
    }
}

/// Complete world state: the snapshot the presentation layer reads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub level: LevelGrid,
    pub player: Player,
    /// Sorted by id
    pub enemies: Vec<Enemy>,
    /// Sorted by id
    pub power_ups: Vec<PowerUp>,
    /// Camera offset (y is always 0)
    pub viewport: Vec2,
    pub viewport_width: f32,
    /// Executed steps, for cosmetic animation timing
    pub frame: u64,
    pub score: u64,
    pub coins: u32,
    pub lives: u8,
    /// Countdown seconds
    pub clock: u32,
    pub session: SessionState,
    /// Events raised by the most recent step
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl World {
    /// Build a fresh session from a level table
    pub fn new(desc: &LevelDescription, settings: &Settings) -> Self {
        let mut world = Self {
            level: LevelGrid::from_description(desc),
            player: Player::new(settings.tuning),
            enemies: Vec::with_capacity(desc.enemies.len()),
            power_ups: Vec::new(),
            viewport: Vec2::ZERO,
            viewport_width: settings.viewport_width,
            frame: 0,
            score: 0,
            coins: 0,
            lives: settings.start_lives,
            clock: settings.start_clock,
            session: SessionState::Running,
            events: Vec::new(),
            next_id: 1,
        };

        for spawn in &desc.enemies {
            let id = world.next_entity_id();
            world.enemies.push(Enemy::spawn(id, spawn.kind, spawn.x, spawn.y));
        }

        world
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// True once the session is won or lost
    pub fn is_over(&self) -> bool {
        self.session != SessionState::Running
    }

    /// Enemies still taking part in the simulation
    pub fn live_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| !e.dead)
    }

    pub fn award(&mut self, points: u64) {
        self.score += points;
    }

    /// Spawn a growth item sitting on top of the given tile position
    pub fn spawn_power_up(&mut self, kind: PowerUpKind, tile: Rect) -> u32 {
        let id = self.next_entity_id();
        self.power_ups.push(PowerUp::new(id, kind, tile.x, tile.y - TILE_SIZE));
        self.events.push(GameEvent::PowerUpSpawned { id });
        log::debug!("Power-up {id} spawned at ({}, {})", tile.x, tile.y - TILE_SIZE);
        id
    }

    /// Lethal hit on a small player, or a fall out of the level
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::LifeLost {
            lives_left: self.lives,
        });
        log::info!("Life lost, {} remaining", self.lives);

        if self.lives == 0 {
            self.end(SessionState::Lost, Some(LossCause::LivesExhausted));
        } else {
            self.player.respawn();
        }
    }

    /// Move to a terminal session state
    pub fn end(&mut self, outcome: SessionState, cause: Option<LossCause>) {
        if self.is_over() || outcome == SessionState::Running {
            return;
        }
        self.session = outcome;
        match outcome {
            SessionState::Won => {
                self.events.push(GameEvent::Won);
                log::info!("Level cleared: score {}, coins {}", self.score, self.coins);
            }
            SessionState::Lost => {
                let cause = cause.unwrap_or(LossCause::LivesExhausted);
                self.events.push(GameEvent::Lost { cause });
                log::info!("Game over ({cause:?}): score {}", self.score);
            }
            SessionState::Running => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(Tuning::default())
    }

    #[test]
    fn test_player_spawns_on_floor() {
        let p = player();
        assert_eq!(p.body.rect.x, SPAWN_X);
        assert_eq!(p.body.rect.bottom(), SPAWN_FLOOR_Y);
        assert!(!p.big);
    }

    #[test]
    fn test_horizontal_speed_caps() {
        let mut p = player();
        for _ in 0..20 {
            p.move_right();
        }
        assert_eq!(p.body.vel.x, 4.0);
        assert_eq!(p.facing, Facing::Right);

        for _ in 0..40 {
            p.move_left();
        }
        assert_eq!(p.body.vel.x, -4.0);
        assert_eq!(p.facing, Facing::Left);
    }

    #[test]
    fn test_idle_deceleration_snaps_to_zero() {
        let mut p = player();
        p.body.vel.x = 4.0;
        p.decelerate_when_idle();
        assert!((p.body.vel.x - 3.2).abs() < 0.0001);

        for _ in 0..30 {
            p.decelerate_when_idle();
        }
        assert_eq!(p.body.vel.x, 0.0);
    }

    #[test]
    fn test_no_jump_in_mid_air() {
        let mut p = player();
        p.body.on_ground = false;
        p.body.vel.y = 3.0;
        p.jump();
        assert_eq!(p.body.vel.y, 3.0);

        p.body.on_ground = true;
        p.jump();
        assert_eq!(p.body.vel.y, -12.0);
        assert!(!p.body.on_ground);

        // A second press before landing changes nothing
        p.jump();
        assert_eq!(p.body.vel.y, -12.0);
    }

    #[test]
    fn test_grow_and_shrink_keep_feet() {
        let mut p = player();
        let feet = p.body.rect.bottom();
        assert!(p.grow());
        assert_eq!(p.body.rect.height, BIG_HEIGHT);
        assert_eq!(p.body.rect.bottom(), feet);
        assert!(!p.grow());

        p.shrink();
        assert_eq!(p.body.rect.height, SMALL_HEIGHT);
        assert_eq!(p.body.rect.bottom(), feet);
    }

    #[test]
    fn test_clamp_to_level() {
        let mut p = player();
        p.body.rect.x = -5.0;
        p.clamp_to_level(LEVEL_WIDTH);
        assert_eq!(p.body.rect.x, 0.0);
        p.body.rect.x = LEVEL_WIDTH + 10.0;
        p.clamp_to_level(LEVEL_WIDTH);
        assert_eq!(p.body.rect.x, LEVEL_WIDTH - PLAYER_WIDTH);
    }

    #[test]
    fn test_enemy_spawns_bottom_aligned() {
        let walker = Enemy::spawn(1, EnemyKind::GroundPatrol, 22, 12);
        let shell = Enemy::spawn(2, EnemyKind::ShellCapable, 97, 12);
        assert_eq!(walker.body.rect.bottom(), 416.0);
        assert_eq!(shell.body.rect.bottom(), 416.0);
        assert_eq!(shell.body.rect.height, 40.0);
        assert_eq!(shell.body.vel.x, -1.5);
    }

    #[test]
    fn test_dead_enemy_does_not_move() {
        let mut enemy = Enemy::spawn(1, EnemyKind::GroundPatrol, 5, 12);
        enemy.update();
        assert_eq!(enemy.body.rect.x, 159.0);
        enemy.kill();
        enemy.update();
        assert_eq!(enemy.body.rect.x, 159.0);
    }

    #[test]
    fn test_lose_life_until_lost() {
        let mut world = World::new(&LevelDescription::default(), &Settings::default());
        world.player.body.rect.x = 900.0;

        world.lose_life();
        assert_eq!(world.lives, 2);
        assert_eq!(world.player.body.rect.x, SPAWN_X);
        assert_eq!(world.session, SessionState::Running);

        world.lose_life();
        world.lose_life();
        assert_eq!(world.lives, 0);
        assert_eq!(world.session, SessionState::Lost);
        assert!(world.events.contains(&GameEvent::Lost {
            cause: LossCause::LivesExhausted
        }));
    }

    #[test]
    fn test_terminal_state_is_sticky() {
        let mut world = World::new(&LevelDescription::default(), &Settings::default());
        world.end(SessionState::Won, None);
        world.end(SessionState::Lost, Some(LossCause::TimeUp));
        assert_eq!(world.session, SessionState::Won);
    }
}
