//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-frame deltas only
//! - Stable iteration order (tiles in construction order, actors by id)
//! - No rendering, platform or I/O dependencies

pub mod collision;
pub mod layout;
pub mod level;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{Direction, overlaps, resolve_directional, separate, supports};
pub use level::{LevelDescription, LevelGrid, Reward, Tile, TileKind};
pub use rect::Rect;
pub use state::{
    Body, Enemy, EnemyKind, Facing, GameEvent, LossCause, Player, PowerUp, PowerUpKind,
    SessionState, World,
};
pub use tick::{TickInput, tick, tick_clock};
