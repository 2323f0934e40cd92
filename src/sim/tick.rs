//! Fixed per-frame simulation step
//!
//! One call advances the world by one logical frame. Per-frame deltas are
//! constant; the elapsed-time factor only decides whether a frame runs.

use super::collision::{Direction, overlaps, resolve_directional, separate, supports};
use super::level::{Reward, Tile, TileKind};
use super::state::{Body, GameEvent, LossCause, PowerUpKind, SessionState, World};
use crate::consts::*;
use crate::viewport_offset;

/// Logical keys held during this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Advance the world by one frame
///
/// `dt` is the elapsed real time normalized to a 60 Hz frame (1.0 = one
/// nominal frame). It is not used to scale motion.
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    if world.is_over() {
        return;
    }
    if !(dt.is_finite() && dt > 0.0) {
        log::trace!("Skipping frame with dt {dt}");
        return;
    }

    world.events.clear();
    let tuning = world.player.tuning;
    let player = &mut world.player;
    player.invulnerable_ticks = player.invulnerable_ticks.saturating_sub(1);

    // Left wins when both directions are held
    if input.left {
        player.move_left();
    } else if input.right {
        player.move_right();
    } else {
        player.decelerate_when_idle();
    }
    if input.jump {
        player.jump();
    }

    player.body.apply_gravity(tuning.gravity, tuning.max_fall_speed);
    player.body.integrate();
    player.clamp_to_level(world.level.width());

    resolve_player_tiles(world);
    world.level.prune_broken();

    update_enemies(world);
    if !world.is_over() {
        update_power_ups(world);
    }
    if !world.is_over() {
        check_victory(world);
    }
    if !world.is_over() && world.player.body.rect.top() > world.level.height() {
        log::debug!("Player fell out of the level");
        world.lose_life();
    }

    world.viewport.x = viewport_offset(
        world.player.body.rect.x,
        world.viewport_width,
        world.level.width(),
    );
    world.viewport.y = 0.0;
    world.frame += 1;
}

/// One second of the level countdown; running out of time loses the session
pub fn tick_clock(world: &mut World) {
    if world.is_over() {
        return;
    }
    if world.clock <= 1 {
        world.clock = 0;
        world.end(SessionState::Lost, Some(LossCause::TimeUp));
    } else {
        world.clock -= 1;
    }
}

/// Player against every solid tile; bonked tiles take effect after the pass
fn resolve_player_tiles(world: &mut World) {
    let body = &mut world.player.body;
    body.on_ground = false;

    let mut bonked = Vec::new();
    for (index, tile) in world.level.tiles().iter().enumerate() {
        if !tile.kind.is_solid() {
            continue;
        }
        if supports(&body.rect, &tile.rect, body.vel) {
            body.on_ground = true;
            continue;
        }

        let direction = resolve_directional(&body.rect, &tile.rect, body.vel);
        separate(&mut body.rect, &tile.rect, direction);
        match direction {
            Direction::Top => {
                body.vel.y = 0.0;
                body.on_ground = true;
            }
            Direction::Bottom => {
                body.vel.y = 0.0;
                bonked.push(index);
            }
            Direction::Left | Direction::Right => body.vel.x = 0.0,
            Direction::None => {}
        }
    }

    for index in bonked {
        strike_tile(world, index);
    }
}

/// Underside hit effects: breaking bricks and emptying question blocks
fn strike_tile(world: &mut World, index: usize) {
    let Some(tile) = world.level.tiles().get(index) else {
        return;
    };
    let (tile_id, kind, rect) = (tile.id, tile.kind, tile.rect);

    match kind {
        TileKind::Brick if world.player.big => {
            if world.level.mark_broken(index) {
                world.award(SCORE_BRICK);
                world.events.push(GameEvent::BrickBroken { tile_id });
            }
        }
        TileKind::Question => match world.level.mark_used(index, TileKind::UsedQuestion) {
            Some(Reward::Coin) => {
                world.coins += 1;
                world.award(SCORE_COIN_BLOCK);
                world.events.push(GameEvent::CoinCollected { tile_id });
            }
            Some(Reward::Mushroom) => {
                world.spawn_power_up(PowerUpKind::Growth, rect);
            }
            None => {}
        },
        _ => {}
    }
}

/// Land on tiles, turn around at walls. Walkers never trigger tiles.
fn resolve_walker_tiles(body: &mut Body, tiles: &[Tile]) {
    body.on_ground = false;
    for tile in tiles.iter().filter(|t| t.kind.is_solid()) {
        if supports(&body.rect, &tile.rect, body.vel) {
            body.on_ground = true;
            continue;
        }

        let direction = resolve_directional(&body.rect, &tile.rect, body.vel);
        separate(&mut body.rect, &tile.rect, direction);
        match direction {
            Direction::Top => {
                body.vel.y = 0.0;
                body.on_ground = true;
            }
            Direction::Bottom => body.vel.y = 0.0,
            Direction::Left | Direction::Right => body.vel.x = -body.vel.x,
            Direction::None => {}
        }
    }
}

/// What touching an enemy did to the player
enum Contact {
    Stomp,
    Shrink,
    Lethal,
    Ignored,
}

fn update_enemies(world: &mut World) {
    let tuning = world.player.tuning;
    let level_height = world.level.height();

    for index in 0..world.enemies.len() {
        if world.is_over() {
            break;
        }

        let enemy = &mut world.enemies[index];
        if enemy.dead {
            continue;
        }

        enemy.update();
        enemy.body.apply_gravity(tuning.gravity, tuning.max_fall_speed);
        enemy.body.rect.y += enemy.body.vel.y;
        resolve_walker_tiles(&mut enemy.body, world.level.tiles());

        if enemy.body.rect.top() > level_height {
            log::debug!("Enemy {} fell out of the level", enemy.id);
            enemy.kill();
            continue;
        }

        let player = &world.player;
        if !overlaps(&player.body.rect, &enemy.body.rect) {
            continue;
        }

        let player_mid = player.body.rect.y + player.body.rect.height / 2.0;
        let contact = if player.body.vel.y > 0.0 && player_mid < enemy.body.rect.top() {
            Contact::Stomp
        } else if player.invulnerable_ticks > 0 {
            Contact::Ignored
        } else if player.big {
            Contact::Shrink
        } else {
            Contact::Lethal
        };

        match contact {
            Contact::Stomp => {
                let id = enemy.id;
                enemy.kill();
                world.player.body.vel.y = -tuning.stomp_bounce;
                world.player.body.on_ground = false;
                world.award(SCORE_STOMP);
                world.events.push(GameEvent::EnemyStomped { id });
                log::debug!("Enemy {id} stomped");
            }
            Contact::Shrink => {
                world.player.shrink();
                world.player.invulnerable_ticks = tuning.hurt_invulnerability_frames;
                world.events.push(GameEvent::PlayerShrunk);
                log::debug!("Player shrunk by enemy {}", world.enemies[index].id);
            }
            Contact::Lethal => world.lose_life(),
            Contact::Ignored => {}
        }
    }
}

fn update_power_ups(world: &mut World) {
    let tuning = world.player.tuning;
    let level_height = world.level.height();
    let mut grown = Vec::new();

    for power_up in &mut world.power_ups {
        power_up.update();
        power_up.body.apply_gravity(tuning.gravity, tuning.max_fall_speed);
        power_up.body.rect.y += power_up.body.vel.y;
        resolve_walker_tiles(&mut power_up.body, world.level.tiles());

        if overlaps(&world.player.body.rect, &power_up.body.rect) {
            power_up.collected = true;
            let grew = match power_up.kind {
                PowerUpKind::Growth => world.player.grow(),
            };
            grown.push((power_up.id, grew));
        }
    }

    // Collected items and ones that fell out of the level leave together
    world
        .power_ups
        .retain(|p| !p.collected && p.body.rect.top() <= level_height);

    for (id, grew) in grown {
        if grew {
            world.award(SCORE_GROWTH);
        }
        world.events.push(GameEvent::PowerUpCollected { id, grew });
        log::debug!("Power-up {id} collected (grew: {grew})");
    }
}

fn check_victory(world: &mut World) {
    let reached = world
        .level
        .flag_pole()
        .is_some_and(|flag| world.player.body.rect.x >= flag.rect.x);
    if reached {
        world.end(SessionState::Won, None);
    }
}
