//! Brick Runner entry point
//!
//! Native builds run a headless session: a scripted runner holds right and
//! hops at a fixed rhythm until the session ends or the frame limit is hit.
//! Presentation hosts embed the library and drive `FrameDriver` themselves.
//!
//! Usage: `brick-runner [settings.json] [level.json]`

#[cfg(not(target_arch = "wasm32"))]
use brick_runner::{FrameDriver, Key, Settings, consts::FRAME_MS, sim::LevelDescription};

/// Upper bound for the scripted run (five minutes at 60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const MAX_FRAMES: u64 = 60 * 60 * 5;

/// Hop rhythm for the scripted runner
#[cfg(not(target_arch = "wasm32"))]
const HOP_EVERY: u64 = 90;
#[cfg(not(target_arch = "wasm32"))]
const HOP_HOLD: u64 = 20;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Brick Runner (native, headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_from(path),
        None => Settings::default(),
    };
    let level = match args.next() {
        Some(path) => load_level(&path),
        None => LevelDescription::world_1_1(),
    };

    let mut driver = FrameDriver::start(&level, &settings);
    driver.key_down(Key::ArrowRight);

    let frame_ms = FRAME_MS as f64;
    for i in 0..MAX_FRAMES {
        if i % HOP_EVERY == 0 {
            driver.key_down(Key::Space);
        } else if i % HOP_EVERY == HOP_HOLD {
            driver.key_up(Key::Space);
        }

        driver.frame(i as f64 * frame_ms);
        for event in &driver.world().events {
            log::debug!("frame {}: {:?}", driver.world().frame, event);
        }
        if driver.world().is_over() {
            break;
        }
    }
    driver.teardown();

    let world = driver.world();
    log::info!(
        "Session finished as {:?} after {} frames: score {}, coins {}, lives {}, clock {}",
        world.session,
        world.frame,
        world.score,
        world.coins,
        world.lives,
        world.clock
    );
    match serde_json::to_string_pretty(world) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize final world: {e}"),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_level(path: &str) -> LevelDescription {
    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| LevelDescription::from_json(&json).map_err(|e| e.to_string()));
    match parsed {
        Ok(desc) => {
            log::info!("Loaded level from {path}");
            desc
        }
        Err(e) => {
            log::error!("Failed to load level {path}: {e}; using World 1-1");
            LevelDescription::world_1_1()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts construct a FrameDriver directly; nothing to run here
}
