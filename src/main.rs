//! Survive the Dark entry point
//!
//! The browser build is driven from JavaScript through `survive_the_dark::web`.
//! Natively this runs a headless session with a scripted pilot, which is handy
//! for balancing a tuning file.
//!
//! Usage: `survive-the-dark [seed] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use anyhow::Context;
    use glam::Vec3;

    use survive_the_dark::consts::FRAME_RATE;
    use survive_the_dark::hud::{self, BatteryBand};
    use survive_the_dark::sim::{GameEvent, GameState, TickInput, session_rng, tick};
    use survive_the_dark::{Tuning, horizontal_dir};

    /// Stop after five minutes of simulated play
    const MAX_TICKS: u64 = 5 * 60 * FRAME_RATE as u64;

    /// Keep this far from walls before sliding sideways
    const WALL_MARGIN: f32 = 4.0;

    /// Flee the pursuer, detouring for pickups when running low
    fn pilot(state: &GameState, elapsed: f32) -> TickInput {
        let orb = state.orb.pos;
        let nearest_pickup = state
            .pickups
            .iter()
            .min_by(|a, b| a.pos.distance(orb).total_cmp(&b.pos.distance(orb)));

        let heading = match nearest_pickup {
            Some(pickup) if state.battery < 50.0 => pickup.pos - orb,
            _ => orb - state.pursuer.pos,
        };
        let heading = horizontal_dir(heading);
        let heading = if heading == Vec3::ZERO { Vec3::NEG_Z } else { heading };

        let room = state.room();
        let ahead = orb + heading * WALL_MARGIN;
        let cornered = !room.contains(Vec3::new(ahead.x, orb.y, ahead.z));

        TickInput {
            forward: true,
            left: cornered,
            camera_forward: heading,
            elapsed,
            ..Default::default()
        }
    }

    fn load_tuning(path: Option<&str>) -> anyhow::Result<Tuning> {
        match path {
            Some(path) => Tuning::load(path).with_context(|| format!("loading tuning {path}")),
            None => Ok(Tuning::default()),
        }
    }

    pub fn run() -> anyhow::Result<()> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let seed = match args.first() {
            Some(s) => s.parse::<u64>().with_context(|| format!("invalid seed {s:?}"))?,
            None => std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0),
        };
        let tuning = load_tuning(args.get(1).map(String::as_str))?;

        log::info!("Survive the Dark (headless) starting with seed {}", seed);
        let mut state = GameState::with_tuning(seed, tuning)?;
        let mut rng = session_rng(seed);

        while !state.is_game_over() && state.time_ticks < MAX_TICKS {
            let elapsed = (state.time_ticks + 1) as f32 / FRAME_RATE;
            let input = pilot(&state, elapsed);
            tick(&mut state, &input, &mut rng);

            for event in &state.events {
                match event {
                    GameEvent::FlickerStarted { frames } => {
                        log::info!("[{:>7.2}s] light flickers for {} frames", elapsed, frames)
                    }
                    GameEvent::PickupCollected { id, battery } => {
                        log::info!("[{:>7.2}s] picked up battery {} -> {:.1}%", elapsed, id, battery)
                    }
                    other => log::debug!("[{:>7.2}s] {:?}", elapsed, other),
                }
            }
        }

        let band = BatteryBand::from_battery(state.battery);
        println!("{}", hud::time_survived_label(state.time_survived));
        println!(
            "Battery: {} ({})",
            hud::battery_bar_width(state.battery),
            band.css()
        );
        println!(
            "Outcome: {}",
            if state.is_game_over() { "caught" } else { "survived" }
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = headless::run() {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is survive_the_dark::web::wasm_main, this is just to satisfy the compiler
}
