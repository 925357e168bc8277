//! Rabbit Game entry point
//!
//! The browser build is driven from `rabbit_game::web`. Natively this runs a
//! headless autopilot game on simulated 60 Hz frames and logs the result.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rabbit_game::Game;
    use rabbit_game::autopilot;
    use rabbit_game::sim::GameEvent;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    log::info!("Rabbit Game (native, headless) starting with seed {}", seed);

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u64 = 60 * 60 * 10;

    let mut game = Game::with_seed(seed);
    game.start();

    let mut frame = 0u64;
    while frame < MAX_FRAMES && (game.is_ticking() || game.is_animating()) {
        if let Some(dir) = autopilot::steer(game.state()) {
            game.steer(dir);
        }
        for event in game.frame(frame as f64 * FRAME_MS) {
            if let GameEvent::FireworksTriggered { index } = event {
                log::info!(
                    "Celebration #{} at frame {} ({} rockets in flight)",
                    index + 1,
                    frame,
                    game.fireworks().fireworks().len()
                );
            }
        }
        frame += 1;
    }

    let board = game.scoreboard();
    log::info!(
        "Finished after {} frames: {:?}, score {}, food {}, celebrations {}, length {}",
        frame,
        game.state().outcome,
        board.score,
        board.food_eaten,
        board.trigger_count,
        game.state().creature.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_main, this is just to satisfy the compiler
}
