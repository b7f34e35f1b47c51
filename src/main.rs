//! Bunny Hop entry point
//!
//! Native builds play a headless session with the autopilot and print the
//! outcome; the leaderboard only persists in the browser. The browser build
//! is driven from JavaScript via `bunny_hop::web`.
//!
//! Usage: `bunny-hop [seed] [max_frames]`, tuning overrides are read from the
//! JSON file named by `BUNNY_HOP_TUNING`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use bunny_hop::consts::FRAME_DT;
    use bunny_hop::{Tuning, headless};

    env_logger::init();
    log::info!("Bunny Hop (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(rand::random);
    let max_frames = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or((120.0 / FRAME_DT) as u64);

    let tuning = match std::env::var("BUNNY_HOP_TUNING") {
        Ok(path) => match Tuning::load_file(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(2);
            }
        },
        Err(_) => Tuning::default(),
    };

    let summary = headless::run(seed, tuning, max_frames, true);
    log::info!(
        "Run finished: {} frames, {} jumps, {} carrots, peak height {:.0}{}",
        summary.frames,
        summary.jumps,
        summary.collected,
        summary.peak_height,
        if summary.game_over { " (game over)" } else { "" }
    );

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Cannot encode run summary: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is bunny_hop::web::start, this is just to satisfy the compiler
}
