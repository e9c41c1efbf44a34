//! Flappy Brood headless driver
//!
//! Runs seeded sessions under the autopilot, renders every frame to a draw
//! list, and logs sounds, scores and crashes.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use flappy_brood::audio::{SoundBank, SoundEffect};
use flappy_brood::renderer::{SpriteSizes, render_frame};
use flappy_brood::sim::{CollisionMasks, GameEvent, GameState, TickInput, tick};
use flappy_brood::{AssetError, HighScores, Settings, SpriteSheet};

#[derive(Parser, Debug)]
#[command(name = "flappy-brood", about = "Run Flappy Brood sessions under the autopilot")]
struct Args {
    /// Frames to simulate
    #[arg(long, default_value_t = 3000)]
    frames: u64,

    /// RNG seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Settings JSON file
    #[arg(long, default_value = "settings.json")]
    config: PathBuf,

    /// Asset root holding `sprites/` and `audio/`; without it, solid
    /// hitmasks and stock sprite sizes are used
    #[arg(long)]
    assets: Option<PathBuf>,

    /// High score JSON file
    #[arg(long, default_value = "highscores.json")]
    scores: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), AssetError> {
    let settings = Settings::load(&args.config);

    let (masks, sizes, sounds) = match &args.assets {
        Some(root) => {
            let sheet = SpriteSheet::load(&root.join("sprites"), &settings)?;
            let sounds = SoundBank::load(&root.join("audio"))?;
            (sheet.collision_masks(), sheet.sizes(), Some(sounds))
        }
        None => {
            log::info!("No asset folder given, using solid hitmasks");
            (CollisionMasks::solid(), SpriteSizes::nominal(), None)
        }
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut state = GameState::new(settings, seed, masks);
    let mut scores = HighScores::load(&args.scores);

    let autopilot = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let restart = TickInput {
        flap: true,
        ..Default::default()
    };

    let mut sessions = 0u32;
    let mut best = 0u32;
    let mut draw_calls = 0usize;

    for _ in 0..args.frames {
        let input = if state.is_over() { &restart } else { &autopilot };
        tick(&mut state, input);

        for &event in &state.events {
            let effect = SoundEffect::for_event(event);
            let bytes = sounds.as_ref().map_or(0, |bank| bank.clip(effect).len());
            log::debug!("{:?} -> {} ({} bytes)", event, effect.file_name(), bytes);

            if event == GameEvent::Hit {
                sessions += 1;
                best = best.max(state.score);
                if let Some(rank) = scores.add_score(state.score, state.time_ticks, state.seed) {
                    log::info!("New high score #{}: {}", rank, state.score);
                }
            }
        }

        draw_calls += render_frame(&state, &sizes).len();
    }

    if let Err(e) = scores.save(&args.scores) {
        log::warn!("Failed to save high scores: {}", e);
    }

    log::info!(
        "Simulated {} frames: {} runs ended, best score {}, {} draw commands",
        args.frames,
        sessions,
        best,
        draw_calls
    );
    println!(
        "seed {}: {} runs, best score {}, all-time best {}",
        seed,
        sessions,
        best,
        scores.top_score().unwrap_or(0)
    );

    Ok(())
}
