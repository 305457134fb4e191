//! Wall Breaker headless driver
//!
//! Runs the simulation without a window: a ball-tracking autopilot supplies
//! input, terminal phases are restarted like the 'R' key would, and the
//! outcome of every game is logged.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::Parser;

use wall_breaker::Settings;
use wall_breaker::hud;
use wall_breaker::sim::{GamePhase, GameState, Snapshot, TickInput};

#[derive(Parser, Debug)]
#[command(name = "wall-breaker", about = "Headless Wall Breaker simulation")]
struct Args {
    /// Run seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Frame limit across all games
    #[arg(long, default_value_t = 60 * 60 * 5)]
    frames: u64,

    /// Number of games to finish before stopping
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Pace frames against the wall clock instead of a fixed step
    #[arg(long)]
    realtime: bool,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,
}

/// Tracks the ball with the paddle center, with a small dead zone
fn autopilot(snapshot: &Snapshot) -> TickInput {
    let paddle_x = snapshot.paddle.center_x();
    let dx = snapshot.ball_center.x - paddle_x;
    let dead_zone = snapshot.paddle.w / 4.0;
    TickInput {
        move_left: dx < -dead_zone,
        move_right: dx > dead_zone,
    }
}

/// Game instance holding the simulation and frame pacing
struct Game {
    state: GameState,
    snapshot: Snapshot,
    frame_secs: f32,
    realtime: bool,
    last_frame: Instant,
}

impl Game {
    fn new(settings: Settings, realtime: bool) -> Self {
        let state = GameState::with_settings(settings);
        let frame_secs = state.settings.frame_secs();
        let snapshot = state.snapshot();
        Self {
            state,
            snapshot,
            frame_secs,
            realtime,
            last_frame: Instant::now(),
        }
    }

    /// Time since the previous frame, sleeping off any spare frame budget
    fn frame_dt(&mut self) -> f32 {
        if !self.realtime {
            return self.frame_secs;
        }
        let budget = Duration::from_secs_f32(self.frame_secs);
        let spent = self.last_frame.elapsed();
        if spent < budget {
            std::thread::sleep(budget - spent);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        dt
    }

    fn update(&mut self) {
        let dt = self.frame_dt();
        let input = autopilot(&self.snapshot);
        self.snapshot = self.state.tick(&input, dt);
    }

    fn report(&self, game_no: u32) {
        let outcome = hud::banner(self.snapshot.phase)
            .map(|(text, _)| text)
            .unwrap_or("IN PROGRESS");
        log::info!(
            "Game {}: {} | {} | {} blocks left | {:.1}s, {} descents",
            game_no,
            outcome,
            hud::score_text(self.snapshot.score),
            self.snapshot.blocks.len(),
            self.state.elapsed_secs,
            self.state.descents
        );
    }
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.settings {
        Some(path) => Settings::from_path(path)
            .with_context(|| format!("loading settings {}", path.display()))?,
        None => Settings::default(),
    };
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    Ok(settings)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if args.games == 0 {
        bail!("--games must be > 0");
    }

    let settings = load_settings(&args)?;
    let mut game = Game::new(settings, args.realtime);
    log::info!("Running up to {} games, {} frames (seed {})", args.games, args.frames, game.state.seed);

    let mut finished = 0u32;
    for _ in 0..args.frames {
        game.update();

        if game.snapshot.phase != GamePhase::Playing {
            finished += 1;
            game.report(finished);
            if finished >= args.games {
                break;
            }
            game.state.restart();
            game.snapshot = game.state.snapshot();
        }
    }

    if finished < args.games {
        log::warn!("Frame limit reached after {} finished games", finished);
        game.report(finished + 1);
    }

    if args.json {
        let json = serde_json::to_string_pretty(&game.snapshot).context("serializing snapshot")?;
        println!("{}", json);
    }

    Ok(())
}
