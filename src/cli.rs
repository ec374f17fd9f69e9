use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::core::audio::MemoryTransport;
use crate::core::controller::{ChantMode, RoundController};
use crate::core::engine::Engine;
use crate::core::moves::Move;
use crate::core::opponent::{MoveGenerator, RandomOpponent, ScriptedOpponent};
use crate::core::presentation::{NullSink, PresentationSink};
use crate::host::{StageSink, TerminalHost};

#[derive(Parser)]
#[command(name = "jokenpo")]
#[command(about = "✊✋✌️ Rock-paper-scissors against the machine, first to 10")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// JSON settings file; flags below override it
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Pause between the shake and the reveal, in milliseconds
    #[arg(long, global = true)]
    pub delay_ms: Option<u64>,

    /// Seed for a reproducible opponent and captions
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Start with background music switched on
    #[arg(long, global = true)]
    pub music: bool,

    /// Chant cue played while the hands shake
    #[arg(long, global = true, value_enum)]
    pub chant: Option<ChantMode>,

    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play an interactive match in the terminal
    Play,
    /// Play a scripted match headlessly and print each round as JSON
    Simulate {
        /// Your moves in order, e.g. rock,paper,scissors
        #[arg(long, value_delimiter = ',', required = true)]
        moves: Vec<Move>,

        /// Opponent moves in order (repeated if shorter); random when omitted
        #[arg(long, value_delimiter = ',')]
        cpu: Vec<Move>,
    },
}

impl Cli {
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::load(self.config.as_deref())?;
        if let Some(delay) = self.delay_ms {
            settings.reveal_delay_ms = delay;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if self.music {
            settings.music = true;
        }
        if let Some(chant) = self.chant {
            settings.chant = chant;
        }
        if let Some(path) = &self.log_file {
            settings.log_file = path.clone();
        }
        Ok(settings)
    }
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let settings = cli.settings()?;

    match cli.command {
        Some(Commands::Play) | None => {
            init_file_logging(&settings.log_file)?;
            play(settings).await
        }
        Some(Commands::Simulate { moves, cpu }) => {
            init_stderr_logging()?;
            simulate(settings, moves, cpu).await
        }
    }
}

async fn play(settings: Settings) -> Result<()> {
    let stage = StageSink::new();
    let deck = MemoryTransport::state_only();
    let opponent = RandomOpponent::from_seed(settings.seed);

    let controller = build_controller(&settings, Box::new(opponent), Box::new(stage.clone()), deck.clone());
    let (engine, results) = Engine::new(controller, settings.reveal_delay());

    info!(delay_ms = engine.delay().as_millis() as u64, seed = ?settings.seed, "table open");
    TerminalHost::new(engine, stage, deck, results).run().await
}

async fn simulate(settings: Settings, moves: Vec<Move>, cpu: Vec<Move>) -> Result<()> {
    let opponent: Box<dyn MoveGenerator> = if cpu.is_empty() {
        Box::new(RandomOpponent::from_seed(settings.seed))
    } else {
        Box::new(ScriptedOpponent::new(cpu)?)
    };

    let controller = build_controller(&settings, opponent, Box::new(NullSink), MemoryTransport::state_only());
    let (engine, mut results) = Engine::new(controller, settings.reveal_delay());

    for mv in moves {
        if !engine.play_round(mv) {
            warn!(%mv, "round dropped while busy");
            continue;
        }
        let result = results
            .recv()
            .await
            .ok_or_else(|| anyhow!("engine stopped before the round finished"))?;
        println!("{}", serde_json::to_string(&result)?);
    }

    info!(
        player = engine.player_score(),
        opponent = engine.opponent_score(),
        "simulation finished"
    );
    Ok(())
}

fn build_controller(
    settings: &Settings,
    opponent: Box<dyn MoveGenerator>,
    sink: Box<dyn PresentationSink>,
    deck: MemoryTransport,
) -> RoundController {
    // Captions draw from their own stream so the opponent sequence matches RandomOpponent::from_seed
    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_os_rng(),
    };
    let mut controller = RoundController::new(opponent, sink, Box::new(deck), rng).with_chant(settings.chant);
    if settings.music {
        controller.toggle_music();
    }
    controller
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// The terminal UI owns stdout, so interactive sessions log to a file
fn init_file_logging(path: &Path) -> Result<()> {
    let file = std::fs::OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {}", e))
}

fn init_stderr_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {}", e))
}
