//! magworld CLI - blind agent in a world of grid bodies.
//!
//! - `magworld run` - paced simulation driven by a script, a random walk or stdin
//! - `magworld show` - print the initial layout once

use std::io::{BufRead, BufReader, IsTerminal, Read};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use magworld_core::{
    layout, Command, Controller, Intent, ScriptedController, Sensors, Simulation, TickContext,
    VecEventSink, WanderController,
};

mod config;
mod render;

use config::SimConfig;

#[derive(Parser)]
#[command(name = "magworld")]
#[command(about = "Blind grid-body agent simulation", version)]
struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation
    Run {
        /// Key script to replay, e.g. "l12 p k5 d q"
        #[arg(long, conflicts_with_all = ["script_file", "wander"])]
        script: Option<String>,

        /// Read the key script from a file
        #[arg(long, conflicts_with = "wander")]
        script_file: Option<PathBuf>,

        /// Drive the agent with a seeded random walk
        #[arg(long)]
        wander: bool,

        /// Run seed (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// Stop after this many ticks (overrides config)
        #[arg(long)]
        ticks: Option<u64>,

        /// Ticks per second (overrides config)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        rate: Option<u32>,

        /// Start in blind mode
        #[arg(long)]
        blind: bool,

        /// Emit one JSON snapshot per tick instead of ASCII frames
        #[arg(long)]
        json: bool,

        /// Print only the status line each tick
        #[arg(long, conflicts_with = "json")]
        no_render: bool,
    },

    /// Print the initial world once
    Show {
        /// Render the sensor-only view
        #[arg(long)]
        blind: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Frames,
    Status,
    Json,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    // stdout carries frames and snapshots
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = SimConfig::load(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Run {
            script,
            script_file,
            wander,
            seed,
            ticks,
            rate,
            blind,
            json,
            no_render,
        }) => {
            if let Some(seed) = seed {
                config.seed = seed;
            }
            if ticks.is_some() {
                config.max_ticks = ticks;
            }
            if let Some(rate) = rate {
                config.tick_rate_hz = rate;
            }
            config.blind_mode |= blind;

            let script = match script_file {
                Some(path) => Some(
                    std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read {}", path.display()))?,
                ),
                None => script,
            };
            let controller = select_controller(script, wander, &config)?;
            let output = if json {
                Output::Json
            } else if no_render {
                Output::Status
            } else {
                Output::Frames
            };
            run_simulation(controller, &config, output).await
        }
        Some(Commands::Show { blind }) => show_world(&config, blind || config.blind_mode),
        None => {
            println!("magworld - blind grid-body agent simulation");
            println!();
            println!("Usage: magworld <COMMAND>");
            println!();
            println!("Commands:");
            println!("  run   Run the simulation");
            println!("  show  Print the initial world");
            println!();
            println!("Run 'magworld --help' for more information.");
            Ok(())
        }
    }
}

fn select_controller(
    script: Option<String>,
    wander: bool,
    config: &SimConfig,
) -> Result<Box<dyn Controller>> {
    if wander {
        info!(seed = config.seed, "Wandering");
        return Ok(Box::new(WanderController::new(config.wander_max_hold)));
    }
    if let Some(script) = script {
        let controller = ScriptedController::parse(&script).context("Invalid key script")?;
        info!(commands = controller.remaining(), "Replaying script");
        return Ok(Box::new(controller));
    }
    info!("Reading keys from stdin");
    Ok(Box::new(StdinController::spawn(std::io::stdin())?))
}

async fn run_simulation(
    controller: Box<dyn Controller>,
    config: &SimConfig,
    output: Output,
) -> Result<()> {
    let world = layout::demo().context("Failed to build demo world")?;
    let mut sim = Simulation::new(world, controller)
        .with_seed(config.seed)
        .with_blind_mode(config.blind_mode);

    let mut interval =
        tokio::time::interval(Duration::from_secs_f64(1.0 / f64::from(config.tick_rate_hz)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let clear = output == Output::Frames && std::io::stdout().is_terminal();
    let mut events = VecEventSink::default();

    info!(rate = config.tick_rate_hz, blind = config.blind_mode, "Starting simulation");
    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = &mut ctrl_c => {
                info!("Interrupted");
                break;
            }
        }

        let out = sim.step(&mut events);
        for event in events.take() {
            debug!(?event, "World event");
        }

        match output {
            Output::Json => {
                let line = serde_json::to_string(&out.snapshot).context("Failed to encode snapshot")?;
                println!("{line}");
            }
            Output::Status => println!("{}", render::status_line(&out)),
            Output::Frames => {
                if clear {
                    print!("\x1b[2J\x1b[H");
                }
                print!("{}", render::render_frame(&out, config.viewport));
                println!("{}", render::status_line(&out));
            }
        }

        if out.quit {
            info!(tick = out.report.tick, "Controller quit");
            break;
        }
        if config.max_ticks.is_some_and(|max| out.report.tick + 1 >= max) {
            info!(tick = out.report.tick, "Tick limit reached");
            break;
        }
    }
    Ok(())
}

fn show_world(config: &SimConfig, blind: bool) -> Result<()> {
    let world = layout::demo().context("Failed to build demo world")?;
    let snapshot = world.snapshot();
    if blind {
        print!("{}", render::render_blind(&world.blind_view()));
        return Ok(());
    }
    let agent = snapshot
        .agent_view()
        .context("Agent missing from snapshot")?;
    print!("{}", render::render_full(&snapshot.bodies, agent, config.viewport));
    for body in &snapshot.bodies {
        println!(
            "{:>3} {:<8} at ({:>3}, {:>3}) {:?}",
            body.id.to_string(),
            body.name,
            body.position.x,
            body.position.y,
            body.kind
        );
    }
    Ok(())
}

/// Key script fed line by line from stdin. Idles while no keys are queued; quits on EOF.
struct StdinController {
    lines: UnboundedReceiver<String>,
    script: ScriptedController,
    closed: bool,
}

impl StdinController {
    /// Feed lines from `input` on a detached thread. A read still blocked on the terminal when
    /// the run ends is abandoned with the process.
    fn spawn<R: Read + Send + 'static>(input: R) -> Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::Builder::new()
            .name("magworld-stdin".into())
            .spawn(move || {
                for line in BufReader::new(input).lines() {
                    let Ok(line) = line else { break };
                    if tx.send(line).is_err() {
                        break;
                    }
                }
            })
            .context("Failed to spawn stdin reader")?;
        Ok(Self::from_receiver(rx))
    }

    fn from_receiver(lines: UnboundedReceiver<String>) -> Self {
        Self {
            lines,
            script: ScriptedController::default(),
            closed: false,
        }
    }

    fn drain(&mut self) {
        loop {
            match self.lines.try_recv() {
                Ok(line) => {
                    if let Err(err) = self.script.push_script(&line) {
                        warn!(%err, line = %line, "Ignoring key line");
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.closed = true;
                    break;
                }
            }
        }
    }
}

impl Controller for StdinController {
    fn behave(&mut self, _ctx: &TickContext, _sensors: &Sensors) -> Command {
        self.drain();
        match self.script.next_command() {
            Some(command) => command,
            None if self.closed => Command::Quit,
            None => Command::Act(Intent::IDLE),
        }
    }
}
