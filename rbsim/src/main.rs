use rbsim::{bench_workers, ConsoleView, ControlPlane, InputEvent, Scenario, ScenarioConfig, Simulator};

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::{unbounded, Sender};
use log::{info, warn};

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file; bare names are looked up in the crate's `scenarios/` directory
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Override the generated population size
    #[arg(long)]
    bodies: Option<usize>,

    /// Override the number of iterations
    #[arg(long)]
    steps: Option<u64>,

    /// Override the worker pool size
    #[arg(long)]
    workers: Option<usize>,

    /// Start without waiting for a `start` line on stdin
    #[arg(long)]
    autostart: bool,

    /// Log a status line every N rendered iterations
    #[arg(long, default_value_t = 100)]
    report_every: u64,

    /// Time one step per pool size from 1 to `--workers` instead of running
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(args: &Args) -> Result<ScenarioConfig> {
    let given = PathBuf::from(&args.file_name);
    let config_path = if given.exists() {
        given
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(&args.file_name)
    };

    let file = File::open(&config_path).with_context(|| format!("opening scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let mut scenario_cfg: ScenarioConfig =
        serde_yaml::from_reader(reader).with_context(|| format!("parsing scenario {}", config_path.display()))?;

    if let Some(n) = args.bodies {
        scenario_cfg.population.count = n;
    }
    if let Some(n) = args.steps {
        scenario_cfg.engine.steps = n;
    }
    if let Some(n) = args.workers {
        scenario_cfg.engine.workers = n;
    }

    Ok(scenario_cfg)
}

/// Forward `start`/`stop` lines from stdin to the controller
fn spawn_stdin_input(events: Sender<InputEvent>) -> io::Result<()> {
    thread::Builder::new().name("rbsim-input".into()).spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            let event = match line.trim() {
                "start" | "s" => InputEvent::Started,
                "stop" | "p" => InputEvent::Stopped,
                "" => continue,
                other => {
                    warn!("unknown command {other:?}; use `start` or `stop`");
                    continue;
                }
            };
            if events.send(event).is_err() {
                break;
            }
        }
    })?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let scenario_cfg = load_scenario_from_yaml(&args)?;

    if args.bench {
        let max_workers = scenario_cfg.engine.workers.max(1);
        let workers: Vec<usize> = (1..=max_workers).collect();
        bench_workers(scenario_cfg.population.count, scenario_cfg.engine.steps.min(100), &workers)?;
        return Ok(());
    }

    let scenario = Scenario::build_scenario(scenario_cfg)?;

    let control = ControlPlane::new();
    let controller = Arc::new(control.controller());
    let (tx, rx) = unbounded();
    // Detached: the stdin thread may outlive the run while holding a sender
    controller.listen(rx)?;

    let view = ConsoleView::spawn(args.report_every)?;
    let mut sim = Simulator::new(scenario, &control, view)?;

    if args.autostart {
        tx.send(InputEvent::Started)?;
    } else {
        info!("type `start` to begin, `stop` to pause rendering");
    }
    spawn_stdin_input(tx)?;

    let report = sim.run()?;
    info!(
        "final: {} bodies, {} iterations, vt = {:.3}, {} frames forwarded, {} frames skipped by renderer",
        report.bodies.len(),
        report.iterations,
        report.virtual_time,
        report.frames_forwarded,
        sim.view().skipped()
    );

    Ok(())
}
