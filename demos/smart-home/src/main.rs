//! smart-home: headless run of the WSN smart-home simulator.
//!
//! Builds a 20-node network with an 18-sensor fleet, runs a batch of ticks
//! with periodic cluster-head rotation and energy forecasts, writes node
//! snapshots and step summaries, then prints the final state alongside the
//! MQTT, cipher, token and traffic demos.  `--live` finishes with a few
//! seconds of wall-clock ticking on the driver thread.

mod config;
mod report;


use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use clap::Parser;
use log::info;

use wsn_core::{SimRng, Step};
use wsn_output::{CsvWriter, SimOutputObserver};
use wsn_security::{DemoToken, decrypt_or_notice, encrypt, generate_traffic};
use wsn_sensor::{SensorKind, mqtt_messages};
use wsn_sim::{Command, SimBuilder, SimDriver, SimObserver, Simulation, StepReport};

use config::AppConfig;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Offset of the RNG stream used for the MQTT and traffic samples.
const SAMPLE_STREAM: u64 = 0xD3_u64;
/// Periodic ticks to wait for in `--live` mode.
const LIVE_TICKS: u32 = 3;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about = "Smart-home wireless sensor network simulator", long_about = None)]
struct CliArgs {
    /// TOML config file.  Defaults apply when omitted.
    #[arg(short = 'c', long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Override `demo.steps`.
    #[arg(short = 'n', long)]
    steps: Option<u64>,

    /// Override `demo.output_directory`.
    #[arg(short = 'o', long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Override `simulation.seed`.
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Override `simulation.default_node_count`.
    #[arg(long)]
    nodes: Option<usize>,

    /// Finish with periodic ticking on the driver thread.
    #[arg(long)]
    live: bool,
}

impl CliArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(steps) = self.steps {
            config.demo.steps = steps;
        }
        if let Some(dir) = &self.output {
            config.demo.output_directory = dir.clone();
        }
        if self.seed.is_some() {
            config.simulation.seed = self.seed;
        }
        if let Some(nodes) = self.nodes {
            config.simulation.default_node_count = nodes;
        }
    }
}

// ── Live-mode observer ────────────────────────────────────────────────────────

struct StepLogger;

impl SimObserver for StepLogger {
    fn on_step_end(&mut self, report: &StepReport) {
        info!(
            "{}: {} active, {} heads, {} msgs",
            report.step, report.active_nodes, report.active_heads, report.messages_transmitted
        );
    }

    fn on_running_changed(&mut self, step: Step, running: bool) {
        info!("running = {running} at {step}");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let mut config = AppConfig::load(args.config.as_deref())?;
    args.apply(&mut config);
    config.simulation.validate()?;

    println!("=== smart-home | WSN simulator ===");
    println!(
        "Nodes: {}  |  Sensors: {}  |  Steps: {}  |  Seed: {:?}",
        config.simulation.default_node_count,
        config.simulation.sensor_count,
        config.demo.steps,
        config.simulation.seed,
    );
    println!();

    // 1. Build.
    let mut sim = SimBuilder::new(config.simulation.clone()).build()?;
    let out_dir = config.demo.output_directory.clone();
    let writer = CsvWriter::new(&out_dir)
        .with_context(|| format!("opening output in {}", out_dir.display()))?;
    let mut obs = SimOutputObserver::new(writer);

    // 2. Batch run.
    let t0 = Instant::now();
    run_batch(&mut sim, &config, &mut obs);
    obs.finish();
    if let Some(e) = obs.take_error() {
        return Err(anyhow!(e).context("writing simulation output"));
    }
    println!(
        "Ran {} steps in {:.1} ms; output in {}",
        config.demo.steps,
        t0.elapsed().as_secs_f64() * 1e3,
        out_dir.display(),
    );
    println!();

    // 3. Final state.
    report::print_network(sim.network());
    if let Some(forecast) = sim.forecast() {
        report::print_forecast(forecast);
    }
    report::print_sensors(sim.sensors());
    export_json(&sim, &out_dir)?;

    // 4. Side demos.
    let mut rng = SimRng::from_seed_or_entropy(config.simulation.seed).child(SAMPLE_STREAM);
    let now = Utc::now();
    let mqtt = mqtt_messages(sim.sensors(), SensorKind::Temperature, config.demo.mqtt_samples, &mut rng, now);
    report::print_mqtt(&mqtt);
    let traffic = generate_traffic(&sim.network().nodes, config.demo.traffic_samples, &mut rng, now);
    report::print_traffic(&traffic);
    security_demo(now)?;

    // 5. Optional wall-clock ticking.
    if args.live {
        run_live(sim)?;
    }
    Ok(())
}

fn run_batch<O: SimObserver>(sim: &mut Simulation, config: &AppConfig, obs: &mut O) {
    for n in 1..=config.demo.steps {
        let action = config.demo.action_for(n);
        if let wsn_sim::Outcome::Stepped(report) = sim.execute(Command::Tick(action), obs) {
            if let Some(tick) = &report.tick {
                for s in &tick.successions {
                    info!("{}: {} took over from {}", report.step, s.successor, s.depleted);
                }
            }
        }
    }
}

fn export_json(sim: &Simulation, dir: &std::path::Path) -> Result<()> {
    let network = BufWriter::new(File::create(dir.join("network.json"))?);
    serde_json::to_writer_pretty(network, sim.network())?;
    let sensors = BufWriter::new(File::create(dir.join("sensors.json"))?);
    serde_json::to_writer_pretty(sensors, sim.sensors())?;
    Ok(())
}

fn security_demo(now: chrono::DateTime<Utc>) -> Result<()> {
    println!("── Security ────────────────────────────────────────");
    let key = "wsn-demo-key";
    let sealed = encrypt("front door unlocked", key)?;
    println!("  encrypted: {sealed}");
    println!("  decrypted: {}", decrypt_or_notice(&sealed, key));
    println!("  tampered:  {}", decrypt_or_notice("%%%", key));

    let token = DemoToken::issue("admin", "password", now)?;
    println!("  token:     {}", token.encoded);
    println!("  expires:   {}", token.claims.exp);
    if let Err(e) = DemoToken::issue("admin", "hunter2", now) {
        println!("  bad login: {e}");
    }
    Ok(())
}

fn run_live(sim: Simulation) -> Result<()> {
    let interval = sim.config().tick_interval();
    let start = sim.step();
    let handle = SimDriver::spawn(sim, StepLogger)?;
    handle.toggle_running()?;
    thread::sleep(interval * LIVE_TICKS + interval / 2);
    handle.toggle_running()?;
    let snapshot = handle.flush()?;
    println!(
        "Live mode: {} -> {} ({} active heads)",
        start,
        snapshot.step,
        snapshot.active_heads()
    );
    handle.shutdown()?;
    Ok(())
}
