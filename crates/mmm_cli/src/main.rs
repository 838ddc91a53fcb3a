//! Money Mystery & Murder CLI
//!
//! Headless match driver and inspection tools for the match core.

mod sim;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use mmm_core::{MatchConfig, PhaseClock, RoleCounts, RolePool};

#[derive(Parser)]
#[command(name = "mmm")]
#[command(about = "Money Mystery & Murder match core tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a scripted match from start to finish
    Simulate {
        /// Number of players at the table
        #[arg(long, default_value_t = 8)]
        players: usize,

        /// Shuffle seed (overrides the config file)
        #[arg(long)]
        seed: Option<u64>,

        /// Match config file (.json, .yaml, .yml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Real seconds per simulated frame
        #[arg(long, default_value_t = 5.0)]
        step: f64,

        /// Give up after this many in-game days
        #[arg(long, default_value_t = 30)]
        max_days: u32,

        /// Print the full report as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Show the role distribution and one shuffle for a table size
    Roles {
        #[arg(long)]
        players: usize,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show which phase an hour falls in
    Phase {
        #[arg(long)]
        hour: u8,

        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the match config JSON schema
    Schema,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { players, seed, config, step, max_days, json } => {
            if step <= 0.0 {
                bail!("--step must be positive, got {}", step);
            }
            let mut match_config = load_config(config.as_ref())?;
            if seed.is_some() {
                match_config.seed = seed;
            }

            let options = sim::SimOptions { players, step_seconds: step, max_days };
            let report = sim::run(match_config, &options)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Players: {}", players);
                for elimination in &report.eliminations {
                    let role = elimination.role.map(|r| r.to_string()).unwrap_or_else(|| "?".into());
                    println!(
                        "  Day {:>2} {:<8} {} ({})",
                        elimination.day,
                        elimination.phase.to_string(),
                        elimination.player_id,
                        role
                    );
                }
                match report.winner {
                    Some(team) => println!("Winner: {} after {} day(s)", team, report.days_played),
                    None => println!("No winner after {} day(s)", report.days_played),
                }
            }
        }

        Commands::Roles { players, seed, config } => {
            let match_config = load_config(config.as_ref())?;
            let counts = RoleCounts::for_players(players, &match_config.roles);
            println!(
                "{} players: {} murderer(s), {} detective(s), {} civilian(s)",
                players, counts.murderers, counts.detectives, counts.civilians
            );

            let mut pool = RolePool::new(seed.or(match_config.seed));
            pool.rebuild(players, &match_config.roles);
            pool.shuffle();
            let dealt: Vec<String> = pool.remaining().iter().map(|r| r.to_string()).collect();
            println!("Shuffled: [{}]", dealt.join(", "));
        }

        Commands::Phase { hour, config } => {
            if hour > 23 {
                bail!("--hour must be 0-23, got {}", hour);
            }
            let match_config = load_config(config.as_ref())?;
            let mut clock = PhaseClock::new(&match_config.clock);
            clock.initialize();
            let (day, evening, night) = clock.boundaries();
            println!(
                "{:02}:00 is {} (day {:02}:00, evening {:02}:00, night {:02}:00)",
                hour,
                clock.determine_phase_by_hour(hour),
                day,
                evening,
                night
            );
        }

        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&MatchConfig::json_schema())?);
        }
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<MatchConfig> {
    match path {
        Some(path) => MatchConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(MatchConfig::default()),
    }
}
