//! CLI entry point for the ruins solver.
//!
//! Usage:
//!   ruins-solver coins [options]
//!   ruins-solver vault [options]
//!
//! Options:
//!   --json                  Print a JSON report instead of the plain answer
//!   --verbose               Log search progress to stderr (or set RUST_LOG)
//!
//! With no options each subcommand solves the puzzle as found in the ruins.
//! Finding no answer prints nothing and still exits 0.

use std::process;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use ruins_solver::coins::{DEFAULT_COINS, MONUMENT_TARGET};
use ruins_solver::layout::{ORB_START_VALUE, STEP_CAP, VAULT_TARGET};
use ruins_solver::{
    build_vault, coin_name, find_coin_order, find_vault_path, CoinConfig, CoinResult, Direction,
    SearchResult, VaultConfig, VaultLayout, VaultPath,
};

#[derive(Parser)]
#[command(name = "ruins-solver")]
#[command(about = "Brute-force solvers for the coin monument and vault orb puzzles")]
#[command(version)]
struct Cli {
    /// Log search progress to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the coin order that balances the monument equation
    Coins {
        /// Coin values, comma separated
        #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_COINS)]
        coins: Vec<i64>,

        /// Value the equation must produce
        #[arg(long, default_value_t = MONUMENT_TARGET, allow_negative_numbers = true)]
        target: i64,

        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },

    /// Find the path that carries the orb to the vault door
    Vault {
        /// Orb value at the start room
        #[arg(long, default_value_t = ORB_START_VALUE, allow_negative_numbers = true)]
        start_value: i64,

        /// Orb value required at the vault door
        #[arg(long, default_value_t = VAULT_TARGET, allow_negative_numbers = true)]
        goal_value: i64,

        /// Maximum number of moves
        #[arg(long, default_value_t = STEP_CAP)]
        max_steps: usize,

        /// Exit wiring to search
        #[arg(long, value_enum, default_value_t = VaultLayout::AsAuthored)]
        layout: VaultLayout,

        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },
}

/// JSON report for the coin search
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CoinOutput {
    solved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    coin_names: Option<Vec<&'static str>>,
    search_exhausted: bool,
    permutations_tested: usize,
    time_elapsed_ms: u64,
}

/// JSON report for the vault search
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VaultOutput {
    solved: bool,
    layout: VaultLayout,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<VaultPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    directions: Option<String>,
    search_exhausted: bool,
    frames_dequeued: usize,
    time_elapsed_ms: u64,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> ruins_solver::Result<()> {
    match command {
        Commands::Coins {
            coins,
            target,
            json,
        } => {
            let result = find_coin_order(&CoinConfig { coins, target })?;

            if json {
                println!("{}", serde_json::to_string_pretty(&format_coins(&result))?);
            } else if let Some(order) = result.order {
                println!("{:?}", order);
            }
        }

        Commands::Vault {
            start_value,
            goal_value,
            max_steps,
            layout,
            json,
        } => {
            let map = build_vault(layout);
            let config = VaultConfig {
                start_value,
                goal_value,
                max_steps,
            };
            let result = find_vault_path(&map, &config)?;

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&format_vault(layout, result))?
                );
            } else if let Some(path) = &result.path {
                println!("{}", path.label_line());
            }
        }
    }

    Ok(())
}

fn format_coins(result: &CoinResult) -> CoinOutput {
    CoinOutput {
        solved: result.order.is_some(),
        order: result.order.map(|order| order.to_vec()),
        coin_names: result
            .order
            .map(|order| order.iter().map(|&coin| coin_name(coin)).collect()),
        search_exhausted: result.search_exhausted,
        permutations_tested: result.permutations_tested,
        time_elapsed_ms: result.time_elapsed_ms,
    }
}

fn format_vault(layout: VaultLayout, result: SearchResult) -> VaultOutput {
    let directions = result.path.as_ref().map(|path| {
        path.moves
            .iter()
            .map(Direction::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    });

    VaultOutput {
        solved: result.path.is_some(),
        layout,
        path: result.path,
        directions,
        search_exhausted: result.search_exhausted,
        frames_dequeued: result.frames_dequeued,
        time_elapsed_ms: result.time_elapsed_ms,
    }
}
