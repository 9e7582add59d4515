//! Run configuration, from the command line and the environment.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Serialize;

use crate::{closeness::Direction, generators::ScaleFreeOptions, katz::KatzOptions};

/// The hermaphrodite edge list of the connectome dataset, relative to the working directory.
pub const DEFAULT_INPUT: &str = "./opt1-worm/c_elegans_neuron_conn/set2/herm_full_edgelist.csv";

/// How the report is written to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Everything a run of the analysis pipeline needs.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalysisConfig {
    /// Path of the CSV edge list.
    pub input: PathBuf,
    /// Length of every ranking.
    pub top: usize,
    /// Number of vertices in the induced subgraph listing.
    pub subgraph_size: usize,
    pub katz: KatzOptions,
    pub closeness_direction: Direction,
    /// Worker threads for betweenness and closeness.
    pub threads: usize,
    /// Generate the comparison graphs.
    pub compare: bool,
    pub scale_free: ScaleFreeOptions,
    /// Seed of the comparison graph generator, drawn from entropy when absent.
    pub seed: Option<u64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            top: 5,
            subgraph_size: 20,
            katz: KatzOptions::default(),
            closeness_direction: Direction::default(),
            threads: 1,
            compare: true,
            scale_free: ScaleFreeOptions::default(),
            seed: None,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "wormnet")]
#[command(about = "Centrality analysis of a directed connectome edge list", long_about = None)]
pub struct Cli {
    /// CSV edge list with Source, Target, Weight and Type columns
    #[arg(short, long, env = "WORMNET_INPUT", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Number of vertices listed per ranking
    #[arg(short, long, env = "WORMNET_TOP", default_value_t = 5)]
    pub top: usize,

    /// Number of vertices in the induced subgraph listing
    #[arg(long, env = "WORMNET_SUBGRAPH_SIZE", default_value_t = 20)]
    pub subgraph_size: usize,

    /// Katz attenuation factor
    #[arg(long, env = "WORMNET_KATZ_ALPHA", default_value_t = 0.005)]
    pub katz_alpha: f64,

    /// Katz baseline centrality
    #[arg(long, env = "WORMNET_KATZ_BETA", default_value_t = 1.0)]
    pub katz_beta: f64,

    /// Weight Katz walks by synapse weight
    #[arg(long, env = "WORMNET_KATZ_WEIGHTED")]
    pub katz_weighted: bool,

    /// Measure closeness over incoming or outgoing distances
    #[arg(
        long,
        value_enum,
        env = "WORMNET_CLOSENESS_DIRECTION",
        default_value_t = Direction::Incoming
    )]
    pub closeness_direction: Direction,

    /// Worker threads for betweenness and closeness
    #[arg(long, env = "WORMNET_THREADS", default_value_t = 1)]
    pub threads: usize,

    /// Seed for the comparison graphs
    #[arg(long, env = "WORMNET_SEED")]
    pub seed: Option<u64>,

    /// Skip the random and scale-free comparison graphs
    #[arg(long, env = "WORMNET_SKIP_COMPARISON")]
    pub skip_comparison: bool,

    /// Report format
    #[arg(short, long, value_enum, env = "WORMNET_FORMAT", default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl From<&Cli> for AnalysisConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            input: cli.input.clone(),
            top: cli.top,
            subgraph_size: cli.subgraph_size,
            katz: KatzOptions {
                alpha: cli.katz_alpha,
                beta: cli.katz_beta,
                weighted: cli.katz_weighted,
                ..KatzOptions::default()
            },
            closeness_direction: cli.closeness_direction,
            threads: cli.threads,
            compare: !cli.skip_comparison,
            seed: cli.seed,
            ..Self::default()
        }
    }
}
