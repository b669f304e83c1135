use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

pub const DEFAULT_STORE: &str = "scenarios.yaml";
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the ROI projection for a set of business inputs
    Simulate {
        /// Input YAML or JSON file
        #[arg(short, long)]
        input: String,
        /// Optional output YAML file for the result
        #[arg(short, long)]
        output: Option<String>,
        /// Optional YAML file overriding the ROI constants
        #[arg(short, long)]
        constants: Option<String>,
    },
    /// Compute and persist a named scenario
    Save {
        /// Input YAML or JSON file
        #[arg(short, long)]
        input: String,
        /// Scenario name, overrides `scenario_name` from the input file
        #[arg(short, long)]
        name: Option<String>,
        /// Scenario store YAML file
        #[arg(short, long, default_value = DEFAULT_STORE)]
        store: String,
        /// Optional YAML file overriding the ROI constants
        #[arg(short, long)]
        constants: Option<String>,
    },
    /// List saved scenarios in the order they were saved
    List {
        /// Scenario store YAML file
        #[arg(short, long, default_value = DEFAULT_STORE)]
        store: String,
    },
    /// Show a saved scenario as YAML
    Show {
        /// Scenario id
        #[arg(long)]
        id: u64,
        /// Scenario store YAML file
        #[arg(short, long, default_value = DEFAULT_STORE)]
        store: String,
    },
    /// Capture a lead email, store the scenario and write the ROI report
    Report {
        /// Input YAML or JSON file
        #[arg(short, long)]
        input: String,
        /// Contact email, overrides `email` from the input file
        #[arg(short, long)]
        email: Option<String>,
        /// Optional output file for the report, printed when omitted
        #[arg(short, long)]
        output: Option<String>,
        /// Scenario store YAML file
        #[arg(short, long, default_value = DEFAULT_STORE)]
        store: String,
        /// Optional YAML file overriding the ROI constants
        #[arg(short, long)]
        constants: Option<String>,
    },
    /// Serve the ROI HTTP API
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = DEFAULT_BIND)]
        bind: SocketAddr,
        /// Scenario store YAML file
        #[arg(short, long, default_value = DEFAULT_STORE)]
        store: String,
        /// Optional YAML file overriding the ROI constants
        #[arg(short, long)]
        constants: Option<String>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
