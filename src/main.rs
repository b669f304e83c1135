mod commands;

use crate::commands::CommandError;
use crate::commands::base_commands::{CliArgs, Commands};
use crate::commands::report_cmd::report_command;
use crate::commands::scenario_cmd::{list_command, save_command, show_command};
use crate::commands::serve_cmd::serve_command;
use crate::commands::simulate_cmd::simulate_command;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    let args = CliArgs::parse();
    if let Err(e) = run(args.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("roi_simulator=info,warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: Commands) -> Result<(), CommandError> {
    match command {
        Commands::Simulate {
            input,
            output,
            constants,
        } => simulate_command(&input, output.as_deref(), constants.as_deref()),
        Commands::Save {
            input,
            name,
            store,
            constants,
        } => save_command(&input, name, &store, constants.as_deref()),
        Commands::List { store } => list_command(&store),
        Commands::Show { id, store } => show_command(id, &store),
        Commands::Report {
            input,
            email,
            output,
            store,
            constants,
        } => report_command(
            &input,
            email,
            output.as_deref(),
            &store,
            constants.as_deref(),
        ),
        Commands::Serve {
            bind,
            store,
            constants,
        } => serve_command(bind, &store, constants.as_deref()).await,
        Commands::Completions { shell } => {
            let mut command = CliArgs::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
            Ok(())
        }
    }
}
