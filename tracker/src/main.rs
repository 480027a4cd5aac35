use anyhow::Result;
use clap::Parser;
use log::info;

use expense_tracker::backend::{
    config::resolve_data_dir,
    initialize_backend,
    io::{run_command, Cli},
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let data_dir = resolve_data_dir(cli.data_dir);

    info!("Starting expense tracker");
    let mut state = initialize_backend(&data_dir)?;

    let mut stdout = std::io::stdout().lock();
    let result = run_command(cli.command, &mut state, &mut stdout);

    state.shutdown();
    result
}
