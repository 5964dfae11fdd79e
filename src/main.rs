use clap::Parser;
use log::info;

use tagnotes::{App, Cli, Config, NoteStore, Storage};

fn initialize_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();
}

fn main() {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> tagnotes::Result<()> {
    let mut config = Config::resolve(cli.data_dir)?;
    if cli.editor.is_some() {
        config.editor_command = cli.editor;
    }
    info!("Using data directory {}", config.data_dir.display());

    let storage = Storage::open(&config.data_dir)?;
    let store = NoteStore::open(storage)?;

    App::new(store, config).run(cli.command)
}
