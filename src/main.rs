use anyhow::anyhow;
use clap::Parser;

use ccindex::Settings;
use ccindex::cli::commands::{index, init, query, serve};
use ccindex::cli::{Cli, Commands};

fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path).map(|mut settings| {
            if settings.workspace_root.is_none() {
                settings.workspace_root = Settings::workspace_root();
            }
            settings
        }),
        None => Settings::load(),
    };
    settings.map_err(|e| anyhow!("Error loading configuration: {e}"))
}

fn main() {
    let cli = Cli::parse();

    if let Commands::Init { force } = cli.command {
        ccindex::logging::init_with_config(&Default::default(), cli.verbose);
        if let Err(e) = init::run_init(force) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        return;
    }

    let mut settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    ccindex::logging::init_with_config(&settings.logging, cli.verbose);

    let result = match &cli.command {
        Commands::Init { .. } => Ok(()),
        Commands::Config => init::run_config(&settings),
        Commands::Index { target, json } => {
            target.apply(&mut settings);
            index::run(&settings, *json)
        }
        Commands::Query { target, query: kind } => {
            target.apply(&mut settings);
            query::run(&settings, kind)
        }
        Commands::Serve { target, watch } => {
            target.apply(&mut settings);
            serve::run(&settings, *watch)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
