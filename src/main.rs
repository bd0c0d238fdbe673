use anyhow::Context;
use clap::Parser;
use console::style;
use std::path::Path;

mod cli;
mod core;
mod generators;
mod models;
mod utils;
mod wordlists;

use crate::cli::handlers;
use crate::cli::{Args, CliCommand};
use crate::core::config::Config;
use crate::wordlists::{ViewMode, WordlistStore};

fn init_logging(config: &Config) -> anyhow::Result<()> {
    if let Some(dir) = config.log_file.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("Failed to open log file {}", config.log_file.display()))?;

    env_logger::Builder::new()
        .filter_level(config.log_level)
        .format_timestamp_secs()
        .format_module_path(true)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(args: Args, mut config: Config) -> anyhow::Result<()> {
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    let store = WordlistStore::new(config.output_dir.clone());
    log::debug!("Loaded config: {:?}", config);

    let Some(command) = args.command else {
        return cli::menu::run_cli_menu(&config, &store).map_err(|e| anyhow::anyhow!("CLI menu error: {}", e));
    };

    match command {
        CliCommand::Generate { facts, size, count, seed, defaults } => {
            let record = match facts {
                Some(path) => handlers::load_facts(&path).map_err(|e| anyhow::anyhow!("{}", e))?,
                None => Default::default(),
            };
            let record = if defaults { handlers::apply_defaults(record) } else { record };
            let target = handlers::resolve_target(&config, size.as_deref(), count)
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            let (summary, candidates) = handlers::handle_generate(&config, &store, record, target, seed)
                .map_err(|e| anyhow::anyhow!("Generation failed: {}", e))?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                handlers::print_summary(&summary, &candidates);
            }
        }
        CliCommand::List => {
            let files = store.list()?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&files)?);
            } else {
                handlers::print_files(&store, &files);
            }
        }
        CliCommand::View { file, lines, all, sample } => {
            let mode = match (all, sample) {
                (true, _) => ViewMode::All,
                (false, Some(n)) => ViewMode::Sample(n),
                (false, None) => ViewMode::Head(lines),
            };
            let (path, view) = handlers::handle_view(&store, &file, mode, None)
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&view.lines)?);
            } else {
                handlers::print_view(&path, mode, &view);
            }
        }
        CliCommand::Delete { file, yes } => {
            let path = store.resolve(&file)?;
            let confirmed = yes
                || match inquire::Confirm::new(&format!("⚠️  DELETE '{}'? This cannot be undone!", path.display()))
                    .with_default(false)
                    .prompt()
                {
                    Ok(answer) => answer,
                    Err(inquire::InquireError::OperationCanceled) => false,
                    Err(inquire::InquireError::OperationInterrupted) => {
                        println!("{}", cli::menu::INTERRUPTED);
                        false
                    }
                    Err(e) => return Err(e.into()),
                };
            if confirmed {
                handlers::handle_delete(&store, &file).map_err(|e| anyhow::anyhow!("{}", e))?;
                println!("{} Deleted {}", style("[✓]").green(), path.display());
            }
        }
    }
    Ok(())
}

fn main() {
    if Path::new(".env").exists() {
        dotenvy::dotenv().ok();
    }

    let args = Args::parse();
    let config = Config::load();

    if let Err(e) = init_logging(&config) {
        eprintln!("{} {:#}", style("[!]").yellow(), e);
    }
    log::info!("🔥 Starting WordForge");

    if let Err(e) = ctrlc::set_handler(|| {
        log::info!("Ctrl+C received, aborting run");
        println!("{}", cli::menu::INTERRUPTED);
        std::process::exit(130);
    }) {
        log::warn!("Failed to set Ctrl+C handler: {}", e);
    }

    if let Err(e) = run(args, config) {
        log::error!("{:#}", e);
        eprintln!("\n{} Error: {:#}", style("[!]").red(), e);
        std::process::exit(1);
    }

    log::info!("✅ WordForge shutdown complete.");
}
