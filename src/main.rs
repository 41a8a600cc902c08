//! Binary entrypoint for the questlearn CLI.
//!
//! Commands:
//! - `init` - write a starter `config.toml`
//! - `status` - points, level, title and equipped slots
//! - `quests` / `shop` / `wardrobe` - listings
//! - `complete <quest>` / `buy <item>` / `equip <item>` - progression actions
//! - `reset` - discard all progress
//! - `dump` - print the stored record as JSON
//!
//! See the library crate docs for module-level details: `questlearn::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};

use questlearn::config::Config;
use questlearn::progress::{
    format_equipped, format_quest_board, format_shop, format_status, format_wardrobe, Catalog,
    Outcome, ProgressStoreBuilder, ProgressTracker,
};

#[derive(Parser)]
#[command(name = "questlearn")]
#[command(about = "Track quest points and a cosmetic wardrobe")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init,
    /// Show points, title and equipped items
    Status,
    /// List quests
    Quests,
    /// List items for sale
    Shop,
    /// List items that can be worn
    Wardrobe,
    /// Complete a quest and collect its points
    Complete {
        /// Quest id (e.g., reading-check)
        quest: String,
    },
    /// Buy an item; it is equipped straight away
    Buy {
        /// Item id (e.g., wizard-hat)
        item: String,
    },
    /// Equip an owned or free item
    Equip {
        /// Item id (e.g., tiny-orb)
        item: String,
    },
    /// Delete all saved progress
    Reset,
    /// Print the stored record as JSON
    Dump,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Init = cli.command {
        init_logging(&None, cli.verbose);
        info!("Initializing new configuration");
        Config::create_default(&cli.config).await?;
        info!("Configuration file created at {}", cli.config);
        return Ok(());
    }

    let config = match Config::load(&cli.config).await {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            init_logging(&None, cli.verbose);
            warn!("{} (using defaults)", e);
            None
        }
    };
    if config.is_some() {
        init_logging(&config, cli.verbose);
    }
    let config = config.unwrap_or_default();

    let store = ProgressStoreBuilder::new(&config.storage.data_dir)
        .with_key(config.storage.storage_key.clone())
        .open()?;
    let tracker = ProgressTracker::new(store, Catalog::standard());
    let catalog = *tracker.catalog();

    match cli.command {
        Commands::Init => {} // handled above
        Commands::Status => {
            let record = tracker.load();
            print_lines(format_status(&record));
            print_lines(format_equipped(&record, &catalog));
        }
        Commands::Quests => print_lines(format_quest_board(&tracker.load(), &catalog)),
        Commands::Shop => {
            let record = tracker.load();
            println!("Points: {}", record.points);
            print_lines(format_shop(&record, &catalog));
        }
        Commands::Wardrobe => print_lines(format_wardrobe(&tracker.load(), &catalog)),
        Commands::Complete { quest } => {
            let outcome = tracker.complete_quest(&quest)?;
            report(&outcome);
            print_lines(format_quest_board(&tracker.load(), &catalog));
        }
        Commands::Buy { item } => {
            let outcome = tracker.buy_item(&item)?;
            report(&outcome);
            let record = tracker.load();
            print_lines(format_status(&record));
            print_lines(format_shop(&record, &catalog));
        }
        Commands::Equip { item } => {
            let outcome = tracker.equip_item(&item)?;
            report(&outcome);
            print_lines(format_equipped(&tracker.load(), &catalog));
        }
        Commands::Reset => {
            tracker.reset()?;
            println!("Progress reset.");
        }
        Commands::Dump => {
            let record = tracker.load();
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }

    Ok(())
}

fn report(outcome: &Outcome) {
    println!("Result: {}", outcome);
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let base_level = match (verbosity, config) {
        (0, Some(cfg)) => cfg.log_level(),
        (0, None) => log::LevelFilter::Info,
        (1, _) => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config
        .as_ref()
        .and_then(|cfg| cfg.logging.file.as_ref())
        .and_then(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });

    if let Some(f) = log_file {
        let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
        // Echo to the console too when running interactively
        let is_tty = atty::is(atty::Stream::Stdout);
        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = write_mutex.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if is_tty {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}
