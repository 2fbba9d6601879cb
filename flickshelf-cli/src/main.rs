//! flickshelf CLI
//!
//! Operator frontend for the flickshelf engine: scan a media folder and
//! preview its reconciled season/episode tree, or plan and execute a
//! canonical rename batch. This binary is the "external collaborator" of
//! the engine: it enumerates folders, reads descriptors and performs the
//! actual filesystem renames; the engine only ever produces plans.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use flickshelf_lib::{Engine, settings};

mod commands;
mod fs_source;

#[derive(Parser)]
#[command(name = "flickshelf")]
#[command(about = "Organize TV show folders against canonical metadata", long_about = None)]
struct Cli {
    /// Verbose logging (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a media folder and print the reconciled episode tree
    Scan {
        /// Media folder path
        folder: PathBuf,
    },

    /// Rename episode files (and their sidecars) to canonical names
    Rename {
        /// Media folder path
        folder: PathBuf,

        /// Show planned renames without executing
        #[arg(short = 'n', long)]
        dry_run: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let mut engine = Engine::new(settings::load_extension_table());

    match cli.command {
        Commands::Scan { folder } => commands::scan::run_scan(&engine, &folder),
        Commands::Rename { folder, dry_run } => {
            commands::rename::run_rename(&mut engine, &folder, dry_run)
        }
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}
