// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Command Dispatch
//!   Version
//!   Sync      Config --> Logging --> blocking task + Ctrl-C flag
//!   Discover  Config --> Logging --> async fetch
//! ```

use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use git_mirror::cli::discover::DiscoverArgs;
use git_mirror::cli::global::GlobalOptions;
use git_mirror::cli::sync::SyncArgs;
use git_mirror::cli::{self, Command};
use git_mirror::cmd::discover::run_discover_command;
use git_mirror::cmd::sync::run_sync_command;
use git_mirror::config::loader::ConfigSource;
use git_mirror::config::{Config, DEFAULT_CONFIG_FILE, ENV_PREFIX};
use git_mirror::error::Result;
use git_mirror::logging::{LogConfig, LogGuard, init_logging};
use tracing::{debug, warn};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let Some(command) = cli.command else {
        eprintln!("No command specified. Use --help for usage information.");
        return ExitCode::FAILURE;
    };

    dispatch_command(command, &cli.global).await
}

async fn dispatch_command(command: Command, global: &GlobalOptions) -> ExitCode {
    let result = match command {
        Command::Version => {
            handle_version_command();
            Ok(())
        }
        Command::Sync(args) => handle_sync_command(args, global).await,
        Command::Discover(args) => handle_discover_command(args, global).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

async fn handle_sync_command(args: SyncArgs, global: &GlobalOptions) -> Result<()> {
    let (config, _log_guard) = prepare(global)?;
    let interrupt = install_interrupt_handler();
    tokio::task::spawn_blocking(move || run_sync_command(&args, &config, interrupt))
        .await
        .context("sync task panicked")??;
    Ok(())
}

async fn handle_discover_command(args: DiscoverArgs, global: &GlobalOptions) -> Result<()> {
    let (config, _log_guard) = prepare(global)?;
    run_discover_command(&args, &config).await?;
    Ok(())
}

/// Configuration and logging for commands that do real work. The guard
/// must outlive the command so the file writer is flushed.
fn prepare(global: &GlobalOptions) -> Result<(Config, LogGuard)> {
    let (config, sources) = load_config(global).context("failed to load config")?;
    let guard = init_logging(&build_log_config(&config)).context("failed to initialize logging")?;
    for source in sources {
        debug!("configuration read from {source}");
    }
    Ok((config, guard))
}

fn load_config(global: &GlobalOptions) -> Result<(Config, Vec<ConfigSource>)> {
    let loader = Config::builder().add_toml_file_optional(DEFAULT_CONFIG_FILE);
    let loader = global.apply_to(loader.with_env_prefix(ENV_PREFIX))?;
    let sources = loader.sources().to_vec();
    Ok((loader.build()?, sources))
}

fn build_log_config(config: &Config) -> LogConfig {
    LogConfig::builder()
        .with_console_level(config.global.output_log_level)
        .with_file_level(config.global.file_log_level)
        .with_log_file(config.global.log_file.clone())
        .with_rotation(config.global.log_rotation)
        .with_max_log_files(config.global.max_log_files)
        .build()
}

/// Flag raised by the first Ctrl-C. The sync loop stops before the next
/// repository; the running git command is left to finish.
fn install_interrupt_handler() -> Arc<AtomicBool> {
    let interrupt = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupt);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping after the current repository");
            flag.store(true, Ordering::Relaxed);
        }
    });
    interrupt
}
