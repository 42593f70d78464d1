use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::info;

use crate::app::{disable_colors, print_error, run_smoke, run_stress};
use crate::args::{Command, TesterArgs};
use crate::config::{apply_config, apply_smoke_config, load_config};
use crate::error::AppResult;
use crate::logger::init_logging;
use crate::shutdown_handlers::{shutdown_channel, spawn_interrupt_listener};

pub(crate) fn run() -> AppResult<()> {
    let (mut args, matches) = parse_args()?;
    apply_config_layers(&mut args, &matches)?;

    init_logging(args.verbose, args.no_color);
    if args.no_color {
        disable_colors();
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args))
}

fn parse_args() -> AppResult<(TesterArgs, ArgMatches)> {
    let matches = TesterArgs::command().get_matches_from(std::env::args_os());
    let args = TesterArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

fn apply_config_layers(args: &mut TesterArgs, matches: &ArgMatches) -> AppResult<()> {
    let Some(config) = load_config(args.config.as_deref())? else {
        return Ok(());
    };
    apply_config(args, matches, &config)?;

    if let (Some(Command::Smoke(smoke)), Some(smoke_config), Some(smoke_matches)) = (
        args.command.as_mut(),
        config.smoke.as_ref(),
        matches.subcommand_matches("smoke"),
    ) {
        apply_smoke_config(smoke, smoke_matches, smoke_config)?;
    }
    Ok(())
}

async fn run_async(args: TesterArgs) -> AppResult<()> {
    let (shutdown_tx, _shutdown_rx) = shutdown_channel();
    let interrupt_listener = spawn_interrupt_listener(&shutdown_tx);

    let result = match args.command.as_ref() {
        Some(Command::Smoke(smoke)) => run_smoke(&args, smoke).await.map(|log| {
            info!(
                "Smoke checks finished: {} passed, {} failed",
                log.passed(),
                log.failed()
            );
        }),
        None => run_stress(&args, &shutdown_tx).await.map(|summary| {
            info!(
                "Stress plan finished: {} across {} endpoints",
                summary.verdict,
                summary.outcomes.len()
            );
        }),
    };

    drop(shutdown_tx.send(()));
    interrupt_listener.abort();

    if let Err(err) = &result {
        print_error(&err.to_string());
    }
    result
}
