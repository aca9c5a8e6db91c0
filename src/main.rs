//! basm - shell RC and sudoers manager

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;

use basm::cli::{commands, Cli, Context};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return usage_error(err),
    };

    basm::logging::init_logging(cli.verbose);

    let result = Context::from_env().and_then(|ctx| commands::execute(&ctx, &cli.command));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(2)
        }
    }
}

/// Help and version exit 0, a missing or unknown command 1, bad arguments 2
fn usage_error(err: clap::Error) -> ExitCode {
    let code = match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        ErrorKind::InvalidSubcommand
        | ErrorKind::MissingSubcommand
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => 1,
        _ => 2,
    };
    let _ = err.print();
    ExitCode::from(code)
}
