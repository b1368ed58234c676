pub mod command;
pub mod config;
pub mod core;
pub mod errors;
pub mod extensions;
pub mod logging;
pub mod store;

use std::process::ExitCode;

use crate::command::command_parser::CommandParser;
use crate::command::commands::{Reply, overview};
use crate::core::cli::CliPaths;
use crate::core::context::AppContext;
use crate::errors::Result;
use crate::logging::LogTarget;

/// Entry point shared by the binary and the integration tests.
///
/// Usage problems print on stdout and still exit successfully; storage and
/// configuration failures print on stderr and exit with status 1.
pub fn run<I>(args: I) -> ExitCode
where
    I: IntoIterator<Item = String>,
{
    let paths = match CliPaths::from_args(args) {
        Ok(paths) => paths,
        Err(err) => {
            println!("{err}");
            return ExitCode::SUCCESS;
        }
    };
    let mut ctx = match AppContext::from_cli(&paths) {
        Ok(ctx) => ctx,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match dispatch(&mut ctx, &paths.command) {
        Ok(Reply::Json(doc)) => match serde_json::to_string_pretty(&doc) {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                ctx.logger.error(err.to_string(), LogTarget::ConsoleAndFile);
                ExitCode::FAILURE
            }
        },
        Ok(Reply::Usage(text)) => {
            ctx.logger.info(text, LogTarget::ConsoleOnly);
            ExitCode::SUCCESS
        }
        Err(err) => {
            ctx.logger.error(err.to_string(), LogTarget::ConsoleAndFile);
            ExitCode::FAILURE
        }
    }
}

/// Resolve and execute the command words against `ctx`.
pub fn dispatch(ctx: &mut AppContext, words: &[String]) -> Result<Reply> {
    let Some((word, rest)) = words.split_first() else {
        return Ok(Reply::Usage(overview()));
    };
    match CommandParser::new().parse(word, rest) {
        Ok(command) => command.execute(ctx),
        Err(err) if err.is_usage() => Ok(Reply::Usage(format!("{err}\n\n{}", overview()))),
        Err(err) => Err(err),
    }
}
