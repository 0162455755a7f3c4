//! Workspace maintenance commands (`cargo xtask`).
//!
//! The crate is a small CLI layer over the `doc_graph` validation engine. Command modules own
//! argument parsing and output policy while [`runtime`] owns configuration loading, logging and
//! error reporting.

pub mod cli;
pub mod commands;
pub mod docs;
pub mod docs_config;
pub mod runtime;

use crate::cli::TopLevelCommand;
use crate::commands::docs::DocsCommand;
use crate::runtime::context::CommandContext;
use crate::runtime::error::XtaskResult;

/// Shared command contract for top-level xtask command families.
///
/// [`XtaskCommand::parse`] is a pure translation from raw CLI arguments into a typed options
/// value; side effects belong in [`XtaskCommand::run`].
pub trait XtaskCommand {
    /// Typed options produced by CLI parsing for the command family.
    type Options;

    /// Parse command-line arguments into typed options.
    ///
    /// Invalid user-facing argument shapes are reported as
    /// [`XtaskError::validation`](crate::runtime::error::XtaskError::validation).
    fn parse(args: &[String]) -> XtaskResult<Self::Options>;

    /// Execute the command family using the shared runtime context.
    fn run(ctx: &CommandContext, options: Self::Options) -> XtaskResult<()>;
}

/// Executes the `xtask` binary using the current process arguments.
pub fn execute_from_env() -> XtaskResult<()> {
    runtime::logging::init();
    let parsed = cli::parse(std::env::args().skip(1).collect())?;
    let ctx = CommandContext::new()?;

    match parsed {
        TopLevelCommand::Docs(args) => DocsCommand::run(&ctx, DocsCommand::parse(&args)?),
        TopLevelCommand::Help => {
            cli::print_usage();
            Ok(())
        }
    }
}

/// Converts an xtask result into a stable process exit code.
///
/// All command failures map to exit code `1` after printing the formatted
/// [`XtaskError`](crate::runtime::error::XtaskError) to stderr.
pub fn exit_code(result: XtaskResult<()>) -> std::process::ExitCode {
    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::ExitCode::from(1)
        }
    }
}
