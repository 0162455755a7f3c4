//! Docs corpus validation command family.

use crate::docs::{self, ValidationScope};
use crate::runtime::context::CommandContext;
use crate::runtime::error::{XtaskError, XtaskResult};
use crate::XtaskCommand;
use std::path::{Path, PathBuf};

/// `cargo xtask docs ...`
pub struct DocsCommand;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DocsSubcommand {
    /// Every pass.
    Validate,
    /// Duplicates, view coverage and the link graph.
    Links,
    /// Per-view freshness and content.
    Views,
    /// Every pass, plus a JSON report at `output`; always strict.
    Report { output: PathBuf },
    Help,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DocsOptions {
    pub subcommand: DocsSubcommand,
    pub strict: bool,
    /// Corpus root; defaults to the current directory.
    pub root: Option<PathBuf>,
}

impl XtaskCommand for DocsCommand {
    type Options = DocsOptions;

    fn parse(args: &[String]) -> XtaskResult<Self::Options> {
        parse_docs_options(args)
    }

    fn run(ctx: &CommandContext, options: Self::Options) -> XtaskResult<()> {
        let root = options
            .root
            .clone()
            .unwrap_or_else(|| ctx.root().to_path_buf());
        match options.subcommand {
            DocsSubcommand::Help => {
                print_docs_usage();
                Ok(())
            }
            DocsSubcommand::Validate => validate(&root, ValidationScope::All, options.strict),
            DocsSubcommand::Links => validate(&root, ValidationScope::Links, options.strict),
            DocsSubcommand::Views => validate(&root, ValidationScope::Views, options.strict),
            DocsSubcommand::Report { output } => {
                let run = docs::run_validation(&root, ValidationScope::All)?;
                docs::print_report(&run.report);
                docs::write_json_report(&run, &output)?;
                docs::finish(&run.report, true)
            }
        }
    }
}

fn validate(root: &Path, scope: ValidationScope, strict: bool) -> XtaskResult<()> {
    let run = docs::run_validation(root, scope)?;
    docs::print_report(&run.report);
    docs::finish(&run.report, strict)
}

fn parse_docs_options(args: &[String]) -> XtaskResult<DocsOptions> {
    let mut options = DocsOptions {
        subcommand: DocsSubcommand::Help,
        strict: false,
        root: None,
    };
    let Some(first) = args.first().map(String::as_str) else {
        return Ok(options);
    };

    let is_report = match first {
        "validate" => {
            options.subcommand = DocsSubcommand::Validate;
            false
        }
        "links" => {
            options.subcommand = DocsSubcommand::Links;
            false
        }
        "views" => {
            options.subcommand = DocsSubcommand::Views;
            false
        }
        "report" => true,
        "help" | "--help" | "-h" => return Ok(options),
        other => {
            return Err(XtaskError::validation(format!(
                "unknown docs subcommand: {other}"
            ))
            .with_hint("run `cargo xtask docs help`"))
        }
    };

    let mut output = None;
    let mut i = 1usize;
    while i < args.len() {
        match args[i].as_str() {
            "--strict" => {
                options.strict = true;
                i += 1;
            }
            "--root" => {
                let Some(root) = args.get(i + 1) else {
                    return Err(XtaskError::validation("missing value for `--root`"));
                };
                options.root = Some(PathBuf::from(root));
                i += 2;
            }
            "--output" if is_report => {
                let Some(path) = args.get(i + 1) else {
                    return Err(XtaskError::validation("missing value for `--output`"));
                };
                output = Some(PathBuf::from(path));
                i += 2;
            }
            other => {
                return Err(XtaskError::validation(format!(
                    "unsupported argument for `docs {first}`: {other}"
                )))
            }
        }
    }

    if is_report {
        let Some(output) = output else {
            return Err(XtaskError::validation("missing `--output <path>`"));
        };
        options.subcommand = DocsSubcommand::Report { output };
        options.strict = true;
    }
    Ok(options)
}

fn print_docs_usage() {
    eprintln!(
        "Usage: cargo xtask docs <subcommand> [--strict] [--root <dir>]\n\
         \n\
         Subcommands:\n\
           validate                 Run every corpus check\n\
           links                    Duplicate ids, view coverage and the link graph\n\
           views                    LLM view freshness and content\n\
           report --output <path>   Run every check and write a JSON report (implies --strict)\n\
         \n\
         Options:\n\
           --strict                 Exit 1 when any error is recorded\n\
           --root <dir>             Corpus root (default: current directory)\n\
         \n\
         Set DOCS_LOG=debug for diagnostic output on stderr.\n"
    );
}
