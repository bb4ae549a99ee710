use crate::logging::LogLevel;
use crate::output_format::OutputFormat;
use clap::{Parser, Subcommand};
use quill_core::mode::Mode;

#[derive(Parser)]
#[command(
    author,
    name = "quill",
    about = "quill: Check that JSDoc agrees with the code it documents",
    after_help = "For help with a specific command, see: `quill help <command>`."
)]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub(crate) command: Command,
    #[clap(flatten)]
    pub(crate) global_options: GlobalOptions,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Check a set of declaration files or directories
    Check(CheckCommand),
}

#[derive(Clone, Debug, Parser)]
#[command(arg_required_else_help(true))]
pub struct CheckCommand {
    #[arg(
        required = true,
        help = "List of declaration files or directories to check, for example `quill check .`."
    )]
    pub files: Vec<String>,
    #[arg(
        short,
        long,
        default_value = "",
        help = "Names of rules to include, separated by a comma (no spaces). This also accepts names of groups of rules, such as \"CORR\"."
    )]
    pub select: String,
    #[arg(
        short,
        long,
        default_value = "",
        help = "Names of rules to exclude, separated by a comma (no spaces). This also accepts names of groups of rules, such as \"CORR\"."
    )]
    pub ignore: String,
    #[arg(
        short,
        long,
        value_parser = parse_mode,
        help = "Documentation dialect: `jsdoc`, `typescript`, `closure` or `permissive`. Overrides `mode` in `quill.toml`."
    )]
    pub mode: Option<Mode>,
    #[arg(
        short,
        long,
        default_value = "false",
        help = "Show the time taken by the function."
    )]
    pub with_timing: bool,
    #[arg(
        long,
        value_enum,
        default_value_t = OutputFormat::default(),
        help="Output serialization format for violations."
    )]
    pub output_format: OutputFormat,
    #[arg(
        long,
        default_value = "false",
        help = "Show counts for every rule with at least one violation."
    )]
    pub statistics: bool,
    #[arg(
        long,
        default_value = "false",
        help = "Do not exclude `.git/` and `node_modules/` by default."
    )]
    pub no_default_exclude: bool,
}

fn parse_mode(value: &str) -> Result<Mode, String> {
    value.parse::<Mode>()
}

/// All configuration options that can be passed "globally"
#[derive(Debug, Default, clap::Args)]
#[command(next_help_heading = "Global options")]
pub(crate) struct GlobalOptions {
    /// The log level. One of: `error`, `warn`, `info`, `debug`, or `trace`. Defaults
    /// to `warn`.
    #[arg(long, global = true)]
    pub(crate) log_level: Option<LogLevel>,

    /// Disable colored output. To turn colored output off, either set this option or set
    /// the environment variable `NO_COLOR` to any non-zero value.
    #[arg(long, global = true)]
    pub(crate) no_color: bool,
}
