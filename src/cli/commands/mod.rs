pub mod relay;
pub mod session;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ArgAction, ColorChoice, Command,
};

pub const ARG_VERBOSITY: &str = "verbosity";

/// Names accepted by `LIPA_LOG_LEVEL`, in `-v` count order.
pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// `LIPA_LOG_LEVEL` value to the equivalent number of `-v` flags.
///
/// # Errors
/// Names the accepted levels when `level` is not one of them.
pub fn parse_log_level(level: &str) -> Result<u8, String> {
    LOG_LEVELS
        .iter()
        .position(|name| name.eq_ignore_ascii_case(level.trim()))
        .and_then(|count| u8::try_from(count).ok())
        .ok_or_else(|| {
            format!(
                "invalid log level '{level}', expected one of: {}",
                LOG_LEVELS.join(", ")
            )
        })
}

fn with_verbosity(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Increase log output, repeat for more (-v warn ... -vvvv trace)")
            .env("LIPA_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(parse_log_level),
    )
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("lipa")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(relay::command())
        .subcommand(session::login())
        .subcommand(session::signup())
        .subcommand(session::logout())
        .subcommand(session::whoami())
        .subcommand(session::links())
        .subcommand(Command::new("openapi").about("Print the relay's OpenAPI document"));

    with_verbosity(session::with_args(command))
}
