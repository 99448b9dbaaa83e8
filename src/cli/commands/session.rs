use crate::links::LinkStatus;
use crate::session::client::DEFAULT_API_URL;
use clap::{Arg, Command};

/// Flags shared by every client subcommand.
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .help("Relay base URL")
                .default_value(DEFAULT_API_URL)
                .env("API_URL")
                .global(true),
        )
        .arg(
            Arg::new("session-dir")
                .long("session-dir")
                .help("Directory holding the persisted session (default: <data dir>/lipa)")
                .env("LIPA_SESSION_DIR")
                .global(true),
        )
}

fn password(name: &'static str, long: &'static str, env: &'static str) -> Arg {
    Arg::new(name)
        .long(long)
        .help("Read from the environment when omitted")
        .env(env)
        .hide_env_values(true)
        .required(true)
}

#[must_use]
pub fn login() -> Command {
    Command::new("login")
        .about("Log in and persist the session")
        .arg(
            Arg::new("email")
                .short('e')
                .long("email")
                .help("Account email")
                .required(true),
        )
        .arg(password("password", "password", "LIPA_PASSWORD"))
}

#[must_use]
pub fn signup() -> Command {
    Command::new("signup")
        .about("Create an account; confirm it by email before logging in")
        .arg(
            Arg::new("name")
                .short('n')
                .long("name")
                .help("Full name")
                .required(true),
        )
        .arg(
            Arg::new("email")
                .short('e')
                .long("email")
                .help("Account email")
                .required(true),
        )
        .arg(password("password", "password", "LIPA_PASSWORD"))
        .arg(password(
            "confirm-password",
            "confirm-password",
            "LIPA_CONFIRM_PASSWORD",
        ))
}

#[must_use]
pub fn logout() -> Command {
    Command::new("logout").about("Forget the persisted session")
}

#[must_use]
pub fn whoami() -> Command {
    Command::new("whoami").about("Show the logged-in user")
}

#[must_use]
pub fn links() -> Command {
    Command::new("links")
        .about("List, create or delete payment links")
        .args_conflicts_with_subcommands(true)
        .arg(
            Arg::new("search")
                .short('s')
                .long("search")
                .help("Match recipient or description, ignoring case"),
        )
        .arg(
            Arg::new("status")
                .long("status")
                .help("Only links with this status: paid, sent, expired")
                .value_parser(|s: &str| s.parse::<LinkStatus>().map_err(|e| e.to_string())),
        )
        .subcommand(
            Command::new("create")
                .about("Check a new payment link and print the draft")
                .arg(
                    Arg::new("description")
                        .short('d')
                        .long("description")
                        .help("What the payment is for")
                        .required(true),
                )
                .arg(
                    Arg::new("whatsapp")
                        .short('w')
                        .long("whatsapp")
                        .help("Recipient WhatsApp number, digits with an optional leading +")
                        .required(true),
                )
                .arg(
                    Arg::new("amount")
                        .short('a')
                        .long("amount")
                        .help("Amount in KES")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("delete").about("Delete a payment link").arg(
                Arg::new("id")
                    .long("id")
                    .help("Link id as shown by `lipa links`")
                    .required(true),
            ),
        )
}
