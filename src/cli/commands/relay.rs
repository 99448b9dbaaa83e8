use clap::{Arg, Command};

pub const DEFAULT_PORT: &str = "5000";

/// `lipa server`: run the registration relay.
#[must_use]
pub fn command() -> Command {
    Command::new("server")
        .about("Run the registration relay")
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value(DEFAULT_PORT)
                .env("PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("supabase-url")
                .long("supabase-url")
                .help("Auth gateway base URL, example: https://<project>.supabase.co")
                .env("SUPABASE_URL")
                .required(true),
        )
        .arg(
            Arg::new("supabase-service-key")
                .long("supabase-service-key")
                .help("Auth gateway service key")
                .env("SUPABASE_SERVICE_KEY")
                .hide_env_values(true)
                .required(true),
        )
}
