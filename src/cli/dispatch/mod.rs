use crate::cli::{
    actions::{links, server, session, Action},
    globals::GlobalArgs,
};
use crate::links::NewLink;
use crate::session::SignupForm;
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;
use std::path::PathBuf;
use url::Url;

fn required(matches: &clap::ArgMatches, id: &str) -> Result<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .with_context(|| format!("missing required argument: --{id}"))
}

fn globals(matches: &clap::ArgMatches) -> Result<GlobalArgs> {
    let api_url = required(matches, "api-url")?;
    Url::parse(&api_url).context("invalid API_URL")?;

    let session_dir = matches.get_one::<String>("session-dir").map(PathBuf::from);

    Ok(GlobalArgs::new(api_url, session_dir))
}

fn links_command(matches: &clap::ArgMatches) -> Result<links::Command> {
    match matches.subcommand() {
        Some(("create", sub)) => Ok(links::Command::Create(NewLink {
            description: required(sub, "description")?,
            whatsapp_number: required(sub, "whatsapp")?,
            amount: required(sub, "amount")?,
        })),
        Some(("delete", sub)) => Ok(links::Command::Delete {
            id: required(sub, "id")?,
        }),
        _ => Ok(links::Command::List {
            search: matches.get_one::<String>("search").cloned(),
            status: matches.get_one("status").copied(),
        }),
    }
}

/// # Errors
/// Returns an error if required arguments are missing or invalid.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some(("server", sub)) => Ok(Action::Server(server::Args {
            port: sub.get_one::<u16>("port").copied().unwrap_or(5000),
            supabase_url: required(sub, "supabase-url")?,
            supabase_service_key: SecretString::from(required(sub, "supabase-service-key")?),
        })),
        Some(("login", sub)) => Ok(Action::Login(session::LoginArgs {
            globals: globals(matches)?,
            email: required(sub, "email")?,
            password: SecretString::from(required(sub, "password")?),
        })),
        Some(("signup", sub)) => Ok(Action::Signup(session::SignupArgs {
            globals: globals(matches)?,
            form: SignupForm {
                name: required(sub, "name")?,
                email: required(sub, "email")?,
                password: SecretString::from(required(sub, "password")?),
                confirm_password: SecretString::from(required(sub, "confirm-password")?),
            },
        })),
        Some(("logout", _)) => Ok(Action::Logout(globals(matches)?)),
        Some(("whoami", _)) => Ok(Action::Whoami(globals(matches)?)),
        Some(("links", sub)) => Ok(Action::Links(links::Args {
            globals: globals(matches)?,
            command: links_command(sub)?,
        })),
        Some(("openapi", _)) => Ok(Action::OpenApi),
        _ => Err(anyhow!("unknown subcommand")),
    }
}
