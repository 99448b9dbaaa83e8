use crate::cli::actions::{links, server, session, Action};
use anyhow::Result;

/// Execute the provided action.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Server(args) => server::execute(args).await,
        Action::Login(args) => session::login(args).await,
        Action::Signup(args) => session::signup(args).await,
        Action::Logout(globals) => session::logout(&globals),
        Action::Whoami(globals) => session::whoami(&globals),
        Action::Links(args) => links::execute(&args),
        Action::OpenApi => server::print_openapi(),
    }
}
