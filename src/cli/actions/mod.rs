pub mod links;
pub mod server;
pub mod session;

// Single dispatch point lives in run.rs.
mod run;

#[derive(Debug)]
pub enum Action {
    Server(server::Args),
    Login(session::LoginArgs),
    Signup(session::SignupArgs),
    Logout(crate::cli::globals::GlobalArgs),
    Whoami(crate::cli::globals::GlobalArgs),
    Links(links::Args),
    OpenApi,
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
