use crate::cli::globals::GlobalArgs;
use crate::session::{ConsoleNotifier, SignupForm};
use anyhow::Result;
use secrecy::SecretString;

#[derive(Debug)]
pub struct LoginArgs {
    pub globals: GlobalArgs,
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug)]
pub struct SignupArgs {
    pub globals: GlobalArgs,
    pub form: SignupForm,
}

/// Log in unless a session is already active.
/// # Errors
/// Returns the session error after it has been shown to the user.
pub async fn login(args: LoginArgs) -> Result<()> {
    let store = args.globals.open_session(Box::new(ConsoleNotifier))?;

    if let Some(identity) = store.identity() {
        println!("Already logged in as {} <{}>", identity.name, identity.email);
        return Ok(());
    }

    store.login(&args.email, args.password).await?;

    Ok(())
}

/// # Errors
/// Returns the session error after it has been shown to the user.
pub async fn signup(args: SignupArgs) -> Result<()> {
    let store = args.globals.open_session(Box::new(ConsoleNotifier))?;

    store.signup(&args.form).await?;

    Ok(())
}

/// # Errors
/// Returns an error if the session store cannot be opened.
pub fn logout(globals: &GlobalArgs) -> Result<()> {
    let store = globals.open_session(Box::new(ConsoleNotifier))?;

    let was_authenticated = store.is_authenticated();

    // Also clears partial leftovers that restore ignored.
    store.logout();

    if !was_authenticated {
        println!("Not logged in");
    }

    Ok(())
}

/// # Errors
/// Returns an error if the session store cannot be opened.
pub fn whoami(globals: &GlobalArgs) -> Result<()> {
    let store = globals.open_session(Box::new(ConsoleNotifier))?;

    match store.identity() {
        Some(identity) => println!("{} <{}> ({})", identity.name, identity.email, identity.id),
        None => println!("Not logged in"),
    }

    Ok(())
}
