use crate::cli::globals::GlobalArgs;
use crate::links::{self, LinkStatus, NewLink, PaymentLink, Summary};
use crate::session::SilentNotifier;
use anyhow::{bail, Result};
use tracing::debug;

#[derive(Debug)]
pub enum Command {
    List {
        search: Option<String>,
        status: Option<LinkStatus>,
    },
    Create(NewLink),
    Delete {
        id: String,
    },
}

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub command: Command,
}

/// Run a links command for the logged-in user.
/// # Errors
/// Returns an error if nobody is logged in, the new link is invalid or the id is unknown.
pub fn execute(args: &Args) -> Result<()> {
    let store = args.globals.open_session(Box::new(SilentNotifier))?;

    let Some(identity) = store.identity() else {
        bail!("Not logged in. Run `lipa login` first.");
    };
    debug!("Links command for user {}", identity.id);

    let output = match &args.command {
        Command::List { search, status } => list(search.as_deref(), *status),
        Command::Create(form) => create(form)?,
        Command::Delete { id } => delete(id)?,
    };

    println!("{output}");

    Ok(())
}

fn list(search: Option<&str>, status: Option<LinkStatus>) -> String {
    let all = links::mock_links();
    let shown = links::filter_status(links::search(&all, search.unwrap_or_default()), status);

    let summary = Summary::of(&all);
    format!(
        "{}\n\n{}\nPaid: {}  Sent: {}  Expired: {}  Total paid: {}",
        links::render_table(&shown),
        footer(&shown, all.len()),
        summary.paid,
        summary.sent,
        summary.expired,
        links::format_amount(summary.total_paid)
    )
}

fn create(form: &NewLink) -> Result<String> {
    let amount = form.validate()?;

    Ok(format!(
        "Payment link created successfully!\n\n  Description: {}\n  WhatsApp:    {}\n  Amount:      {}",
        form.description.trim(),
        form.whatsapp_number.trim(),
        links::format_amount(amount)
    ))
}

fn delete(id: &str) -> Result<String> {
    let mut all = links::mock_links();
    let total = all.len();

    if !links::remove(&mut all, id) {
        bail!("No payment link with id {id}");
    }

    let shown: Vec<&PaymentLink> = all.iter().collect();
    Ok(format!(
        "Payment link deleted successfully!\n\n{}\n\n{}",
        links::render_table(&shown),
        footer(&shown, total)
    ))
}

fn footer(shown: &[&PaymentLink], total: usize) -> String {
    format!("{} of {} links", shown.len(), total)
}
