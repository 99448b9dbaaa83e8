//! Payment links as shown on the dashboard: listing, search, removal and the
//! checks run on the create form before anything is sent.

mod mock;

pub use self::mock::mock_links;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkStatus {
    Paid,
    Sent,
    Expired,
}

impl LinkStatus {
    pub const ALL: [Self; 3] = [Self::Paid, Self::Sent, Self::Expired];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Sent => "Sent",
            Self::Expired => "Expired",
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkStatus {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LinkError::UnknownStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLink {
    pub id: String,
    pub recipient: String,
    pub description: String,
    pub amount: f64,
    pub date_created: String,
    pub status: LinkStatus,
    pub link: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("unknown status '{0}', expected Paid, Sent or Expired")]
    UnknownStatus(String),

    #[error("Description is required")]
    MissingDescription,

    #[error("WhatsApp number is required")]
    MissingWhatsappNumber,

    #[error("Please enter a valid WhatsApp number")]
    InvalidWhatsappNumber,

    #[error("Amount must be a positive number")]
    InvalidAmount,
}

/// Links whose recipient or description contains `term`, ignoring case.
/// An empty term matches everything.
pub fn search<'a>(links: &'a [PaymentLink], term: &str) -> Vec<&'a PaymentLink> {
    let term = term.trim().to_lowercase();

    links
        .iter()
        .filter(|link| {
            term.is_empty()
                || link.recipient.to_lowercase().contains(&term)
                || link.description.to_lowercase().contains(&term)
        })
        .collect()
}

pub fn filter_status(links: Vec<&PaymentLink>, status: Option<LinkStatus>) -> Vec<&PaymentLink> {
    match status {
        Some(status) => links.into_iter().filter(|link| link.status == status).collect(),
        None => links,
    }
}

/// Drop the link with `id`. Returns whether one was removed.
pub fn remove(links: &mut Vec<PaymentLink>, id: &str) -> bool {
    let before = links.len();
    links.retain(|link| link.id != id);
    links.len() != before
}

/// `50000.0` -> `KES 50,000.00`
#[must_use]
pub fn format_amount(amount: f64) -> String {
    #[allow(clippy::cast_possible_truncation)]
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();

    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}KES {grouped}.{:02}", cents % 100)
}

/// Dashboard totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub paid: usize,
    pub sent: usize,
    pub expired: usize,
    pub total_paid: f64,
}

impl Summary {
    pub fn of<'a>(links: impl IntoIterator<Item = &'a PaymentLink>) -> Self {
        links.into_iter().fold(Self::default(), |mut summary, link| {
            summary.total += 1;
            match link.status {
                LinkStatus::Paid => {
                    summary.paid += 1;
                    summary.total_paid += link.amount;
                }
                LinkStatus::Sent => summary.sent += 1,
                LinkStatus::Expired => summary.expired += 1,
            }
            summary
        })
    }
}

static WHATSAPP_NUMBER: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^\+?[0-9]+$").ok());

/// The create-link form.
#[derive(Debug, Clone, Default)]
pub struct NewLink {
    pub description: String,
    pub whatsapp_number: String,
    pub amount: String,
}

impl NewLink {
    /// Returns the parsed amount when the form is complete.
    ///
    /// # Errors
    /// The first field that fails its check.
    pub fn validate(&self) -> Result<f64, LinkError> {
        if self.description.trim().is_empty() {
            return Err(LinkError::MissingDescription);
        }

        let number = self.whatsapp_number.trim();
        if number.is_empty() {
            return Err(LinkError::MissingWhatsappNumber);
        }
        if !WHATSAPP_NUMBER.as_ref().is_some_and(|re| re.is_match(number)) {
            return Err(LinkError::InvalidWhatsappNumber);
        }

        match self.amount.trim().parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
            _ => Err(LinkError::InvalidAmount),
        }
    }
}

/// Plain-text table for terminal output.
pub fn render_table(links: &[&PaymentLink]) -> String {
    let header = ["RECIPIENT", "DESCRIPTION", "AMOUNT", "DATE", "STATUS", "LINK"];
    let rows: Vec<[String; 6]> = links
        .iter()
        .map(|link| {
            [
                link.recipient.clone(),
                link.description.clone(),
                format_amount(link.amount),
                link.date_created.clone(),
                link.status.to_string(),
                link.link.clone(),
            ]
        })
        .collect();

    let mut widths = header.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[&str]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = line(&header);
    for row in &rows {
        out.push('\n');
        out.push_str(&line(&row.each_ref().map(String::as_str)));
    }
    out
}
