use super::{LinkStatus, PaymentLink};

fn link(
    id: &str,
    recipient: &str,
    description: &str,
    amount: f64,
    date_created: &str,
    status: LinkStatus,
    slug: &str,
) -> PaymentLink {
    PaymentLink {
        id: id.to_string(),
        recipient: recipient.to_string(),
        description: description.to_string(),
        amount,
        date_created: date_created.to_string(),
        status,
        link: format!("https://lipa.app/pay/{slug}"),
    }
}

/// Dashboard seed data. There is no links backend yet.
#[must_use]
pub fn mock_links() -> Vec<PaymentLink> {
    vec![
        link(
            "1",
            "John Doe",
            "Website Development",
            50_000.0,
            "2025-01-15",
            LinkStatus::Paid,
            "abc123",
        ),
        link(
            "2",
            "Jane Smith",
            "Logo Design",
            15_000.0,
            "2025-01-14",
            LinkStatus::Sent,
            "def456",
        ),
        link(
            "3",
            "Mike Johnson",
            "Mobile App UI",
            75_000.0,
            "2025-01-12",
            LinkStatus::Expired,
            "ghi789",
        ),
        link(
            "4",
            "Sarah Wilson",
            "Consultation Fee",
            25_000.0,
            "2025-01-10",
            LinkStatus::Paid,
            "jkl012",
        ),
    ]
}
